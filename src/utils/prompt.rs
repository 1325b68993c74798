use crate::domain::ports::Prompt;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// 逐行讀取回答，直到取得 y 或 n 為止。輸入結束視為拒絕。
pub fn ask_yes_no<R: BufRead, W: Write>(question: &str, reader: &mut R, writer: &mut W) -> Result<bool> {
    loop {
        write!(writer, "{}", question)?;
        writer.flush()?;

        let mut answer = String::new();
        if reader.read_line(&mut answer)? == 0 {
            tracing::debug!("Prompt input closed, treating as 'n'");
            writeln!(writer)?;
            return Ok(false);
        }

        match answer.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => continue,
        }
    }
}

pub fn overwrite_question(path: &std::path::Path) -> String {
    format!(
        "File {} already exists, do you wish to continue? [Y/n]:",
        path.display()
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        ask_yes_no(question, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// `--yes` 時使用
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!("Auto-confirming: {}", question);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut writer = Vec::new();
        let answer = ask_yes_no("Continue? [Y/n]:", &mut reader, &mut writer).unwrap();
        (answer, String::from_utf8(writer).unwrap())
    }

    #[test]
    fn test_accepts_first_character_case_insensitive() {
        assert!(ask("Yes please\n").0);
        assert!(ask("  y\n").0);
        assert!(!ask("NO\n").0);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let (answer, output) = ask("maybe\n\nq\nn\n");
        assert!(!answer);
        assert_eq!(output.matches("Continue? [Y/n]:").count(), 4);
    }

    #[test]
    fn test_end_of_input_declines() {
        let (answer, _) = ask("what\n");
        assert!(!answer);
    }

    #[test]
    fn test_overwrite_question_names_path() {
        let question = overwrite_question(std::path::Path::new("out.gcode"));
        assert!(question.starts_with("File out.gcode already exists"));
    }
}
