#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_non_empty_list, validate_path, Validate};
    use crate::DEFAULT_START_LAYER;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "gcode-splicer")]
    #[command(about = "Splice contiguous layer ranges from several G-code files into one")]
    pub struct CliConfig {
        /// Input G-code files, spliced in the given order
        #[arg(required_unless_present = "config")]
        pub gcode_files: Vec<String>,

        /// Output file (defaults to the first input file)
        #[arg(short, long)]
        pub output_file: Option<String>,

        /// The layer to start switching at. Defaults to layer 1
        #[arg(short, long, num_args = 0..=1, default_missing_value = "1")]
        pub start_layer: Option<usize>,

        /// Load the splice job from a TOML file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Overwrite an existing output file without asking
        #[arg(short = 'y', long)]
        pub yes: bool,

        /// Print the splice plan as JSON without writing anything
        #[arg(long)]
        pub dry_run: bool,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,

        /// Emit logs as JSON
        #[arg(long)]
        pub log_json: bool,
    }

    impl CliConfig {
        /// 載入 --config 指定的 TOML，命令列參數優先
        pub fn resolve(self) -> Result<Self> {
            match self.config.as_deref() {
                Some(path) => {
                    tracing::info!("📁 Loading splice job from: {}", path);
                    let job = TomlConfig::from_file(path)?;
                    job.validate()?;
                    if let Some(name) = job.job_name() {
                        tracing::info!("Job: {}", name);
                    }
                    Ok(self.merge(job))
                }
                None => Ok(self),
            }
        }

        pub fn merge(mut self, job: TomlConfig) -> Self {
            if self.gcode_files.is_empty() {
                self.gcode_files = job.input.files;
            }
            self.output_file = self.output_file.or(job.output.path);
            self.start_layer = self.start_layer.or(job.splice.start_layer);
            self
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_files(&self) -> &[String] {
            &self.gcode_files
        }

        fn output_file(&self) -> &str {
            self.output_file
                .as_deref()
                .or_else(|| self.gcode_files.first().map(String::as_str))
                .unwrap_or_default()
        }

        fn start_layer(&self) -> usize {
            self.start_layer.unwrap_or(DEFAULT_START_LAYER)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_non_empty_list("gcode_files", &self.gcode_files)?;
            for file in &self.gcode_files {
                validate_path("gcode_files", file)?;
            }
            validate_path("output_file", self.output_file())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::try_parse_from(std::iter::once("gcode-splicer").chain(args.iter().copied())).unwrap()
        }

        #[test]
        fn test_defaults() {
            let config = parse(&["a.gcode", "b.gcode"]);
            assert_eq!(config.input_files(), ["a.gcode", "b.gcode"]);
            assert_eq!(config.output_file(), "a.gcode");
            assert_eq!(config.start_layer(), 1);
            assert!(!config.yes);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_start_layer_flag_variants() {
            assert_eq!(parse(&["a.gcode", "-s"]).start_layer(), 1);
            assert_eq!(parse(&["a.gcode", "-s", "7"]).start_layer(), 7);
            // 明確給 0 不等於省略
            assert_eq!(parse(&["a.gcode", "--start-layer", "0"]).start_layer(), 0);
            assert_eq!(parse(&["a.gcode", "--start-layer=0"]).start_layer(), 0);
        }

        #[test]
        fn test_output_flag() {
            let config = parse(&["-o", "out.gcode", "a.gcode", "b.gcode"]);
            assert_eq!(config.output_file(), "out.gcode");
        }

        #[test]
        fn test_inputs_required_without_config() {
            assert!(CliConfig::try_parse_from(["gcode-splicer"]).is_err());
            assert!(CliConfig::try_parse_from(["gcode-splicer", "--config", "job.toml"]).is_ok());
        }

        #[test]
        fn test_merge_prefers_command_line() {
            let job = TomlConfig::from_toml_str(
                "[input]\nfiles = [\"x.gcode\", \"y.gcode\"]\n[output]\npath = \"job.gcode\"\n[splice]\nstart_layer = 4\n",
            )
            .unwrap();

            let merged = parse(&["--config", "job.toml"]).merge(job.clone());
            assert_eq!(merged.input_files(), ["x.gcode", "y.gcode"]);
            assert_eq!(merged.output_file(), "job.gcode");
            assert_eq!(merged.start_layer(), 4);

            let merged = parse(&["a.gcode", "-s", "0", "-o", "cli.gcode"]).merge(job);
            assert_eq!(merged.input_files(), ["a.gcode"]);
            assert_eq!(merged.output_file(), "cli.gcode");
            assert_eq!(merged.start_layer(), 0);
        }

        #[test]
        fn test_resolve_validates_job_file() {
            use crate::utils::error::SpliceError;
            use std::io::Write;

            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[input]\nfiles = [\"a.gcode\", \"b.gcode\"]\n[splice]\nstart_layer = 2").unwrap();
            let path = file.path().to_str().unwrap();
            let resolved = parse(&["--config", path]).resolve().unwrap();
            assert_eq!(resolved.input_files(), ["a.gcode", "b.gcode"]);
            assert_eq!(resolved.start_layer(), 2);

            let mut bad = tempfile::NamedTempFile::new().unwrap();
            writeln!(bad, "[input]\nfiles = [\"a.gcode\", \"\"]").unwrap();
            let path = bad.path().to_str().unwrap();
            assert!(matches!(
                parse(&["--config", path]).resolve(),
                Err(SpliceError::InvalidConfigValueError { .. })
            ));
        }
    }
}
