use crate::core::indexer::LayerIndexer;
use crate::core::splicer::Splicer;
use crate::core::{ConfigProvider, Document, Pipeline, Prompt, SplicePlan, Storage};
use crate::domain::ports::{IndexedDocuments, SpliceOutput};
use crate::utils::error::{Result, SpliceError};
use crate::utils::prompt::overwrite_question;
use std::path::Path;

pub struct SplicePipeline<S: Storage, C: ConfigProvider, P: Prompt> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) prompt: P,
    indexer: LayerIndexer,
    splicer: Splicer,
}

impl<S: Storage, C: ConfigProvider, P: Prompt> SplicePipeline<S, C, P> {
    pub fn new(storage: S, config: C, prompt: P) -> Self {
        Self {
            storage,
            config,
            prompt,
            indexer: LayerIndexer::new(),
            splicer: Splicer::new(),
        }
    }
}

impl<S: Storage, C: ConfigProvider, P: Prompt> Pipeline for SplicePipeline<S, C, P> {
    fn check_output(&self) -> Result<()> {
        let output = Path::new(self.config.output_file());
        if !self.storage.exists(output) {
            return Ok(());
        }

        tracing::debug!("Output {} already exists, asking for confirmation", output.display());
        if self.prompt.confirm(&overwrite_question(output))? {
            Ok(())
        } else {
            Err(SpliceError::OverwriteDeclined {
                path: output.to_path_buf(),
            })
        }
    }

    fn extract(&self) -> Result<IndexedDocuments> {
        let mut documents = Vec::with_capacity(self.config.input_files().len());

        for file in self.config.input_files() {
            let path = Path::new(file);
            let text = self.storage.read_to_string(path)?;
            let document = Document::from_text(path, &text);
            tracing::debug!("Read {} ({} lines)", file, document.line_count());
            documents.push(document);
        }

        let indexes = self.indexer.index_all(&documents);
        Ok(IndexedDocuments { documents, indexes })
    }

    fn plan(&self, input: &IndexedDocuments) -> Result<SplicePlan> {
        self.splicer
            .plan(&input.documents, &input.indexes, self.config.start_layer())
    }

    fn transform(&self, input: IndexedDocuments) -> Result<SpliceOutput> {
        let plan = self.plan(&input)?;
        let lines = self.splicer.apply(&input.documents, &plan)?;
        Ok(SpliceOutput { plan, lines })
    }

    fn load(&self, output: SpliceOutput) -> Result<String> {
        let output_file = self.config.output_file();
        let data = output.lines.concat();

        tracing::debug!("Writing {} lines ({} bytes) to {}", output.lines.len(), data.len(), output_file);
        self.storage.write_file(Path::new(output_file), data.as_bytes())?;

        Ok(output_file.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, String>>,
    }

    impl MockStorage {
        fn with_files(files: &[(&str, &str)]) -> Self {
            let storage = Self::default();
            for (path, text) in files {
                storage
                    .files
                    .borrow_mut()
                    .insert(PathBuf::from(path), text.to_string());
            }
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| SpliceError::InputNotFound {
                    path: path.to_path_buf(),
                })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(
                path.to_path_buf(),
                String::from_utf8_lossy(data).into_owned(),
            );
            Ok(())
        }
    }

    struct MockConfig {
        inputs: Vec<String>,
        output: String,
        start_layer: usize,
    }

    impl ConfigProvider for MockConfig {
        fn input_files(&self) -> &[String] {
            &self.inputs
        }

        fn output_file(&self) -> &str {
            &self.output
        }

        fn start_layer(&self) -> usize {
            self.start_layer
        }
    }

    struct MockPrompt {
        answer: bool,
        asked: Cell<usize>,
    }

    impl MockPrompt {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: Cell::new(0),
            }
        }
    }

    impl Prompt for MockPrompt {
        fn confirm(&self, _question: &str) -> Result<bool> {
            self.asked.set(self.asked.get() + 1);
            Ok(self.answer)
        }
    }

    const A: &str = "G28 A\n;LAYER:0\nG1 A0\n;LAYER:1\nG1 A1\n;LAYER:2\nG1 A2\nM84 A\n";
    const B: &str = "G28 B\n;LAYER:0\nG1 B0\n;LAYER:1\nG1 B1\n;LAYER:2\nG1 B2\nM84 B\n";

    fn pipeline(output: &str, answer: bool) -> SplicePipeline<MockStorage, MockConfig, MockPrompt> {
        SplicePipeline::new(
            MockStorage::with_files(&[("a.gcode", A), ("b.gcode", B)]),
            MockConfig {
                inputs: vec!["a.gcode".to_string(), "b.gcode".to_string()],
                output: output.to_string(),
                start_layer: 1,
            },
            MockPrompt::answering(answer),
        )
    }

    #[test]
    fn test_extract_transform_load() {
        let pipeline = pipeline("out.gcode", true);
        pipeline.check_output().unwrap();
        assert_eq!(pipeline.prompt.asked.get(), 0);

        let input = pipeline.extract().unwrap();
        assert_eq!(input.indexes[0].boundaries, vec![1, 3, 5]);

        let output = pipeline.transform(input).unwrap();
        // (3 - 1) / 2 = 1，切在第 2 層
        assert_eq!(output.plan.ranges[0].end_line, Some(5));

        let path = pipeline.load(output).unwrap();
        assert_eq!(path, "out.gcode");
        assert_eq!(
            pipeline.storage.get_file("out.gcode").unwrap(),
            "G28 A\n;LAYER:0\nG1 A0\n;LAYER:1\nG1 A1\n;LAYER:2\nG1 B2\nM84 B\n"
        );
    }

    #[test]
    fn test_existing_output_declined() {
        let pipeline = pipeline("a.gcode", false);
        let err = pipeline.check_output().unwrap_err();
        assert!(matches!(err, SpliceError::OverwriteDeclined { .. }));
        assert_eq!(pipeline.prompt.asked.get(), 1);
    }

    #[test]
    fn test_existing_output_confirmed() {
        let pipeline = pipeline("a.gcode", true);
        assert!(pipeline.check_output().is_ok());
        assert_eq!(pipeline.prompt.asked.get(), 1);
    }

    #[test]
    fn test_missing_input() {
        let mut pipeline = pipeline("out.gcode", true);
        pipeline.config.inputs.push("missing.gcode".to_string());
        assert!(matches!(
            pipeline.extract(),
            Err(SpliceError::InputNotFound { .. })
        ));
    }
}
