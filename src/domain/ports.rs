use crate::domain::model::{Document, LayerIndex, SplicePlan};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_files(&self) -> &[String];
    fn output_file(&self) -> &str;
    fn start_layer(&self) -> usize;
}

pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// 檔案與其層索引一一對應
#[derive(Debug, Clone)]
pub struct IndexedDocuments {
    pub documents: Vec<Document>,
    pub indexes: Vec<LayerIndex>,
}

#[derive(Debug, Clone)]
pub struct SpliceOutput {
    pub plan: SplicePlan,
    pub lines: Vec<String>,
}

pub trait Pipeline {
    fn check_output(&self) -> Result<()>;
    fn extract(&self) -> Result<IndexedDocuments>;
    fn plan(&self, input: &IndexedDocuments) -> Result<SplicePlan>;
    fn transform(&self, input: IndexedDocuments) -> Result<SpliceOutput>;
    fn load(&self, output: SpliceOutput) -> Result<String>;
}
