use serde::Serialize;
use std::path::PathBuf;

/// 一個 G-code 檔案的完整內容，每一行都保留原本的換行字元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// 在每個 `\n` 之後切行，最後一行可能沒有換行字元
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self::new(path, lines)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// 每層起始標記所在的行號（從 0 起算，嚴格遞增）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerIndex {
    pub boundaries: Vec<usize>,
}

impl LayerIndex {
    pub fn layer_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn boundary(&self, layer: usize) -> Option<usize> {
        self.boundaries.get(layer).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceRange {
    pub document: usize,
    pub start_line: usize,
    /// `None` 代表讀到檔尾（最後一個檔案）
    pub end_line: Option<usize>,
    /// 結束此範圍的標記所屬的層
    pub end_layer: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplicePlan {
    pub start_layer: usize,
    pub layer_count: usize,
    pub layers_per_document: usize,
    pub ranges: Vec<SpliceRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceSummary {
    pub output_path: PathBuf,
    pub documents: usize,
    pub layer_count: usize,
    pub layers_per_document: usize,
    pub output_lines: usize,
}
