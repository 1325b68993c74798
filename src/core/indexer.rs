use crate::domain::model::{Document, LayerIndex};
use regex::Regex;
use std::sync::OnceLock;

/// `;LAYER:<數字>` 後面直接接換行字元，該行不能有其他內容
pub const LAYER_MARKER_PATTERN: &str = r"\A;LAYER:[0-9]+\r?\n\z";

fn layer_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(LAYER_MARKER_PATTERN).expect("layer marker pattern is valid"))
}

pub fn is_layer_boundary(line: &str) -> bool {
    layer_marker().is_match(line)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LayerIndexer;

impl LayerIndexer {
    pub fn new() -> Self {
        Self
    }

    pub fn index(&self, document: &Document) -> LayerIndex {
        let boundaries: Vec<usize> = document
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_layer_boundary(line))
            .map(|(line_num, _)| line_num)
            .collect();

        tracing::debug!(
            "Indexed {}: {} lines, {} layers",
            document.path.display(),
            document.line_count(),
            boundaries.len()
        );

        if boundaries.is_empty() {
            tracing::warn!("No layer markers found in {}", document.path.display());
        }

        LayerIndex { boundaries }
    }

    pub fn index_all(&self, documents: &[Document]) -> Vec<LayerIndex> {
        documents.iter().map(|document| self.index(document)).collect()
    }
}
