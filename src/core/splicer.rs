use crate::domain::model::{Document, LayerIndex, SplicePlan, SpliceRange};
use crate::utils::error::{Result, SpliceError};

/// 確認所有檔案的層數相同，回傳共同的層數
pub fn check_layer_counts(documents: &[Document], indexes: &[LayerIndex]) -> Result<usize> {
    let first = indexes.first().ok_or(SpliceError::NoInputs)?;
    let expected = first.layer_count();

    for (document, index) in documents.iter().zip(indexes).skip(1) {
        if index.layer_count() != expected {
            return Err(SpliceError::LayerCountMismatch {
                path: document.path.clone(),
                expected,
                found: index.layer_count(),
            });
        }
    }

    Ok(expected)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Splicer;

impl Splicer {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(
        &self,
        documents: &[Document],
        indexes: &[LayerIndex],
        start_layer: usize,
    ) -> Result<SplicePlan> {
        if documents.is_empty() {
            return Err(SpliceError::NoInputs);
        }
        if documents.len() != indexes.len() {
            return Err(SpliceError::ValidationError {
                message: format!(
                    "{} documents but {} layer indexes",
                    documents.len(),
                    indexes.len()
                ),
            });
        }

        let layer_count = check_layer_counts(documents, indexes)?;
        if start_layer >= layer_count {
            return Err(SpliceError::LayerIndexOutOfRange {
                document: 0,
                layer: start_layer,
                available: layer_count,
            });
        }

        let document_count = documents.len();
        // 餘數層數全部落在最後一個檔案
        let layers_per_document = (layer_count - start_layer) / document_count;

        let mut ranges = Vec::with_capacity(document_count);
        let mut current_line = 0;
        let mut current_layer = start_layer;

        for (document, index) in indexes[..document_count - 1].iter().enumerate() {
            current_layer += layers_per_document;
            let end_line =
                index
                    .boundary(current_layer)
                    .ok_or(SpliceError::LayerIndexOutOfRange {
                        document,
                        layer: current_layer,
                        available: index.layer_count(),
                    })?;

            ranges.push(SpliceRange {
                document,
                start_line: current_line,
                end_line: Some(end_line),
                end_layer: Some(current_layer),
            });
            current_line = end_line;
        }

        // 沿用上一個切點，套用在最後一個檔案自己的行號上
        ranges.push(SpliceRange {
            document: document_count - 1,
            start_line: current_line,
            end_line: None,
            end_layer: None,
        });

        tracing::debug!(
            "Splice plan: {} layers, start layer {}, {} layers per file, last file from line {}",
            layer_count,
            start_layer,
            layers_per_document,
            current_line
        );

        Ok(SplicePlan {
            start_layer,
            layer_count,
            layers_per_document,
            ranges,
        })
    }

    pub fn apply(&self, documents: &[Document], plan: &SplicePlan) -> Result<Vec<String>> {
        let mut output = Vec::new();

        for range in &plan.ranges {
            let document = documents
                .get(range.document)
                .ok_or_else(|| SpliceError::ValidationError {
                    message: format!("Splice plan refers to missing document {}", range.document),
                })?;
            output.extend_from_slice(slice_lines(document, range.start_line, range.end_line));
        }

        Ok(output)
    }

    pub fn splice(
        &self,
        documents: &[Document],
        indexes: &[LayerIndex],
        start_layer: usize,
    ) -> Result<Vec<String>> {
        let plan = self.plan(documents, indexes, start_layer)?;
        self.apply(documents, &plan)
    }
}

/// 夾住範圍的 `lines[start..end]`：起點大於終點或超過檔尾時回傳空切片
fn slice_lines(document: &Document, start: usize, end: Option<usize>) -> &[String] {
    let len = document.line_count();
    let end = end.map_or(len, |end| end.min(len));

    if start > end {
        tracing::warn!(
            "Cut at line {} is past line {} of {}, files may not share the same structure",
            start,
            end,
            document.path.display()
        );
        return &[];
    }

    &document.lines[start..end]
}
