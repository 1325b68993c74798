use crate::core::{Pipeline, SplicePlan, SpliceSummary};
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct SpliceEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SpliceEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<SpliceSummary> {
        tracing::info!("Starting splice...");

        // 先確認輸出檔，避免算完才被拒絕
        self.pipeline.check_output()?;

        tracing::info!("Reading input files...");
        let input = self.pipeline.extract()?;
        let documents = input.documents.len();
        tracing::info!(
            "Indexed {} files ({} layers in the first)",
            documents,
            input.indexes.first().map_or(0, |index| index.layer_count())
        );

        tracing::info!("Splicing layers...");
        let output = self.pipeline.transform(input)?;
        let layer_count = output.plan.layer_count;
        let layers_per_document = output.plan.layers_per_document;
        let output_lines = output.lines.len();
        tracing::info!(
            "Spliced {} lines, {} layers per file from layer {}",
            output_lines,
            layers_per_document,
            output.plan.start_layer
        );

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(output)?;

        Ok(SpliceSummary {
            output_path: PathBuf::from(output_path),
            documents,
            layer_count,
            layers_per_document,
            output_lines,
        })
    }

    /// 只讀檔與規劃，不詢問也不寫檔
    pub fn dry_run(&self) -> Result<SplicePlan> {
        let input = self.pipeline.extract()?;
        self.pipeline.plan(&input)
    }
}
