pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// 未給 `--start-layer`，或只給旗標沒給值時使用的起始層
pub const DEFAULT_START_LAYER: usize = 1;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    engine::SpliceEngine, indexer::LayerIndexer, pipeline::SplicePipeline, splicer::Splicer,
};
pub use crate::domain::model::{Document, LayerIndex, SplicePlan, SpliceRange, SpliceSummary};
pub use crate::utils::error::{Result, SpliceError};
