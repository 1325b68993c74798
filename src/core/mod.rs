pub mod engine;
pub mod indexer;
pub mod pipeline;
pub mod splicer;

pub use crate::domain::model::{Document, LayerIndex, SplicePlan, SpliceRange, SpliceSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Prompt, Storage};
pub use crate::utils::error::Result;
