pub mod pipeline;

pub use pipeline::{parse_pipeline_config, PipelineConfig, Step};
