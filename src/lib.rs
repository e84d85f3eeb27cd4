pub mod batch;
pub mod config;
pub mod detection;
pub mod error;
pub mod label;
pub mod models;
pub mod output;
pub mod parsing;
pub mod pipeline;

pub use batch::{process_batch, LabelJob, LabelOutcome, LabelSource};
pub use config::ParserConfig;
pub use detection::{OcrsRecognizer, WordRecognizer};
pub use error::{LabelError, Result};
pub use label::LabelParser;
pub use models::{Carrier, OcrWord, ParseResult};
pub use output::{write_run, DelimitedWriter, RowSink, RunSummary};
pub use parsing::{GazetteerRecognizer, PersonNameRecognizer};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineStep};
