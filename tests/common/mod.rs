mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from labelscan for tests
pub use labelscan::{
    write_run, Carrier, DelimitedWriter, GazetteerRecognizer, LabelError, LabelJob, LabelParser,
    OcrWord, ParseResult, ParserConfig, PersonNameRecognizer, RunSummary, WordRecognizer,
};
