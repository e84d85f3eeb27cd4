//! Post-OCR interpretation: words to lines, lines to carrier, tracking id
//! and address blocks.

pub mod aggregate;
pub mod carrier;
pub mod classify;
pub mod entities;
pub mod lines;
pub mod normalize;
pub mod tracking;

pub use aggregate::{aggregate, AddressBlock};
pub use carrier::detect_carrier;
pub use classify::{classify_lines, ClassifierState, LineClassifier, LineDecision};
pub use entities::{GazetteerRecognizer, PersonNameRecognizer};
pub use lines::reconstruct_lines;
pub use normalize::{normalize_line, normalize_lines};
pub use tracking::{contains_tracking, extract_tracking};
