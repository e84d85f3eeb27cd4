use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::parsing::aggregate::AddressBlock;
use crate::parsing::entities::PersonNameRecognizer;

lazy_static! {
    /// House number followed by a street word
    static ref STREET: Regex = Regex::new(r"\d+\s+[A-Z]").expect("valid street pattern");
    /// Two-letter state then a ZIP or ZIP+4
    static ref STATE_ZIP: Regex =
        Regex::new(r"\b[A-Z]{2}\s+\d{5}(-\d{4})?\b").expect("valid state/zip pattern");
}

/// Which address block new lines go to. `Receiver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    Sender,
    Receiver,
}

/// What the classifier did with one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDecision {
    /// A receiver marker such as `SHIP TO`; consumed, not kept
    Marker,
    /// A person name that opened the receiver block; kept there
    OpensReceiver,
    /// Kept in the block of the given state
    Kept(ClassifierState),
    Discarded,
}

/// Whether a line carries one of the receiver markers. `TO:` loses its colon
/// during normalization, so the bare `TO` forms count too.
pub fn is_receiver_marker(line: &str) -> bool {
    line.contains("SHIP TO") || line.contains("TO:") || line == "TO" || line.starts_with("TO ")
}

/// Street-number or state+ZIP shaped line
pub fn is_address_line(line: &str) -> bool {
    STREET.is_match(line) || STATE_ZIP.is_match(line)
}

/// Assigns lines to the sender or receiver block.
///
/// Lines are fed in label order. A receiver marker or, once the sender
/// block has content, a person name moves the classifier into `Receiver`;
/// nothing moves it back. Address-shaped lines and names are kept in the
/// current block, everything else is dropped. A line whose text was already
/// classified is dropped too, so the two blocks never share a line.
pub struct LineClassifier<'a> {
    names: &'a dyn PersonNameRecognizer,
    state: ClassifierState,
    sender: AddressBlock,
    receiver: AddressBlock,
}

impl<'a> LineClassifier<'a> {
    pub fn new(names: &'a dyn PersonNameRecognizer) -> Self {
        Self {
            names,
            state: ClassifierState::Sender,
            sender: AddressBlock::new(),
            receiver: AddressBlock::new(),
        }
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    pub fn push(&mut self, line: &str) -> Result<LineDecision> {
        if line.is_empty() || self.sender.contains(line) || self.receiver.contains(line) {
            return Ok(LineDecision::Discarded);
        }

        if is_receiver_marker(line) {
            self.state = ClassifierState::Receiver;
            debug!(line, "receiver marker");
            return Ok(LineDecision::Marker);
        }

        let is_person = self.names.is_person_name(line)?;

        if is_person && self.state == ClassifierState::Sender && !self.sender.is_empty() {
            self.state = ClassifierState::Receiver;
            self.receiver.push(line);
            debug!(line, "person name opens receiver block");
            return Ok(LineDecision::OpensReceiver);
        }

        if is_person || is_address_line(line) {
            match self.state {
                ClassifierState::Sender => self.sender.push(line),
                ClassifierState::Receiver => self.receiver.push(line),
            };
            return Ok(LineDecision::Kept(self.state));
        }

        Ok(LineDecision::Discarded)
    }

    /// Consume the classifier, returning the (sender, receiver) blocks
    pub fn finish(self) -> (AddressBlock, AddressBlock) {
        (self.sender, self.receiver)
    }
}

/// Run every line through a fresh [`LineClassifier`]
pub fn classify_lines(
    lines: &[String],
    names: &dyn PersonNameRecognizer,
) -> Result<(AddressBlock, AddressBlock)> {
    let mut classifier = LineClassifier::new(names);
    for line in lines {
        classifier.push(line)?;
    }
    let (sender, receiver) = classifier.finish();
    debug!(sender = sender.len(), receiver = receiver.len(), "classification finished");
    Ok((sender, receiver))
}
