use std::collections::HashSet;

use crate::models::ParseResult;

/// Lines of one address, in first-seen order with exact duplicates dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBlock {
    lines: Vec<String>,
    seen: HashSet<String>,
}

impl AddressBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line unless an identical one is already present.
    /// Returns whether the line was added.
    pub fn push(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if self.seen.contains(&line) {
            return false;
        }
        self.seen.insert(line.clone());
        self.lines.push(line);
        true
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, line: &str) -> bool {
        self.seen.contains(line)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn join(&self, delimiter: &str) -> String {
        self.lines.join(delimiter)
    }
}

impl<S: Into<String>> FromIterator<S> for AddressBlock {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut block = AddressBlock::new();
        for line in iter {
            block.push(line);
        }
        block
    }
}

/// Assemble the final result from the two address blocks and the tracking id
pub fn aggregate(
    sender: &AddressBlock,
    receiver: &AddressBlock,
    tracking_id: &str,
    delimiter: &str,
) -> ParseResult {
    ParseResult {
        sender_address: sender.join(delimiter),
        receiver_address: receiver.join(delimiter),
        tracking_id: tracking_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_keep_first_occurrence_order() {
        let block: AddressBlock = ["B", "A", "B", "C", "A"].into_iter().collect();
        assert_eq!(block.lines(), ["B", "A", "C"]);
        assert_eq!(block.join("|"), "B|A|C");
    }

    #[test]
    fn test_push_reports_duplicates() {
        let mut block = AddressBlock::new();
        assert!(block.push("123 MAIN ST"));
        assert!(!block.push("123 MAIN ST"));
        assert!(block.push("123 MAIN ST APT 2"));
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_aggregate_empty_blocks() {
        let result = aggregate(&AddressBlock::new(), &AddressBlock::new(), "", "|");
        assert_eq!(result, ParseResult::default());
    }

    #[test]
    fn test_aggregate_uses_delimiter() {
        let sender: AddressBlock = ["JOHN SMITH", "123 MAIN ST"].into_iter().collect();
        let receiver: AddressBlock = ["JANE DOE"].into_iter().collect();
        let result = aggregate(&sender, &receiver, "1Z999AA10123456784", " / ");
        assert_eq!(result.sender_address, "JOHN SMITH / 123 MAIN ST");
        assert_eq!(result.receiver_address, "JANE DOE");
        assert_eq!(result.tracking_id, "1Z999AA10123456784");
    }
}
