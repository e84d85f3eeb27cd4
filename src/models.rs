use std::fmt;

/// A single word as reported by the OCR engine
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    pub text: String,
    /// Engine certainty, 0-100
    pub confidence: f32,
    /// Top edge of the word's bounding box, in pixels
    pub top: i32,
    /// Left edge of the word's bounding box, in pixels
    pub left: i32,
}

impl OcrWord {
    pub fn new(text: impl Into<String>, confidence: f32, top: i32, left: i32) -> Self {
        Self {
            text: text.into(),
            confidence,
            top,
            left,
        }
    }
}

/// Shipping carrier printed on a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    Usps,
    Ups,
    Fedex,
    Unknown,
}

impl Carrier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::Usps => "USPS",
            Carrier::Ups => "UPS",
            Carrier::Fedex => "FEDEX",
            Carrier::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final output for one label. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub sender_address: String,
    pub receiver_address: String,
    pub tracking_id: String,
}

impl ParseResult {
    /// Column names matching the order of [`ParseResult::to_row`]
    pub const HEADER: [&'static str; 3] = ["sender_address", "receiver_address", "tracking_id"];

    pub fn is_empty(&self) -> bool {
        self.sender_address.is_empty()
            && self.receiver_address.is_empty()
            && self.tracking_id.is_empty()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.sender_address.clone(),
            self.receiver_address.clone(),
            self.tracking_id.clone(),
        ]
    }
}
