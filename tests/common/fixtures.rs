use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use labelscan::{
    GazetteerRecognizer, LabelError, LabelParser, OcrWord, ParserConfig, PersonNameRecognizer,
    WordRecognizer,
};
use std::io::Cursor;
use std::sync::Arc;

/// OCR engine that ignores the image and returns canned words
pub struct StubRecognizer {
    pub words: Vec<OcrWord>,
}

impl WordRecognizer for StubRecognizer {
    fn recognize(&self, _image: &DynamicImage) -> labelscan::Result<Vec<OcrWord>> {
        Ok(self.words.clone())
    }
}

/// OCR engine that always fails
pub struct FailingRecognizer;

impl WordRecognizer for FailingRecognizer {
    fn recognize(&self, _image: &DynamicImage) -> labelscan::Result<Vec<OcrWord>> {
        Err(LabelError::Ocr("engine crashed".to_string()))
    }
}

/// Name recognizer that accepts exactly the listed lines
pub struct ListedNames(pub Vec<String>);

impl PersonNameRecognizer for ListedNames {
    fn is_person_name(&self, text: &str) -> labelscan::Result<bool> {
        Ok(self.0.iter().any(|name| name == text))
    }
}

/// Lay out each line as words 40px apart vertically, all confidently read
pub fn words_for_lines(lines: &[&str]) -> Vec<OcrWord> {
    let mut words = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let top = 100 + row as i32 * 40;
        for (col, text) in line.split_whitespace().enumerate() {
            words.push(OcrWord::new(text, 95.0, top + (col as i32 % 2), col as i32 * 60));
        }
    }
    words
}

pub fn to_lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Encodes a small white PNG in memory
pub fn png_bytes() -> Vec<u8> {
    let img = ImageBuffer::from_fn(24, 16, |_, _| Rgb([255u8, 255u8, 255u8]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode test image");
    buf
}

/// Parser with canned OCR output and the built-in name recognizer
pub fn parser_with_words(words: Vec<OcrWord>) -> LabelParser {
    LabelParser::new(
        ParserConfig::default(),
        Arc::new(StubRecognizer { words }),
        GazetteerRecognizer::shared(),
    )
    .expect("Default config should be valid")
}

/// Parser for line-level tests; OCR is never reached
pub fn line_parser() -> LabelParser {
    parser_with_words(Vec::new())
}

/// Lines of the reference label used across tests
pub const REFERENCE_LABEL: [&str; 8] = [
    "JOHN SMITH",
    "123 MAIN ST",
    "ANYTOWN CA 90210",
    "SHIP TO",
    "JANE DOE",
    "456 OAK AVE",
    "OTHERTOWN NY 10001",
    "9400110200523080010012345678",
];
