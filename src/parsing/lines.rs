use crate::models::OcrWord;

/// Regroup OCR words into text lines.
///
/// Words are visited in the engine's order. A word joins the current line
/// while its top edge is within `line_gap_px` of the previously kept word;
/// otherwise the current line is closed and a new one starts. Blank words
/// and words below `min_confidence` are skipped and do not move the
/// reference position.
pub fn reconstruct_lines(words: &[OcrWord], line_gap_px: i32, min_confidence: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut last_top: Option<i32> = None;

    for word in words {
        let text = word.text.trim();
        if text.is_empty() || word.confidence < min_confidence {
            continue;
        }

        let same_line = match last_top {
            None => true,
            Some(top) => (word.top - top).abs() < line_gap_px,
        };
        if !same_line {
            lines.push(current.join(" "));
            current.clear();
        }
        current.push(text);
        last_top = Some(word.top);
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}
