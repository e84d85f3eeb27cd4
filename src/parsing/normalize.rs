/// Uppercase a line and keep only `A-Z`, `0-9`, whitespace, `#`, `.`, `,`
/// and `-`, then trim. A line may normalize to the empty string.
pub fn normalize_line(line: &str) -> String {
    line.to_uppercase()
        .chars()
        .filter(|c| {
            c.is_ascii_uppercase()
                || c.is_ascii_digit()
                || c.is_whitespace()
                || matches!(c, '#' | '.' | ',' | '-')
        })
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn normalize_lines(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| normalize_line(line)).collect()
}
