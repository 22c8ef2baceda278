/// Sanitize raw OCR text before analysis. Strips control characters and
/// stray bytes, keeps the punctuation clinical values depend on, trims each
/// line, and drops blank lines left behind by table layout.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(
                    c,
                    '.' | ','
                        | ';'
                        | ':'
                        | '-'
                        | '/'
                        | '('
                        | ')'
                        | '['
                        | ']'
                        | '+'
                        | '='
                        | '%'
                        | '#'
                        | '&'
                        | '\''
                        | '"'
                        | '<'
                        | '>'
                        | '*'
                        | '°'
                        | '²'
                        | '³'
                        | 'µ'
                )
        })
        .collect::<String>()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase sanitized text for case-insensitive pattern scanning.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
