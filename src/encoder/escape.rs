//! String literal escaping and name checks

/// Escape a string for use inside a double-quoted GraphQL string literal
///
/// Backslashes, quotes and every control character are neutralized, so the
/// result can never terminate the enclosing literal early.
pub fn escape_gql_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' || c == '\u{7f}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Escaped and wrapped in double quotes
pub fn quote_gql_string(s: &str) -> String {
    format!("\"{}\"", escape_gql_string(s))
}

/// `[_A-Za-z][_0-9A-Za-z]*`
pub fn is_gql_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
