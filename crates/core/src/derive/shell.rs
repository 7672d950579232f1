/// Quotes `s` for a POSIX shell
///
/// Strings made only of safe characters pass through unchanged; anything else
/// is single-quoted with embedded quotes spliced as `'"'"'`.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }

    let safe = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        return s.to_string();
    }

    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}
