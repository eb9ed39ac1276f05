//! POSIX single-quote escaping for composed shell command lines.

/// Replace every `'` with `'\''` so the text can sit inside a single-quoted
/// shell argument.
pub fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', r"'\''")
}

/// Wrap `s` in single quotes, escaping any it contains.
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_single_quotes(s))
}
