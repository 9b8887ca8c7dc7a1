//! Line-oriented `key = 'value'` extraction for model configuration files.
//!
//! The `*.in` configuration files use a Fortran-namelist-style
//! convention: one assignment per line, values in single or double
//! quotes, an optional trailing comma. This module is a small explicit
//! extractor over that convention; a key that is absent is reported as
//! such rather than silently defaulted, so callers own their defaults.

/// Find the first assignment of `key` and return its quoted value.
///
/// Matching is exact on the key (after trimming); an assignment without
/// a quoted value does not match.
pub fn lookup<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| quoted_value(line, key))
}

/// Rewrite every assignment of `key` to the new quoted value.
///
/// Everything around the quoted span (indentation, the key, trailing
/// commas and comments) is preserved. Content without the key is
/// returned unchanged apart from newline normalization.
pub fn set_value(content: &str, key: &str, value: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        match value_span(line, key) {
            Some((start, end)) => {
                out.push_str(&line[..start]);
                out.push_str(value);
                out.push_str(&line[end..]);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// The quoted value of `key` on this line, if it carries one.
fn quoted_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (start, end) = value_span(line, key)?;
    Some(&line[start..end])
}

/// Byte span of the value between the quotes of a `key = '...'` line.
fn value_span(line: &str, key: &str) -> Option<(usize, usize)> {
    let eq = line.find('=')?;
    if line[..eq].trim() != key {
        return None;
    }
    let rhs = &line[eq + 1..];
    let open_rel = rhs.find(['\'', '"'])?;
    let quote = rhs.as_bytes()[open_rel] as char;
    let value_rel = open_rel + 1;
    let close_rel = rhs[value_rel..].find(quote)?;
    let start = eq + 1 + value_rel;
    Some((start, start + close_rel))
}
