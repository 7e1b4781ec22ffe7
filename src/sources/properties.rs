//! Flat properties file format.
//!
//! Supports `key=value`, `key:value` and `key value` entries, `#` and `!` comment
//! lines, trailing-backslash line continuations and the `\t \n \r \f \uXXXX`
//! escapes. Any other escaped character stands for itself, so `\=` and `\:` can
//! appear in keys. When a key repeats, the last entry wins.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text into a map.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for a malformed `\u` escape.
///
/// # Examples
///
/// ```rust
/// use provenance_config::sources::parse_properties;
///
/// let entries = parse_properties("# endpoints\napp.host = localhost\napp.port:9000\n").unwrap();
/// assert_eq!(entries["app.host"], "localhost");
/// assert_eq!(entries["app.port"], "9000");
/// ```
pub fn parse(input: &str) -> Result<HashMap<String, String>> {
    let mut entries = HashMap::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_number = index + 1;
        let trimmed = line.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        entries.insert(unescape(key, line_number)?, unescape(value, line_number)?);
    }

    Ok(entries)
}

/// An odd number of trailing backslashes continues the line.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(WHITESPACE);
    let value = match rest.strip_prefix(['=', ':']) {
        Some(after) => after.trim_start_matches(WHITESPACE),
        None => rest,
    };
    (&line[..key_end], value)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                let decoded = if (0xD800..=0xDBFF).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => read_code_unit(&mut chars, line)?,
                        _ => return Err(parse_error(line, "unpaired surrogate in \\u escape")),
                    };
                    char::decode_utf16([unit, low]).next()
                } else {
                    char::decode_utf16([unit]).next()
                };
                match decoded {
                    Some(Ok(ch)) => out.push(ch),
                    _ => return Err(parse_error(line, "invalid surrogate in \\u escape")),
                }
            }
            Some(other) => out.push(other),
            // A lone trailing backslash is dropped.
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(parse_error(
            line,
            "malformed \\uXXXX escape, expected four hex digits",
        ));
    }
    u16::from_str_radix(&digits, 16).map_err(|e| parse_error(line, &e.to_string()))
}

fn parse_error(line: usize, message: &str) -> ConfigError {
    ConfigError::Parse {
        line,
        message: message.to_string(),
    }
}
