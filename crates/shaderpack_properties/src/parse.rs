//! Line-oriented key/value parser.
//!
//! Parsing is best-effort: there is no input that fails to parse, malformed
//! constructs are kept as literal text instead.

use std::collections::BTreeMap;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split text into logical lines.
///
/// Comment and blank lines are dropped. A natural line ending in an odd number
/// of backslashes continues onto the next one, whose leading whitespace is
/// skipped.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for natural in normalized.split(['\n', '\r']) {
        let trimmed = natural.trim_start_matches(is_blank);

        if !continuing
            && (trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!'))
        {
            continue;
        }

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
            continue;
        }

        current.push_str(trimmed);
        lines.push(std::mem::take(&mut current));
        continuing = false;
    }

    if continuing {
        lines.push(current);
    }

    lines
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &[char]) -> (&[char], &[char]) {
    let len = line.len();
    let mut key_end = len;
    let mut value_start = len;
    let mut has_separator = false;
    let mut escaped = false;

    for (i, &c) in line.iter().enumerate() {
        if !escaped && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    while value_start < len {
        let c = line[value_start];
        if is_blank(c) {
            value_start += 1;
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            value_start += 1;
        } else {
            break;
        }
    }

    (&line[..key_end], &line[value_start..])
}

fn hex_unit(chars: &[char]) -> Option<u16> {
    if chars.len() < 4 {
        return None;
    }
    let digits: String = chars[..4].iter().collect();
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(&digits, 16).ok()
}

/// Resolve backslash escapes.
///
/// `\uXXXX` escapes are UTF-16 code units, so a surrogate pair written as two
/// escapes decodes to one character. A malformed `\u` escape is copied through
/// unchanged.
fn unescape(raw: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let c = raw[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&next) = raw.get(i) else {
            break;
        };
        i += 1;

        match next {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'u' => {
                let Some(unit) = hex_unit(&raw[i..]) else {
                    out.push_str("\\u");
                    continue;
                };
                i += 4;

                let mut units = vec![unit];
                if (0xD800..0xDC00).contains(&unit)
                    && raw.get(i) == Some(&'\\')
                    && raw.get(i + 1) == Some(&'u')
                {
                    if let Some(low) = hex_unit(&raw[i + 2..]) {
                        if (0xDC00..0xE000).contains(&low) {
                            units.push(low);
                            i += 6;
                        }
                    }
                }

                out.extend(char::decode_utf16(units).map(|r| r.unwrap_or('\u{fffd}')));
            }
            other => out.push(other),
        }
    }

    out
}

/// Parse properties text into an ordered map. Later keys overwrite earlier ones.
pub(crate) fn parse_entries(text: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();

    for line in logical_lines(text) {
        let chars: Vec<char> = line.chars().collect();
        let (key, value) = split_entry(&chars);
        entries.insert(unescape(key), unescape(value));
    }

    entries
}
