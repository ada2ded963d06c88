//! `.properties` text codec.
//!
//! Reads the same logical-line grammar as the JVM's `Properties.load`
//! (comments, continuation lines, `=`/`:`/whitespace separators, escapes)
//! and writes entries back one per line, escaped so that reading them again
//! yields the same strings.

use indexmap::IndexMap;

/// Parse properties text into an ordered map. Later duplicates win but keep
/// the position of the first occurrence.
pub(super) fn parse(content: &str) -> IndexMap<String, String> {
    let mut entries = IndexMap::new();

    for line in logical_lines(content) {
        let (raw_key, raw_value) = split_entry(&line);
        entries.insert(unescape(raw_key), unescape(raw_value));
    }

    entries
}

/// Render entries in insertion order, one `key=value` per line.
pub(super) fn format<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut out = String::new();
    for (key, value) in entries {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Join continuation lines and drop comments and blank lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for natural in content.lines() {
        let trimmed = natural.trim_start_matches(is_blank);

        let mut current = match pending.take() {
            Some(prefix) => prefix,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                String::new()
            }
        };

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some(current);
        } else {
            current.push_str(trimmed);
            lines.push(current);
        }
    }

    if let Some(rest) = pending
        && !rest.is_empty()
    {
        lines.push(rest);
    }

    lines
}

/// Split a logical line into its still-escaped key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                separator = Some(c);
                break;
            }
            c if is_blank(c) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if separator.is_some() {
        rest = &rest[1..];
    } else {
        rest = rest.trim_start_matches(is_blank);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }

    (key, rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }

        let Some(next) = chars.next() else {
            break;
        };
        let decoded = match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            'u' => {
                let hex: String = chars.clone().take(4).collect();
                match u16::from_str_radix(&hex, 16) {
                    Ok(unit) if hex.len() == 4 => {
                        chars.nth(3);
                        units.push(unit);
                        continue;
                    }
                    // Malformed escape: keep the `u` literally.
                    _ => 'u',
                }
            }
            other => other,
        };
        let mut buf = [0u16; 2];
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    String::from_utf16_lossy(&units)
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (idx, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (' '..='~').contains(&c) => out.push(c),
            c => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_separator_styles() {
        let entries = parse("a=1\nb: 2\nc 3\nd\t=\t4\n");

        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
        assert_eq!(entries["d"], "4");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = parse("#Mon Jan 01 00:00:00 UTC 2024\n! bang comment\n\n   \nkey=value\n");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries["key"], "value");
    }

    #[test]
    fn joins_continuation_lines() {
        let entries = parse("list=a,\\\n    b,\\\n    c\nnext=1\n");

        assert_eq!(entries["list"], "a,b,c");
        assert_eq!(entries["next"], "1");
    }

    #[test]
    fn even_trailing_backslashes_do_not_continue() {
        let entries = parse("path=C\\:\\\\\nother=x\n");

        assert_eq!(entries["path"], "C:\\");
        assert_eq!(entries["other"], "x");
    }

    #[test]
    fn decodes_escapes() {
        let entries = parse("key\\ with\\ spaces=tab\\there\nuni=caf\\u00e9\n");

        assert_eq!(entries["key with spaces"], "tab\there");
        assert_eq!(entries["uni"], "café");
    }

    #[test]
    fn key_without_value_is_empty_string() {
        let entries = parse("flag\n");

        assert_eq!(entries["flag"], "");
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let entries = parse("a=1\nb=2\na=3\n");

        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(entries["a"], "3");
    }

    #[test]
    fn formats_with_jvm_compatible_escaping() {
        let mut entries = IndexMap::new();
        entries.insert("a key".to_string(), " lead".to_string());
        entries.insert("tags".to_string(), "XXX,FIXME".to_string());
        entries.insert("url".to_string(), "http://x".to_string());
        entries.insert("name".to_string(), "café".to_string());

        let text = format(&entries);

        assert_eq!(
            text,
            "a\\ key=\\ lead\ntags=XXX,FIXME\nurl=http\\://x\nname=caf\\u00E9\n"
        );
    }

    #[test]
    fn supplementary_characters_survive() {
        let mut entries = IndexMap::new();
        entries.insert("emoji".to_string(), "\u{1F600}".to_string());

        let reparsed = parse(&format(&entries));

        assert_eq!(reparsed["emoji"], "\u{1F600}");
    }
}
