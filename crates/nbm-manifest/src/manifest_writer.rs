//! Property-style text encoding for descriptors
//!
//! Output is one `key: value` entry per line, UTF-8, with the escaping
//! rules of Java properties files. The reader accepts the full properties
//! syntax (comments, `=`/`:`/whitespace separators, line continuations,
//! `\uXXXX` escapes) so descriptors written by other tools can be checked
//! too.

use crate::errors::ManifestIoError;
use crate::manifest::NbmManifest;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Render a manifest as properties text
pub fn to_properties_string(manifest: &NbmManifest) -> String {
    let mut out = String::new();
    for (key, value) in manifest.ordered_entries() {
        out.push_str(&escape(key, true));
        out.push_str(": ");
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

/// Write manifest to a path, creating parent directories. The file is
/// written to a temporary sibling first and renamed into place.
pub fn write_to_path(manifest: &NbmManifest, output_path: &Path) -> Result<(), ManifestIoError> {
    debug!("Writing manifest to: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = to_properties_string(manifest);
    let temp_path = output_path.with_extension("mf.tmp");
    let written =
        write_temp(&temp_path, &content).and_then(|()| fs::rename(&temp_path, output_path));
    if let Err(e) = written {
        // The temp file may not exist if creating it failed.
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Manifest written successfully to: {:?}", output_path);
    info!("Total entries: {}", manifest.len());
    Ok(())
}

fn write_temp(temp_path: &Path, content: &str) -> std::io::Result<()> {
    let file = fs::File::create(temp_path)?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

/// Read a properties-style manifest file into a plain map
pub fn read_from_path(manifest_path: &Path) -> Result<HashMap<String, String>, ManifestIoError> {
    debug!("Reading manifest from: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path)?;
    let entries = parse_properties(&content)?;

    info!("Manifest loaded with {} entries", entries.len());
    Ok(entries)
}

/// Parse properties text into a map; later duplicates win
pub fn parse_properties(content: &str) -> Result<HashMap<String, String>, ManifestIoError> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut entries = HashMap::new();

    let mut index = 0;
    while index < lines.len() {
        let line_number = index + 1;
        let first = trim_leading(lines[index]);
        index += 1;

        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let mut logical = first.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.get(index) {
                Some(next) => {
                    logical.push_str(trim_leading(next));
                    index += 1;
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn trim_leading(line: &str) -> &str {
    line.trim_start_matches(is_blank)
}

/// An odd run of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                value_start = i + c.len_utf8();
                break;
            }
            _ => {}
        }
    }

    let mut rest = trim_leading(&line[value_start..]);
    if !has_separator {
        if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
            rest = trim_leading(stripped);
        }
    }
    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, ManifestIoError> {
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
                if (0xD800..0xDC00).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => read_code_unit(&mut chars, line)?,
                        _ => return Err(parse_error(line, "unpaired surrogate in \\u escape")),
                    };
                    let decoded = char::decode_utf16([unit, low])
                        .next()
                        .and_then(Result::ok)
                        .ok_or_else(|| parse_error(line, "invalid surrogate pair"))?;
                    out.push(decoded);
                } else {
                    let decoded = char::from_u32(u32::from(unit))
                        .ok_or_else(|| parse_error(line, "unpaired surrogate in \\u escape"))?;
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, ManifestIoError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 {
        return Err(parse_error(line, "truncated \\u escape"));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(parse_error(line, &format!("malformed \\u escape '\\u{}'", digits)));
    }
    u16::from_str_radix(&digits, 16)
        .map_err(|_| parse_error(line, &format!("malformed \\u escape '\\u{}'", digits)))
}

fn parse_error(line: usize, message: &str) -> ManifestIoError {
    ManifestIoError::Parse {
        line,
        message: message.to_string(),
    }
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
