//! Reading and writing translation dictionaries through raw JSON columns.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{
    Map,
    Serializer,
    Value,
};

use crate::attribute::AttributePath;
use crate::entity::AttributeHost;

/// Decodes a column. `None` when the column is absent or null.
///
/// Malformed JSON decodes as an empty object so reads stay total over old data.
fn read_column(host: &dyn AttributeHost, column: &str) -> Option<Value> {
    let raw = host.raw_attribute(column)?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(column, error = %e, "Malformed JSON in translatable column, treating it as empty");
            Some(Value::Object(Map::new()))
        }
    }
}

/// Reads the dictionary at `path`. `None` when nothing was ever stored there.
pub(super) fn read_dictionary(
    host: &dyn AttributeHost,
    path: &AttributePath,
) -> Option<Map<String, Value>> {
    let root = read_column(host, path.column())?;
    let node = path.segments().iter().try_fold(&root, |node, segment| node.get(segment))?;

    match node {
        Value::Object(map) => Some(map.clone()),
        Value::Null => None,
        other => {
            tracing::warn!(
                attribute = %path,
                kind = json_kind(other),
                "Translatable value is not a JSON object, treating it as empty"
            );
            Some(Map::new())
        }
    }
}

/// Writes `value` at `path`, leaving sibling keys of a nested column untouched.
///
/// A top-level `null` clears the column.
pub(super) fn write_value(
    host: &mut dyn AttributeHost,
    path: &AttributePath,
    value: Value,
    unescaped_unicode: bool,
) {
    if !path.is_nested() {
        let raw = if value.is_null() { None } else { Some(encode(&value, unescaped_unicode)) };
        host.set_raw_attribute(path.column(), raw);
        return;
    }

    let mut root = match read_column(&*host, path.column()) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    insert_at(&mut root, path.segments(), value);
    host.set_raw_attribute(path.column(), Some(encode(&Value::Object(root), unescaped_unicode)));
}

/// Removes whatever is stored at `path`.
pub(super) fn clear(host: &mut dyn AttributeHost, path: &AttributePath, unescaped_unicode: bool) {
    if !path.is_nested() {
        host.set_raw_attribute(path.column(), None);
        return;
    }

    let Some(Value::Object(mut root)) = read_column(&*host, path.column()) else {
        return;
    };
    remove_at(&mut root, path.segments());
    host.set_raw_attribute(path.column(), Some(encode(&Value::Object(root), unescaped_unicode)));
}

fn insert_at(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let child = map.entry(first.clone()).or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(child) = child {
        insert_at(child, rest, value);
    }
}

fn remove_at(map: &mut Map<String, Value>, segments: &[String]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.remove(first);
    } else if let Some(Value::Object(child)) = map.get_mut(first) {
        remove_at(child, rest);
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializes a column value. Non-ASCII characters become `\uXXXX` escapes unless `unescaped_unicode`.
#[must_use]
pub fn encode(value: &Value, unescaped_unicode: bool) -> String {
    if unescaped_unicode {
        return value.to_string();
    }

    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, AsciiFormatter);
    if let Err(e) = value.serialize(&mut serializer) {
        tracing::warn!(error = %e, "Failed to escape translatable column, writing it unescaped");
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}

/// Compact formatter that escapes every non-ASCII character as UTF-16 `\uXXXX` units.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment.get(start..index).unwrap_or_default().as_bytes())?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment.get(start..).unwrap_or_default().as_bytes())
    }
}
