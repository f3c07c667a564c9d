//! Format normalization
//!
//! Turns the loosely-typed `formats` array reported by the extractor into a
//! uniform list of [`FormatDescriptor`]s, ordered from the tallest video
//! variant down. Entries without a direct link are dropped; malformed input
//! degrades to an empty list instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One downloadable variant with a direct link
///
/// Every field is always serialized; absent values become `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub quality: String,
    pub ext: Option<String>,
    pub filesize: Option<Number>,
    pub width: Option<Number>,
    pub height: Option<Number>,
    pub fps: Option<Number>,
    pub acodec: Option<String>,
    pub vcodec: Option<String>,
    pub url: String,
}

impl FormatDescriptor {
    /// Height used for ordering; absent height counts as zero
    pub fn sort_height(&self) -> f64 {
        self.height.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }
}

/// Read-only view over one raw extractor format entry
///
/// Any field may be missing or carry an unexpected JSON type, so every
/// accessor answers with an `Option`.
#[derive(Debug, Clone, Copy)]
pub struct RawFormat<'a> {
    fields: &'a serde_json::Map<String, Value>,
}

impl<'a> RawFormat<'a> {
    /// Returns `None` for `null` and any other non-object entry
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn non_empty_string(&self, key: &str) -> Option<&'a str> {
        self.string(key).filter(|s| !s.is_empty())
    }

    pub fn number(&self, key: &str) -> Option<&'a Number> {
        match self.get(key) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Direct download link, if the entry has a usable one
    pub fn url(&self) -> Option<&'a str> {
        self.non_empty_string("url")
    }

    /// Human-readable label: the format note, else the format id as text
    pub fn quality(&self) -> String {
        if let Some(note) = self.non_empty_string("format_note") {
            return note.to_string();
        }

        match self.get("format_id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(n)) if !is_zero(n) => n.to_string(),
            Some(Value::Bool(true)) => "true".to_string(),
            _ => String::new(),
        }
    }

    /// Exact size when reported, else the approximate one
    pub fn filesize(&self) -> Option<Number> {
        self.number("filesize")
            .or_else(|| self.number("filesize_approx"))
            .cloned()
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}

/// Maps one raw entry to a descriptor, skipping entries without a link
pub fn normalize_entry(entry: &Value) -> Option<FormatDescriptor> {
    let raw = RawFormat::new(entry)?;
    let url = raw.url()?;

    Some(FormatDescriptor {
        quality: raw.quality(),
        ext: raw.non_empty_string("ext").map(str::to_owned),
        filesize: raw.filesize(),
        width: raw.number("width").cloned(),
        height: raw.number("height").cloned(),
        fps: raw.number("fps").cloned(),
        acodec: raw.string("acodec").map(str::to_owned),
        vcodec: raw.string("vcodec").map(str::to_owned),
        url: url.to_string(),
    })
}

/// Normalizes the `formats` member of an extractor result
///
/// A missing or non-array `formats` member yields an empty list. The result
/// is sorted by descending height; ties keep their input order.
pub fn normalize_formats(info: &Value) -> Vec<FormatDescriptor> {
    let Some(entries) = info.get("formats").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut formats: Vec<FormatDescriptor> =
        entries.iter().filter_map(normalize_entry).collect();

    // sort_by is stable
    formats.sort_by(|a, b| b.sort_height().total_cmp(&a.sort_height()));
    formats
}
