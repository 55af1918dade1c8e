//! Front-matter block parsing

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub const DELIMITER: &str = "---";

static KEY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)\s*:\s*(.*)$").expect("key/value pattern"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+(.*)$").expect("list item pattern"));

/// A front-matter value: either a single scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

/// Insertion-ordered key/value mapping extracted from a front-matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FieldValue)>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Scalar lookup; `None` for a missing key or a list value.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    fn set(&mut self, key: &str, value: FieldValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Appends to `key`, coercing a scalar value to a list on first append.
    /// An empty scalar is treated as an absent value, not a list element.
    fn append(&mut self, key: &str, item: String) {
        let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == key) else {
            self.entries.push((key.to_string(), FieldValue::List(vec![item])));
            return;
        };
        match &mut entry.1 {
            FieldValue::List(items) => items.push(item),
            FieldValue::Scalar(existing) => {
                let mut items = Vec::new();
                if !existing.is_empty() {
                    items.push(std::mem::take(existing));
                }
                items.push(item);
                entry.1 = FieldValue::List(items);
            }
        }
    }
}

impl fmt::Display for FrontMatter {
    /// Serializes back to a delimited block that reparses to the same mapping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DELIMITER}")?;
        for (key, value) in &self.entries {
            match value {
                FieldValue::Scalar(scalar) if scalar.is_empty() => writeln!(f, "{key}:")?,
                FieldValue::Scalar(scalar) => writeln!(f, "{key}: {scalar}")?,
                FieldValue::List(items) if items.is_empty() => writeln!(f, "{key}: []")?,
                FieldValue::List(items) => {
                    writeln!(f, "{key}:")?;
                    for item in items {
                        writeln!(f, "  - {item}")?;
                    }
                }
            }
        }
        writeln!(f, "{DELIMITER}")
    }
}

/// A source document split into its metadata mapping and Markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub meta: FrontMatter,
    pub body: String,
}

/// Splits a raw document into front matter and body. The opening delimiter is
/// strictly positional: anything other than `---` at offset 0 yields empty
/// metadata and the untouched input as body. A missing closing delimiter is
/// treated the same way.
pub fn parse_front_matter(raw: &str) -> Document {
    if !raw.starts_with(DELIMITER) {
        return Document {
            meta: FrontMatter::default(),
            body: raw.to_string(),
        };
    }
    let Some(end) = raw[DELIMITER.len()..]
        .find("\n---")
        .map(|idx| idx + DELIMITER.len())
    else {
        return Document {
            meta: FrontMatter::default(),
            body: raw.to_string(),
        };
    };

    let block = raw[DELIMITER.len()..end].trim();
    let body = raw[end + "\n---".len()..].trim().to_string();

    let mut meta = FrontMatter::default();
    let mut current_key: Option<String> = None;
    for line in block.lines() {
        if let Some(caps) = LIST_ITEM_RE.captures(line) {
            if let Some(key) = current_key.as_deref() {
                meta.append(key, clean_value(&caps[1]));
                continue;
            }
        }
        let Some(caps) = KEY_VALUE_RE.captures(line) else {
            continue;
        };
        let key = caps[1].to_string();
        let value = caps[2].trim();
        let parsed = match value {
            "" => FieldValue::Scalar(String::new()),
            "[]" => FieldValue::List(Vec::new()),
            // Block scalars are not supported and resolve to an empty string.
            "|" => FieldValue::Scalar(String::new()),
            other => FieldValue::Scalar(clean_value(other)),
        };
        meta.set(&key, parsed);
        current_key = Some(key);
    }

    Document { meta, body }
}

/// Trims and strips one layer of matching single or double quotes.
fn clean_value(value: &str) -> String {
    let trimmed = value.trim();
    let stripped = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        });
    stripped.unwrap_or(trimmed).to_string()
}
