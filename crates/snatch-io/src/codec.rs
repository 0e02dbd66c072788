//! Document codecs
//!
//! A [`Codec`] turns text into a [`Document`] and back. Encoding always
//! produces the canonical layout:
//! - object keys sorted lexicographically
//! - 2-space indentation, with YAML sequences indented under their key
//! - unicode emitted literally, not escaped
//! - `\n` line endings and a single trailing newline
//!
//! The same document therefore always encodes to the same bytes, which is
//! what makes fingerprint comparison meaningful.

use crate::error::CodecError;
use crate::Document;
use std::fmt::{self, Debug, Display, Formatter};
use std::path::Path;

/// Text formats understood by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON (`.json`)
    Json,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
}

impl Format {
    /// Detect format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Supported file extensions (without dot)
    #[inline]
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Conversion between text and documents
///
/// Implement this trait to add support for another text format.
pub trait Codec: Debug + Default {
    /// Format this codec reads and writes
    const FORMAT: Format;

    /// Parse text into a document
    ///
    /// # Errors
    /// Returns error if the text is not valid for this format
    fn decode(&self, text: &str) -> Result<Document, CodecError>;

    /// Render a document in canonical form
    ///
    /// # Errors
    /// Returns error if the document cannot be represented in this format
    fn encode(&self, document: &Document) -> Result<String, CodecError>;

    /// Check if this codec handles the given path
    fn can_handle(&self, path: &Path) -> bool {
        Format::from_path(path) == Some(Self::FORMAT)
    }
}

/// JSON codec (`serde_json`)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    const FORMAT: Format = Format::Json;

    fn decode(&self, text: &str) -> Result<Document, CodecError> {
        Ok(serde_json::from_str(text)?)
    }

    fn encode(&self, document: &Document) -> Result<String, CodecError> {
        // to_string_pretty indents by 2 and leaves non-ASCII unescaped
        let text = serde_json::to_string_pretty(&sorted(document))?;
        Ok(finish(text))
    }
}

/// YAML codec (`serde_yaml`)
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    const FORMAT: Format = Format::Yaml;

    fn decode(&self, text: &str) -> Result<Document, CodecError> {
        if text.trim().is_empty() {
            return Ok(Document::Null);
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn encode(&self, document: &Document) -> Result<String, CodecError> {
        let mut text = String::new();
        emit_yaml(&sorted(document), 0, false, &mut text)?;
        Ok(finish(text))
    }
}

/// Write `value` as block YAML at `indent`
///
/// `inline` means the first line continues a `- ` already written by the
/// enclosing sequence. Scalars are rendered by `serde_yaml`; only the block
/// layout is done here, because `serde_yaml` writes a sequence at the same
/// column as its parent key.
fn emit_yaml(
    value: &Document,
    indent: usize,
    inline: bool,
    out: &mut String,
) -> Result<(), CodecError> {
    match value {
        Document::Object(map) if !map.is_empty() => {
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 || !inline {
                    pad(out, indent);
                }
                out.push_str(&yaml_scalar(&Document::String(key.clone()), indent)?);
                out.push(':');
                if is_block(item) {
                    out.push('\n');
                    emit_yaml(item, indent + 2, false, out)?;
                } else {
                    out.push(' ');
                    out.push_str(&yaml_scalar(item, indent)?);
                    out.push('\n');
                }
            }
        }
        Document::Array(items) if !items.is_empty() => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 || !inline {
                    pad(out, indent);
                }
                out.push_str("- ");
                if is_block(item) {
                    emit_yaml(item, indent + 2, true, out)?;
                } else {
                    out.push_str(&yaml_scalar(item, indent)?);
                    out.push('\n');
                }
            }
        }
        scalar => {
            if !inline {
                pad(out, indent);
            }
            out.push_str(&yaml_scalar(scalar, indent)?);
            out.push('\n');
        }
    }
    Ok(())
}

fn is_block(value: &Document) -> bool {
    match value {
        Document::Object(map) => !map.is_empty(),
        Document::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn pad(out: &mut String, indent: usize) {
    out.push_str(&" ".repeat(indent));
}

/// Single scalar (or empty collection) nested under a node at `indent`
///
/// Continuation lines of block scalars keep their relative indentation;
/// folded plain and quoted scalars are re-indented, which does not change
/// their value.
fn yaml_scalar(value: &Document, indent: usize) -> Result<String, CodecError> {
    let text = serde_yaml::to_string(value)?;
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let block = first.starts_with('|') || first.starts_with('>');
    let mut rendered = first.to_string();
    for line in lines {
        rendered.push('\n');
        if line.is_empty() {
            continue;
        }
        if block {
            pad(&mut rendered, indent);
            rendered.push_str(line);
        } else {
            pad(&mut rendered, indent + 2);
            rendered.push_str(line.trim_start());
        }
    }
    Ok(rendered)
}

/// Copy of `value` with every object's keys in sorted order
///
/// The document map is only guaranteed sorted when `serde_json` is built
/// without `preserve_order`, so sort explicitly.
#[must_use]
pub fn sorted(value: &Document) -> Document {
    match value {
        Document::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Document::Object(
                entries
                    .into_iter()
                    .map(|(key, val)| (key.clone(), sorted(val)))
                    .collect(),
            )
        }
        Document::Array(items) => Document::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Normalize line endings and terminate with exactly one newline
fn finish(text: String) -> String {
    let mut text = if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
