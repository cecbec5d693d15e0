//! Response body content, either untouched bytes or transcoded text.

use serde::{Serialize, Serializer};

/// Body content handed back by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Body bytes exactly as received.
    Bytes(Vec<u8>),
    /// Body transcoded from a named charset.
    Text(String),
}

impl Content {
    /// Length in bytes. Text is measured in its UTF-8 encoding.
    pub fn byte_len(&self) -> usize {
        match self {
            Content::Bytes(bytes) => bytes.len(),
            Content::Text(text) => text.len(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.into_bytes(),
        }
    }

    /// Convert to text, replacing invalid UTF-8 sequences in byte content.
    pub fn into_text(self) -> String {
        match self {
            Content::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
            Content::Text(text) => text,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Bytes(Vec::new())
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Text(text) => serializer.serialize_str(text),
            Content::Bytes(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
        }
    }
}
