use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Positional key of a processed attachment (`file1`, `file2`, ...).
///
/// The index is the 1-based position of the source URL in the filtered,
/// non-blank URL list. Keys order numerically, so `file10` sorts after
/// `file2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttachmentKey(usize);

impl AttachmentKey {
    /// Create a key from a 1-based position.
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Create a key from a 0-based index.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// The 1-based position this key refers to.
    pub fn position(self) -> usize {
        self.0
    }
}

impl fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file{}", self.0)
    }
}

impl Serialize for AttachmentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fetched and encoded file ready to be attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// File name presented to the recipient (e.g. `"anexo1.pdf"`).
    pub name: String,

    /// MIME content type (e.g. `"application/pdf"`).
    #[serde(rename = "type")]
    pub content_type: String,

    /// Base64-encoded file content.
    pub content: String,
}

/// Processed attachments keyed by their positional key.
pub type AttachmentMap = BTreeMap<AttachmentKey, Attachment>;
