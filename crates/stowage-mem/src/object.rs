use bytes::Bytes;

/// A named binary blob: the unit of storage in the emulator.
///
/// Content is opaque. No content type, no size limit, no versioning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// The key the object is stored under. Case-sensitive, arbitrary.
    pub key: String,
    /// The object's bytes.
    pub content: Bytes,
}

impl Object {
    /// Create a new object from a key and its content.
    pub fn new(key: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the object has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
