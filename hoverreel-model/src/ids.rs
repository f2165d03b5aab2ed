use crate::error::ModelError;

/// Identifier of a content item as issued by the catalog.
///
/// Catalog ids are opaque strings; the preview subsystem only compares and
/// forwards them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "String", into = "String")
)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::InvalidId(
                "Content ID cannot be empty".to_string(),
            ));
        }
        Ok(ContentId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentId::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl TryFrom<&str> for ContentId {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ContentId::new(value)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
