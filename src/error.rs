use std::fmt;

/// Why a detail document could not be turned into a [`crate::LexicalEntry`].
///
/// Absent nested fields never produce one of these; they only drop the
/// affected slot or item.
#[derive(Debug)]
pub enum NormalizationError {
    /// The top-level JSON value is not an object.
    NotAnObject,
    /// A field was present with a type other than the declared one.
    Json(serde_json::Error),
    /// The document has no `BI` block.
    MissingCore,
}

impl NormalizationError {
    /// Message to show in place of the entry.
    pub fn user_message(&self) -> &'static str {
        "details unavailable"
    }
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::NotAnObject => write!(f, "detail document is not a JSON object"),
            NormalizationError::Json(err) => write!(f, "malformed detail document: {err}"),
            NormalizationError::MissingCore => write!(f, "detail document has no basic info"),
        }
    }
}

impl std::error::Error for NormalizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NormalizationError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NormalizationError {
    fn from(value: serde_json::Error) -> Self {
        NormalizationError::Json(value)
    }
}
