//! Validated identifier newtypes.
//!
//! Identifiers arrive as plain strings from the collaborators. Each newtype
//! trims its input and rejects blank values, both at construction and when
//! deserialized.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::EmptyId { kind: $kind, value });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an uploaded file awaiting processing.
    ImportId,
    "import id"
);
string_id!(
    /// Identifier of a data source produced by a confirmed mapping.
    DataSourceId,
    "data source id"
);
string_id!(
    /// Identifier of a selectable source or sub-source.
    SourceId,
    "source id"
);
string_id!(
    /// Identifier of a widget in the widget library.
    WidgetId,
    "widget id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed() {
        let id = ImportId::new("  imp-1 ").unwrap();
        assert_eq!(id.as_str(), "imp-1");
    }

    #[test]
    fn blank_ids_are_rejected() {
        let err = WidgetId::new("   ").unwrap_err();
        assert!(matches!(err, ModelError::EmptyId { kind: "widget id", .. }));
    }

    #[test]
    fn deserialize_rejects_blank() {
        let result: Result<SourceId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let ok: SourceId = serde_json::from_str("\"crm\"").unwrap();
        assert_eq!(ok.to_string(), "crm");
    }
}
