//! Selectable sources.

use serde::{Deserialize, Serialize};

use crate::{DataSourceId, SourceId};

/// Confirmed schema of a previously onboarded ("mature") source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatureSchema {
    pub data_source_id: DataSourceId,
    /// Field names exposed by the confirmed schema.
    #[serde(default)]
    pub field_names: Vec<String>,
}

/// A source (or sub-source) the user can pick in the upload stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub id: SourceId,
    pub name: String,
    /// Whether a sub-source must be picked before the selection is complete.
    #[serde(default)]
    pub has_sub_sources: bool,
    /// Present when the source already has a confirmed schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mature: Option<MatureSchema>,
}

impl SourceDescriptor {
    pub fn new(id: SourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_sub_sources: false,
            mature: None,
        }
    }

    #[must_use]
    pub fn with_sub_sources(mut self) -> Self {
        self.has_sub_sources = true;
        self
    }

    #[must_use]
    pub fn with_mature_schema(mut self, schema: MatureSchema) -> Self {
        self.mature = Some(schema);
        self
    }

    pub fn is_mature(&self) -> bool {
        self.mature.is_some()
    }
}

/// Filter passed to the source listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceFilter {
    pub search: Option<String>,
    pub include_archived: bool,
}

impl SourceFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            include_archived: false,
        }
    }
}
