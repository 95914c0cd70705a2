//! Payloads exchanged with the ingestion and dashboard collaborators.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ColumnMapping, CompatibilityStatus, DataSourceId, SourceId, WidgetId};

/// Result of processing an uploaded file: the initial mapping draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub mappings: Vec<ColumnMapping>,
    pub filename: String,
}

/// Context sent alongside a mapping confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmMetadata {
    pub filename: String,
    pub source_id: SourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_source_id: Option<SourceId>,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmReceipt {
    pub data_source_id: DataSourceId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub status: CompatibilityStatus,
}

/// Placement of one widget in the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub widget_id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub layouts: Vec<LayoutEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub enabled_widgets: Vec<WidgetId>,
    pub widget_settings: BTreeMap<WidgetId, serde_json::Value>,
}

/// Final configuration handed to the dashboard collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardRequest {
    pub name: String,
    pub data_source_id: DataSourceId,
    pub widget_config: WidgetConfig,
    pub layout_config: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDashboard {
    pub id: String,
}
