//! Data model for the dashboard onboarding pipeline.
//!
//! Types here are shared by the mapping resolver, the layout packer and the
//! workflow controller, and double as the payloads exchanged with the
//! ingestion and dashboard collaborators.

#![deny(unsafe_code)]

pub mod dashboard;
pub mod enums;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod source;
pub mod widget;

pub use dashboard::{
    Compatibility, ConfirmMetadata, ConfirmReceipt, CreateDashboardRequest, CreatedDashboard,
    LayoutConfig, LayoutEntry, ProcessedFile, WidgetConfig,
};
pub use enums::{CompatibilityStatus, MappingStatus, MatchTier};
pub use error::{ModelError, Result};
pub use ids::{DataSourceId, ImportId, SourceId, WidgetId};
pub use mapping::{AvailableField, ColumnMapping, SampleValue, validate_mapping_set};
pub use source::{MatureSchema, SourceDescriptor, SourceFilter};
pub use widget::{WidgetCategory, WidgetItem};
