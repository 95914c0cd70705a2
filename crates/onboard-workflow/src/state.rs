//! Session state owned by the workflow controller.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use onboard_map::MappingState;
use onboard_model::{
    AvailableField, CompatibilityStatus, CreatedDashboard, DataSourceId, ImportId,
    SourceDescriptor, SourceId, WidgetId,
};

use crate::Loadable;

/// Wizard stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Upload,
    Mapping,
    Widgets,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Upload => "Upload",
            Stage::Mapping => "Mapping",
            Stage::Widgets => "Widgets",
        }
    }

    /// 1-based step number shown in the wizard header.
    pub fn step(&self) -> usize {
        match self {
            Stage::Upload => 1,
            Stage::Mapping => 2,
            Stage::Widgets => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An import whose mapping the ingestion collaborator has validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedImport {
    pub import_id: ImportId,
    pub data_source_id: DataSourceId,
    /// The import has also been promoted.
    pub promoted: bool,
}

/// In-flight operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    pub processing: bool,
    pub confirming: bool,
    pub promoting: bool,
    pub checking_compatibility: bool,
    pub submitting: bool,
}

impl Pending {
    pub fn any(&self) -> bool {
        self.processing
            || self.confirming
            || self.promoting
            || self.checking_compatibility
            || self.submitting
    }
}

/// Request sequence numbers used to drop superseded responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requests {
    pub sources: u64,
    pub sub_sources: u64,
    pub compatibility: u64,
}

/// The single mutable session object.
///
/// Only [`reduce`](crate::reduce) writes to it. `session` is bumped every
/// time the wizard opens or closes; results carrying an older epoch belong
/// to a discarded session and are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub is_open: bool,
    pub session: u64,
    pub stage: Stage,

    pub fields: Loadable<Vec<AvailableField>>,
    pub sources: Loadable<Vec<SourceDescriptor>>,
    pub sub_sources: Loadable<Vec<SourceDescriptor>>,
    pub selected_source: Option<SourceId>,
    pub selected_sub_source: Option<SourceId>,

    pub import_id: Option<ImportId>,
    pub filename: Option<String>,
    pub mapping: Option<MappingState>,
    pub data_source_id: Option<DataSourceId>,
    /// Set once a confirmation succeeds; checked before any new confirm call.
    pub confirmed: Option<ConfirmedImport>,
    pub has_skipped_stages: bool,

    pub selected_widget_ids: BTreeSet<WidgetId>,
    pub compatibility: BTreeMap<WidgetId, CompatibilityStatus>,
    pub created_dashboard: Option<CreatedDashboard>,

    pub pending: Pending,
    pub requests: Requests,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed, empty state for the given epoch.
    pub(crate) fn reset(session: u64) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn selected_source_descriptor(&self) -> Option<&SourceDescriptor> {
        let id = self.selected_source.as_ref()?;
        self.sources.ready()?.iter().find(|s| &s.id == id)
    }

    /// Available fields, empty until the catalog has loaded.
    pub fn field_catalog(&self) -> &[AvailableField] {
        self.fields.ready().map_or(&[], Vec::as_slice)
    }

    /// Whether `import_id` already has a validated mapping.
    pub fn is_confirmed(&self, import_id: &ImportId) -> bool {
        self.confirmed
            .as_ref()
            .is_some_and(|c| &c.import_id == import_id)
    }

    pub fn is_widget_selected(&self, id: &WidgetId) -> bool {
        self.selected_widget_ids.contains(id)
    }
}
