//! Events fed into the reducer and effects it asks the driver to perform.

use onboard_model::{
    AvailableField, ColumnMapping, Compatibility, ConfirmReceipt, CreateDashboardRequest,
    CreatedDashboard, ImportId, ProcessedFile, SourceDescriptor, SourceFilter, SourceId, WidgetId,
};

use crate::ServiceError;

/// User intents and collaborator results.
///
/// Result variants carry the session epoch that issued the request, plus a
/// request number where a newer request can supersede an older one.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    // User intents
    Open,
    Close,
    ReloadSources(SourceFilter),
    SelectSource(SourceId),
    SelectSubSource(Option<SourceId>),
    FileUploaded(ImportId),
    Continue,
    SkipToWidgets,
    ReassignTarget { column: String, field: String },
    ClearTarget { column: String },
    ToggleIgnored { column: String },
    ConfirmMapping,
    ToggleWidget(WidgetId),
    Back,
    SubmitDashboard { name: Option<String> },

    // Collaborator results
    FieldsLoaded {
        session: u64,
        result: Result<Vec<AvailableField>, ServiceError>,
    },
    SourcesLoaded {
        session: u64,
        request: u64,
        result: Result<Vec<SourceDescriptor>, ServiceError>,
    },
    SubSourcesLoaded {
        session: u64,
        request: u64,
        result: Result<Vec<SourceDescriptor>, ServiceError>,
    },
    FileProcessed {
        session: u64,
        import_id: ImportId,
        result: Result<ProcessedFile, ServiceError>,
    },
    MappingConfirmed {
        session: u64,
        import_id: ImportId,
        result: Result<ConfirmReceipt, ServiceError>,
    },
    Promoted {
        session: u64,
        import_id: ImportId,
        result: Result<(), ServiceError>,
    },
    CompatibilityChecked {
        session: u64,
        request: u64,
        results: Vec<(WidgetId, Result<Compatibility, ServiceError>)>,
    },
    DashboardCreated {
        session: u64,
        result: Result<CreatedDashboard, ServiceError>,
    },
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::ReloadSources(_) => "reload_sources",
            Self::SelectSource(_) => "select_source",
            Self::SelectSubSource(_) => "select_sub_source",
            Self::FileUploaded(_) => "file_uploaded",
            Self::Continue => "continue",
            Self::SkipToWidgets => "skip_to_widgets",
            Self::ReassignTarget { .. } => "reassign_target",
            Self::ClearTarget { .. } => "clear_target",
            Self::ToggleIgnored { .. } => "toggle_ignored",
            Self::ConfirmMapping => "confirm_mapping",
            Self::ToggleWidget(_) => "toggle_widget",
            Self::Back => "back",
            Self::SubmitDashboard { .. } => "submit_dashboard",
            Self::FieldsLoaded { .. } => "fields_loaded",
            Self::SourcesLoaded { .. } => "sources_loaded",
            Self::SubSourcesLoaded { .. } => "sub_sources_loaded",
            Self::FileProcessed { .. } => "file_processed",
            Self::MappingConfirmed { .. } => "mapping_confirmed",
            Self::Promoted { .. } => "promoted",
            Self::CompatibilityChecked { .. } => "compatibility_checked",
            Self::DashboardCreated { .. } => "dashboard_created",
        }
    }
}

/// A collaborator call requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadFields,
    LoadSources {
        request: u64,
        filter: SourceFilter,
    },
    LoadSubSources {
        request: u64,
        source: SourceId,
    },
    ProcessFile {
        import_id: ImportId,
    },
    /// `confirmed_at` is stamped when the call is made.
    ConfirmMapping {
        import_id: ImportId,
        mappings: Vec<ColumnMapping>,
        filename: String,
        source_id: SourceId,
        sub_source_id: Option<SourceId>,
    },
    Promote {
        import_id: ImportId,
    },
    CheckCompatibility {
        request: u64,
        widget_ids: Vec<WidgetId>,
        field_names: Vec<String>,
    },
    CreateDashboard {
        request: CreateDashboardRequest,
    },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::LoadFields => EffectKind::LoadFields,
            Self::LoadSources { .. } => EffectKind::LoadSources,
            Self::LoadSubSources { .. } => EffectKind::LoadSubSources,
            Self::ProcessFile { .. } => EffectKind::ProcessFile,
            Self::ConfirmMapping { .. } => EffectKind::ConfirmMapping,
            Self::Promote { .. } => EffectKind::Promote,
            Self::CheckCompatibility { .. } => EffectKind::CheckCompatibility,
            Self::CreateDashboard { .. } => EffectKind::CreateDashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    LoadFields,
    LoadSources,
    LoadSubSources,
    ProcessFile,
    ConfirmMapping,
    Promote,
    CheckCompatibility,
    CreateDashboard,
}
