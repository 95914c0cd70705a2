//! The workflow transition function.
//!
//! [`reduce`] is the only code that mutates [`WorkflowState`]. It never
//! performs I/O: collaborator calls are returned as [`Effect`]s and their
//! results come back as events.
//!
//! A rejected user intent returns `Err` and leaves the state untouched. A
//! failed blocking collaborator result clears its pending flag, records the
//! failure where there is a list to mark, and returns `Err` so the driver
//! can surface it. Results from a closed session or a superseded request are
//! dropped.

use std::collections::BTreeMap;

use onboard_layout::{Layout, pack};
use onboard_map::{ConfirmGate, MappingError, MappingState};
use onboard_model::{
    Compatibility, CompatibilityStatus, CreateDashboardRequest, ImportId, LayoutConfig,
    SourceDescriptor, SourceFilter, SourceId, WidgetConfig, WidgetId, WidgetItem,
    validate_mapping_set,
};

use crate::{
    ConfirmedImport, Effect, Loadable, OnboardSettings, ServiceError, ServiceOperation, Stage,
    WorkflowError, WorkflowEvent, WorkflowState,
};

/// Read-only inputs the reducer needs besides the state.
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    /// Widget library, in display order.
    pub library: Vec<WidgetItem>,
    pub settings: OnboardSettings,
}

impl WorkflowContext {
    pub fn new(library: Vec<WidgetItem>, settings: OnboardSettings) -> Self {
        Self { library, settings }
    }

    pub fn widget(&self, id: &WidgetId) -> Option<&WidgetItem> {
        self.library.iter().find(|w| &w.id == id)
    }

    /// Selected library items, in library order.
    pub fn selected_items(&self, state: &WorkflowState) -> Vec<WidgetItem> {
        self.library
            .iter()
            .filter(|w| state.is_widget_selected(&w.id))
            .cloned()
            .collect()
    }
}

type Effects = Result<Vec<Effect>, WorkflowError>;

/// Applies `event` to `state`.
pub fn reduce(state: &mut WorkflowState, event: WorkflowEvent, ctx: &WorkflowContext) -> Effects {
    tracing::debug!(
        event = event.name(),
        stage = %state.stage,
        session = state.session,
        "reduce"
    );

    match event {
        WorkflowEvent::Open => Ok(open(state)),
        WorkflowEvent::Close => {
            close(state);
            Ok(Vec::new())
        }
        event if !state.is_open => {
            if is_result(&event) {
                tracing::warn!(event = event.name(), "dropping result for a closed session");
                Ok(Vec::new())
            } else {
                Err(WorkflowError::NotOpen)
            }
        }

        WorkflowEvent::ReloadSources(filter) => reload_sources(state, filter),
        WorkflowEvent::SelectSource(id) => select_source(state, id),
        WorkflowEvent::SelectSubSource(id) => select_sub_source(state, id),
        WorkflowEvent::FileUploaded(import_id) => file_uploaded(state, import_id),
        WorkflowEvent::Continue => continue_to_mapping(state),
        WorkflowEvent::SkipToWidgets => skip_to_widgets(state, ctx),
        WorkflowEvent::ReassignTarget { column, field } => {
            edit_mapping(state, |m| m.reassign(&column, &field))
        }
        WorkflowEvent::ClearTarget { column } => edit_mapping(state, |m| m.clear(&column)),
        WorkflowEvent::ToggleIgnored { column } => {
            edit_mapping(state, |m| m.toggle_ignored(&column).map(|_| ()))
        }
        WorkflowEvent::ConfirmMapping => confirm_mapping(state, ctx),
        WorkflowEvent::ToggleWidget(id) => toggle_widget(state, ctx, id),
        WorkflowEvent::Back => back(state),
        WorkflowEvent::SubmitDashboard { name } => submit_dashboard(state, ctx, name),

        WorkflowEvent::FieldsLoaded { session, result } => {
            if is_stale(state, session, "fields") {
                return Ok(Vec::new());
            }
            match result {
                Ok(fields) => {
                    tracing::info!(count = fields.len(), "field catalog loaded");
                    if let Some(mapping) = state.mapping.as_mut() {
                        mapping.set_fields(fields.clone());
                    }
                    state.fields = Loadable::Ready(fields);
                }
                Err(error) => {
                    tracing::warn!(%error, "field catalog unavailable, continuing without it");
                    state.fields = Loadable::Failed(error.message);
                }
            }
            Ok(Vec::new())
        }

        WorkflowEvent::SourcesLoaded {
            session,
            request,
            result,
        } => {
            if is_stale(state, session, "sources") {
                return Ok(Vec::new());
            }
            if request != state.requests.sources {
                tracing::warn!(
                    request,
                    current = state.requests.sources,
                    "dropping superseded source list"
                );
                return Ok(Vec::new());
            }
            match result {
                Ok(sources) => {
                    tracing::info!(count = sources.len(), "sources loaded");
                    let still_listed = state
                        .selected_source
                        .as_ref()
                        .is_some_and(|id| sources.iter().any(|s| &s.id == id));
                    if !still_listed {
                        clear_selection(state);
                    }
                    state.sources = Loadable::Ready(sources);
                    Ok(Vec::new())
                }
                Err(error) => {
                    tracing::error!(%error, "failed to load sources");
                    state.sources = Loadable::Failed(error.message.clone());
                    Err(WorkflowError::service(ServiceOperation::ListSources, error))
                }
            }
        }

        WorkflowEvent::SubSourcesLoaded {
            session,
            request,
            result,
        } => {
            if is_stale(state, session, "sub-sources") {
                return Ok(Vec::new());
            }
            if request != state.requests.sub_sources {
                tracing::warn!(
                    request,
                    current = state.requests.sub_sources,
                    "dropping superseded sub-sources"
                );
                return Ok(Vec::new());
            }
            match result {
                Ok(sub_sources) => {
                    tracing::info!(count = sub_sources.len(), "sub-sources loaded");
                    state.sub_sources = Loadable::Ready(sub_sources);
                    Ok(Vec::new())
                }
                Err(error) => {
                    tracing::error!(%error, "failed to load sub-sources");
                    state.sub_sources = Loadable::Failed(error.message.clone());
                    state.selected_sub_source = None;
                    Err(WorkflowError::service(ServiceOperation::ListSubSources, error))
                }
            }
        }

        WorkflowEvent::FileProcessed {
            session,
            import_id,
            result,
        } => {
            if is_stale(state, session, "processed file")
                || state.import_id.as_ref() != Some(&import_id)
                || !state.pending.processing
            {
                return Ok(Vec::new());
            }
            state.pending.processing = false;
            let file = match result {
                Ok(file) => file,
                Err(error) => {
                    tracing::error!(import = %import_id, %error, "file processing failed");
                    return Err(WorkflowError::service(ServiceOperation::ProcessFile, error));
                }
            };
            validate_mapping_set(&file.mappings)?;
            tracing::info!(
                import = %import_id,
                filename = %file.filename,
                columns = file.mappings.len(),
                "file processed"
            );
            state.mapping = Some(MappingState::new(
                file.mappings,
                state.field_catalog().to_vec(),
            ));
            state.filename = Some(file.filename);
            Ok(Vec::new())
        }

        WorkflowEvent::MappingConfirmed {
            session,
            import_id,
            result,
        } => {
            if is_stale(state, session, "confirmation")
                || state.import_id.as_ref() != Some(&import_id)
                || !state.pending.confirming
            {
                return Ok(Vec::new());
            }
            state.pending.confirming = false;
            let receipt = result.map_err(|error| {
                tracing::error!(import = %import_id, %error, "mapping confirmation failed");
                WorkflowError::service(ServiceOperation::ConfirmMapping, error)
            })?;
            if let Some(mapping) = state.mapping.as_mut() {
                mapping.finalize()?;
            }
            tracing::info!(
                import = %import_id,
                data_source = %receipt.data_source_id,
                "mapping confirmed"
            );
            state.data_source_id = Some(receipt.data_source_id.clone());
            state.confirmed = Some(ConfirmedImport {
                import_id: import_id.clone(),
                data_source_id: receipt.data_source_id,
                promoted: false,
            });
            state.pending.promoting = true;
            Ok(vec![Effect::Promote { import_id }])
        }

        WorkflowEvent::Promoted {
            session,
            import_id,
            result,
        } => {
            if is_stale(state, session, "promotion") || !state.pending.promoting {
                return Ok(Vec::new());
            }
            state.pending.promoting = false;
            result.map_err(|error| {
                tracing::error!(import = %import_id, %error, "promotion failed");
                WorkflowError::service(ServiceOperation::Promote, error)
            })?;
            match state.confirmed.as_mut() {
                Some(confirmed) if confirmed.import_id == import_id => confirmed.promoted = true,
                _ => return Ok(Vec::new()),
            }
            tracing::info!(import = %import_id, "import promoted");
            let field_names = state
                .mapping
                .as_ref()
                .map(MappingState::active_field_names)
                .unwrap_or_default();
            Ok(enter_widgets(state, ctx, false, field_names))
        }

        WorkflowEvent::CompatibilityChecked {
            session,
            request,
            results,
        } => {
            if is_stale(state, session, "compatibility")
                || request != state.requests.compatibility
                || state.stage != Stage::Widgets
            {
                return Ok(Vec::new());
            }
            state.pending.checking_compatibility = false;
            apply_compatibility(state, ctx, results);
            Ok(Vec::new())
        }

        WorkflowEvent::DashboardCreated { session, result } => {
            if is_stale(state, session, "dashboard") || !state.pending.submitting {
                return Ok(Vec::new());
            }
            state.pending.submitting = false;
            let created = result.map_err(|error| {
                tracing::error!(%error, "dashboard creation failed");
                WorkflowError::service(ServiceOperation::CreateDashboard, error)
            })?;
            tracing::info!(dashboard = %created.id, "dashboard created");
            state.created_dashboard = Some(created);
            Ok(Vec::new())
        }
    }
}

/// Packs the current widget selection with the configured grid.
///
/// Submission uses the same call, so the preview and the persisted layout
/// agree for the same selection.
pub fn preview_layout(
    state: &WorkflowState,
    ctx: &WorkflowContext,
) -> Result<Layout, WorkflowError> {
    let items = ctx.selected_items(state);
    Ok(pack(&items, ctx.settings.layout)?)
}

// =============================================================================
// SESSION
// =============================================================================

fn is_result(event: &WorkflowEvent) -> bool {
    matches!(
        event,
        WorkflowEvent::FieldsLoaded { .. }
            | WorkflowEvent::SourcesLoaded { .. }
            | WorkflowEvent::SubSourcesLoaded { .. }
            | WorkflowEvent::FileProcessed { .. }
            | WorkflowEvent::MappingConfirmed { .. }
            | WorkflowEvent::Promoted { .. }
            | WorkflowEvent::CompatibilityChecked { .. }
            | WorkflowEvent::DashboardCreated { .. }
    )
}

fn is_stale(state: &WorkflowState, session: u64, what: &'static str) -> bool {
    let stale = session != state.session;
    if stale {
        tracing::warn!(
            what,
            session,
            current = state.session,
            "dropping result from an old session"
        );
    }
    stale
}

fn open(state: &mut WorkflowState) -> Vec<Effect> {
    if state.is_open {
        return Vec::new();
    }
    *state = WorkflowState::reset(state.session + 1);
    state.is_open = true;
    state.fields = Loadable::Loading;
    state.sources = Loadable::Loading;
    state.requests.sources = 1;
    tracing::info!(session = state.session, "onboarding opened");
    vec![
        Effect::LoadFields,
        Effect::LoadSources {
            request: state.requests.sources,
            filter: SourceFilter::default(),
        },
    ]
}

fn close(state: &mut WorkflowState) {
    if state.is_open {
        tracing::info!(session = state.session, stage = %state.stage, "onboarding closed");
    }
    *state = WorkflowState::reset(state.session + 1);
}

// =============================================================================
// UPLOAD STAGE
// =============================================================================

fn require_stage(
    state: &WorkflowState,
    stage: Stage,
    action: &'static str,
) -> Result<(), WorkflowError> {
    if state.stage == stage {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition {
            stage: state.stage,
            action,
        })
    }
}

fn clear_selection(state: &mut WorkflowState) {
    state.selected_source = None;
    state.selected_sub_source = None;
    state.sub_sources = Loadable::NotLoaded;
    state.requests.sub_sources += 1;
    discard_upload(state);
}

/// Drops the uploaded file and its draft, which belong to the selection they
/// were processed under. A processing result still in flight is ignored.
fn discard_upload(state: &mut WorkflowState) {
    if let Some(import_id) = state.import_id.take() {
        tracing::info!(import = %import_id, "selection changed, upload discarded");
    }
    state.filename = None;
    state.mapping = None;
    state.pending.processing = false;
}

fn reload_sources(state: &mut WorkflowState, filter: SourceFilter) -> Effects {
    require_stage(state, Stage::Upload, "reload sources")?;
    state.requests.sources += 1;
    state.sources = Loadable::Loading;
    Ok(vec![Effect::LoadSources {
        request: state.requests.sources,
        filter,
    }])
}

fn select_source(state: &mut WorkflowState, id: SourceId) -> Effects {
    require_stage(state, Stage::Upload, "select a source")?;
    let sources = state
        .sources
        .ready()
        .ok_or(WorkflowError::ContextNotReady {
            reason: "sources have not loaded",
        })?;
    let has_sub_sources = sources
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| WorkflowError::UnknownSource(id.clone()))?
        .has_sub_sources;

    tracing::info!(source = %id, has_sub_sources, "source selected");
    clear_selection(state);
    state.selected_source = Some(id.clone());
    if !has_sub_sources {
        return Ok(Vec::new());
    }
    state.sub_sources = Loadable::Loading;
    Ok(vec![Effect::LoadSubSources {
        request: state.requests.sub_sources,
        source: id,
    }])
}

fn select_sub_source(state: &mut WorkflowState, id: Option<SourceId>) -> Effects {
    require_stage(state, Stage::Upload, "select a sub-source")?;
    if let Some(id) = &id {
        let listed = state
            .sub_sources
            .ready()
            .is_some_and(|list| list.iter().any(|s| &s.id == id));
        if !listed {
            return Err(WorkflowError::UnknownSource(id.clone()));
        }
    }
    if state.selected_sub_source != id {
        discard_upload(state);
    }
    state.selected_sub_source = id;
    Ok(Vec::new())
}

/// The selected source, once the whole selection context has resolved.
fn resolved_source(state: &WorkflowState) -> Result<&SourceDescriptor, WorkflowError> {
    match &state.sources {
        Loadable::Ready(_) => {}
        Loadable::Failed(_) => {
            return Err(WorkflowError::ContextNotReady {
                reason: "sources failed to load",
            });
        }
        Loadable::NotLoaded | Loadable::Loading => {
            return Err(WorkflowError::ContextNotReady {
                reason: "sources are still loading",
            });
        }
    }
    let source = state
        .selected_source_descriptor()
        .ok_or(WorkflowError::NoSourceSelected)?;
    if source.has_sub_sources {
        match &state.sub_sources {
            Loadable::Ready(list) if !list.is_empty() && state.selected_sub_source.is_none() => {
                return Err(WorkflowError::NoSubSourceSelected(source.id.clone()));
            }
            Loadable::Ready(_) => {}
            Loadable::Failed(_) => {
                return Err(WorkflowError::ContextNotReady {
                    reason: "sub-sources failed to load",
                });
            }
            Loadable::NotLoaded | Loadable::Loading => {
                return Err(WorkflowError::ContextNotReady {
                    reason: "sub-sources are still loading",
                });
            }
        }
    }
    Ok(source)
}

fn file_uploaded(state: &mut WorkflowState, import_id: ImportId) -> Effects {
    require_stage(state, Stage::Upload, "upload a file")?;
    if state.pending.processing {
        return Err(WorkflowError::Busy {
            operation: ServiceOperation::ProcessFile,
        });
    }
    resolved_source(state)?;

    tracing::info!(import = %import_id, "file uploaded");
    state.import_id = Some(import_id.clone());
    state.filename = None;
    state.mapping = None;
    state.pending.processing = true;
    Ok(vec![Effect::ProcessFile { import_id }])
}

fn continue_to_mapping(state: &mut WorkflowState) -> Effects {
    require_stage(state, Stage::Upload, "continue to mapping")?;
    resolved_source(state)?;
    if state.pending.processing {
        return Err(WorkflowError::Busy {
            operation: ServiceOperation::ProcessFile,
        });
    }
    if state.mapping.is_none() {
        return Err(WorkflowError::NoDraft);
    }
    state.stage = Stage::Mapping;
    tracing::info!(stage = %state.stage, "stage entered");
    Ok(Vec::new())
}

fn skip_to_widgets(state: &mut WorkflowState, ctx: &WorkflowContext) -> Effects {
    require_stage(state, Stage::Upload, "skip to widgets")?;
    let source = resolved_source(state)?;
    let schema = source
        .mature
        .clone()
        .ok_or_else(|| WorkflowError::SourceNotMature(source.id.clone()))?;

    tracing::info!(
        source = %source.id,
        data_source = %schema.data_source_id,
        "skipping to widgets"
    );
    state.data_source_id = Some(schema.data_source_id);
    Ok(enter_widgets(state, ctx, true, schema.field_names))
}

// =============================================================================
// MAPPING STAGE
// =============================================================================

fn edit_mapping(
    state: &mut WorkflowState,
    edit: impl FnOnce(&mut MappingState) -> Result<(), MappingError>,
) -> Effects {
    require_stage(state, Stage::Mapping, "edit the mapping")?;
    if state.pending.confirming || state.pending.promoting {
        return Err(WorkflowError::Busy {
            operation: ServiceOperation::ConfirmMapping,
        });
    }
    let mapping = state.mapping.as_mut().ok_or(WorkflowError::NoDraft)?;
    edit(mapping)?;
    Ok(Vec::new())
}

fn confirm_mapping(state: &mut WorkflowState, ctx: &WorkflowContext) -> Effects {
    if state.pending.confirming || state.pending.promoting {
        tracing::debug!("confirmation already in flight");
        return Ok(Vec::new());
    }

    let already_confirmed = state
        .confirmed
        .as_ref()
        .filter(|c| state.import_id.as_ref() == Some(&c.import_id))
        .map(|c| (c.import_id.clone(), c.promoted));
    if let Some((import_id, promoted)) = already_confirmed {
        if !promoted {
            tracing::info!(import = %import_id, "mapping already confirmed, retrying promotion");
            state.pending.promoting = true;
            return Ok(vec![Effect::Promote { import_id }]);
        }
        tracing::info!(import = %import_id, "mapping already confirmed");
        if state.stage != Stage::Mapping {
            return Ok(Vec::new());
        }
        let field_names = match state.mapping.as_mut() {
            Some(mapping) => {
                mapping.finalize()?;
                mapping.active_field_names()
            }
            None => Vec::new(),
        };
        return Ok(enter_widgets(state, ctx, false, field_names));
    }

    require_stage(state, Stage::Mapping, "confirm the mapping")?;
    let import_id = state.import_id.clone().ok_or(WorkflowError::NoDraft)?;
    let mapping = state.mapping.as_ref().ok_or(WorkflowError::NoDraft)?;
    if let ConfirmGate::Blocked {
        conflicts,
        needs_attention,
    } = mapping.gate()
    {
        return Err(MappingError::GateBlocked {
            conflicts: conflicts.len(),
            needs_attention: needs_attention.len(),
        }
        .into());
    }
    let source_id = state
        .selected_source
        .clone()
        .ok_or(WorkflowError::NoSourceSelected)?;

    let effect = Effect::ConfirmMapping {
        import_id: import_id.clone(),
        mappings: mapping.mappings().to_vec(),
        filename: state.filename.clone().unwrap_or_default(),
        source_id,
        sub_source_id: state.selected_sub_source.clone(),
    };
    tracing::info!(import = %import_id, "submitting mapping confirmation");
    state.pending.confirming = true;
    Ok(vec![effect])
}

// =============================================================================
// WIDGETS STAGE
// =============================================================================

fn enter_widgets(
    state: &mut WorkflowState,
    ctx: &WorkflowContext,
    skipped: bool,
    field_names: Vec<String>,
) -> Vec<Effect> {
    state.stage = Stage::Widgets;
    state.has_skipped_stages = skipped;
    state.selected_widget_ids.clear();
    state.compatibility.clear();
    state.created_dashboard = None;
    state.requests.compatibility += 1;
    tracing::info!(stage = %state.stage, skipped, "stage entered");

    if ctx.library.is_empty() {
        return Vec::new();
    }
    state.pending.checking_compatibility = true;
    vec![Effect::CheckCompatibility {
        request: state.requests.compatibility,
        widget_ids: ctx.library.iter().map(|w| w.id.clone()).collect(),
        field_names,
    }]
}

fn apply_compatibility(
    state: &mut WorkflowState,
    ctx: &WorkflowContext,
    results: Vec<(WidgetId, Result<Compatibility, ServiceError>)>,
) {
    let mut statuses = BTreeMap::new();
    for (id, result) in results {
        match result {
            Ok(compatibility) => {
                statuses.insert(id, compatibility.status);
            }
            Err(error) => {
                tracing::warn!(widget = %id, %error, "compatibility unavailable");
            }
        }
    }

    let near_miss = ctx.settings.widgets.auto_select_near_miss;
    let recommended: Vec<_> = ctx
        .library
        .iter()
        .filter(|w| match statuses.get(&w.id) {
            Some(CompatibilityStatus::Supported) => true,
            Some(CompatibilityStatus::NearMiss) => near_miss,
            _ => false,
        })
        .map(|w| w.id.clone())
        .collect();
    tracing::info!(
        checked = statuses.len(),
        recommended = recommended.len(),
        "widget compatibility checked"
    );
    state.selected_widget_ids.extend(recommended);
    state.compatibility = statuses;
}

fn toggle_widget(state: &mut WorkflowState, ctx: &WorkflowContext, id: WidgetId) -> Effects {
    require_stage(state, Stage::Widgets, "select widgets")?;
    if ctx.widget(&id).is_none() {
        return Err(WorkflowError::UnknownWidget(id));
    }
    if !state.selected_widget_ids.remove(&id) {
        state.selected_widget_ids.insert(id);
    }
    Ok(Vec::new())
}

fn back(state: &mut WorkflowState) -> Effects {
    match state.stage {
        Stage::Upload => Err(WorkflowError::NoPreviousStage(Stage::Upload)),
        Stage::Mapping => {
            if state.pending.confirming || state.pending.promoting {
                return Err(WorkflowError::Busy {
                    operation: ServiceOperation::ConfirmMapping,
                });
            }
            state.stage = Stage::Upload;
            state.import_id = None;
            state.filename = None;
            state.mapping = None;
            tracing::info!(stage = %state.stage, "went back, mapping draft discarded");
            Ok(Vec::new())
        }
        Stage::Widgets => {
            if state.pending.submitting {
                return Err(WorkflowError::Busy {
                    operation: ServiceOperation::CreateDashboard,
                });
            }
            state.selected_widget_ids.clear();
            state.compatibility.clear();
            state.pending.checking_compatibility = false;
            state.requests.compatibility += 1;
            if state.has_skipped_stages {
                state.stage = Stage::Upload;
                state.has_skipped_stages = false;
                state.data_source_id = None;
                clear_selection(state);
                tracing::info!(stage = %state.stage, "went back, source selection cleared");
            } else {
                state.stage = Stage::Mapping;
                tracing::info!(stage = %state.stage, "went back, confirmed mapping kept");
            }
            Ok(Vec::new())
        }
    }
}

fn submit_dashboard(
    state: &mut WorkflowState,
    ctx: &WorkflowContext,
    name: Option<String>,
) -> Effects {
    require_stage(state, Stage::Widgets, "submit the dashboard")?;
    if state.pending.submitting {
        tracing::debug!("dashboard submission already in flight");
        return Ok(Vec::new());
    }
    if let Some(created) = &state.created_dashboard {
        tracing::info!(dashboard = %created.id, "dashboard already created");
        return Ok(Vec::new());
    }
    let data_source_id = state
        .data_source_id
        .clone()
        .ok_or(WorkflowError::NoDataSource)?;
    if state.selected_widget_ids.is_empty() {
        return Err(WorkflowError::NoWidgetsSelected);
    }

    let layout = preview_layout(state, ctx)?;
    let enabled_widgets: Vec<_> = ctx
        .selected_items(state)
        .into_iter()
        .map(|w| w.id)
        .collect();
    let widget_settings = enabled_widgets
        .iter()
        .map(|id| (id.clone(), serde_json::Value::Object(serde_json::Map::new())))
        .collect();
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ctx.settings.dashboard.default_name.clone());

    let request = CreateDashboardRequest {
        name,
        data_source_id,
        widget_config: WidgetConfig {
            enabled_widgets,
            widget_settings,
        },
        layout_config: LayoutConfig {
            layouts: layout.entries(),
        },
    };
    tracing::info!(
        name = %request.name,
        widgets = request.widget_config.enabled_widgets.len(),
        height = layout.height(),
        "submitting dashboard"
    );
    state.pending.submitting = true;
    Ok(vec![Effect::CreateDashboard { request }])
}
