//! Async driver around the reducer.
//!
//! The controller owns the state and the collaborator. Effects become
//! futures polled on the caller's task; nothing runs in parallel and every
//! result goes back through [`reduce`], so state changes stay sequential.

use std::sync::Arc;

use chrono::Utc;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};

use onboard_layout::Layout;
use onboard_model::{ConfirmMetadata, CreatedDashboard, ImportId, SourceFilter, SourceId, WidgetId};

use crate::{
    Effect, EffectKind, OnboardingService, WorkflowContext, WorkflowError, WorkflowEvent,
    WorkflowState, preview_layout, reduce,
};

/// What a confirm call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The mapping was sent to the collaborator.
    Submitted,
    /// No new submission was made for this import.
    AlreadyConfirmed,
}

pub struct WorkflowController<S> {
    service: Arc<S>,
    context: WorkflowContext,
    state: WorkflowState,
    in_flight: FuturesUnordered<BoxFuture<'static, WorkflowEvent>>,
    last_error: Option<WorkflowError>,
}

impl<S: OnboardingService> WorkflowController<S> {
    pub fn new(service: S, context: WorkflowContext) -> Self {
        Self::with_shared_service(Arc::new(service), context)
    }

    pub fn with_shared_service(service: Arc<S>, context: WorkflowContext) -> Self {
        Self {
            service,
            context,
            state: WorkflowState::new(),
            in_flight: FuturesUnordered::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// The most recent rejected intent or failed operation.
    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Number of collaborator calls not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn preview_layout(&self) -> Result<Layout, WorkflowError> {
        preview_layout(&self.state, &self.context)
    }

    /// Applies one event and schedules the effects it produces.
    pub fn dispatch(&mut self, event: WorkflowEvent) -> Result<Vec<EffectKind>, WorkflowError> {
        let closing = matches!(event, WorkflowEvent::Close);
        let name = event.name();
        match reduce(&mut self.state, event, &self.context) {
            Ok(effects) => {
                if closing {
                    self.in_flight = FuturesUnordered::new();
                    self.last_error = None;
                }
                let kinds = effects.iter().map(Effect::kind).collect();
                for effect in effects {
                    self.spawn(effect);
                }
                Ok(kinds)
            }
            Err(error) => {
                if !matches!(error, WorkflowError::Service { .. }) {
                    tracing::warn!(
                        event = name,
                        %error,
                        category = error.category().label(),
                        "event rejected"
                    );
                }
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let service = Arc::clone(&self.service);
        let session = self.state.session;
        tracing::debug!(effect = ?effect.kind(), session, "effect scheduled");

        let future = match effect {
            Effect::LoadFields => async move {
                let result = service.available_fields().await;
                WorkflowEvent::FieldsLoaded { session, result }
            }
            .boxed(),
            Effect::LoadSources { request, filter } => async move {
                let result = service.list_sources(filter).await;
                WorkflowEvent::SourcesLoaded {
                    session,
                    request,
                    result,
                }
            }
            .boxed(),
            Effect::LoadSubSources { request, source } => async move {
                let result = service.list_sub_sources(source).await;
                WorkflowEvent::SubSourcesLoaded {
                    session,
                    request,
                    result,
                }
            }
            .boxed(),
            Effect::ProcessFile { import_id } => async move {
                let result = service.process_file(import_id.clone()).await;
                WorkflowEvent::FileProcessed {
                    session,
                    import_id,
                    result,
                }
            }
            .boxed(),
            Effect::ConfirmMapping {
                import_id,
                mappings,
                filename,
                source_id,
                sub_source_id,
            } => async move {
                let metadata = ConfirmMetadata {
                    filename,
                    source_id,
                    sub_source_id,
                    confirmed_at: Utc::now(),
                };
                let result = service
                    .confirm_mapping(import_id.clone(), mappings, metadata)
                    .await;
                WorkflowEvent::MappingConfirmed {
                    session,
                    import_id,
                    result,
                }
            }
            .boxed(),
            Effect::Promote { import_id } => async move {
                let result = service.promote(import_id.clone()).await;
                WorkflowEvent::Promoted {
                    session,
                    import_id,
                    result,
                }
            }
            .boxed(),
            Effect::CheckCompatibility {
                request,
                widget_ids,
                field_names,
            } => async move {
                let mut results = Vec::with_capacity(widget_ids.len());
                for id in widget_ids {
                    let result = service.compatibility(id.clone(), field_names.clone()).await;
                    results.push((id, result));
                }
                WorkflowEvent::CompatibilityChecked {
                    session,
                    request,
                    results,
                }
            }
            .boxed(),
            Effect::CreateDashboard { request } => async move {
                let result = service.create_dashboard(request).await;
                WorkflowEvent::DashboardCreated { session, result }
            }
            .boxed(),
        };
        self.in_flight.push(future);
    }

    /// Waits for the next collaborator result and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn pump(&mut self) -> Option<Result<Vec<EffectKind>, WorkflowError>> {
        let event = self.in_flight.next().await?;
        Some(self.dispatch(event))
    }

    /// Applies results until nothing is in flight, returning the first error.
    pub async fn settle(&mut self) -> Result<(), WorkflowError> {
        let mut first_error = None;
        while let Some(result) = self.pump().await {
            if let Err(error) = result {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn drive_until(
        &mut self,
        done: impl Fn(&WorkflowState) -> bool,
    ) -> Result<(), WorkflowError> {
        while !done(&self.state) {
            match self.pump().await {
                Some(result) => {
                    result?;
                }
                None => return Err(WorkflowError::Interrupted),
            }
        }
        Ok(())
    }

    // =========================================================================
    // UPLOAD
    // =========================================================================

    /// Opens the wizard and waits for the source list.
    ///
    /// The field catalog keeps loading in the background.
    pub async fn open(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::Open)?;
        self.drive_until(|s| !s.sources.is_loading()).await
    }

    pub async fn reload_sources(&mut self, filter: SourceFilter) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::ReloadSources(filter))?;
        self.drive_until(|s| !s.sources.is_loading()).await
    }

    /// Selects a source and waits for its sub-sources, if it has any.
    pub async fn select_source(&mut self, id: SourceId) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::SelectSource(id))?;
        self.drive_until(|s| !s.sub_sources.is_loading()).await
    }

    pub fn select_sub_source(&mut self, id: Option<SourceId>) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::SelectSubSource(id)).map(drop)
    }

    /// Hands an uploaded file to the collaborator and waits for the draft.
    pub async fn upload(&mut self, import_id: ImportId) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::FileUploaded(import_id))?;
        self.drive_until(|s| !s.pending.processing).await
    }

    pub fn continue_to_mapping(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::Continue).map(drop)
    }

    pub async fn skip_to_widgets(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::SkipToWidgets)?;
        self.drive_until(|s| !s.pending.checking_compatibility).await
    }

    // =========================================================================
    // MAPPING
    // =========================================================================

    pub fn reassign(&mut self, column: &str, field: &str) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::ReassignTarget {
            column: column.to_string(),
            field: field.to_string(),
        })
        .map(drop)
    }

    pub fn clear_target(&mut self, column: &str) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::ClearTarget {
            column: column.to_string(),
        })
        .map(drop)
    }

    pub fn toggle_ignored(&mut self, column: &str) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::ToggleIgnored {
            column: column.to_string(),
        })
        .map(drop)
    }

    /// Confirms the mapping and waits until the widgets stage is ready.
    ///
    /// Calling this again for an import that is already confirmed does not
    /// contact the collaborator.
    pub async fn confirm_mapping(&mut self) -> Result<ConfirmOutcome, WorkflowError> {
        let kinds = self.dispatch(WorkflowEvent::ConfirmMapping)?;
        let outcome = if kinds.contains(&EffectKind::ConfirmMapping) {
            ConfirmOutcome::Submitted
        } else {
            ConfirmOutcome::AlreadyConfirmed
        };
        self.drive_until(|s| {
            !s.pending.confirming && !s.pending.promoting && !s.pending.checking_compatibility
        })
        .await?;
        Ok(outcome)
    }

    // =========================================================================
    // WIDGETS
    // =========================================================================

    pub fn toggle_widget(&mut self, id: WidgetId) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::ToggleWidget(id)).map(drop)
    }

    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::Back).map(drop)
    }

    /// Submits the dashboard and waits for the collaborator's answer.
    pub async fn submit_dashboard(
        &mut self,
        name: Option<String>,
    ) -> Result<CreatedDashboard, WorkflowError> {
        self.dispatch(WorkflowEvent::SubmitDashboard { name })?;
        self.drive_until(|s| !s.pending.submitting).await?;
        self.state
            .created_dashboard
            .clone()
            .ok_or(WorkflowError::Interrupted)
    }

    /// Discards the session. Results still in flight are dropped.
    pub fn close(&mut self) {
        if let Err(error) = self.dispatch(WorkflowEvent::Close) {
            tracing::error!(%error, "close rejected");
        }
    }
}
