//! Scripted wizard sessions.
//!
//! A scenario file seeds an [`InMemoryService`] and lists the user's steps.
//! Replaying it drives a [`WorkflowController`] through the same calls the
//! wizard makes and reports what reached the dashboard collaborator.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, info};

use onboard_model::{
    CreateDashboardRequest, CreatedDashboard, ImportId, SourceFilter, SourceId, WidgetId,
    WidgetItem,
};
use onboard_workflow::memory::{InMemoryService, ServiceFixture};
use onboard_workflow::{
    ConfirmOutcome, OnboardSettings, ServiceOperation, Stage, WorkflowContext,
    WorkflowController,
};

use crate::input::read_json;

/// A recorded session: collaborator data, widget library and user steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fixture: ServiceFixture,
    pub library: Vec<WidgetItem>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// One user action, tagged by `action` in the scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Step {
    Search { text: Option<String> },
    SelectSource { source: SourceId },
    SelectSubSource { source: Option<SourceId> },
    Upload { import_id: ImportId },
    Continue,
    SkipToWidgets,
    Reassign { column: String, field: String },
    Clear { column: String },
    ToggleIgnored { column: String },
    Confirm,
    ToggleWidget { widget: WidgetId },
    Back,
    Submit { name: Option<String> },
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Search { .. } => "search",
            Step::SelectSource { .. } => "select source",
            Step::SelectSubSource { .. } => "select sub-source",
            Step::Upload { .. } => "upload",
            Step::Continue => "continue",
            Step::SkipToWidgets => "skip to widgets",
            Step::Reassign { .. } => "reassign",
            Step::Clear { .. } => "clear",
            Step::ToggleIgnored { .. } => "toggle ignored",
            Step::Confirm => "confirm",
            Step::ToggleWidget { .. } => "toggle widget",
            Step::Back => "back",
            Step::Submit { .. } => "submit",
        }
    }
}

/// What a replay produced.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub dashboard: CreatedDashboard,
    pub request: CreateDashboardRequest,
    /// Stage the wizard was in when the dashboard was submitted.
    pub final_stage: Stage,
    pub steps: usize,
    /// Collaborator calls made, by operation.
    pub calls: Vec<(ServiceOperation, usize)>,
}

impl ReplayOutcome {
    pub fn calls_to(&self, operation: ServiceOperation) -> usize {
        self.calls
            .iter()
            .find(|(op, _)| *op == operation)
            .map_or(0, |(_, count)| *count)
    }
}

/// Drives a wizard session through every step of `scenario`.
///
/// # Errors
///
/// Fails on the first rejected step, and when the steps end without a
/// dashboard having been created.
pub async fn replay(scenario: Scenario, settings: OnboardSettings) -> Result<ReplayOutcome> {
    let Scenario {
        name,
        fixture,
        library,
        steps,
    } = scenario;
    let step_count = steps.len();
    info!(
        scenario = name.as_deref().unwrap_or("unnamed"),
        steps = step_count,
        "replaying scenario"
    );

    let service = Arc::new(InMemoryService::new(fixture));
    let mut controller = WorkflowController::with_shared_service(
        Arc::clone(&service),
        WorkflowContext::new(library, settings),
    );
    controller.open().await.context("failed to open the wizard")?;
    controller
        .settle()
        .await
        .context("failed to load the field catalog")?;

    let mut dashboard = None;
    for (index, step) in steps.into_iter().enumerate() {
        let number = index + 1;
        let label = step.label();
        debug!(step = number, action = label, "replaying step");
        let result = match step {
            Step::Search { text } => {
                let filter = text.map(SourceFilter::search).unwrap_or_default();
                controller.reload_sources(filter).await
            }
            Step::SelectSource { source } => controller.select_source(source).await,
            Step::SelectSubSource { source } => controller.select_sub_source(source),
            Step::Upload { import_id } => controller.upload(import_id).await,
            Step::Continue => controller.continue_to_mapping(),
            Step::SkipToWidgets => controller.skip_to_widgets().await,
            Step::Reassign { column, field } => controller.reassign(&column, &field),
            Step::Clear { column } => controller.clear_target(&column),
            Step::ToggleIgnored { column } => controller.toggle_ignored(&column),
            Step::Confirm => controller.confirm_mapping().await.map(|outcome| {
                if outcome == ConfirmOutcome::AlreadyConfirmed {
                    info!(step = number, "mapping was already confirmed");
                }
            }),
            Step::ToggleWidget { widget } => controller.toggle_widget(widget),
            Step::Back => controller.back(),
            Step::Submit { name } => controller
                .submit_dashboard(name)
                .await
                .map(|created| dashboard = Some(created)),
        };
        result.with_context(|| format!("step {number} ({label}) was rejected"))?;
    }

    let final_stage = controller.state().stage;
    let Some(dashboard) = dashboard else {
        bail!("scenario ended in the {final_stage} stage without submitting a dashboard");
    };
    let request = service
        .dashboards()
        .pop()
        .context("the dashboard collaborator received no request")?;
    let calls = ServiceOperation::ALL
        .iter()
        .map(|op| (*op, service.calls(*op)))
        .collect();

    info!(
        dashboard = %dashboard.id,
        widgets = request.widget_config.enabled_widgets.len(),
        "replay finished"
    );
    Ok(ReplayOutcome {
        dashboard,
        request,
        final_stage,
        steps: step_count,
        calls,
    })
}
