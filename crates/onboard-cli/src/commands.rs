//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use onboard_cli::input::read_json;
use onboard_cli::replay::{ReplayOutcome, Scenario, replay};
use onboard_layout::{Layout, pack};
use onboard_map::{MappingFilter, MappingResolution, resolve};
use onboard_model::{AvailableField, ColumnMapping, WidgetItem, validate_mapping_set};
use onboard_workflow::OnboardSettings;

use crate::cli::{PackArgs, ReplayArgs, ResolveArgs};

/// Settings from `--config` when given, otherwise the default location.
///
/// An explicit file that cannot be read or parsed is an error.
pub fn load_settings(path: Option<&Path>) -> Result<OnboardSettings> {
    match path {
        Some(path) => OnboardSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(OnboardSettings::load()),
    }
}

pub struct ResolveReport {
    pub mappings: Vec<ColumnMapping>,
    pub resolution: MappingResolution,
    pub filter: MappingFilter,
}

pub fn run_resolve(args: &ResolveArgs) -> Result<ResolveReport> {
    let span = info_span!("resolve", mappings = %args.mappings.display());
    let _guard = span.enter();

    let mappings: Vec<ColumnMapping> = read_json(&args.mappings)?;
    validate_mapping_set(&mappings).context("invalid mapping draft")?;
    let fields: Vec<AvailableField> = match &args.fields {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let resolution = resolve(&mappings, &fields);
    info!(
        columns = mappings.len(),
        conflicts = resolution.conflicts.len(),
        blocked = resolution.gate.is_blocked(),
        "mapping draft resolved"
    );
    Ok(ResolveReport {
        mappings,
        resolution,
        filter: args.filter.into(),
    })
}

pub fn run_pack(args: &PackArgs, settings: &OnboardSettings) -> Result<Layout> {
    let span = info_span!("pack", widgets = %args.widgets.display());
    let _guard = span.enter();

    let items: Vec<WidgetItem> = read_json(&args.widgets)?;
    let mut options = settings.layout;
    if let Some(cols) = args.cols {
        options.cols = cols;
    }
    if let Some(max_rows) = args.max_rows {
        options.max_rows = max_rows;
    }
    let layout = pack(&items, options).context("failed to pack widgets")?;
    info!(
        widgets = layout.placements.len(),
        height = layout.height(),
        "layout packed"
    );
    Ok(layout)
}

pub fn run_replay(args: &ReplayArgs, settings: &OnboardSettings) -> Result<ReplayOutcome> {
    let scenario = Scenario::load(&args.scenario)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(replay(scenario, settings.clone()))
}
