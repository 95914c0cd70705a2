use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use onboard_cli::preview::{legend, render_grid};
use onboard_cli::replay::ReplayOutcome;
use onboard_layout::Layout;
use onboard_map::{
    ConfidenceBand, ConfidenceThresholds, ConfirmGate, MappingFilter, MappingResolution,
    conflict_map, derive_status,
};
use onboard_model::{ColumnMapping, MappingStatus};

use crate::commands::ResolveReport;

// =============================================================================
// RESOLVE
// =============================================================================

pub fn print_resolution(report: &ResolveReport, thresholds: &ConfidenceThresholds) {
    let resolution = &report.resolution;
    println!(
        "Columns: {} ({} ignored)",
        resolution.counts.all, resolution.counts.ignored
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Target"),
        header_cell("Tier"),
        header_cell("Confidence"),
        header_cell("Band"),
        header_cell("Status"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for mapping in report.filter.apply(&report.mappings, resolution) {
        table.add_row(vec![
            Cell::new(&mapping.source_column).add_attribute(Attribute::Bold),
            target_cell(mapping, resolution),
            Cell::new(mapping.tier),
            Cell::new(format!("{:.0}%", mapping.confidence * 100.0)),
            band_cell(thresholds.categorize(mapping.confidence)),
            status_cell(mapping),
            dim_cell(notes(mapping, resolution).join(", ")),
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    if report.filter != MappingFilter::All {
        println!("Showing: {}", report.filter.label());
    }
    println!("{table}");

    print_filter_counts(resolution);
    print_conflicts(&report.mappings, resolution);
    print_gate(&resolution.gate);
}

fn print_filter_counts(resolution: &MappingResolution) {
    let mut table = Table::new();
    table.set_header(
        MappingFilter::ALL
            .iter()
            .map(|filter| header_cell(filter.label()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    table.add_row(
        MappingFilter::ALL
            .iter()
            .map(|filter| {
                let color = match filter {
                    MappingFilter::Conflicts => Color::Red,
                    MappingFilter::Unmapped => Color::Yellow,
                    _ => Color::Reset,
                };
                count_cell(filter.count(&resolution.counts), color)
            })
            .collect::<Vec<_>>(),
    );
    for index in 0..MappingFilter::ALL.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    println!("{table}");
}

fn print_conflicts(mappings: &[ColumnMapping], resolution: &MappingResolution) {
    if resolution.conflicts.is_empty() {
        return;
    }
    println!("Conflicts:");
    for (target, columns) in conflict_map(mappings) {
        if resolution.conflicts.contains(target) {
            println!("  {target} <- {}", columns.join(", "));
        }
    }
}

fn print_gate(gate: &ConfirmGate) {
    match gate {
        ConfirmGate::Open => println!("Confirm: allowed"),
        ConfirmGate::Blocked {
            conflicts,
            needs_attention,
        } => {
            let mut reasons = Vec::new();
            if !conflicts.is_empty() {
                reasons.push(format!("{} conflicting field(s)", conflicts.len()));
            }
            if !needs_attention.is_empty() {
                reasons.push(format!("unmapped: {}", needs_attention.join(", ")));
            }
            println!("Confirm: blocked ({})", reasons.join("; "));
        }
    }
}

fn target_cell(mapping: &ColumnMapping, resolution: &MappingResolution) -> Cell {
    match mapping.target() {
        Some(target) if resolution.is_conflicting(mapping) => Cell::new(target)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(target) if mapping.ignored => dim_cell(target),
        Some(target) => Cell::new(target),
        None => dim_cell("-"),
    }
}

fn band_cell(band: Option<ConfidenceBand>) -> Cell {
    match band {
        Some(ConfidenceBand::High) => Cell::new("high").fg(Color::Green),
        Some(ConfidenceBand::Medium) => Cell::new("medium").fg(Color::Yellow),
        Some(ConfidenceBand::Low) => Cell::new("low").fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn status_cell(mapping: &ColumnMapping) -> Cell {
    if mapping.ignored {
        return dim_cell("Ignored");
    }
    let status = derive_status(mapping);
    let color = match status {
        MappingStatus::AutoMapped => Color::Green,
        MappingStatus::NeedsReview => Color::Yellow,
        MappingStatus::NeedsAttention => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

fn notes(mapping: &ColumnMapping, resolution: &MappingResolution) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if resolution.is_conflicting(mapping) {
        notes.push("conflict");
    }
    if resolution
        .unknown_targets
        .iter()
        .any(|column| *column == mapping.source_column)
    {
        notes.push("unknown field");
    }
    notes
}

// =============================================================================
// PACK
// =============================================================================

pub fn print_layout(layout: &Layout, preview: bool) {
    println!("Grid: {} columns, {} rows", layout.cols, layout.height());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Widget"),
        header_cell("Category"),
        header_cell("X"),
        header_cell("Y"),
        header_cell("W"),
        header_cell("H"),
    ]);
    apply_table_style(&mut table);
    for (mark, placed) in legend(layout) {
        table.add_row(vec![
            dim_cell(mark),
            Cell::new(placed.id()).add_attribute(Attribute::Bold),
            Cell::new(format!(
                "{} {}",
                placed.item.category.icon(),
                placed.item.category.label()
            )),
            Cell::new(placed.x),
            Cell::new(placed.y),
            Cell::new(placed.item.w),
            Cell::new(placed.item.h),
        ]);
    }
    for index in 3..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    println!("{table}");
    if preview {
        print!("{}", render_grid(layout));
    }
}

// =============================================================================
// REPLAY
// =============================================================================

pub fn print_replay_calls(outcome: &ReplayOutcome) {
    eprintln!(
        "Dashboard {} created after {} step(s) from the {} stage",
        outcome.dashboard.id, outcome.steps, outcome.final_stage
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Collaborator call"), header_cell("Calls")]);
    apply_table_style(&mut table);
    for (operation, count) in &outcome.calls {
        table.add_row(vec![Cell::new(operation.label()), count_cell(*count, Color::Cyan)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    eprintln!("{table}");
}

// =============================================================================
// TABLE HELPERS
// =============================================================================

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
