//! Integration tests for scenario replay.

use serde_json::{Value, json};

use onboard_cli::input::parse_json;
use onboard_cli::replay::{Scenario, Step, replay};
use onboard_model::{ImportId, SourceId, WidgetId};
use onboard_workflow::{OnboardSettings, ServiceOperation, Stage};

fn mapping(column: &str, target: Option<&str>, tier: &str, confidence: f32) -> Value {
    let status = match (target, tier) {
        (None, _) => "needs_attention",
        (Some(_), "exact" | "manual") => "auto_mapped",
        (Some(_), _) => "needs_review",
    };
    json!({
        "sourceColumn": column,
        "targetField": target,
        "tier": tier,
        "confidence": confidence,
        "status": status,
    })
}

fn fixture() -> Value {
    json!({
        "fields": [
            { "field": "actual_qty" },
            { "field": "planned_qty" },
            { "field": "price" },
            { "field": "region" }
        ],
        "sources": [
            { "id": "warehouse", "name": "Warehouse" },
            { "id": "erp", "name": "ERP", "hasSubSources": true },
            {
                "id": "sales",
                "name": "Sales",
                "mature": { "dataSourceId": "ds-sales", "fieldNames": ["price", "region"] }
            }
        ],
        "subSources": {
            "erp": [{ "id": "erp-eu", "name": "EU" }]
        },
        "files": {
            "imp-plan": {
                "filename": "plan.csv",
                "mappings": [
                    mapping("Qty", Some("actual_qty"), "exact", 1.0),
                    mapping("Qty2", Some("actual_qty"), "ai_suggested", 0.7)
                ]
            },
            "imp-orders": {
                "filename": "orders.csv",
                "mappings": [
                    mapping("Price", Some("price"), "fuzzy", 0.85),
                    mapping("Notes", None, "unmatched", 0.0)
                ]
            }
        },
        "compatibility": {
            "kpi_total": "supported",
            "trend": "supported",
            "detail": "near_miss",
            "regions": "unsupported"
        }
    })
}

fn library() -> Value {
    json!([
        { "id": "kpi_total", "w": 3, "h": 2, "category": "kpi" },
        { "id": "trend", "w": 6, "h": 4, "category": "chart" },
        { "id": "detail", "w": 12, "h": 3, "category": "table" },
        { "id": "regions", "w": 6, "h": 4, "category": "map" }
    ])
}

fn scenario(steps: Value) -> Scenario {
    serde_json::from_value(json!({
        "name": "test",
        "fixture": fixture(),
        "library": library(),
        "steps": steps,
    }))
    .unwrap()
}

fn placements(request: &onboard_model::CreateDashboardRequest) -> Vec<(&str, u32, u32)> {
    request
        .layout_config
        .layouts
        .iter()
        .map(|entry| (entry.widget_id.as_str(), entry.x, entry.y))
        .collect()
}

#[test]
fn steps_parse_with_camel_case_fields() {
    let steps: Vec<Step> = parse_json(
        r#"[
            { "action": "selectSource", "source": "erp" },
            { "action": "selectSubSource", "source": "erp-eu" },
            { "action": "upload", "importId": "imp-1" },
            { "action": "continue" },
            { "action": "toggleIgnored", "column": "Notes" },
            { "action": "submit" }
        ]"#,
    )
    .unwrap();

    assert_eq!(
        steps,
        vec![
            Step::SelectSource {
                source: SourceId::new("erp").unwrap()
            },
            Step::SelectSubSource {
                source: Some(SourceId::new("erp-eu").unwrap())
            },
            Step::Upload {
                import_id: ImportId::new("imp-1").unwrap()
            },
            Step::Continue,
            Step::ToggleIgnored {
                column: "Notes".into()
            },
            Step::Submit { name: None },
        ]
    );
}

#[test]
fn unknown_action_is_rejected() {
    let result: anyhow::Result<Vec<Step>> = parse_json(r#"[{ "action": "teleport" }]"#);
    assert!(result.is_err());
}

#[tokio::test]
async fn replays_mapping_session_with_reassignment() {
    let scenario = scenario(json!([
        { "action": "selectSource", "source": "warehouse" },
        { "action": "upload", "importId": "imp-plan" },
        { "action": "continue" },
        { "action": "reassign", "column": "Qty2", "field": "planned_qty" },
        { "action": "confirm" },
        { "action": "toggleWidget", "widget": "detail" },
        { "action": "submit", "name": "  Plan  " }
    ]));

    let outcome = replay(scenario, OnboardSettings::default()).await.unwrap();

    assert_eq!(outcome.dashboard.id, "dash-1");
    assert_eq!(outcome.final_stage, Stage::Widgets);
    assert_eq!(outcome.steps, 7);
    assert_eq!(outcome.calls_to(ServiceOperation::ProcessFile), 1);
    assert_eq!(outcome.calls_to(ServiceOperation::ConfirmMapping), 1);
    assert_eq!(outcome.calls_to(ServiceOperation::CreateDashboard), 1);

    let request = &outcome.request;
    assert_eq!(request.name, "Plan");
    assert_eq!(request.data_source_id.as_str(), "ds-imp-plan");
    let enabled: Vec<&str> = request
        .widget_config
        .enabled_widgets
        .iter()
        .map(WidgetId::as_str)
        .collect();
    assert_eq!(enabled, vec!["kpi_total", "trend", "detail"]);
    assert_eq!(
        placements(request),
        vec![("trend", 0, 0), ("detail", 0, 4), ("kpi_total", 6, 0)]
    );
}

#[tokio::test]
async fn replays_skip_for_mature_source() {
    let scenario = scenario(json!([
        { "action": "selectSource", "source": "sales" },
        { "action": "skipToWidgets" },
        { "action": "submit" }
    ]));

    let outcome = replay(scenario, OnboardSettings::default()).await.unwrap();

    assert_eq!(outcome.request.name, "New dashboard");
    assert_eq!(outcome.request.data_source_id.as_str(), "ds-sales");
    assert_eq!(outcome.calls_to(ServiceOperation::ProcessFile), 0);
    assert_eq!(outcome.calls_to(ServiceOperation::ConfirmMapping), 0);
    assert_eq!(
        placements(&outcome.request),
        vec![("trend", 0, 0), ("kpi_total", 6, 0)]
    );
}

#[tokio::test]
async fn rejected_step_is_reported_by_number() {
    let scenario = scenario(json!([
        { "action": "selectSource", "source": "erp" },
        { "action": "upload", "importId": "imp-orders" }
    ]));

    let error = replay(scenario, OnboardSettings::default())
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "step 2 (upload) was rejected");
}

#[tokio::test]
async fn blocked_mapping_cannot_be_confirmed() {
    let scenario = scenario(json!([
        { "action": "selectSource", "source": "warehouse" },
        { "action": "upload", "importId": "imp-orders" },
        { "action": "continue" },
        { "action": "confirm" }
    ]));

    let error = replay(scenario, OnboardSettings::default())
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "step 4 (confirm) was rejected");
}

#[tokio::test]
async fn scenario_without_submit_fails() {
    let scenario = scenario(json!([
        { "action": "selectSource", "source": "warehouse" },
        { "action": "upload", "importId": "imp-orders" },
        { "action": "continue" }
    ]));

    let error = replay(scenario, OnboardSettings::default())
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "scenario ended in the Mapping stage without submitting a dashboard"
    );
}
