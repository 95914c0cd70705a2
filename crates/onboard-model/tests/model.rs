//! Tests for onboard-model payload shapes.

use onboard_model::{
    ColumnMapping, CreateDashboardRequest, DataSourceId, LayoutConfig, LayoutEntry,
    MappingStatus, MatchTier, ProcessedFile, SourceDescriptor, WidgetConfig, WidgetId,
};

#[test]
fn column_mapping_uses_camel_case_keys() {
    let mapping = ColumnMapping::matched("Qty", "actual_qty", MatchTier::AiSuggested, 0.82)
        .with_reasoning("header resembles quantity");
    let json = serde_json::to_value(&mapping).expect("serialize mapping");
    assert_eq!(json["sourceColumn"], "Qty");
    assert_eq!(json["targetField"], "actual_qty");
    assert_eq!(json["tier"], "ai_suggested");
    assert_eq!(json["status"], "needs_review");
    assert_eq!(json["ignored"], false);
}

#[test]
fn processed_file_accepts_minimal_mappings() {
    let json = r#"{
        "filename": "orders.csv",
        "mappings": [
            {"sourceColumn": "Qty", "targetField": "actual_qty", "tier": "exact",
             "confidence": 1.0, "status": "auto_mapped"},
            {"sourceColumn": "Notes", "tier": "unmatched", "confidence": 0.0,
             "status": "needs_attention", "sampleData": ["a", 1, null]}
        ]
    }"#;
    let file: ProcessedFile = serde_json::from_str(json).expect("deserialize processed file");
    assert_eq!(file.filename, "orders.csv");
    assert_eq!(file.mappings.len(), 2);
    assert_eq!(file.mappings[1].target_field, None);
    assert_eq!(file.mappings[1].status, MappingStatus::NeedsAttention);
    assert_eq!(file.mappings[1].sample_data.len(), 3);
    assert!(!file.mappings[0].ignored);
}

#[test]
fn mature_source_deserializes() {
    let json = r#"{"id": "erp", "name": "ERP export",
                   "mature": {"dataSourceId": "ds-9", "fieldNames": ["revenue"]}}"#;
    let source: SourceDescriptor = serde_json::from_str(json).expect("deserialize source");
    assert!(source.is_mature());
    assert!(!source.has_sub_sources);
    assert_eq!(
        source.mature.as_ref().map(|m| m.data_source_id.as_str()),
        Some("ds-9")
    );
}

#[test]
fn create_dashboard_request_shape() {
    let widget = WidgetId::new("revenue").unwrap();
    let mut config = WidgetConfig {
        enabled_widgets: vec![widget.clone()],
        ..WidgetConfig::default()
    };
    config
        .widget_settings
        .insert(widget.clone(), serde_json::json!({}));
    let request = CreateDashboardRequest {
        name: "Sales".to_string(),
        data_source_id: DataSourceId::new("ds-1").unwrap(),
        widget_config: config,
        layout_config: LayoutConfig {
            layouts: vec![LayoutEntry {
                widget_id: widget,
                x: 0,
                y: 0,
                w: 6,
                h: 4,
            }],
        },
    };
    let json = serde_json::to_value(&request).expect("serialize request");
    assert_eq!(json["dataSourceId"], "ds-1");
    assert_eq!(json["widgetConfig"]["enabledWidgets"][0], "revenue");
    assert!(json["widgetConfig"]["widgetSettings"]["revenue"].is_object());
    assert_eq!(json["layoutConfig"]["layouts"][0]["widgetId"], "revenue");
    assert_eq!(json["layoutConfig"]["layouts"][0]["w"], 6);

    let round: CreateDashboardRequest =
        serde_json::from_value(json).expect("deserialize request");
    assert_eq!(round, request);
}
