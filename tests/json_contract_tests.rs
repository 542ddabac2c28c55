use speed_story::api::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, STORY_TABLES_JSON_SCHEMA_V1, StoryEngine,
    StoryEngineConfig,
};
use speed_story::core::{ContainerRect, StoryTables};
use speed_story::render::NullRenderer;

#[test]
fn tables_contract_round_trips_including_catch_all_zone() {
    let tables = StoryTables::performance_story().expect("built-in tables");
    let json = tables
        .to_json_contract_v1_pretty()
        .expect("tables should serialize");
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("\"conversionRate\""));

    let restored = StoryTables::from_json_str(&json).expect("tables should parse");
    assert_eq!(restored, tables);
    assert_eq!(STORY_TABLES_JSON_SCHEMA_V1, 1);
}

#[test]
fn tables_compat_parser_accepts_bare_payload() {
    let tables = StoryTables::performance_story().expect("built-in tables");
    let bare = serde_json::to_string(&tables).expect("bare tables should serialize");

    let restored = StoryTables::from_json_compat_str(&bare).expect("bare tables should parse");
    assert_eq!(restored, tables);
    assert!(StoryTables::from_json_str(&bare).is_err());
}

#[test]
fn tables_contract_rejects_unknown_schema_and_broken_invariants() {
    let tables = StoryTables::performance_story().expect("built-in tables");
    let json = tables
        .to_json_contract_v1_pretty()
        .expect("tables should serialize");

    let future = json.replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);
    assert!(StoryTables::from_json_str(&future).is_err());

    let bad_seed = json.replacen("\"seed_index\": 4", "\"seed_index\": 40", 1);
    assert!(StoryTables::from_json_str(&bad_seed).is_err());

    let unsorted = r#"{
        "schema_version": 1,
        "tables": {
            "dataset": [
                {"t": 2.0, "conversionRate": 1, "bounceRate": 1, "relativeConversion": 1,
                 "lossPercent": 0, "estimatedSales": 1, "bounceDeltaVsBaseline": 0},
                {"t": 1.0, "conversionRate": 1, "bounceRate": 1, "relativeConversion": 1,
                 "lossPercent": 0, "estimatedSales": 1, "bounceDeltaVsBaseline": 0}
            ],
            "zones": [{"id": "all", "max_t": 100.0, "title": "", "numeric": "",
                       "pitch": "", "cta_label": ""}],
            "seed_index": 0
        }
    }"#;
    assert!(StoryTables::from_json_str(unsorted).is_err());
}

#[test]
fn custom_tables_drive_the_engine() {
    let json = r#"{
        "schema_version": 1,
        "tables": {
            "dataset": [
                {"t": 1.0, "conversionRate": 3.0, "bounceRate": 10, "relativeConversion": 100,
                 "lossPercent": 0, "estimatedSales": 30, "bounceDeltaVsBaseline": 0},
                {"t": 4.0, "conversionRate": 1.0, "bounceRate": 40, "relativeConversion": 33,
                 "lossPercent": 67, "estimatedSales": 10, "bounceDeltaVsBaseline": 300}
            ],
            "zones": [
                {"id": "quick", "max_t": 2.0, "title": "Quick", "numeric": "{{bounce}}%",
                 "pitch": "ok", "cta_label": "Keep", "tone": "positive"},
                {"id": "slow", "max_t": 1.0e300, "title": "Slow", "numeric": "{{loss}}% lost",
                 "pitch": "fix", "cta_label": "Fix"}
            ],
            "seed_index": 1
        }
    }"#;
    let tables = StoryTables::from_json_str(json).expect("custom tables");
    let mut engine =
        StoryEngine::with_tables(NullRenderer::default(), StoryEngineConfig::default(), tables)
            .expect("engine init");

    assert_eq!(engine.active_zone().id, "slow");
    assert_eq!(engine.narrative().numeric, "67% lost");

    engine.pointer_move(0.0, 0.0, ContainerRect::new(0.0, 0.0, 300.0, 150.0));
    assert_eq!(engine.active_zone().id, "quick");
    assert_eq!(engine.narrative().numeric, "10.0%");
}

#[test]
fn snapshot_contract_round_trips() {
    let mut engine =
        StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default()).expect("engine");
    engine.pointer_move(420.0, 80.0, ContainerRect::new(0.0, 0.0, 1000.0, 500.0));

    let snapshot = engine.snapshot();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    let restored = EngineSnapshot::from_json_compat_str(&json).expect("snapshot should parse");
    assert_eq!(restored, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare snapshot");
    let restored = EngineSnapshot::from_json_compat_str(&bare).expect("bare snapshot parse");
    assert_eq!(restored, snapshot);
    assert_eq!(ENGINE_SNAPSHOT_JSON_SCHEMA_V1, 1);
}

#[test]
fn snapshot_placeholders_keep_template_order() {
    let engine =
        StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default()).expect("engine");
    let snapshot = engine.snapshot();
    let keys: Vec<&str> = snapshot.placeholders.keys().map(String::as_str).collect();

    assert_eq!(
        keys,
        ["t", "conv", "bounce", "relConv", "sales", "loss", "bounceVs1s", "100_minus_bounce"]
    );
    assert_eq!(snapshot.placeholders["t"], "3.0");
    assert_eq!(snapshot.narrative.zone_id, "risk_zone");
    assert!(snapshot.conversion_path.starts_with("M 0.00,"));
}

#[test]
fn snapshot_rejects_unsupported_schema() {
    let engine =
        StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default()).expect("engine");
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize")
        .replacen("\"schema_version\": 1", "\"schema_version\": 7", 1);
    assert!(EngineSnapshot::from_json_compat_str(&json).is_err());
}
