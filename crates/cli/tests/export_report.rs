//! End-to-end: exported tracker JSON through to projection rows.

use burndown_core::{Date, ReportConfig};
use burndown_progress::ReportBuilder;
use burndown_tracker::{ItemSource, JsonFileSource};

const CONFIG: &str = r#"{
    "output_file": "burndown.json",
    "start_date": "2024-01-01",
    "jql": "project = PROJ",
    "moving_avg_weeks": 3,
    "jira": {
        "jira_url": "https://example.atlassian.net",
        "username": "u",
        "api_token": "t",
        "size_field": "customfield_10016",
        "percent_complete_field": "customfield_10200",
        "done_statuses": ["Done"]
    }
}"#;

const EXPORT: &str = r#"[
    {
        "key": "PROJ-1",
        "fields": {"summary": "Parser", "status": {"name": "Done"}, "issuetype": {"name": "Story"}, "customfield_10016": 20},
        "changelog": {"histories": [
            {"created": "2024-01-14T09:00:00.000+0000", "items": [
                {"field": "status", "fromString": "In Progress", "toString": "Done"}
            ]},
            {"created": "2024-01-04T09:00:00.000+0000", "items": [
                {"field": "customfield_10200", "fromString": null, "toString": "50"}
            ]}
        ]}
    },
    {
        "key": "PROJ-2",
        "fields": {"summary": "Exporter", "status": {"name": "In Progress"}, "customfield_10016": 80},
        "changelog": {"histories": [
            {"created": "2024-01-18T09:00:00.000+0100", "items": [
                {"field": "customfield_10200", "fromString": "", "toString": "25"}
            ]}
        ]}
    }
]"#;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_export_to_projection() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let export_path = dir.path().join("export.json");
    std::fs::write(&config_path, CONFIG).unwrap();
    std::fs::write(&export_path, EXPORT).unwrap();

    let config = ReportConfig::load(&config_path).unwrap();
    config.validate().unwrap();

    let items = JsonFileSource::new(&export_path, config.tracker.size_field.clone())
        .fetch_items()
        .await
        .unwrap();
    let report = ReportBuilder::from_config(&config)
        .unwrap()
        .build(&items, date(2024, 1, 24))
        .unwrap();

    // PROJ-1: 0, 10, 20, 20; PROJ-2: 0, 0, 0, 20
    let completed: Vec<f64> = report.rows.iter().map(|r| r.completed_value).collect();
    assert_eq!(completed, vec![0.0, 10.0, 20.0, 40.0]);
    assert_eq!(report.matrix.total_size(), 100.0);

    let latest = report.latest().unwrap();
    assert_eq!(latest.date, date(2024, 1, 22));
    assert_eq!(latest.remaining_value, 60.0);
    assert_eq!(latest.velocity, Some(20.0));
    assert!(latest.mean_date.is_some());
    assert!(latest.fast_date <= latest.mean_date);
    assert!(latest.mean_date <= latest.slow_date);
}
