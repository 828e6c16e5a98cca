//! Integration tests for the feed pipeline over CSV exports on disk
//!
//! These tests write sheet exports into a temporary directory, run the
//! pipeline through the public API and check the decoded payload.

use ad_dashboard_feed::app::services::sheet_fetcher::CsvDirectoryFetcher;
use ad_dashboard_feed::config::SheetConfig;
use ad_dashboard_feed::{Config, DashboardPayload, Pipeline, SchemaKind};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const GROUP_EXPORT: &str = "\
日付,キャンペーン,広告グループ,費用,表示回数,クリック,CTR,CV,CPA,ROAS
2025/10/09,CampaignA,Group1,¥100,1000,10,1.0%,3,33,
,CampaignB,Group2,50,500,5,1.0%,1,50,
2025/10/10,CampaignA,Group1,\"¥1,200\",\"3,400\",56,1.6%,2,600,
合計,,,\"¥1,350\",\"4,900\",71,,6,,
";

const PERFORMANCE_EXPORT: &str = "\
日付,キャンペーン,,費用,表示回数,クリック,CTR,CV
2025-10-09,Beta,,\"¥2,000\",10000,120,1.2%,4
2025年10月10日,Alpha,,N/A,,,,
";

const GENDER_EXPORT: &str = "\
日付,キャンペーン,,費用,表示回数,クリック,CTR,CV,性別
2025/10/09,Beta,,500,5000,50,1.0%,2,男性
2025/10/09,Beta,,300,3000,30,1.0%,1,
";

fn write_exports(dir: &Path, sheets: &[(&str, &str)]) {
    for (name, content) in sheets {
        std::fs::write(dir.join(format!("{name}.csv")), content).unwrap();
    }
}

fn standard_exports() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_exports(
        temp_dir.path(),
        &[
            ("全_グループ集計", GROUP_EXPORT),
            ("パフォーマンス", PERFORMANCE_EXPORT),
            ("性別", GENDER_EXPORT),
        ],
    );
    temp_dir
}

/// Test the full feed over the three standard sheets
///
/// Purpose: Validate the end-to-end path from CSV exports to the decoded payload
/// Benefit: Covers tolerant numbers, mixed dates, rejections and aggregation together
#[tokio::test]
async fn test_standard_sheets_end_to_end() {
    let exports = standard_exports();
    let fetcher = CsvDirectoryFetcher::new(exports.path());

    let output = Pipeline::default().run(&fetcher).await;
    let json = output.payload.to_json(false).unwrap();
    let payload = DashboardPayload::from_json(&json).unwrap();

    let group = payload.dataset("group").unwrap();
    assert_eq!(group.len(), 2);
    assert_eq!(group[0].iso_date(), "2025-10-09");
    assert_eq!(group[0].cost, 100.0);
    assert_eq!(group[1].cost, 1200.0);
    assert_eq!(group[1].impressions, 3400.0);

    let performance = payload.dataset("performance").unwrap();
    assert_eq!(performance.len(), 2);
    assert_eq!(performance[0].cost, 2000.0);
    assert_eq!(performance[1].iso_date(), "2025-10-10");
    assert_eq!(performance[1].cost, 0.0);

    let gender = payload.dataset("gender").unwrap();
    assert_eq!(gender.len(), 1);
    assert_eq!(gender[0].gender.as_deref(), Some("男性"));

    assert_eq!(
        payload.campaigns().as_slice(),
        ["all campaigns", "Alpha", "Beta", "CampaignA"]
    );

    assert_eq!(output.stats.rows_seen(), 8);
    assert_eq!(output.stats.records_built(), 5);
    assert_eq!(output.stats.rows_rejected(), 3);
    assert!(output.stats.degraded_sheets().is_empty());
}

/// Test the JSON shape the dashboard reads
///
/// Purpose: Validate property names and key order of the payload object
/// Benefit: Guards the contract with the dashboard front end
#[tokio::test]
async fn test_payload_json_shape() {
    let exports = standard_exports();
    let fetcher = CsvDirectoryFetcher::new(exports.path());

    let output = Pipeline::default().run(&fetcher).await;
    let json = output.payload.to_json(false).unwrap();

    let group_at = json.find("\"group\"").unwrap();
    let performance_at = json.find("\"performance\"").unwrap();
    let gender_at = json.find("\"gender\":").unwrap();
    let campaigns_at = json.find("\"campaigns\"").unwrap();
    assert!(group_at < performance_at && performance_at < gender_at && gender_at < campaigns_at);

    let value: Value = serde_json::from_str(&json).unwrap();
    let first = &value["group"][0];
    assert_eq!(first["date"], "2025-10-09");
    assert_eq!(first["campaignName"], "CampaignA");
    assert_eq!(first["groupName"], "Group1");
    assert_eq!(first["conversions"], 3.0);
    assert!(first.get("gender").is_none());
    assert!(value["performance"][0].get("groupName").is_none());
}

/// Test that a missing export degrades only its own sheet
///
/// Purpose: Validate fetch failure isolation at the fetcher boundary
/// Benefit: A broken sheet never takes the whole dashboard down
#[tokio::test]
async fn test_missing_export_gives_empty_dataset() {
    let temp_dir = TempDir::new().unwrap();
    write_exports(
        temp_dir.path(),
        &[("全_グループ集計", GROUP_EXPORT), ("性別", GENDER_EXPORT)],
    );
    let fetcher = CsvDirectoryFetcher::new(temp_dir.path());

    let output = Pipeline::default().run_concurrent(&fetcher).await;

    assert_eq!(output.payload.dataset("performance").map(Vec::len), Some(0));
    assert_eq!(output.stats.degraded_sheets(), ["performance"]);
    assert!(!output.payload.campaigns().contains("Alpha"));
    assert!(output.payload.campaigns().contains("Beta"));
}

/// Test a run over an empty export directory
///
/// Purpose: Validate the all-empty edge case
/// Benefit: Empty datasets and a sentinel-only list are still valid output
#[tokio::test]
async fn test_no_exports_gives_sentinel_only_payload() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = CsvDirectoryFetcher::new(temp_dir.path());

    let output = Pipeline::default().run(&fetcher).await;
    let value: Value = serde_json::from_str(&output.payload.to_json(false).unwrap()).unwrap();

    assert_eq!(value["group"], serde_json::json!([]));
    assert_eq!(value["performance"], serde_json::json!([]));
    assert_eq!(value["gender"], serde_json::json!([]));
    assert_eq!(value["campaigns"], serde_json::json!(["all campaigns"]));
}

/// Test sequential and concurrent runs agree
///
/// Purpose: Validate that merging after all sheets complete is order independent
/// Benefit: Concurrency can be switched on without changing output
#[tokio::test]
async fn test_concurrent_and_sequential_runs_agree() {
    let exports = standard_exports();
    let fetcher = CsvDirectoryFetcher::new(exports.path());
    let pipeline = Pipeline::default();

    let sequential = pipeline.run(&fetcher).await;
    let concurrent = pipeline.run_concurrent(&fetcher).await;

    assert_eq!(
        sequential.payload.to_json(false).unwrap(),
        concurrent.payload.to_json(false).unwrap()
    );
}

/// Test a configured sheet with its own range and sentinel
///
/// Purpose: Validate config-driven schemas through the whole pipeline
/// Benefit: Sheets laid out differently from the standard reports are supported
#[tokio::test]
async fn test_configured_sheet_with_offset_range() {
    let temp_dir = TempDir::new().unwrap();
    write_exports(
        temp_dir.path(),
        &[(
            "Weekly",
            "Weekly report,,,,,,,,\n\
             ,日付,キャンペーン,,費用,表示回数,クリック,CTR,CV\n\
             ,2025/10/06,Brand,,100,10,1,,0\n\
             ,2025/10/13,Generic,,200,20,2,,1\n",
        )],
    );

    let mut sheet = SheetConfig::builtin(SchemaKind::Performance);
    sheet.key = "weekly".to_string();
    sheet.name = "Weekly".to_string();
    sheet.range = "B2:I".to_string();

    let config = Config {
        sentinel: "すべてのキャンペーン".to_string(),
        sheets: vec![sheet],
        ..Config::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let fetcher = CsvDirectoryFetcher::new(temp_dir.path());

    let output = pipeline.run(&fetcher).await;
    let weekly = output.payload.dataset("weekly").unwrap();

    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[1].iso_date(), "2025-10-13");
    assert_eq!(weekly[1].cost, 200.0);
    assert_eq!(
        output.payload.campaigns().as_slice(),
        ["すべてのキャンペーン", "Brand", "Generic"]
    );
}

/// Test the separate datasets and campaign renderings
///
/// Purpose: Validate the two-blob output used by page templates
/// Benefit: Templates can embed datasets and campaigns independently
#[tokio::test]
async fn test_separate_json_blobs() {
    let exports = standard_exports();
    let fetcher = CsvDirectoryFetcher::new(exports.path());
    let output = Pipeline::default().run(&fetcher).await;

    let datasets: Value = serde_json::from_str(&output.payload.datasets_json(false).unwrap()).unwrap();
    assert_eq!(datasets.as_object().unwrap().len(), 3);

    let campaigns: Vec<String> =
        serde_json::from_str(&output.payload.campaigns_json(true).unwrap()).unwrap();
    assert_eq!(campaigns[0], "all campaigns");
}
