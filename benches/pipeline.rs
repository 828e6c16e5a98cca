use ad_dashboard_feed::app::services::dataset_builder::build_dataset;
use ad_dashboard_feed::app::services::value_parsers::{parse_date, parse_number};
use ad_dashboard_feed::{RawRow, SchemaKind, SheetSchema};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn group_sheet(rows: usize) -> Vec<RawRow> {
    let header = ["日付", "キャンペーン", "広告グループ", "費用", "表示回数", "クリック", "CTR", "CV"];
    let mut sheet = vec![header.iter().map(|c| c.to_string()).collect::<RawRow>()];
    for i in 0..rows {
        sheet.push(vec![
            format!("2025/{:02}/{:02}", i % 12 + 1, i % 28 + 1),
            format!("Campaign {}", i % 40),
            format!("Group {}", i % 7),
            format!("¥{},{:03}", i % 100, i % 1000),
            format!("{}", i * 13),
            format!("{}", i % 300),
            "1.0%".to_string(),
            format!("{}", i % 5),
        ]);
    }
    sheet
}

fn bench_value_parsers(c: &mut Criterion) {
    c.bench_function("parse_number currency", |b| {
        b.iter(|| parse_number(black_box("¥1,234,567.89")))
    });
    c.bench_function("parse_date slashed", |b| {
        b.iter(|| parse_date(black_box("2025/10/09")))
    });
    c.bench_function("parse_date kanji", |b| {
        b.iter(|| parse_date(black_box("2025年10月9日")))
    });
}

fn bench_build_dataset(c: &mut Criterion) {
    let schema = SheetSchema::builtin(SchemaKind::Group);
    let sheet = group_sheet(10_000);
    c.bench_function("build_dataset 10k group rows", |b| {
        b.iter(|| build_dataset(black_box(&schema), black_box(&sheet)))
    });
}

criterion_group!(benches, bench_value_parsers, bench_build_dataset);
criterion_main!(benches);
