//! Test utilities for dataset building

use crate::app::models::RawRow;


/// Build raw rows from string slices
pub fn rows(cells: &[&[&str]]) -> Vec<RawRow> {
    cells
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Header plus three valid rows and two invalid ones, standard group layout
pub fn create_group_sheet() -> Vec<RawRow> {
    rows(&[
        &["日付", "キャンペーン", "広告グループ", "費用", "表示回数", "クリック", "CTR", "CV"],
        &["2025/10/09", "Brand", "Exact", "¥1,200", "3,400", "56", "1.6%", "2"],
        &["2025/10/09", "Generic", "Broad", "¥800", "9,100", "40", "0.4%", "1"],
        &["", "Generic", "Phrase", "¥10", "10", "1", "", "0"],
        &["合計", "", "all", "¥2,010", "12,510", "97", "", "3"],
        &["2025/10/10", "Brand", "Exact", "¥1,000", "3,000", "50", "1.7%", "4"],
    ])
}
