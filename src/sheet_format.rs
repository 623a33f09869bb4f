//! シート名の解析とレイアウト形式の判定
//!
//! シート名は「<元号アルファベット><年>.<月>.<日>」形式（例: R6.12.1）。
//! 令和6年3月分までは列構成の異なる旧形式で作られている。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SHEET_DATE_RE: Regex = Regex::new(r"^[A-Za-z](\d+)\.(\d+)\.(\d+)$").unwrap();
}

/// シート名から（年, 月）を取り出す。形式が合わなければNone
pub fn parse_sheet_date(sheet_id: &str) -> Option<(u32, u32)> {
    let caps = SHEET_DATE_RE.captures(sheet_id.trim())?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    Some((year, month))
}

/// 旧形式（令和6年3月分まで）かどうか
///
/// シート名が解析できない場合は新形式として扱う。
/// ここでの判定失敗を理由に取込を中断してはいけない。
pub fn is_legacy_format(sheet_id: &str) -> bool {
    match parse_sheet_date(sheet_id) {
        Some((year, month)) => year < 6 || (year == 6 && month <= 3),
        None => false,
    }
}

/// スプレッドシートの列レイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// 先頭列が町丁名。2列目は未使用で読み飛ばし、続く4列が男・女・人口数・世帯数
    Legacy,
    /// 先頭列が町丁名（インデックス列）。続く4列が男・女・人口数・世帯数
    Modern,
}

impl SheetLayout {
    pub fn detect(sheet_id: &str) -> Self {
        if is_legacy_format(sheet_id) {
            SheetLayout::Legacy
        } else {
            SheetLayout::Modern
        }
    }
}

impl std::fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetLayout::Legacy => write!(f, "旧形式"),
            SheetLayout::Modern => write!(f, "新形式"),
        }
    }
}
