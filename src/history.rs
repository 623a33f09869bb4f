//! 人口推移の時系列テーブル
//!
//! 目録の全期間について人口データを読み込み、（年月, 地域, 人口）の
//! 長形式テーブルに平坦化する。期間ごとに全地域合計の行も足す。

use crate::catalog::{PeriodIdentifier, SheetCatalog};
use crate::error::Result;
use crate::reader::read_population_sheet;
use chrono::NaiveDate;
use serde::Serialize;

/// 全地域の合計を表す予約地域名
pub const TOTAL_AREA: &str = "全人口";

/// 時系列テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    #[serde(rename = "年月")]
    pub period_label: String,
    #[serde(rename = "地域")]
    pub area_name: String,
    #[serde(rename = "人口")]
    pub population: i64,
}

/// 時系列組み立ての結果
#[derive(Debug)]
pub struct HistoryTable {
    pub rows: Vec<HistoryRow>,
    /// 読み込みに失敗して除外した期間
    pub warnings: Vec<String>,
}

/// 目録の全期間から履歴テーブルを組み立てる
///
/// 読み込みに失敗した期間はその期間ごと除外し、残りの期間で続行する。
/// 部分的に読めた行だけを混ぜることはしない。
pub fn build_history(catalog: &SheetCatalog) -> HistoryTable {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for period in catalog.list_periods() {
        match read_period(catalog, period) {
            Ok(mut period_rows) => rows.append(&mut period_rows),
            Err(e) => warnings.push(format!("{}: {}", period.label(), e)),
        }
    }

    HistoryTable { rows, warnings }
}

fn read_period(catalog: &SheetCatalog, period: &PeriodIdentifier) -> Result<Vec<HistoryRow>> {
    let (path, sheet_name) = catalog.resolve(period)?;
    let data = read_population_sheet(&path, sheet_name)?;
    let label = period.label();

    let mut rows: Vec<HistoryRow> = data
        .iter()
        .filter_map(|row| {
            row.population.map(|population| HistoryRow {
                period_label: label.clone(),
                area_name: row.area.clone(),
                population,
            })
        })
        .collect();

    // 期間ごとの全地域合計（欠損セルは合計に含めない）
    let total: i64 = data.iter().filter_map(|row| row.population).sum();
    rows.push(HistoryRow {
        period_label: label,
        area_name: TOTAL_AREA.to_string(),
        population: total,
    });

    Ok(rows)
}

/// 和暦ラベル「令和y年m月」をグレゴリオ暦の日付に変換する
///
/// グラフ描画側が時系列に並べ替えるために使う。令和1年 = 2019年。
pub fn period_label_to_date(label: &str) -> Option<NaiveDate> {
    let rest = label.strip_prefix("令和")?;
    let (year_str, rest) = rest.split_once('年')?;
    let month_str = rest.strip_suffix('月')?;
    let year: i32 = year_str.parse().ok()?;
    let month: u32 = month_str.parse().ok()?;
    NaiveDate::from_ymd_opt(year + 2018, month, 1)
}
