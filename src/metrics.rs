//! 総人口・総世帯数などの集計と前年同月比
//!
//! 選択中の期間の合計値に、目録から探した前年同月との差分を添える。
//! 前年同月のデータが無い・読めない場合は差分を出さない（ゼロ扱いにしない）。

use crate::catalog::{PeriodIdentifier, SheetCatalog};
use crate::reader::{read_population_sheet, PopulationRow};

/// 欠損セルを除いた合計値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub population: i64,
    pub households: i64,
    pub male: i64,
    pub female: i64,
}

impl Totals {
    pub fn from_rows(rows: &[PopulationRow]) -> Self {
        Self {
            population: rows.iter().filter_map(|r| r.population).sum(),
            households: rows.iter().filter_map(|r| r.households).sum(),
            male: rows.iter().filter_map(|r| r.male).sum(),
            female: rows.iter().filter_map(|r| r.female).sum(),
        }
    }
}

/// 選択期間の合計と前年同月からの増減
#[derive(Debug, Clone, Copy)]
pub struct MetricsReport {
    pub current: Totals,
    pub deltas: Option<Totals>,
}

/// 前年同月比つきの集計を作る
///
/// 前年同月の読み込み失敗は増減の省略に格下げする。選択期間そのものの
/// 読み込み失敗は呼び出し側でエラーとして扱うこと。
pub fn build_metrics(
    catalog: &SheetCatalog,
    current_period: &PeriodIdentifier,
    current_rows: &[PopulationRow],
) -> MetricsReport {
    let current = Totals::from_rows(current_rows);

    let deltas = catalog.previous_year_of(current_period).and_then(|previous| {
        let (path, sheet_name) = catalog.resolve(previous).ok()?;
        let rows = read_population_sheet(&path, sheet_name).ok()?;
        let prev = Totals::from_rows(&rows);
        Some(Totals {
            population: current.population - prev.population,
            households: current.households - prev.households,
            male: current.male - prev.male,
            female: current.female - prev.female,
        })
    });

    MetricsReport { current, deltas }
}
