//! 人口スプレッドシートの読み込みと正規化
//!
//! 年度ごとに列構成の揺れるシートを読み、町丁別人口の正規化済みレコード
//! （町丁名・男・女・人口数・世帯数）に変換する。
//!
//! ## 処理の流れ
//! 1. シート名からレイアウト形式を判定（[`SheetLayout::detect`]）
//! 2. 町丁名が空の行を除外
//! 3. 最終行（合計行）を無条件に除外
//! 4. 数値列を整数化（数値でないセルは欠損にする）
//! 5. 町丁名を正規化（全角数字→漢数字、空白除去）

use crate::error::{PopulationMapError, Result};
use crate::normalizer::normalize_address;
use crate::sheet_format::SheetLayout;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// 町丁別人口の正規化済みレコード
///
/// 数値セルが読めなかった項目は欠損（None）として残す。
/// 1シートにつき町丁名ごとに1件で、合計行は含まない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationRow {
    pub area: String,
    pub male: Option<i64>,
    pub female: Option<i64>,
    pub population: Option<i64>,
    pub households: Option<i64>,
}

/// 正規化後の列名（エラー表示と出力プロパティに使う）
pub const CANONICAL_COLUMNS: [&str; 5] = ["住所", "男", "女", "人口数", "世帯数"];

/// ヘッダー行の位置（先頭行はタイトル行）
const HEADER_ROW: usize = 1;
/// データ開始行
const DATA_START_ROW: usize = 2;

/// レイアウトごとの列位置
struct ColumnMap {
    area: usize,
    male: usize,
    female: usize,
    population: usize,
    households: usize,
}

impl ColumnMap {
    fn for_layout(layout: SheetLayout) -> Self {
        match layout {
            // 旧形式は2列目（このスキーマで使わない列）を読み飛ばす
            SheetLayout::Legacy => Self {
                area: 0,
                male: 2,
                female: 3,
                population: 4,
                households: 5,
            },
            SheetLayout::Modern => Self {
                area: 0,
                male: 1,
                female: 2,
                population: 3,
                households: 4,
            },
        }
    }

    fn required_width(&self) -> usize {
        self.households + 1
    }

    fn positions(&self) -> [(&'static str, usize); 5] {
        [
            (CANONICAL_COLUMNS[0], self.area),
            (CANONICAL_COLUMNS[1], self.male),
            (CANONICAL_COLUMNS[2], self.female),
            (CANONICAL_COLUMNS[3], self.population),
            (CANONICAL_COLUMNS[4], self.households),
        ]
    }
}

/// 1シート分の人口データを読み込む
///
/// ファイルやシートが開けない場合は、ファイル名・シート名・判定した形式を
/// 含むエラーを返す。空の結果で黙って済ませることはしない。
pub fn read_population_sheet(path: &Path, sheet_id: &str) -> Result<Vec<PopulationRow>> {
    let layout = SheetLayout::detect(sheet_id);

    let data_source_error = |source: calamine::Error| PopulationMapError::DataSource {
        path: path.display().to_string(),
        sheet: sheet_id.to_string(),
        layout: layout.to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(data_source_error)?;
    let range = workbook
        .worksheet_range(sheet_id)
        .map_err(data_source_error)?;

    extract_rows(&range, layout, sheet_id)
}

fn extract_rows(
    range: &Range<Data>,
    layout: SheetLayout,
    sheet_id: &str,
) -> Result<Vec<PopulationRow>> {
    let cols = ColumnMap::for_layout(layout);

    if range.width() < cols.required_width() {
        let missing = cols
            .positions()
            .iter()
            .filter(|(_, index)| *index >= range.width())
            .map(|(name, _)| (*name).to_string())
            .collect();
        let found = range
            .rows()
            .nth(HEADER_ROW)
            .map(|row| {
                row.iter()
                    .filter_map(cell_to_string)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        return Err(PopulationMapError::SchemaMismatch {
            sheet: sheet_id.to_string(),
            missing,
            found,
        });
    }

    // 町丁名が空の行（注記・空行）を先に除外する
    let mut rows: Vec<&[Data]> = range
        .rows()
        .skip(DATA_START_ROW)
        .filter(|row| {
            row.get(cols.area)
                .and_then(cell_to_string)
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false)
        })
        .collect();

    // 最終行は合計行。データとしては扱わない
    rows.pop();

    Ok(rows
        .into_iter()
        .map(|row| PopulationRow {
            area: normalize_address(
                &row.get(cols.area)
                    .and_then(cell_to_string)
                    .unwrap_or_default(),
            ),
            male: cell_to_i64(row.get(cols.male)),
            female: cell_to_i64(row.get(cols.female)),
            population: cell_to_i64(row.get(cols.population)),
            households: cell_to_i64(row.get(cols.households)),
        })
        .collect())
}

pub(crate) fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        other => Some(other.to_string()),
    }
}

/// 数値セルを整数化する。数値と解釈できないセルは欠損にする
fn cell_to_i64(cell: Option<&Data>) -> Option<i64> {
    match cell? {
        Data::Int(i) => Some(*i),
        // Excel由来の整数は小数部なしのFloatで来る。小数部のある値は
        // 黙って切り捨てず、他の数値化失敗と同じく欠損にする
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(*f as i64)
            } else {
                None
            }
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_i64_coercion() {
        assert_eq!(cell_to_i64(Some(&Data::Int(250))), Some(250));
        assert_eq!(cell_to_i64(Some(&Data::Float(120.0))), Some(120));
        assert_eq!(cell_to_i64(Some(&Data::String("90".into()))), Some(90));
        assert_eq!(cell_to_i64(Some(&Data::String(" 90 ".into()))), Some(90));
    }

    #[test]
    fn test_cell_to_i64_non_numeric_is_missing() {
        assert_eq!(cell_to_i64(Some(&Data::String("n/a".into()))), None);
        assert_eq!(cell_to_i64(Some(&Data::String("—".into()))), None);
        // 小数部のあるセルは丸めず欠損にする
        assert_eq!(cell_to_i64(Some(&Data::Float(120.7))), None);
        assert_eq!(cell_to_i64(Some(&Data::String("1,234".into()))), None);
        assert_eq!(cell_to_i64(Some(&Data::Empty)), None);
        assert_eq!(cell_to_i64(None), None);
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::String("柴崎".into())), Some("柴崎".to_string()));
        assert_eq!(cell_to_string(&Data::Int(3)), Some("3".to_string()));
        assert_eq!(cell_to_string(&Data::Empty), None);
    }
}
