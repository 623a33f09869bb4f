//! 年度別ワークブックのシート目録
//!
//! 設定に登録された各年度のExcelファイルからシート名を列挙し、
//! 年月の降順に並べた期間一覧を提供する。年月が読み取れないシート
//! （表紙・注記など）は対象外。開けないファイルは警告として記録し、
//! 読めたファイルだけで目録を作る。

use crate::config::AppConfig;
use crate::error::{PopulationMapError, Result};
use crate::sheet_format::parse_sheet_date;
use calamine::{open_workbook_auto, Reader};
use std::path::PathBuf;

/// 期間（年月）の識別子
///
/// `year`/`month` は表示と並び替えに使う値で、付け替え対象のシートでは
/// 物理シート名と食い違う。読み込みには `sheet_name` を使うこと。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodIdentifier {
    /// 登録ファイルのキー（年度、例: "R4"）
    pub file_key: String,
    /// 物理シート名
    pub sheet_name: String,
    pub year: u32,
    pub month: u32,
}

impl PeriodIdentifier {
    /// 表示用ラベル（和暦）
    pub fn label(&self) -> String {
        format!("令和{}年{}月", self.year, self.month)
    }
}

/// 年度をまたいで年月を付け替えるシートの対応（歴史的経緯による一点もの）
///
/// 令和4年度ファイルの「R3.5.1」は令和4年5月分のデータとして扱う。
/// 物理シートはそのままで、外向きの年月だけを読み替える。
const SHEET_ALIAS: (&str, &str, &str) = ("R4", "R3.5.1", "R4.5.1");

pub struct SheetCatalog {
    files: Vec<(String, PathBuf)>,
    periods: Vec<PeriodIdentifier>,
    warnings: Vec<String>,
}

impl SheetCatalog {
    /// 設定に登録された全ファイルからシート目録を作る
    pub fn new(config: &AppConfig) -> Self {
        let files: Vec<(String, PathBuf)> = config
            .population_files
            .iter()
            .map(|f| (f.key.clone(), f.path.clone()))
            .collect();

        let mut periods = Vec::new();
        let mut warnings = Vec::new();

        for (key, path) in &files {
            let workbook = match open_workbook_auto(path) {
                Ok(workbook) => workbook,
                Err(e) => {
                    warnings.push(format!("ファイルを開けません: {} ({})", path.display(), e));
                    continue;
                }
            };

            for sheet_name in workbook.sheet_names().to_owned() {
                let effective = alias_for(key, &sheet_name);
                let Some((year, month)) = parse_sheet_date(effective) else {
                    continue;
                };
                if !is_supported(year, month) {
                    continue;
                }
                periods.push(PeriodIdentifier {
                    file_key: key.clone(),
                    sheet_name: sheet_name.clone(),
                    year,
                    month,
                });
            }
        }

        // 年月の降順。同値はファイル・シートの列挙順を保つ（安定ソート）
        periods.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));

        Self {
            files,
            periods,
            warnings,
        }
    }

    /// 年月の降順に並んだ期間一覧
    pub fn list_periods(&self) -> &[PeriodIdentifier] {
        &self.periods
    }

    /// 目録作成時に除外したファイルの警告
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// 期間識別子から実ファイルと物理シート名を引く
    pub fn resolve<'a>(&self, period: &'a PeriodIdentifier) -> Result<(PathBuf, &'a str)> {
        let path = self
            .files
            .iter()
            .find(|(key, _)| *key == period.file_key)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| PopulationMapError::PeriodNotFound(period.label()))?;
        Ok((path, period.sheet_name.as_str()))
    }

    /// 表示ラベルから期間を引く。同じ年月が複数あれば最初の一致を返す
    pub fn find_by_label(&self, label: &str) -> Option<&PeriodIdentifier> {
        self.periods.iter().find(|p| p.label() == label)
    }

    /// 前年同月の期間を探す。無ければNone
    pub fn previous_year_of(&self, current: &PeriodIdentifier) -> Option<&PeriodIdentifier> {
        self.periods
            .iter()
            .find(|p| p.year + 1 == current.year && p.month == current.month)
    }
}

fn alias_for<'a>(file_key: &str, sheet_name: &'a str) -> &'a str {
    let (key, from, to) = SHEET_ALIAS;
    if file_key == key && sheet_name == from {
        to
    } else {
        sheet_name
    }
}

/// 令和4年4月以降のデータのみ対応（それ以前は旧々形式のため対象外）
fn is_supported(year: u32, month: u32) -> bool {
    year > 4 || (year == 4 && month > 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_floor() {
        assert!(!is_supported(3, 12));
        assert!(!is_supported(4, 3));
        assert!(is_supported(4, 4));
        assert!(is_supported(5, 1));
        assert!(is_supported(6, 12));
    }

    #[test]
    fn test_alias_applies_only_to_target_sheet() {
        assert_eq!(alias_for("R4", "R3.5.1"), "R4.5.1");
        assert_eq!(alias_for("R4", "R4.6.1"), "R4.6.1");
        // 他のファイルの同名シートは付け替えない
        assert_eq!(alias_for("R6", "R3.5.1"), "R3.5.1");
    }

    #[test]
    fn test_period_label() {
        let period = PeriodIdentifier {
            file_key: "R6".into(),
            sheet_name: "R6.12.1".into(),
            year: 6,
            month: 12,
        };
        assert_eq!(period.label(), "令和6年12月");
    }
}
