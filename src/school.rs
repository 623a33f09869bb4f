//! 学校データの読み込み
//!
//! 市立小・中学校一覧のスプレッドシートから、地図レイヤーがマーカー表示に
//! 使う学校名と座標を取り出す。人口データとは独立した任意の重ね合わせで、
//! 読み込みに失敗したら呼び出し側がマーカー省略に格下げする。

use crate::error::{PopulationMapError, Result};
use crate::reader::cell_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 学校種別（一覧の種別列の値と対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolType {
    Elementary,
    JuniorHigh,
}

impl std::fmt::Display for SchoolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchoolType::Elementary => write!(f, "小学校"),
            SchoolType::JuniorHigh => write!(f, "中学校"),
        }
    }
}

/// 地図にマーカー表示する学校
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// データ開始行（1行目タイトル、2行目ヘッダー）
const DATA_START_ROW: usize = 2;

/// 列位置: 種別・学校名・緯度・経度
const TYPE_COL: usize = 0;
const NAME_COL: usize = 1;
const LAT_COL: usize = 2;
const LON_COL: usize = 3;

/// 学校一覧から指定種別の学校を読み込む
///
/// 座標の読めない行は読み飛ばす。ファイルやシートが開けない場合はエラーを
/// 返すだけで、地図全体の生成を止めるかどうかは呼び出し側が決める。
pub fn load_schools(path: &Path, school_type: SchoolType) -> Result<Vec<School>> {
    let school_error = |message: String| {
        PopulationMapError::SchoolData(format!("{}: {}", path.display(), message))
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| school_error(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| school_error("シートがありません".into()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| school_error(e.to_string()))?;

    let type_label = school_type.to_string();

    Ok(range
        .rows()
        .skip(DATA_START_ROW)
        .filter(|row| {
            row.get(TYPE_COL)
                .and_then(cell_to_string)
                .map(|s| s.trim() == type_label)
                .unwrap_or(false)
        })
        .filter_map(|row| {
            let name = row.get(NAME_COL).and_then(cell_to_string)?;
            let name = name.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(School {
                name,
                lat: row.get(LAT_COL).and_then(cell_to_f64)?,
                lon: row.get(LON_COL).and_then(cell_to_f64)?,
            })
        })
        .collect())
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
