//! アプリケーション設定
//!
//! 元データのファイル構成と地図表示用の座標をまとめて保持する。
//! モジュールレベルの定数ではなく、目録や結合処理へ明示的に渡す。

use crate::error::{PopulationMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 年度ごとの人口データファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationFile {
    /// 年度キー（例: "R4"）
    pub key: String,
    pub path: PathBuf,
}

/// 地図に表示する駅
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 人口データファイル（列挙順が目録の順序になる）
    pub population_files: Vec<PopulationFile>,
    /// 町丁別境界データ（GeoJSON）
    pub boundary_path: PathBuf,
    /// 市立小・中学校一覧（マーカー表示用、読めなくても地図生成は続行する）
    pub school_data_path: PathBuf,
    /// 地図の中心座標
    pub center_lat: f64,
    pub center_lon: f64,
    pub center_label: String,
    /// 京王線の駅座標（地図レイヤーがマーカー表示に使う）
    pub stations: Vec<Station>,
}

impl AppConfig {
    /// 設定ファイルがあれば読み込み、無ければ既定の構成を返す
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_json::from_str(&content)?;
            if config.population_files.is_empty() {
                return Err(PopulationMapError::Config(
                    "人口データファイルが1件も登録されていません".into(),
                ));
            }
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    fn default_config() -> Self {
        Self {
            population_files: vec![
                PopulationFile {
                    key: "R4".into(),
                    path: "data/choufushi_open_data_chouchoubetu0401.xlsx".into(),
                },
                PopulationFile {
                    key: "R6".into(),
                    path: "data/choufushi_open_data_chouchoubetu1201.xlsx".into(),
                },
            ],
            boundary_path: "data/r2ka13208.geojson".into(),
            school_data_path: "data/choufushi_open_data_school.xls".into(),
            // 佐須町二丁目
            center_lat: 35.660076,
            center_lon: 139.554033,
            center_label: "佐須町二丁目".into(),
            stations: vec![
                Station {
                    name: "調布駅".into(),
                    lat: 35.652601,
                    lon: 139.544622,
                },
                Station {
                    name: "布田駅".into(),
                    lat: 35.651678,
                    lon: 139.553334,
                },
                Station {
                    name: "国領駅".into(),
                    lat: 35.651186,
                    lon: 139.561566,
                },
                Station {
                    name: "西調布駅".into(),
                    lat: 35.656951,
                    lon: 139.528743,
                },
                Station {
                    name: "飛田給駅".into(),
                    lat: 35.660834,
                    lon: 139.523944,
                },
                Station {
                    name: "柴崎駅".into(),
                    lat: 35.653842,
                    lon: 139.570748,
                },
                Station {
                    name: "つつじヶ丘駅".into(),
                    lat: 35.657636,
                    lon: 139.575427,
                },
                Station {
                    name: "仙川駅".into(),
                    lat: 35.662073,
                    lon: 139.585213,
                },
                Station {
                    name: "京王多摩川駅".into(),
                    lat: 35.642692,
                    lon: 139.543550,
                },
            ],
        }
    }
}
