//! 調布市人口データ可視化の取込・正規化コア
//!
//! 年度ごとに書式の揺れる町丁別人口のオープンデータ（Excel）を読み込んで
//! 単一のスキーマに正規化し、町丁境界データ（GeoJSON）と名前で結合する。
//! 地図・グラフの描画は本クレートの出力を受け取る側の仕事。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod history;
pub mod metrics;
pub mod normalizer;
pub mod reader;
pub mod school;
pub mod sheet_format;

pub use catalog::{PeriodIdentifier, SheetCatalog};
pub use config::AppConfig;
pub use error::{PopulationMapError, Result};
pub use geo::{join, load_boundaries, AreaPolygon, JoinedAreaRecord};
pub use history::{build_history, HistoryRow, HistoryTable};
pub use reader::{read_population_sheet, PopulationRow};
pub use school::{load_schools, School, SchoolType};
