use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chofu-population-map")]
#[command(about = "調布市オープンデータ人口可視化 - データ取込・結合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 設定ファイル（無ければ既定の構成を使う）
    #[arg(short, long, default_value = "config.json", global = true)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 利用できる年月の一覧を表示
    Periods,

    /// 指定年月の人口データを境界データと結合してGeoJSONを出力
    Map {
        /// 対象の年月（例: 令和6年12月。省略時は最新）
        #[arg(short, long)]
        period: Option<String>,

        /// 出力GeoJSONファイル
        #[arg(short, long, default_value = "population_map.geojson")]
        output: PathBuf,
    },

    /// 全期間の人口推移テーブルをJSONで出力
    History {
        /// 出力JSONファイル
        #[arg(short, long, default_value = "population_history.json")]
        output: PathBuf,
    },
}
