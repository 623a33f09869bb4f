use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulationMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("人口データを読み込めません: {path} (シート: {sheet}, 形式: {layout}): {source}")]
    DataSource {
        path: String,
        sheet: String,
        layout: String,
        #[source]
        source: calamine::Error,
    },

    #[error("列構成が一致しません (シート: {sheet}): 不足列={missing:?}, 検出列={found:?}")]
    SchemaMismatch {
        sheet: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("境界データの読み込みに失敗しました: {0}")]
    Boundary(String),

    #[error("学校データの読み込みに失敗しました: {0}")]
    SchoolData(String),

    #[error("指定された年月が見つかりません: {0}")]
    PeriodNotFound(String),

    #[error("Excelファイルの読み込みエラー: {0}")]
    Excel(#[from] calamine::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PopulationMapError>;
