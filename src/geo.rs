//! 町丁境界データの読み込みと人口データとの結合
//!
//! 境界データ（国勢調査 町丁・字等別境界、GeoJSON）の各地物を
//! 町丁名で人口データと突き合わせる。座標系の変換や図形計算は行わず、
//! ジオメトリは地図レイヤーへそのまま受け渡す。

use crate::error::{PopulationMapError, Result};
use crate::reader::PopulationRow;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// 地物の町丁名が入っているプロパティ名（境界データセット由来）
pub const AREA_NAME_PROPERTY: &str = "S_NAME";

/// 町丁の境界ポリゴン
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPolygon {
    pub area_name: String,
    /// GeoJSONのジオメトリをそのまま保持する
    pub geometry: Value,
}

/// 境界ポリゴンと人口レコードの結合結果
///
/// 件数と並び順は常に入力ポリゴンと同じ。人口データに一致する町丁が
/// なければ人口系の項目はすべて欠損のまま残す。
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedAreaRecord {
    pub area_name: String,
    pub geometry: Value,
    /// 人口データ側の町丁名。一致しなかった場合はNone
    pub address: Option<String>,
    pub male: Option<i64>,
    pub female: Option<i64>,
    pub population: Option<i64>,
    pub households: Option<i64>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Value,
    #[serde(default)]
    geometry: Value,
}

/// GeoJSONファイルから町丁境界を読み込む
pub fn load_boundaries(path: &Path) -> Result<Vec<AreaPolygon>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PopulationMapError::Boundary(format!("{}: {}", path.display(), e)))?;
    let collection: FeatureCollection = serde_json::from_str(&content)
        .map_err(|e| PopulationMapError::Boundary(format!("{}: {}", path.display(), e)))?;

    Ok(collection
        .features
        .into_iter()
        .map(|feature| AreaPolygon {
            area_name: feature
                .properties
                .get(AREA_NAME_PROPERTY)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            geometry: feature.geometry,
        })
        .collect())
}

/// 境界ポリゴンを基準とした左結合
///
/// 突き合わせは正規化後の町丁名の完全一致のみ。あいまい一致はしない。
/// 二つのデータソースは別々に保守されているため、名前のずれは欠損として
/// 見えるようにする。境界側に無い人口レコードは捨てる。
pub fn join(polygons: &[AreaPolygon], rows: &[PopulationRow]) -> Vec<JoinedAreaRecord> {
    polygons
        .iter()
        .map(|polygon| {
            // 町丁名が重複していた場合は最初の一致を採用する
            let matched = rows.iter().find(|row| row.area == polygon.area_name);
            JoinedAreaRecord {
                area_name: polygon.area_name.clone(),
                geometry: polygon.geometry.clone(),
                address: matched.map(|row| row.area.clone()),
                male: matched.and_then(|row| row.male),
                female: matched.and_then(|row| row.female),
                population: matched.and_then(|row| row.population),
                households: matched.and_then(|row| row.households),
            }
        })
        .collect()
}

/// 結合結果を地図レイヤー向けのGeoJSONに変換する
///
/// 欠損値はnullのまま出力し、塗り分け側で区別できるようにする。
pub fn to_feature_collection(records: &[JoinedAreaRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|record| {
            json!({
                "type": "Feature",
                "properties": {
                    "S_NAME": record.area_name,
                    "住所": record.address,
                    "男": record.male,
                    "女": record.female,
                    "人口数": record.population,
                    "世帯数": record.households,
                },
                "geometry": record.geometry,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(name: &str) -> AreaPolygon {
        AreaPolygon {
            area_name: name.to_string(),
            geometry: json!({"type": "Polygon", "coordinates": []}),
        }
    }

    fn row(area: &str, population: i64) -> PopulationRow {
        PopulationRow {
            area: area.to_string(),
            male: Some(population / 2),
            female: Some(population - population / 2),
            population: Some(population),
            households: Some(population / 3),
        }
    }

    #[test]
    fn test_join_preserves_every_polygon() {
        let polygons = vec![polygon("一丁目"), polygon("二丁目"), polygon("三丁目")];
        let rows = vec![row("一丁目", 250), row("四丁目", 999)];

        let joined = join(&polygons, &rows);

        assert_eq!(joined.len(), polygons.len());
        assert_eq!(joined[0].population, Some(250));
        // 一致しない町丁は欠損のまま残す
        assert_eq!(joined[1].population, None);
        assert_eq!(joined[1].address, None);
        assert_eq!(joined[2].population, None);
        // 境界側に無い「四丁目」はどこにも現れない
        assert!(joined.iter().all(|r| r.area_name != "四丁目"));
    }

    #[test]
    fn test_join_is_deterministic() {
        let polygons = vec![polygon("二丁目"), polygon("一丁目")];
        let rows = vec![row("一丁目", 100), row("二丁目", 200)];

        let first = join(&polygons, &rows);
        let second = join(&polygons, &rows);

        assert_eq!(first, second);
        // 出力順は入力ポリゴンの順
        assert_eq!(first[0].area_name, "二丁目");
        assert_eq!(first[1].area_name, "一丁目");
    }

    #[test]
    fn test_join_duplicate_rows_take_first_match() {
        let polygons = vec![polygon("一丁目")];
        let rows = vec![row("一丁目", 100), row("一丁目", 999)];

        let joined = join(&polygons, &rows);
        assert_eq!(joined[0].population, Some(100));
    }

    #[test]
    fn test_to_feature_collection_null_for_missing() {
        let polygons = vec![polygon("一丁目"), polygon("二丁目")];
        let rows = vec![row("一丁目", 250)];
        let collection = to_feature_collection(&join(&polygons, &rows));

        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["人口数"], json!(250));
        assert_eq!(features[1]["properties"]["人口数"], Value::Null);
        assert_eq!(features[1]["properties"]["住所"], Value::Null);
        assert_eq!(features[1]["properties"]["S_NAME"], json!("二丁目"));
    }
}
