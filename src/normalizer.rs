//! 住所（町丁名）の正規化
//!
//! 人口データ側と境界データ側で表記の揺れる全角数字を漢数字に統一する。
//! 結合は正規化後の完全一致で行うため、ここでの変換が突き合わせの前提になる。

/// 全角数字と漢数字の対応表
const DIGIT_KANJI: &[(char, char)] = &[
    ('１', '一'),
    ('２', '二'),
    ('３', '三'),
    ('４', '四'),
    ('５', '五'),
    ('６', '六'),
    ('７', '七'),
    ('８', '八'),
    ('９', '九'),
];

/// 住所文字列を正規化する
///
/// 全角数字（１〜９）を1文字ずつ漢数字に置換し、前後の空白を除去する。
/// 桁をまたぐ数値変換は行わない（「１２」は「一二」になる）。
/// 町丁の丁目は9を超えないため、この1文字ずつの置換で十分。
pub fn normalize_address(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            DIGIT_KANJI
                .iter()
                .find(|(zenkaku, _)| *zenkaku == c)
                .map(|(_, kanji)| *kanji)
                .unwrap_or(c)
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address_digits() {
        assert_eq!(normalize_address("佐須町２丁目"), "佐須町二丁目");
        assert_eq!(normalize_address("上石原３丁目"), "上石原三丁目");
        assert_eq!(normalize_address("９丁目"), "九丁目");
    }

    #[test]
    fn test_normalize_address_digit_wise() {
        // 桁をまたぐ変換はしない（「百二十三」にはならない）
        assert_eq!(normalize_address("１２３"), "一二三");
    }

    #[test]
    fn test_normalize_address_trims_whitespace() {
        assert_eq!(normalize_address("  国領町１丁目　"), "国領町一丁目");
    }

    #[test]
    fn test_normalize_address_idempotent() {
        let once = normalize_address("深大寺北町５丁目 ");
        assert_eq!(normalize_address(&once), once);
    }

    #[test]
    fn test_normalize_address_leaves_other_chars() {
        // 全角ゼロと半角数字は変換対象外
        assert_eq!(normalize_address("０丁目"), "０丁目");
        assert_eq!(normalize_address("1丁目"), "1丁目");
        assert_eq!(normalize_address("調布ケ丘"), "調布ケ丘");
    }
}
