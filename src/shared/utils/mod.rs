use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Europe::Paris;

/// フランス語の月名（短縮形）
///
/// 表示ラベルは先頭を大文字化し3文字に切り詰めた上でピリオドを付ける。
/// 例: "avr." -> "Avr."、"juillet"系の "juil." -> "Jui."
const FRENCH_SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// 日付文字列を一覧表示用のラベルに変換する
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// `"4 Avr. 04"` 形式のラベル。入力が空または解析不能な場合はNone
/// （呼び出し側が許容する）
///
/// # 表示規則
/// - 日は先頭ゼロなし
/// - 月はフランス語短縮名の先頭大文字・3文字 + ピリオド
/// - 年は下2桁（ゼロ埋め）
///
/// 保存される`date`フィールド自体はISO形式のまま変更しない。
pub fn format_date(date_str: &str) -> Option<String> {
    if date_str.is_empty() {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;

    let short_month = FRENCH_SHORT_MONTHS[date.month0() as usize];
    let mut chars = short_month.chars();
    let first = chars.next()?.to_uppercase().to_string();
    let capitalized = first + chars.as_str();
    // 文字単位で3文字に切り詰める（"août"など非ASCII月名があるため）
    let month_label: String = capitalized.chars().take(3).collect();

    Some(format!(
        "{} {}. {:02}",
        date.day(),
        month_label,
        date.year() % 100
    ))
}

/// 日付文字列のバリデーション
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 実在する日付として解析できる場合はtrue
pub fn is_valid_date(date_str: &str) -> bool {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").is_ok()
}

/// 文字列の先頭の整数部分を解析する
///
/// フォーム入力の数値解析に使用する。先頭の空白を読み飛ばし、符号と
/// それに続く数字列のみを解析する（例: "120 €" -> 120、"abc" -> None）。
///
/// # 引数
/// * `raw` - フォームの生入力値
///
/// # 戻り値
/// 解析された整数、または数値として解析できない場合はNone
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();

    let (rest, negative) = match trimmed.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (trimmed.strip_prefix('+').unwrap_or(trimmed), false),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// 現在の日時をパリ時間のRFC3339文字列で取得
///
/// ローカルストアのタイムスタンプ列に使用する。
pub fn current_paris_timestamp() -> String {
    Utc::now().with_timezone(&Paris).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_format_date() {
        // 基準となる表示形式
        assert_eq!(format_date("2004-04-04"), Some("4 Avr. 04".to_string()));
        // 日は先頭ゼロなし、年は下2桁
        assert_eq!(format_date("2001-01-01"), Some("1 Jan. 01".to_string()));
        assert_eq!(format_date("2022-12-25"), Some("25 Déc. 22".to_string()));
        // 月名が3文字未満にならないこと（"mai" -> "Mai."）
        assert_eq!(format_date("2003-05-15"), Some("15 Mai. 03".to_string()));
        // 非ASCII月名の切り詰め（"août" -> "Aoû."）
        assert_eq!(format_date("2019-08-09"), Some("9 Aoû. 19".to_string()));
    }

    #[test]
    fn test_format_date_empty_and_invalid() {
        // 空文字列はNone（呼び出し側が許容する）
        assert_eq!(format_date(""), None);
        // 解析不能な日付もNone
        assert_eq!(format_date("pas une date"), None);
        assert_eq!(format_date("2024-13-01"), None);
        assert_eq!(format_date("2023-02-29"), None);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date("2024-01-01"));
        assert!(is_valid_date("2000-02-29"));
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("2024/01/01"));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("400"), Some(400));
        assert_eq!(parse_int_prefix("  42"), Some(42));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        // 数字の後ろに単位などが続く場合は先頭部分のみ解析する
        assert_eq!(parse_int_prefix("120 €"), Some(120));
        assert_eq!(parse_int_prefix("12.5"), Some(12));
        // 数値でない入力はNone
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("€ 12"), None);
    }

    #[quickcheck]
    fn prop_parse_int_prefix_roundtrip(value: i32) -> bool {
        // 整数の文字列表現は必ずそのまま解析できる
        parse_int_prefix(&value.to_string()) == Some(i64::from(value))
    }

    #[quickcheck]
    fn prop_format_date_day_has_no_leading_zero(day: u8) -> bool {
        // 1〜28日の範囲で、日の表示に先頭ゼロが付かないこと
        let day = u32::from(day % 28) + 1;
        let date = format!("2024-03-{day:02}");
        match format_date(&date) {
            Some(label) => label.starts_with(&format!("{day} ")),
            None => false,
        }
    }

    #[test]
    fn test_current_paris_timestamp() {
        let timestamp = current_paris_timestamp();

        // RFC3339形式であることを確認
        assert!(timestamp.contains('T'));
        assert!(timestamp.contains('+') || timestamp.contains('Z'));
    }
}
