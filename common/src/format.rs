//! 表示用フォーマット
//!
//! 履歴カードに出すファイルサイズと日時の整形。ロケール処理は持たず、
//! サーバーが返すISO 8601文字列をそのまま読みやすく刻むだけ。

/// バイト数を B / KB / MB 表記にする
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// ISO 8601文字列を「YYYY-MM-DD HH:MM」に整形する
///
/// 秒以下とタイムゾーン表記は落とす。想定外の形はそのまま返す。
pub fn format_timestamp(iso: &str) -> String {
    let Some((date, time)) = iso.split_once('T') else {
        return iso.to_string();
    };

    let hhmm: String = time
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    let hhmm = match hhmm.splitn(3, ':').take(2).collect::<Vec<_>>()[..] {
        [h, m] => format!("{}:{}", h, m),
        _ => return iso.to_string(),
    };

    format!("{} {}", date, hhmm)
}
