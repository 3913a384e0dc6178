//! ファイル選択のバリデーション
//!
//! リクエストを発行する前にクライアント側で弾く。ここで弾かれた選択は
//! ワークフローの状態を一切変えない。

use crate::error::SelectionError;

/// アップロード上限（10MiB）
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// 受け付ける画像形式
///
/// BMPはブラウザによってimage/x-ms-bmpと報告されることがある。
pub const ACCEPTED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/bmp", "image/x-ms-bmp"];

/// 選択されたファイルを検査する
///
/// # Arguments
/// * `mime_type` - ブラウザが報告するMIMEタイプ
/// * `size` - ファイルサイズ（バイト）
pub fn validate_selection(mime_type: &str, size: u64) -> Result<(), SelectionError> {
    if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
        return Err(SelectionError::UnsupportedType(mime_type.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(SelectionError::TooLarge(size));
    }
    Ok(())
}
