//! エラー型定義
//!
//! エラーは2系統に分かれる:
//! - SelectionError: ファイル選択時のクライアント側バリデーション。
//!   リクエスト発行前に弾かれるためワークフローには届かない。
//! - GatewayError: 変換サービスとの通信で発生するエラー。

use thiserror::Error;

/// ファイル選択のバリデーションエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("file too large: {0} bytes")]
    TooLarge(u64),
}

impl SelectionError {
    /// 選択面に表示する文言
    pub fn user_message(&self) -> String {
        match self {
            SelectionError::UnsupportedType(mime) => {
                format!("対応していないファイル形式です: {}", mime)
            }
            SelectionError::TooLarge(_) => "ファイルサイズが上限（10MB）を超えています".to_string(),
        }
    }
}

/// 変換サービスとの通信エラー
///
/// ゲートウェイはエラーの意味を解釈しない。分類して運ぶだけで、
/// 文言への変換は呼び出し側がuser_message()で行う。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// 非2xxレスポンス。detailはサーバーの診断メッセージ
    #[error("service error ({status}): {detail}")]
    Service { status: u16, detail: String },

    /// ネットワーク到達不能・タイムアウトなどのトランスポート障害
    #[error("network error: {0}")]
    Transport(String),

    /// レスポンスの形が想定と合わないなど、分類できないもの
    #[error("unexpected response: {0}")]
    Unknown(String),
}

impl GatewayError {
    /// ユーザー向けの1行メッセージ
    ///
    /// サーバーの診断文言 > トランスポートのエラー記述 > 汎用文言 の順で採用する。
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Service { detail, .. } if !detail.is_empty() => detail.clone(),
            GatewayError::Service { status, .. } => format!("サーバーエラー（{}）", status),
            GatewayError::Transport(msg) if !msg.is_empty() => msg.clone(),
            _ => "通信に失敗しました".to_string(),
        }
    }
}

/// Result型エイリアス
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
