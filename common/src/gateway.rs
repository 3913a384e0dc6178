//! 変換サービスのゲートウェイ契約
//!
//! ワークフローと履歴ストアはこのトレイトにだけ依存する。HTTP実装は
//! web-wasm側、テストはインメモリのフェイクで差し替える。
//! 各操作はサービスの1リクエストに1:1対応し、リトライもキャッシュも
//! 持たない。

use crate::error::GatewayResult;
use crate::types::{ConversionRecord, HistoryPage, StatsSummary};

/// 変換リクエスト1回分のペイロード
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertJob {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 履歴一覧のクエリ
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub search: String,
    pub page: u32,
    pub limit: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: 20,
        }
    }
}

impl HistoryQuery {
    pub fn with_search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }
}

/// 変換サービスの操作一覧
///
/// 成功時は型付きペイロード、失敗時はGatewayErrorを返す。エラーの意味の
/// 解釈（文言化）は呼び出し側の責務。
pub trait ConversionGateway {
    /// POST /api/convert
    async fn convert(&self, job: &ConvertJob, threshold: u8) -> GatewayResult<ConversionRecord>;

    /// GET /api/history
    async fn history(&self, query: &HistoryQuery) -> GatewayResult<HistoryPage>;

    /// GET /api/download/{id}
    async fn download(&self, id: &str) -> GatewayResult<Vec<u8>>;

    /// DELETE /api/delete/{id}
    async fn delete(&self, id: &str) -> GatewayResult<()>;

    /// GET /api/stats
    async fn stats(&self) -> GatewayResult<StatsSummary>;

    /// サムネイルはストアが先読みせず、URL参照で<img>に渡す
    fn thumbnail_url(&self, id: &str) -> String;
}
