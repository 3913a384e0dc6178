//! 変換サービスAPIの型定義
//!
//! 変換サービスが返すJSONと1:1で対応する型:
//! - ConversionRecord: 変換履歴1件（サーバー所有、クライアントは読むだけ）
//! - HistoryPage: 履歴一覧レスポンス（ページネーション付き）
//! - ConvertResponse: 変換リクエストのレスポンス
//! - StatsSummary: 統計情報

use serde::{Deserialize, Serialize};

/// 変換結果のメタデータ
///
/// サーバー側のDXF解析結果。total_entities以外のキーは
/// バージョンによって増減するためextraにまとめて保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionMeta {
    pub total_entities: u64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 変換履歴1件
///
/// idは不変。クライアントはフィールドを書き換えず、削除だけを要求する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionRecord {
    pub id: String,
    pub filename: String,
    pub original_filename: String,

    /// 作成日時（ISO 8601文字列、サーバーのタイムゾーンのまま）
    pub created_at: String,

    pub threshold: u8,

    /// DXFファイルサイズ（バイト）
    pub file_size: u64,

    pub metadata: ConversionMeta,

    pub status: String,

    pub download_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl ConversionRecord {
    /// ダウンロード時の保存ファイル名（`{filename}.dxf`）
    pub fn download_name(&self) -> String {
        format!("{}.dxf", self.filename)
    }
}

/// ページネーション情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// GET /api/history のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPage {
    pub success: bool,
    pub data: Vec<ConversionRecord>,
    pub pagination: Pagination,
}

/// POST /api/convert のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertResponse {
    pub success: bool,
    pub message: String,
    pub data: ConversionRecord,
}

/// DELETE /api/delete/{id} のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteAck {
    pub success: bool,
    pub message: String,
}

/// GET /api/stats のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    pub total_conversions: u64,
    pub total_storage_bytes: u64,
    pub total_storage_mb: f64,
}
