//! img2dxf Common Library
//!
//! Webクライアントとテストで共有されるコアロジック:
//! ワークフロー状態機械、履歴ストア、ゲートウェイ契約、バリデーション

pub mod error;
pub mod format;
pub mod gateway;
pub mod history;
pub mod settings;
pub mod types;
pub mod validate;
pub mod workflow;

pub use error::{GatewayError, GatewayResult, SelectionError};
pub use format::{format_size, format_timestamp};
pub use gateway::{ConversionGateway, ConvertJob, HistoryQuery};
pub use history::{FetchTicket, HistoryState, HistoryStore};
pub use settings::{ThresholdStore, DEFAULT_THRESHOLD};
pub use types::{
    ConversionMeta, ConversionRecord, ConvertResponse, DeleteAck, HistoryPage, Pagination,
    StatsSummary,
};
pub use validate::{validate_selection, ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES};
pub use workflow::{ConversionWorkflow, PendingUpload, WorkflowStatus, SUCCESS_DISPLAY_MS};
