//! 変換履歴ストア
//!
//! 検索語と再取得シグナルに追従する履歴一覧。表示状態は常に
//! Loading / Error / Ready のどれか1つ。一覧は楽観的に書き換えず、
//! 見た目の変化は必ずサーバーからの再取得を経る。
//!
//! 取得が重なったときは「最後のリクエストが勝つ」。begin_fetch()が発行する
//! 単調増加のチケットをレスポンス適用時に照合し、古い検索語への応答が
//! 後から届いても捨てる。

use crate::error::GatewayError;
use crate::types::ConversionRecord;

/// 取得リクエストの識別子
///
/// begin_fetch()のたびに増える。apply()でこの値が最新と一致しない
/// レスポンスは破棄される。
pub type FetchTicket = u64;

/// 履歴一覧の表示状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<ConversionRecord>),
}

/// 履歴ストア
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    state: HistoryState,
    search: String,
    seq: FetchTicket,
    action_error: Option<String>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Ready時の一覧（それ以外は空）
    pub fn records(&self) -> &[ConversionRecord] {
        match &self.state {
            HistoryState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, HistoryState::Loading)
    }

    /// 取得失敗時のメッセージ
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            HistoryState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// 削除・ダウンロード失敗時のメッセージ（一覧表示とは独立）
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// 検索語を更新して再取得を開始する
    ///
    /// デバウンスはしない。返ってきたチケットをapply()に渡すこと。
    pub fn set_search(&mut self, term: impl Into<String>) -> FetchTicket {
        self.search = term.into();
        self.begin_fetch()
    }

    /// 現在の検索語で再取得を開始する
    ///
    /// 変換完了シグナルと削除成功後のリフレッシュもここを通る。
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.state = HistoryState::Loading;
        self.seq
    }

    /// 取得結果を適用する
    ///
    /// ticketが最新でなければ何もせずfalse（追い越された古い応答）。
    /// 適用できた場合は操作エラーの表示も消す。
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ConversionRecord>, GatewayError>,
    ) -> bool {
        if ticket != self.seq {
            return false;
        }
        self.state = match result {
            Ok(records) => HistoryState::Ready(records),
            Err(error) => HistoryState::Error(error.user_message()),
        };
        self.action_error = None;
        true
    }

    /// 削除・ダウンロード失敗を記録する
    ///
    /// 一覧（HistoryState）には触れない。消えていないレコードを
    /// 消えたように見せないため。
    pub fn report_action_error(&mut self, message: impl Into<String>) {
        self.action_error = Some(message.into());
    }

    pub fn clear_action_error(&mut self) {
        self.action_error = None;
    }
}
