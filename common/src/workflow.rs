//! 変換ワークフローの状態機械
//!
//! アップロード1件のライフサイクル（選択→送信→結果表示→クリア）を持つ。
//! 状態は常にWorkflowStatusのどれか1つ。個別のboolフラグは持たない。
//!
//! 非同期の送信そのもの（ゲートウェイ呼び出し、成功表示後の遅延クリア）は
//! アプリ層が担い、ここは遷移の判断だけを行う。同時送信の抑止は
//! begin_submit()のガードが単一の関所になる。

use crate::gateway::ConvertJob;

/// 成功バナーを表示してからフォームをクリアするまでの時間（ミリ秒）
///
/// ユーザーが完了を確認できるよう置く表示時間。この間も操作はブロックしない。
pub const SUCCESS_DISPLAY_MS: u32 = 2000;

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    FileSelected,
    Converting,
    Succeeded(String),
    Failed(String),
}

impl WorkflowStatus {
    /// バナーに出すメッセージ（Succeeded/Failedのみ）
    pub fn message(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Succeeded(msg) | WorkflowStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_converting(&self) -> bool {
        matches!(self, WorkflowStatus::Converting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, WorkflowStatus::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WorkflowStatus::Failed(_))
    }
}

/// 選択中のファイル
///
/// 同時に存在するのは最大1件。bytesが送信ペイロード、preview_urlは
/// 同じバイト列から作ったData URL。
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
    pub preview_url: String,
}

/// 変換ワークフロー
#[derive(Debug, Clone, Default)]
pub struct ConversionWorkflow {
    status: WorkflowStatus,
    upload: Option<PendingUpload>,
}

impl ConversionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn upload(&self) -> Option<&PendingUpload> {
        self.upload.as_ref()
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.upload.is_some() && !self.status.is_converting()
    }

    /// ファイル選択
    ///
    /// 既存の選択は置き換え、前回のステータスメッセージを消す。
    /// バリデーションは選択面で済んでいる前提（弾かれた選択はここに来ない）。
    /// 変換中は無視する。
    pub fn select_file(&mut self, upload: PendingUpload) {
        if self.status.is_converting() {
            return;
        }
        self.upload = Some(upload);
        self.status = WorkflowStatus::FileSelected;
    }

    /// ファイル取り外し
    ///
    /// 選択・結果表示のどの状態からでもIdleに戻す。変換中は無視する。
    pub fn remove_file(&mut self) {
        if self.status.is_converting() {
            return;
        }
        self.upload = None;
        self.status = WorkflowStatus::Idle;
    }

    /// 送信開始
    ///
    /// ファイル未選択、または変換中ならNone（no-op、キューイングしない）。
    /// Someを返したときだけ呼び出し側はゲートウェイを叩く。
    pub fn begin_submit(&mut self) -> Option<ConvertJob> {
        if !self.can_submit() {
            return None;
        }
        let upload = self.upload.as_ref()?;
        let job = ConvertJob {
            file_name: upload.file_name.clone(),
            mime_type: upload.mime_type.clone(),
            bytes: upload.bytes.clone(),
        };
        self.status = WorkflowStatus::Converting;
        Some(job)
    }

    /// 変換成功
    ///
    /// ファイルは表示時間のあいだ残す（クリアはfinish()で）。
    pub fn succeed(&mut self, message: impl Into<String>) {
        if self.status.is_converting() {
            self.status = WorkflowStatus::Succeeded(message.into());
        }
    }

    /// 変換失敗
    ///
    /// ファイルは残す。再選択なしで再送信できる。
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.is_converting() {
            self.status = WorkflowStatus::Failed(message.into());
        }
    }

    /// 成功表示の終了
    ///
    /// Succeededのときだけフォームをクリアする。表示時間中にユーザーが
    /// 別のファイルを選んでいたら（FileSelectedに遷移済み）何もしない。
    pub fn finish(&mut self) {
        if self.status.is_succeeded() {
            self.upload = None;
            self.status = WorkflowStatus::Idle;
        }
    }
}
