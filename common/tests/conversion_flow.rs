//! 変換フロー統合テスト
//!
//! 外部サービスをインメモリのフェイクゲートウェイに差し替え、
//! 選択→送信→完了シグナル→履歴再取得までの一連の流れを検証する。
//! フェイクはHTTP契約の意味論（ファイル名部分一致検索、新しい順、
//! 削除後の消失）をそのまま再現する。

use std::cell::RefCell;

use futures::executor::block_on;
use img2dxf_common::{
    ConversionGateway, ConversionRecord, ConversionWorkflow, ConvertJob, GatewayError,
    GatewayResult, HistoryPage, HistoryQuery, HistoryStore, Pagination, PendingUpload,
    StatsSummary, WorkflowStatus,
};

/// インメモリのフェイク変換サービス
#[derive(Default)]
struct FakeGateway {
    records: RefCell<Vec<ConversionRecord>>,
    convert_calls: RefCell<u32>,
    next_id: RefCell<u32>,
    convert_failure: RefCell<Option<GatewayError>>,
    delete_failure: RefCell<Option<GatewayError>>,
}

impl FakeGateway {
    fn new() -> Self {
        Self::default()
    }

    fn convert_calls(&self) -> u32 {
        *self.convert_calls.borrow()
    }

    fn fail_next_convert(&self, error: GatewayError) {
        *self.convert_failure.borrow_mut() = Some(error);
    }

    fn fail_delete(&self, error: GatewayError) {
        *self.delete_failure.borrow_mut() = Some(error);
    }

    fn seed(&self, id: &str, filename: &str) {
        self.records.borrow_mut().insert(
            0,
            ConversionRecord {
                id: id.to_string(),
                filename: filename.to_string(),
                original_filename: format!("{}.png", filename),
                status: "completed".to_string(),
                ..Default::default()
            },
        );
    }
}

impl ConversionGateway for FakeGateway {
    async fn convert(&self, job: &ConvertJob, threshold: u8) -> GatewayResult<ConversionRecord> {
        *self.convert_calls.borrow_mut() += 1;

        if let Some(error) = self.convert_failure.borrow_mut().take() {
            return Err(error);
        }

        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;

        let stem = job
            .file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&job.file_name);
        let record = ConversionRecord {
            id: format!("fake-{}", next_id),
            filename: stem.to_string(),
            original_filename: job.file_name.clone(),
            threshold,
            file_size: job.bytes.len() as u64,
            status: "completed".to_string(),
            ..Default::default()
        };

        // サーバーはcreated_at降順で返すので、新しいものを先頭に積む
        self.records.borrow_mut().insert(0, record.clone());
        Ok(record)
    }

    async fn history(&self, query: &HistoryQuery) -> GatewayResult<HistoryPage> {
        let data: Vec<ConversionRecord> = self
            .records
            .borrow()
            .iter()
            .filter(|r| query.search.is_empty() || r.filename.contains(&query.search))
            .cloned()
            .collect();
        let total = data.len() as u64;

        Ok(HistoryPage {
            success: true,
            data,
            pagination: Pagination {
                page: query.page,
                limit: query.limit,
                total,
                pages: 1,
            },
        })
    }

    async fn download(&self, id: &str) -> GatewayResult<Vec<u8>> {
        if self.records.borrow().iter().any(|r| r.id == id) {
            Ok(b"0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n".to_vec())
        } else {
            Err(GatewayError::Service {
                status: 404,
                detail: "Conversion not found".to_string(),
            })
        }
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        if let Some(error) = self.delete_failure.borrow_mut().take() {
            return Err(error);
        }
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(GatewayError::Service {
                status: 404,
                detail: "Conversion not found".to_string(),
            });
        }
        Ok(())
    }

    async fn stats(&self) -> GatewayResult<StatsSummary> {
        let records = self.records.borrow();
        let total_storage_bytes: u64 = records.iter().map(|r| r.file_size).sum();
        Ok(StatsSummary {
            total_conversions: records.len() as u64,
            total_storage_bytes,
            total_storage_mb: total_storage_bytes as f64 / (1024.0 * 1024.0),
        })
    }

    fn thumbnail_url(&self, id: &str) -> String {
        format!("http://localhost:8000/api/thumbnail/{}", id)
    }
}

fn png_upload(name: &str, size: usize) -> PendingUpload {
    PendingUpload {
        file_name: name.to_string(),
        mime_type: "image/png".to_string(),
        size: size as u64,
        bytes: vec![0u8; size],
        preview_url: format!("data:image/png;base64,{}", name),
    }
}

/// アプリ層の送信フローを1回分実行する
///
/// begin_submit→ゲートウェイ→succeed/fail→（成功時）完了シグナル、の順。
/// 遅延クリア（finish）はタイマー相当として呼び出し側で行う。
fn run_submit(
    gateway: &FakeGateway,
    workflow: &mut ConversionWorkflow,
    threshold: u8,
    on_complete: &mut impl FnMut(),
) {
    let Some(job) = workflow.begin_submit() else {
        return;
    };
    match block_on(gateway.convert(&job, threshold)) {
        Ok(record) => {
            workflow.succeed(format!("変換が完了しました: {}", record.original_filename));
            on_complete();
        }
        Err(error) => workflow.fail(error.user_message()),
    }
}

/// 現在の検索語で履歴を取り直す
fn run_refresh(gateway: &FakeGateway, history: &mut HistoryStore) {
    let ticket = history.begin_fetch();
    let result = block_on(gateway.history(&HistoryQuery::with_search(history.search())))
        .map(|page| page.data);
    history.apply(ticket, result);
}

// =============================================
// シナリオA: 変換成功で履歴に1件増える
// =============================================

#[test]
fn test_successful_conversion_adds_record_to_history() {
    let gateway = FakeGateway::new();
    let mut workflow = ConversionWorkflow::new();
    let mut history = HistoryStore::new();

    run_refresh(&gateway, &mut history);
    assert!(history.records().is_empty());

    workflow.select_file(png_upload("part.png", 2 * 1024 * 1024));

    let mut completions = 0;
    run_submit(&gateway, &mut workflow, 50, &mut || completions += 1);

    // 完了シグナルはちょうど1回
    assert_eq!(completions, 1);
    assert!(workflow.status().is_succeeded());
    // クリアはfinish()まで起きない
    assert!(workflow.upload().is_some());

    // 完了シグナルを受けて履歴を再取得
    run_refresh(&gateway, &mut history);
    assert_eq!(history.records().len(), 1);
    assert_eq!(history.records()[0].filename, "part");
    assert_eq!(history.records()[0].original_filename, "part.png");
    assert_eq!(history.records()[0].threshold, 50);

    // 表示時間が終わってからフォームが空になる
    workflow.finish();
    assert_eq!(*workflow.status(), WorkflowStatus::Idle);
    assert!(workflow.upload().is_none());
}

// =============================================
// 送信の多重防止
// =============================================

#[test]
fn test_second_submit_while_converting_sends_nothing() {
    let gateway = FakeGateway::new();
    let mut workflow = ConversionWorkflow::new();
    workflow.select_file(png_upload("part.png", 1024));

    // 1回目でConvertingに入る
    let job = workflow.begin_submit().expect("1回目は送信できるはず");

    // 応答が返る前の2連打目はジョブが出ない＝リクエストは増えない
    assert!(workflow.begin_submit().is_none());
    assert!(workflow.begin_submit().is_none());

    let record = block_on(gateway.convert(&job, 50)).expect("変換成功のはず");
    workflow.succeed(format!("変換が完了しました: {}", record.original_filename));

    assert_eq!(gateway.convert_calls(), 1);
}

// =============================================
// 変換失敗
// =============================================

#[test]
fn test_failed_conversion_keeps_file_and_surfaces_detail() {
    let gateway = FakeGateway::new();
    gateway.fail_next_convert(GatewayError::Service {
        status: 500,
        detail: "Conversion failed: unreadable image".to_string(),
    });

    let mut workflow = ConversionWorkflow::new();
    workflow.select_file(png_upload("broken.png", 1024));

    let mut completions = 0;
    run_submit(&gateway, &mut workflow, 50, &mut || completions += 1);

    // 完了シグナルは飛ばない
    assert_eq!(completions, 0);
    // サーバー診断がそのまま表示される
    assert_eq!(
        workflow.status().message(),
        Some("Conversion failed: unreadable image")
    );
    // ファイルは残り、そのまま再送信できる
    assert!(workflow.upload().is_some());

    run_submit(&gateway, &mut workflow, 50, &mut || completions += 1);
    assert_eq!(completions, 1);
    assert_eq!(gateway.convert_calls(), 2);
}

// =============================================
// シナリオB: 上限超過は選択面で弾かれ、リクエストが飛ばない
// =============================================

#[test]
fn test_oversized_file_never_reaches_workflow_or_network() {
    let gateway = FakeGateway::new();
    let mut workflow = ConversionWorkflow::new();

    // 選択面のバリデーションで弾く（11MB）
    let verdict = img2dxf_common::validate_selection("image/png", 11 * 1024 * 1024);
    assert!(verdict.is_err());

    // ワークフローは遷移せず、送信もできない
    assert_eq!(*workflow.status(), WorkflowStatus::Idle);
    assert!(workflow.begin_submit().is_none());
    assert_eq!(gateway.convert_calls(), 0);
}

// =============================================
// シナリオC: 検索で一覧が絞られる
// =============================================

#[test]
fn test_search_narrows_history() {
    let gateway = FakeGateway::new();
    gateway.seed("1", "part");
    gateway.seed("2", "other");

    let mut history = HistoryStore::new();
    run_refresh(&gateway, &mut history);
    assert_eq!(history.records().len(), 2);

    let ticket = history.set_search("part");
    let result = block_on(gateway.history(&HistoryQuery::with_search(history.search())))
        .map(|page| page.data);
    history.apply(ticket, result);

    assert_eq!(history.records().len(), 1);
    assert_eq!(history.records()[0].filename, "part");
}

// =============================================
// 後勝ちルール: 追い越された検索応答は反映されない
// =============================================

#[test]
fn test_out_of_order_search_responses_keep_latest() {
    let gateway = FakeGateway::new();
    gateway.seed("1", "part");
    gateway.seed("2", "other");

    let mut history = HistoryStore::new();

    // T1（"other"）→T2（"part"）の順に発行し、応答はT2→T1の順で届く
    let t1 = history.set_search("other");
    let r1 = block_on(gateway.history(&HistoryQuery::with_search("other"))).map(|p| p.data);
    let t2 = history.set_search("part");
    let r2 = block_on(gateway.history(&HistoryQuery::with_search("part"))).map(|p| p.data);

    assert!(history.apply(t2, r2));
    assert!(!history.apply(t1, r1));

    // 画面はT2の結果のまま
    assert_eq!(history.records().len(), 1);
    assert_eq!(history.records()[0].filename, "part");
    assert_eq!(history.search(), "part");
}

// =============================================
// 削除
// =============================================

#[test]
fn test_delete_success_refreshes_and_removes_record() {
    let gateway = FakeGateway::new();
    gateway.seed("7", "doomed");
    gateway.seed("8", "survivor");

    let mut history = HistoryStore::new();
    run_refresh(&gateway, &mut history);
    assert_eq!(history.records().len(), 2);

    block_on(gateway.delete("7")).expect("削除成功のはず");
    run_refresh(&gateway, &mut history);

    assert_eq!(history.records().len(), 1);
    assert!(history.records().iter().all(|r| r.id != "7"));
}

// =============================================
// シナリオD: 削除失敗は一覧を変えずエラーだけ出す
// =============================================

#[test]
fn test_delete_failure_leaves_history_untouched() {
    let gateway = FakeGateway::new();
    gateway.seed("7", "sticky");

    let mut history = HistoryStore::new();
    run_refresh(&gateway, &mut history);
    assert_eq!(history.records().len(), 1);

    gateway.fail_delete(GatewayError::Service {
        status: 500,
        detail: "database is locked".to_string(),
    });

    // 失敗時は再取得せず、操作エラーとして報告するだけ
    match block_on(gateway.delete("7")) {
        Ok(()) => panic!("削除は失敗するはず"),
        Err(error) => history.report_action_error(error.user_message()),
    }

    assert_eq!(history.records().len(), 1);
    assert_eq!(history.records()[0].id, "7");
    assert_eq!(history.action_error(), Some("database is locked"));
}

// =============================================
// ダウンロード
// =============================================

#[test]
fn test_download_uses_record_filename_with_dxf_extension() {
    let gateway = FakeGateway::new();
    gateway.seed("9", "bracket");

    let mut history = HistoryStore::new();
    run_refresh(&gateway, &mut history);

    let record = &history.records()[0];
    let bytes = block_on(gateway.download(&record.id)).expect("ダウンロード成功のはず");
    assert!(!bytes.is_empty());
    assert_eq!(record.download_name(), "bracket.dxf");
}

#[test]
fn test_download_failure_reports_service_detail() {
    let gateway = FakeGateway::new();
    let mut history = HistoryStore::new();
    run_refresh(&gateway, &mut history);

    match block_on(gateway.download("missing")) {
        Ok(_) => panic!("存在しないidのダウンロードは失敗するはず"),
        Err(error) => history.report_action_error(error.user_message()),
    }

    assert_eq!(history.action_error(), Some("Conversion not found"));
    // 一覧はReadyのまま
    assert!(history.error_message().is_none());
}

// =============================================
// 統計
// =============================================

#[test]
fn test_stats_follow_conversions() {
    let gateway = FakeGateway::new();
    let mut workflow = ConversionWorkflow::new();

    workflow.select_file(png_upload("a.png", 1024));
    run_submit(&gateway, &mut workflow, 30, &mut || {});
    workflow.finish();

    workflow.select_file(png_upload("b.png", 2048));
    run_submit(&gateway, &mut workflow, 60, &mut || {});

    let stats = block_on(gateway.stats()).expect("統計取得成功のはず");
    assert_eq!(stats.total_conversions, 2);
    assert_eq!(stats.total_storage_bytes, 1024 + 2048);
}
