//! メインアプリケーションコンポーネント
//!
//! コアのワークフロー・履歴ストア・しきい値をシグナルに載せ、非同期フロー
//! （ゲートウェイ呼び出し、成功表示後の遅延クリア、履歴と統計の再取得）を
//! ここで束ねる。コンポーネントは表示と入力の通知だけを行う。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use img2dxf_common::{
    ConversionGateway, ConversionRecord, ConversionWorkflow, HistoryQuery, HistoryStore,
    StatsSummary, ThresholdStore, SUCCESS_DISPLAY_MS,
};

use crate::api::gateway::HttpGateway;
use crate::components::{
    header::Header, history_list::HistoryList, settings_panel::SettingsPanel,
    upload_zone::UploadZone,
};
use crate::files;

#[component]
pub fn App() -> impl IntoView {
    let workflow = RwSignal::new(ConversionWorkflow::new());
    let history = RwSignal::new(HistoryStore::new());
    let threshold = RwSignal::new(ThresholdStore::new());
    let stats = RwSignal::new(None::<StatsSummary>);

    // 現在の検索語で履歴を取り直す
    //
    // 変換完了シグナルと削除成功後のリフレッシュもここを通る。応答は
    // チケット照合付きで適用され、追い越された取得は画面に反映されない。
    let refresh_history = move || {
        let (ticket, search) = {
            let mut store = history.write();
            let ticket = store.begin_fetch();
            (ticket, store.search().to_string())
        };
        spawn_local(async move {
            let result = HttpGateway::default()
                .history(&HistoryQuery::with_search(search))
                .await
                .map(|page| page.data);
            history.write().apply(ticket, result);
        });
    };

    let refresh_stats = move || {
        spawn_local(async move {
            match HttpGateway::default().stats().await {
                Ok(summary) => stats.set(Some(summary)),
                Err(error) => gloo::console::warn!(format!("統計の取得に失敗: {}", error)),
            }
        });
    };

    let on_search = move |term: String| {
        let ticket = history.write().set_search(term.clone());
        spawn_local(async move {
            let result = HttpGateway::default()
                .history(&HistoryQuery::with_search(term))
                .await
                .map(|page| page.data);
            history.write().apply(ticket, result);
        });
    };

    let on_convert = move |_: ()| {
        // Converting中の2回目はジョブが出ないため、リクエストも飛ばない
        let Some(job) = workflow.write().begin_submit() else {
            return;
        };
        let threshold_value = threshold.get_untracked().get();
        spawn_local(async move {
            match HttpGateway::default().convert(&job, threshold_value).await {
                Ok(record) => {
                    workflow
                        .write()
                        .succeed(format!("変換が完了しました: {}", record.original_filename));
                    refresh_history();
                    refresh_stats();
                    // 成功バナーを見せてからフォームを空にする。タイマー中も操作は通る
                    Timeout::new(SUCCESS_DISPLAY_MS, move || workflow.write().finish()).forget();
                }
                Err(error) => workflow.write().fail(error.user_message()),
            }
        });
    };

    let on_download = move |record: ConversionRecord| {
        spawn_local(async move {
            match HttpGateway::default().download(&record.id).await {
                Ok(bytes) => {
                    if let Err(message) = files::save_file(&bytes, &record.download_name()) {
                        gloo::console::error!(format!("保存に失敗: {}", message));
                        history.write().report_action_error("ファイルの保存に失敗しました");
                    }
                }
                Err(error) => {
                    gloo::console::error!(format!("ダウンロードに失敗: {}", error));
                    history.write().report_action_error(error.user_message());
                }
            }
        });
    };

    let on_delete = move |id: String| {
        spawn_local(async move {
            match HttpGateway::default().delete(&id).await {
                Ok(()) => {
                    // 一覧から消すのは再取得の結果だけ
                    refresh_history();
                    refresh_stats();
                }
                Err(error) => {
                    gloo::console::error!(format!("削除に失敗: {}", error));
                    history.write().report_action_error(error.user_message());
                }
            }
        });
    };

    // 初回ロード
    refresh_history();
    refresh_stats();

    view! {
        <div class="container">
            <Header />

            <div class="main-grid">
                <div class="left-column">
                    <UploadZone workflow=workflow on_convert=on_convert />
                    <SettingsPanel threshold=threshold />
                </div>
                <div class="right-column">
                    <HistoryList
                        history=history
                        stats=stats
                        on_search=on_search
                        on_refresh=move |_| refresh_history()
                        on_download=on_download
                        on_delete=on_delete
                    />
                </div>
            </div>

            <footer class="footer">
                <p>"DXF Converter - オフラインCNC変換ツール"</p>
            </footer>
        </div>
    }
}
