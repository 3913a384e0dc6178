//! 変換履歴一覧コンポーネント
//!
//! 表示はストアの状態（Loading / Error / Ready）をそのまま写す。検索入力に
//! デバウンスは無く、1打鍵ごとにon_searchが飛ぶ。追い越された応答の破棄は
//! ストア側のチケット照合が行うため、ここでは順序を気にしない。

use leptos::prelude::*;

use img2dxf_common::{
    format_size, ConversionGateway, ConversionRecord, HistoryState, HistoryStore, StatsSummary,
};

use crate::api::gateway::HttpGateway;
use crate::components::file_card::FileCard;

#[component]
pub fn HistoryList<FS, FR, FD, FX>(
    history: RwSignal<HistoryStore>,
    stats: RwSignal<Option<StatsSummary>>,
    on_search: FS,
    on_refresh: FR,
    on_download: FD,
    on_delete: FX,
) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone,
    FR: Fn(()) + 'static + Clone + Send + Sync,
    FD: Fn(ConversionRecord) + 'static + Clone + Send + Sync,
    FX: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="history-panel">
            <div class="history-header">
                <h2>"変換履歴"</h2>
                <span class="text-muted">
                    {move || {
                        let count = history.with(|h| h.records().len());
                        match stats.get() {
                            Some(summary) => format!(
                                "{}件 / 合計 {}",
                                count,
                                format_size(summary.total_storage_bytes)
                            ),
                            None => format!("{}件", count),
                        }
                    }}
                </span>
            </div>

            <input
                type="text"
                class="search-input"
                placeholder="ファイル名で検索..."
                prop:value=move || history.with(|h| h.search().to_string())
                on:input=move |ev| on_search(event_target_value(&ev))
            />

            {move || history.with(|h| h.action_error().map(|message| {
                let message = message.to_string();
                view! {
                    <div class="banner banner-error">
                        <span>{message}</span>
                        <button
                            class="banner-dismiss"
                            on:click=move |_| history.write().clear_action_error()
                        >
                            "×"
                        </button>
                    </div>
                }
            }))}

            {move || match history.with(|h| h.state().clone()) {
                HistoryState::Loading => view! {
                    <div class="history-empty">
                        <div class="spinner"></div>
                        <p>"読み込み中..."</p>
                    </div>
                }
                .into_any(),
                HistoryState::Error(message) => {
                    let on_refresh = on_refresh.clone();
                    view! {
                        <div class="history-empty history-error">
                            <p>{message}</p>
                            <button class="btn btn-secondary" on:click=move |_| on_refresh(())>
                                "再試行"
                            </button>
                        </div>
                    }
                    .into_any()
                }
                HistoryState::Ready(records) if records.is_empty() => view! {
                    <div class="history-empty">
                        <p>"変換履歴はまだありません"</p>
                        <p class="text-muted">"画像をアップロードして始めましょう"</p>
                    </div>
                }
                .into_any(),
                HistoryState::Ready(records) => {
                    let on_download = on_download.clone();
                    let on_delete = on_delete.clone();
                    view! {
                        <div class="history-list">
                            <For
                                each=move || records.clone()
                                key=|record| record.id.clone()
                                children=move |record| {
                                    let thumb = record
                                        .thumbnail_url
                                        .as_ref()
                                        .map(|_| HttpGateway::default().thumbnail_url(&record.id));
                                    let on_download = on_download.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <FileCard
                                            record=record
                                            thumb=thumb
                                            on_download=on_download
                                            on_delete=on_delete
                                        />
                                    }
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
