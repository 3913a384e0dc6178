//! 変換履歴1件のカードコンポーネント

use leptos::prelude::*;

use img2dxf_common::{format_size, format_timestamp, ConversionRecord};

#[component]
pub fn FileCard<FD, FX>(
    record: ConversionRecord,
    thumb: Option<String>,
    on_download: FD,
    on_delete: FX,
) -> impl IntoView
where
    FD: Fn(ConversionRecord) + 'static + Clone + Send,
    FX: Fn(String) + 'static + Clone + Send,
{
    let meta_line = format!(
        "{} / {} / {}エンティティ",
        format_timestamp(&record.created_at),
        format_size(record.file_size),
        record.metadata.total_entities
    );

    let on_download_click = {
        let record = record.clone();
        move |_| on_download(record.clone())
    };

    let on_delete_click = {
        let id = record.id.clone();
        move |_| {
            let confirmed = web_sys::window()
                .map(|window| {
                    window
                        .confirm_with_message("この変換履歴を削除しますか？")
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if confirmed {
                on_delete(id.clone());
            }
        }
    };

    view! {
        <div class="file-card">
            <div class="file-thumb">
                {match thumb {
                    Some(src) => view! { <img src=src alt=record.filename.clone() /> }.into_any(),
                    None => view! { <div class="file-thumb-placeholder">"🗎"</div> }.into_any(),
                }}
            </div>
            <div class="file-info">
                <h3>{record.filename.clone()}</h3>
                <p class="text-muted">{meta_line}</p>
            </div>
            <div class="file-actions">
                <button class="btn btn-primary btn-small" on:click=on_download_click>
                    "ダウンロード"
                </button>
                <button class="btn btn-danger btn-small" on:click=on_delete_click>
                    "削除"
                </button>
            </div>
        </div>
    }
}
