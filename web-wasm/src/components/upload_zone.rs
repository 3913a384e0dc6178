//! アップロードゾーンコンポーネント
//!
//! ドラッグ&ドロップとクリック選択で1ファイルを受け付ける。形式とサイズの
//! バリデーションはこの選択面で行い、弾いた選択はワークフローに渡さない
//! （ローカルの注意書きを出すだけで、状態遷移もリクエストも起きない）。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File};

use img2dxf_common::{validate_selection, ConversionWorkflow, WorkflowStatus};

use crate::files;

#[component]
pub fn UploadZone<F>(workflow: RwSignal<ConversionWorkflow>, on_convert: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let (rejection, set_rejection) = signal(None::<String>);

    let handle_file = move |file: File| {
        if let Err(error) = validate_selection(&file.type_(), file.size() as u64) {
            set_rejection.set(Some(error.user_message()));
            return;
        }
        set_rejection.set(None);
        spawn_local(async move {
            match files::read_upload(&file).await {
                Ok(upload) => workflow.write().select_file(upload),
                Err(message) => set_rejection.set(Some(message)),
            }
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = dropped {
            handle_file(file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Ok(input) = document
            .create_element("input")
            .map(|element| element.unchecked_into::<web_sys::HtmlInputElement>())
        else {
            return;
        };
        input.set_type("file");
        input.set_accept(".jpg,.jpeg,.png,.bmp");
        input.set_multiple(false);

        let closure = Closure::wrap(Box::new({
            let input = input.clone();
            move |_: web_sys::Event| {
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    handle_file(file);
                }
            }
        }) as Box<dyn FnMut(_)>);
        input.set_onchange(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
        input.click();
    };

    let on_remove = move |ev: web_sys::MouseEvent| {
        // ゾーン自体のクリック（ダイアログを開く）に吸われないようにする
        ev.stop_propagation();
        workflow.write().remove_file();
        set_rejection.set(None);
    };

    view! {
        <div class="upload-panel">
            <h2>"画像アップロード"</h2>
            <div
                class=move || {
                    if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <Show
                    when=move || workflow.with(|w| w.upload().is_some())
                    fallback=|| view! {
                        <div class="upload-icon">"🖼"</div>
                        <p>"画像をドラッグ&ドロップ または クリックして選択"</p>
                        <p class="text-muted">"対応形式: JPEG, PNG, BMP（最大10MB）"</p>
                    }
                >
                    <img
                        class="upload-preview"
                        alt="プレビュー"
                        src=move || {
                            workflow.with(|w| {
                                w.upload().map(|u| u.preview_url.clone()).unwrap_or_default()
                            })
                        }
                    />
                    <p class="upload-filename">
                        {move || {
                            workflow.with(|w| {
                                w.upload().map(|u| u.file_name.clone()).unwrap_or_default()
                            })
                        }}
                    </p>
                    <button class="link-danger" on:click=on_remove>"取り外す"</button>
                </Show>
            </div>

            {move || rejection.get().map(|message| view! {
                <div class="banner banner-warning">{message}</div>
            })}

            <button
                class="btn btn-primary btn-block"
                disabled=move || !workflow.with(|w| w.can_submit())
                on:click=move |_| on_convert(())
            >
                {move || {
                    if workflow.with(|w| w.status().is_converting()) {
                        "変換中..."
                    } else {
                        "DXFに変換"
                    }
                }}
            </button>

            {move || workflow.with(|w| {
                let (class, message) = match w.status() {
                    WorkflowStatus::Succeeded(message) => ("banner banner-success", message.clone()),
                    WorkflowStatus::Failed(message) => ("banner banner-error", message.clone()),
                    _ => return None,
                };
                Some(view! { <div class=class>{message}</div> })
            })}
        </div>
    }
}
