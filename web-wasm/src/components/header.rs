//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"DXF Converter"</h1>
            <p class="text-muted">"画像をCNCプラズマ切断用のDXFに変換"</p>
        </header>
    }
}
