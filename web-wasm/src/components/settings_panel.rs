//! 変換設定パネルコンポーネント

use leptos::prelude::*;

use img2dxf_common::{ThresholdStore, DEFAULT_THRESHOLD};

#[component]
pub fn SettingsPanel(threshold: RwSignal<ThresholdStore>) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <h2>"変換設定"</h2>

            <div class="form-group">
                <label for="threshold">
                    {move || format!("しきい値: {}%", threshold.get().get())}
                </label>
                <input
                    type="range"
                    id="threshold"
                    min="0"
                    max="100"
                    prop:value=move || threshold.get().get().to_string()
                    on:input=move |ev| {
                        let value: i64 = event_target_value(&ev)
                            .parse()
                            .unwrap_or(DEFAULT_THRESHOLD as i64);
                        threshold.write().set(value);
                    }
                />
                <div class="range-ends">
                    <span>"細かい"</span>
                    <span>"粗い"</span>
                </div>
            </div>

            <div class="tip-box">
                <strong>"ヒント: "</strong>
                "まずは50%から。線を整理したいときは上げ、細部を拾いたいときは下げる。"
            </div>
        </div>
    }
}
