//! ブラウザのファイル入出力
//!
//! 選択されたFileの読み込み（プレビューData URLの生成込み）と、
//! ダウンロードしたDXFのローカル保存。

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

use img2dxf_common::PendingUpload;

/// 選択されたファイルを読み込みPendingUploadにする
pub async fn read_upload(file: &File) -> Result<PendingUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "ファイルの読み込みに失敗しました".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = file.type_();
    let preview_url = format!("data:{};base64,{}", mime_type, STANDARD.encode(&bytes));

    Ok(PendingUpload {
        file_name: file.name(),
        mime_type,
        size: file.size() as u64,
        bytes,
        preview_url,
    })
}

/// バイト列を名前を付けてローカル保存する
///
/// オブジェクトURLを張った<a download>をクリックして保存に乗せる。
pub fn save_file(bytes: &[u8], file_name: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type("application/dxf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Blobの生成に失敗しました".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "オブジェクトURLの生成に失敗しました".to_string())?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "documentが取得できません".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "リンク要素の生成に失敗しました".to_string())?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);
    } else {
        anchor.click();
    }

    let _ = Url::revoke_object_url(&url);
    Ok(())
}
