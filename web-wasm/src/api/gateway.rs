//! 変換サービスHTTPゲートウェイ
//!
//! ConversionGatewayのfetch実装。各操作をHTTPの1リクエストに1:1で対応させ、
//! ペイロードの整形以外のことはしない。リトライもキャッシュもここには無く、
//! エラーの文言化は呼び出し側がGatewayError::user_message()で行う。

use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use img2dxf_common::{
    ConversionGateway, ConversionRecord, ConvertJob, ConvertResponse, DeleteAck, GatewayError,
    GatewayResult, HistoryPage, HistoryQuery, StatsSummary,
};

/// 変換サービスのベースURL
pub const API_BASE_URL: &str = "http://localhost:8000";

/// 非2xxレスポンスのボディ（FastAPIの診断形式）
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// fetchベースのゲートウェイ
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn unknown(value: JsValue) -> GatewayError {
    GatewayError::Unknown(js_error_message(&value))
}

/// リクエストを発行してResponseを得る
///
/// fetch自体の失敗（ネットワーク到達不能、タイムアウト）はTransportになる。
async fn send(request: Request) -> GatewayResult<Response> {
    let window =
        web_sys::window().ok_or_else(|| GatewayError::Unknown("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| GatewayError::Transport(js_error_message(&error)))?;
    response
        .dyn_into::<Response>()
        .map_err(|_| GatewayError::Unknown("fetch returned a non-Response value".to_string()))
}

/// 非2xxレスポンスをServiceエラーに写す
///
/// サーバーは診断を{"detail": "..."}で返す。読めなければdetailは空のまま。
async fn service_error(response: &Response) -> GatewayError {
    let status = response.status();
    let detail = match response.json() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|value| serde_wasm_bindgen::from_value::<ErrorBody>(value).ok())
            .map(|body| body.detail)
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    GatewayError::Service { status, detail }
}

/// 2xxレスポンスのJSONボディをデコードする
async fn decode_json<T: DeserializeOwned>(response: &Response) -> GatewayResult<T> {
    let promise = response.text().map_err(unknown)?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|error| GatewayError::Transport(js_error_message(&error)))?;
    let text = value.as_string().unwrap_or_default();
    serde_json::from_str(&text).map_err(|error| GatewayError::Unknown(error.to_string()))
}

/// GETリクエスト共通処理
async fn get(url: &str) -> GatewayResult<Response> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts).map_err(unknown)?;
    let response = send(request).await?;
    if !response.ok() {
        return Err(service_error(&response).await);
    }
    Ok(response)
}

impl ConversionGateway for HttpGateway {
    async fn convert(&self, job: &ConvertJob, threshold: u8) -> GatewayResult<ConversionRecord> {
        let form = FormData::new().map_err(unknown)?;
        let bytes = js_sys::Uint8Array::from(job.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&job.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(unknown)?;
        form.append_with_blob_and_filename("file", &blob, &job.file_name)
            .map_err(unknown)?;
        // しきい値のレンジ検査はサーバー側の仕事
        form.append_with_str("threshold", &threshold.to_string())
            .map_err(unknown)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(form.as_ref());

        let url = format!("{}/api/convert", self.base_url);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(unknown)?;
        let response = send(request).await?;
        if !response.ok() {
            return Err(service_error(&response).await);
        }
        let body: ConvertResponse = decode_json(&response).await?;
        Ok(body.data)
    }

    async fn history(&self, query: &HistoryQuery) -> GatewayResult<HistoryPage> {
        let url = format!(
            "{}/api/history?search={}&page={}&limit={}",
            self.base_url,
            String::from(js_sys::encode_uri_component(&query.search)),
            query.page,
            query.limit
        );
        let response = get(&url).await?;
        decode_json(&response).await
    }

    async fn download(&self, id: &str) -> GatewayResult<Vec<u8>> {
        let url = format!("{}/api/download/{}", self.base_url, id);
        let response = get(&url).await?;
        let promise = response.array_buffer().map_err(unknown)?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|error| GatewayError::Transport(js_error_message(&error)))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let opts = RequestInit::new();
        opts.set_method("DELETE");
        opts.set_mode(RequestMode::Cors);
        let url = format!("{}/api/delete/{}", self.base_url, id);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(unknown)?;
        let response = send(request).await?;
        if !response.ok() {
            return Err(service_error(&response).await);
        }
        let _ack: DeleteAck = decode_json(&response).await?;
        Ok(())
    }

    async fn stats(&self) -> GatewayResult<StatsSummary> {
        let url = format!("{}/api/stats", self.base_url);
        let response = get(&url).await?;
        decode_json(&response).await
    }

    fn thumbnail_url(&self, id: &str) -> String {
        format!("{}/api/thumbnail/{}", self.base_url, id)
    }
}
