use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

use mathpad_core::wire::ApiResult;

use crate::utils::service_url;

/// POST a JSON body to a service endpoint and parse the JSON reply.
///
/// Transport and parse failures surface as `Err`; service rejections arrive
/// as `ApiResult::Err` on the `Ok` path. The HTTP status is not consulted:
/// the body shape already distinguishes success from rejection.
pub async fn post_json<B, T>(window: &Window, path: &str, body: &B) -> Result<ApiResult<T>, JsValue>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let payload = serde_json::to_string(body).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&payload));
    let request = Request::new_with_str_and_init(&service_url(path), &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let text_js = JsFuture::from(resp.text()?).await?;
    let text = text_js.as_string().unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}
