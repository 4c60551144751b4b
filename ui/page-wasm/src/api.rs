//! HTTP API client.
//!
//! Wraps `fetch` for JSON requests to the page-service backend and exposes
//! the backend as a [`DomainRegistry`].

use crate::dom;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dc_api_types::{DomainRecord, DomainTxResponse, TxHash, Widget, WidgetListResponse};
use dc_chain_client::{DomainRegistry, explorer_tx_uri};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

const NOT_FOUND: u16 = 404;

/// API base URL: same host, port 8080, or the `data-api` attribute of
/// `<body>` when the page is served behind a proxy.
pub fn base_url() -> String {
    let configured = dom::window()
        .document()
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute("data-api"))
        .map(|api| api.trim().trim_end_matches('/').to_string())
        .filter(|api| !api.is_empty());
    if let Some(api) = configured {
        return api;
    }

    let loc = dom::window().location();
    let host = loc.hostname().unwrap_or_default();
    let protocol = loc.protocol().unwrap_or_else(|_| "http:".into());
    format!("{}//{}:8080", protocol, host)
}

fn js_err(err: JsValue) -> anyhow::Error {
    anyhow!("{:?}", err)
}

/// Perform a fetch request, returning the status code and the body text.
async fn send(path: &str, method: &str, body: Option<String>) -> Result<(u16, String)> {
    let url = format!("{}{}", base_url(), path);

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(js_err)?;
    if let Some(ref b) = body {
        headers.set("Content-Type", "application/json").map_err(js_err)?;
        opts.set_body(&JsValue::from_str(b));
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;

    let resp_value = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("fetch error: {:?}", e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| anyhow!("response is not a Response"))?;

    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(|e| anyhow!("text error: {:?}", e))?;

    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// Error bodies are `{"error": message}`; fall back to the raw text.
fn error_message(status: u16, text: &str) -> anyhow::Error {
    let message = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| text.to_owned());
    anyhow!("{} {}", status, message)
}

/// JSON request; any non-2xx status is an error.
pub async fn request<T: DeserializeOwned>(path: &str, method: &str, body: Option<String>) -> Result<T> {
    let (status, text) = send(path, method, body).await?;
    if !(200..300).contains(&status) {
        return Err(error_message(status, &text));
    }
    serde_json::from_str(&text).map_err(|e| anyhow!("JSON parse error: {} (raw: {})", e, text))
}

/// Like [`request`], but a 404 is `None`.
pub async fn request_optional<T: DeserializeOwned>(path: &str) -> Result<Option<T>> {
    let (status, text) = send(path, "GET", None).await?;
    if status == NOT_FOUND {
        return Ok(None);
    }
    if !(200..300).contains(&status) {
        return Err(error_message(status, &text));
    }
    Ok(Some(serde_json::from_str(&text)?))
}

/// Encode a domain name as a single path segment.
fn segment(name: &str) -> String {
    String::from(js_sys::encode_uri_component(name))
}

pub struct HttpRegistry {
    explorer_url: String,
}

impl HttpRegistry {
    pub fn new(explorer_url: impl Into<String>) -> Self {
        Self {
            explorer_url: explorer_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl DomainRegistry for HttpRegistry {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>> {
        request_optional(&format!("/domain/{}", segment(name))).await
    }

    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>> {
        let response: WidgetListResponse = request(&format!("/domain/{}/widgets", segment(name)), "GET", None).await?;
        Ok(response.widgets)
    }

    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>> {
        let response: DomainTxResponse = request(&format!("/domain/{}/tx", segment(name)), "GET", None).await?;
        Ok(response.tx_hash)
    }

    fn explorer_uri(&self, tx_hash: &TxHash) -> String {
        explorer_tx_uri(&self.explorer_url, tx_hash)
    }
}
