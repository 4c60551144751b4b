//! Injected browser wallet (`window.ethereum`).
//!
//! Connection goes through `eth_requestAccounts`; ledger calls are submitted
//! to page-service on behalf of the connected account.

use crate::{api, dom};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use dc_api_types::{LedgerCall, LedgerSubmitRequest, SubmitReceipt, WalletAddress};
use dc_chain_client::WalletClient;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
}

fn provider() -> Option<JsValue> {
    js_sys::Reflect::get(&dom::window(), &JsValue::from_str("ethereum"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// `ethereum.request({ method })`
async fn rpc(method: &str) -> Result<JsValue> {
    let ethereum = provider().ok_or_else(|| anyhow!("no injected wallet found"))?;
    let request = js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| anyhow!("injected wallet has no request()"))?;

    let args = serde_wasm_bindgen::to_value(&RpcRequest { method }).map_err(|e| anyhow!("{e}"))?;
    let promise = request
        .call1(&ethereum, &args)
        .map_err(|e| anyhow!("{method} failed: {:?}", e))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| anyhow!("{method} did not return a promise"))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{method} rejected: {:?}", e))
}

fn first_account(accounts: JsValue) -> Option<WalletAddress> {
    let accounts: Vec<String> = serde_wasm_bindgen::from_value(accounts).ok()?;
    accounts
        .into_iter()
        .find(|account| !account.is_empty())
        .map(WalletAddress)
}

#[derive(Default)]
pub struct InjectedWallet {
    address: RefCell<Option<WalletAddress>>,
}

impl InjectedWallet {
    /// Pick up an account the user already authorized, without prompting.
    pub async fn restore(&self) {
        if provider().is_none() {
            return;
        }
        match rpc("eth_accounts").await {
            Ok(accounts) => {
                self.address.replace(first_account(accounts));
            }
            Err(err) => gloo_console::warn!(format!("wallet restore failed: {err:#}")),
        }
    }
}

#[async_trait(?Send)]
impl WalletClient for InjectedWallet {
    fn is_connected(&self) -> bool {
        self.address.borrow().is_some()
    }

    fn address(&self) -> Option<WalletAddress> {
        self.address.borrow().clone()
    }

    fn is_metamask_available(&self) -> bool {
        provider().is_some()
    }

    async fn connect(&self) -> Result<WalletAddress> {
        let accounts = rpc("eth_requestAccounts").await?;
        let address = first_account(accounts).context("wallet returned no accounts")?;
        self.address.replace(Some(address.clone()));
        Ok(address)
    }

    async fn submit(&self, call: LedgerCall) -> Result<SubmitReceipt> {
        let from = self.address().context("wallet is not connected")?;
        let body = serde_json::to_string(&LedgerSubmitRequest { from, call })?;
        api::request("/ledger/submit", "POST", Some(body)).await
    }
}
