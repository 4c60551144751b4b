//! Collaborators of the domain page: the chain-backed registry, the user's
//! wallet and the toast notifier.
//!
//! Traits are `?Send` so browser implementations, whose futures cannot cross
//! threads, fit behind them.

use anyhow::Result;
use async_trait::async_trait;
use dc_api_types::{DomainRecord, LedgerCall, SubmitReceipt, TxHash, WalletAddress, Widget};

/// Read side of the name service.
#[async_trait(?Send)]
pub trait DomainRegistry {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>>;
    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>>;
    /// Hash of the last transaction that touched `name`, if any.
    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>>;
    fn explorer_uri(&self, tx_hash: &TxHash) -> String;
}

/// The connected wallet. All writes go through [`WalletClient::submit`].
#[async_trait(?Send)]
pub trait WalletClient {
    fn is_connected(&self) -> bool;
    fn address(&self) -> Option<WalletAddress>;
    /// Whether an injected browser wallet (MetaMask-style) was detected.
    fn is_metamask_available(&self) -> bool;
    async fn connect(&self) -> Result<WalletAddress>;
    async fn submit(&self, call: LedgerCall) -> Result<SubmitReceipt>;
}

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastUpdate {
    pub kind: ToastKind,
    pub message: String,
    pub link: Option<ToastLink>,
    pub auto_close_ms: Option<u32>,
}

impl ToastUpdate {
    pub fn success(message: impl Into<String>, link: Option<ToastLink>, auto_close_ms: u32) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            link,
            auto_close_ms: Some(auto_close_ms),
        }
    }

    pub fn error(message: impl Into<String>, auto_close_ms: u32) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            link: None,
            auto_close_ms: Some(auto_close_ms),
        }
    }
}

/// Fire-and-update toasts.
pub trait NotificationSink {
    fn loading(&self, message: &str) -> ToastId;
    fn update(&self, id: ToastId, update: ToastUpdate);
}

/// `{explorer}/tx/{hash}`
pub fn explorer_tx_uri(explorer_url: &str, tx_hash: &TxHash) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), tx_hash.0)
}
