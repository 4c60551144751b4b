//! Devnet ledger for domain records and their widgets.
//!
//! Stands in for the name-service contract: every write is a [`LedgerCall`]
//! signed off by a wallet address, checked against the domain's owner and
//! answered with a transaction hash.

mod state;

pub use state::{DomainState, apply_call, normalize_name};

use async_trait::async_trait;
use dc_api_types::{DomainRecord, LedgerCall, SubmitReceipt, TxHash, WalletAddress, Widget, WidgetId};
use rocksdb::{DB, Options};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("domain '{0}' not found")]
    DomainNotFound(String),
    #[error("domain '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("{from} is not the owner of '{domain}'")]
    NotOwner { domain: String, from: WalletAddress },
    #[error("widget {id} not found on '{domain}'")]
    WidgetNotFound { domain: String, id: WidgetId },
    #[error("invalid domain name '{0}'")]
    InvalidName(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rocksdb::Error> for LedgerError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[async_trait]
pub trait Ledger: Send + Sync {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>, LedgerError>;
    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>, LedgerError>;
    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>, LedgerError>;
    async fn apply(&self, from: &WalletAddress, call: LedgerCall) -> Result<SubmitReceipt, LedgerError>;
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[derive(Default)]
pub struct InMemoryLedger {
    domains: RwLock<HashMap<String, DomainState>>,
}

impl InMemoryLedger {
    async fn state(&self, name: &str) -> Result<Option<DomainState>, LedgerError> {
        let name = normalize_name(name)?;
        let guard = self.domains.read().await;
        Ok(guard.get(&name).cloned())
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>, LedgerError> {
        Ok(self.state(name).await?.map(|state| state.record))
    }

    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>, LedgerError> {
        Ok(self.state(name).await?.map(|state| state.widgets).unwrap_or_default())
    }

    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>, LedgerError> {
        Ok(self.state(name).await?.and_then(|state| state.last_tx))
    }

    async fn apply(&self, from: &WalletAddress, call: LedgerCall) -> Result<SubmitReceipt, LedgerError> {
        let name = normalize_name(call.domain())?;
        let mut guard = self.domains.write().await;
        let (next, tx_hash) = apply_call(guard.get(&name).cloned(), from, &call, now_secs())?;
        guard.insert(name.clone(), next);
        info!(domain = %name, call = call.label(), %tx_hash, "ledger call applied");

        Ok(SubmitReceipt {
            tx_hash,
            accepted: true,
        })
    }
}

pub struct RocksDbLedger {
    db: Arc<DB>,
    write_lock: Mutex<()>,
}

impl RocksDbLedger {
    pub fn open_default(path: &str) -> Result<Self, LedgerError> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path)?;
        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    fn key_for_domain(name: &str) -> String {
        format!("domain:{name}")
    }

    fn load_state(&self, name: &str) -> Result<Option<DomainState>, LedgerError> {
        let key = Self::key_for_domain(name);
        match self.db.get(key.as_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice::<DomainState>(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_state(&self, state: &DomainState) -> Result<(), LedgerError> {
        let key = Self::key_for_domain(&state.record.name);
        let value = serde_json::to_vec(state)?;
        self.db.put(key.as_bytes(), value)?;
        Ok(())
    }

    fn state(&self, name: &str) -> Result<Option<DomainState>, LedgerError> {
        self.load_state(&normalize_name(name)?)
    }
}

#[async_trait]
impl Ledger for RocksDbLedger {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>, LedgerError> {
        Ok(self.state(name)?.map(|state| state.record))
    }

    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>, LedgerError> {
        Ok(self.state(name)?.map(|state| state.widgets).unwrap_or_default())
    }

    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>, LedgerError> {
        Ok(self.state(name)?.and_then(|state| state.last_tx))
    }

    async fn apply(&self, from: &WalletAddress, call: LedgerCall) -> Result<SubmitReceipt, LedgerError> {
        let name = normalize_name(call.domain())?;
        // Serialize read-modify-write per ledger.
        let _guard = self.write_lock.lock().await;
        let (next, tx_hash) = apply_call(self.load_state(&name)?, from, &call, now_secs())?;
        self.save_state(&next)?;
        info!(domain = %name, call = call.label(), %tx_hash, "ledger call persisted");

        Ok(SubmitReceipt {
            tx_hash,
            accepted: true,
        })
    }
}
