use anyhow::{Context, Result};
use dc_api_types::{DomainRecord, WalletAddress};
use dc_chain_client::DomainRegistry;
use std::cell::{Cell, RefCell};
use tracing::{info, warn};

/// Mirror of one domain record.
#[derive(Debug, Default)]
pub struct DomainStore {
    domain_name: RefCell<String>,
    record: RefCell<Option<DomainRecord>>,
    loading: Cell<bool>,
    loaded: Cell<bool>,
}

impl DomainStore {
    pub async fn load_domain_record(
        &self,
        registry: &dyn DomainRegistry,
        name: &str,
    ) -> Result<Option<DomainRecord>> {
        self.domain_name.replace(name.to_owned());
        self.loading.set(true);
        let result = registry.domain_record(name).await;
        self.loading.set(false);

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("failed to load domain record for {}: {:#}", name, err);
                return Err(err).with_context(|| format!("load domain record {name}"));
            }
        };

        info!(domain = name, found = record.is_some(), "domain record loaded");
        self.record.replace(record.clone());
        self.loaded.set(true);
        Ok(record)
    }

    pub fn domain_name(&self) -> String {
        self.domain_name.borrow().clone()
    }

    pub fn domain_record(&self) -> Option<DomainRecord> {
        self.record.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// At least one load finished, whether or not a record was found.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn is_owner(&self, wallet: Option<&WalletAddress>) -> bool {
        match (self.record.borrow().as_ref(), wallet) {
            (Some(record), Some(wallet)) => record.owner.matches(wallet),
            _ => false,
        }
    }
}
