use anyhow::{Context, Result};
use dc_api_types::{LedgerCall, SubmitReceipt, TxHash, Widget, WidgetId};
use dc_chain_client::{DomainRegistry, WalletClient};
use std::cell::{Cell, RefCell};
use tracing::{info, warn};

/// Ordered widget list of one domain plus the domain's latest transaction.
#[derive(Debug, Default)]
pub struct WidgetListStore {
    widgets: RefCell<Vec<Widget>>,
    tx_domain: RefCell<Option<TxHash>>,
    tx_domain_loading: Cell<bool>,
    pending_tx: Cell<usize>,
}

impl WidgetListStore {
    pub async fn load_widget_list(&self, registry: &dyn DomainRegistry, domain_name: &str) -> Result<()> {
        let widgets = registry
            .widget_list(domain_name)
            .await
            .with_context(|| format!("load widget list {domain_name}"))?;
        self.widgets.replace(widgets);
        Ok(())
    }

    pub async fn load_domain_tx(&self, registry: &dyn DomainRegistry, domain_name: &str) -> Result<()> {
        self.tx_domain_loading.set(true);
        let result = registry.domain_tx(domain_name).await;
        self.tx_domain_loading.set(false);

        let tx_hash = result.with_context(|| format!("load domain tx {domain_name}"))?;
        self.tx_domain.replace(tx_hash);
        Ok(())
    }

    pub async fn create_widget(
        &self,
        wallet: &dyn WalletClient,
        registry: &dyn DomainRegistry,
        domain_name: &str,
        widget: Widget,
    ) -> Result<SubmitReceipt> {
        let call = LedgerCall::CreateWidget {
            domain: domain_name.to_owned(),
            widget,
        };
        self.submit_and_reload(wallet, registry, domain_name, call).await
    }

    pub async fn delete_widget(
        &self,
        wallet: &dyn WalletClient,
        registry: &dyn DomainRegistry,
        domain_name: &str,
        widget_id: WidgetId,
    ) -> Result<SubmitReceipt> {
        let call = LedgerCall::DeleteWidget {
            domain: domain_name.to_owned(),
            widget_id,
        };
        self.submit_and_reload(wallet, registry, domain_name, call).await
    }

    async fn submit_and_reload(
        &self,
        wallet: &dyn WalletClient,
        registry: &dyn DomainRegistry,
        domain_name: &str,
        call: LedgerCall,
    ) -> Result<SubmitReceipt> {
        let label = call.label();
        self.pending_tx.set(self.pending_tx.get() + 1);
        let result = wallet.submit(call).await;
        self.pending_tx.set(self.pending_tx.get().saturating_sub(1));

        let receipt = result.with_context(|| format!("{label} on {domain_name}"))?;
        if !receipt.accepted {
            anyhow::bail!("transaction {} was rejected", receipt.tx_hash);
        }
        info!(domain = domain_name, call = label, tx_hash = %receipt.tx_hash, "widget transaction accepted");

        // The transaction has landed; a failed reload only leaves the list stale.
        if let Err(err) = self.load_widget_list(registry, domain_name).await {
            warn!("widget list reload failed after {}: {:#}", label, err);
        }
        self.tx_domain.replace(Some(receipt.tx_hash.clone()));

        Ok(receipt)
    }

    pub fn widget_list(&self) -> Vec<Widget> {
        self.widgets.borrow().clone()
    }

    pub fn tx_domain(&self) -> Option<TxHash> {
        self.tx_domain.borrow().clone()
    }

    pub fn tx_domain_loading(&self) -> bool {
        self.tx_domain_loading.get()
    }

    pub fn has_pending_tx(&self) -> bool {
        self.pending_tx.get() > 0
    }
}
