//! In-process collaborators backed by the devnet ledger.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dc_api_types::{DomainRecord, LedgerCall, SubmitReceipt, TxHash, WalletAddress, Widget};
use dc_chain_client::{DomainRegistry, NotificationSink, ToastId, ToastUpdate, WalletClient, explorer_tx_uri};
use dc_ledger::{InMemoryLedger, Ledger};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

use crate::config::PageConfig;
use crate::widget_module::WidgetModule;

pub const OWNER: &str = "0xA11CE00000000000000000000000000000000001";

pub struct LedgerRegistry {
    ledger: Arc<InMemoryLedger>,
}

#[async_trait(?Send)]
impl DomainRegistry for LedgerRegistry {
    async fn domain_record(&self, name: &str) -> Result<Option<DomainRecord>> {
        Ok(self.ledger.domain_record(name).await?)
    }

    async fn widget_list(&self, name: &str) -> Result<Vec<Widget>> {
        Ok(self.ledger.widget_list(name).await?)
    }

    async fn domain_tx(&self, name: &str) -> Result<Option<TxHash>> {
        Ok(self.ledger.domain_tx(name).await?)
    }

    fn explorer_uri(&self, tx_hash: &TxHash) -> String {
        explorer_tx_uri("https://explorer.test", tx_hash)
    }
}

pub struct FakeWallet {
    ledger: Arc<InMemoryLedger>,
    address: RefCell<WalletAddress>,
    connected: Cell<bool>,
    metamask: bool,
    fail_next: RefCell<Option<String>>,
    submitted: Cell<usize>,
}

impl FakeWallet {
    pub fn disconnect(&self) {
        self.connected.set(false);
    }

    pub fn set_address(&self, address: &str) {
        self.address.replace(WalletAddress(address.to_owned()));
    }

    pub fn fail_next_submit(&self, message: &str) {
        self.fail_next.replace(Some(message.to_owned()));
    }

    pub fn submitted(&self) -> usize {
        self.submitted.get()
    }
}

#[async_trait(?Send)]
impl WalletClient for FakeWallet {
    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn address(&self) -> Option<WalletAddress> {
        self.connected.get().then(|| self.address.borrow().clone())
    }

    fn is_metamask_available(&self) -> bool {
        self.metamask
    }

    async fn connect(&self) -> Result<WalletAddress> {
        self.connected.set(true);
        Ok(self.address.borrow().clone())
    }

    async fn submit(&self, call: LedgerCall) -> Result<SubmitReceipt> {
        self.submitted.set(self.submitted.get() + 1);
        if let Some(message) = self.fail_next.take() {
            return Err(anyhow!(message));
        }
        let from = self.address.borrow().clone();
        Ok(self.ledger.apply(&from, call).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Loading(String),
    Update(ToastUpdate),
}

#[derive(Default)]
pub struct RecordingNotifier {
    next_id: Cell<ToastId>,
    events: RefCell<Vec<ToastEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<ToastEvent> {
        self.events.borrow().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn loading(&self, message: &str) -> ToastId {
        self.events.borrow_mut().push(ToastEvent::Loading(message.to_owned()));
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn update(&self, _id: ToastId, update: ToastUpdate) {
        self.events.borrow_mut().push(ToastEvent::Update(update));
    }
}

pub struct Harness {
    pub registry: LedgerRegistry,
    pub wallet: FakeWallet,
}

impl Harness {
    pub fn empty() -> Self {
        let ledger = Arc::new(InMemoryLedger::default());
        Self {
            registry: LedgerRegistry { ledger: ledger.clone() },
            wallet: FakeWallet {
                ledger,
                address: RefCell::new(WalletAddress(OWNER.to_owned())),
                connected: Cell::new(true),
                metamask: true,
                fail_next: RefCell::new(None),
                submitted: Cell::new(0),
            },
        }
    }

    pub async fn with_domain(name: &str) -> Self {
        Self::with_legacy_url(name, "").await
    }

    pub async fn with_legacy_url(name: &str, url: &str) -> Self {
        let harness = Self::empty();
        harness
            .registry
            .ledger
            .apply(
                &WalletAddress(OWNER.to_owned()),
                LedgerCall::Register {
                    domain: name.to_owned(),
                    url: url.to_owned(),
                },
            )
            .await
            .expect("register test domain");
        harness
    }

    pub fn into_module(self, name: &str) -> WidgetModule<LedgerRegistry, FakeWallet, RecordingNotifier> {
        let config = PageConfig {
            explorer_url: "https://explorer.test".to_owned(),
            ..PageConfig::default()
        };
        WidgetModule::new(name, config, self.registry, self.wallet, RecordingNotifier::default())
    }
}
