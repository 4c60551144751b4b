use anyhow::{Context, Result};
use dc_api_types::{LedgerCall, SubmitReceipt, Widget, WidgetId};
use dc_chain_client::{DomainRegistry, NotificationSink, ToastId, ToastLink, ToastUpdate, WalletClient};
use dc_widget_parser::{DiagnosticSink, TracingSink, classify, into_parsed, try_parse_classified, widget_embed};
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::config::PageConfig;
use crate::domain_store::DomainStore;
use crate::view::{PageView, TxPanel, WalletPrompt, WidgetCard};
use crate::widget_list_store::WidgetListStore;

const PROCESSING: &str = "Processing transaction";
const SUCCESS_AUTO_CLOSE_MS: u32 = 2_000;
const PARSE_ERROR_AUTO_CLOSE_MS: u32 = 2_000;
const FAILURE_AUTO_CLOSE_MS: u32 = 10_000;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w-][\w.-]*)?[^.]@\w+\.\w+(?:\.\w+)?\w$").expect("email pattern is valid")
});

/// E-mail addresses typed into the widget input are not widgets.
pub fn looks_like_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, or a submit already in flight.
    Ignored,
    /// Navigate to this `mailto:` link instead of creating a widget.
    Mailto(String),
    /// The input did not parse; carries the user-facing message.
    Rejected(String),
    Created(SubmitReceipt),
    Failed(String),
}

/// Controller of the widget section of a domain page.
///
/// State lives in cells so the module can sit behind an `Rc` shared by event
/// handlers; no borrow is held across an await.
pub struct WidgetModule<R, W, N> {
    domain_name: String,
    config: PageConfig,
    registry: R,
    wallet: W,
    notifier: N,
    diagnostics: Box<dyn DiagnosticSink>,
    domain_store: DomainStore,
    widget_store: WidgetListStore,
    adding: Cell<bool>,
    input_value: RefCell<String>,
}

impl<R, W, N> WidgetModule<R, W, N>
where
    R: DomainRegistry,
    W: WalletClient,
    N: NotificationSink,
{
    pub fn new(domain_name: impl Into<String>, config: PageConfig, registry: R, wallet: W, notifier: N) -> Self {
        Self {
            domain_name: domain_name.into(),
            config,
            registry,
            wallet,
            notifier,
            diagnostics: Box::new(TracingSink),
            domain_store: DomainStore::default(),
            widget_store: WidgetListStore::default(),
            adding: Cell::new(false),
            input_value: RefCell::new(String::new()),
        }
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn domain_store(&self) -> &DomainStore {
        &self.domain_store
    }

    pub fn widget_store(&self) -> &WidgetListStore {
        &self.widget_store
    }

    /// Load the record, the widget list and the latest domain transaction.
    pub async fn init(&self) -> Result<()> {
        self.domain_store
            .load_domain_record(&self.registry, &self.domain_name)
            .await?;
        self.widget_store
            .load_widget_list(&self.registry, &self.domain_name)
            .await?;
        self.widget_store
            .load_domain_tx(&self.registry, &self.domain_name)
            .await?;
        Ok(())
    }

    pub fn set_input(&self, value: &str) {
        self.input_value.replace(value.to_owned());
    }

    pub fn input_value(&self) -> String {
        self.input_value.borrow().clone()
    }

    pub fn is_adding(&self) -> bool {
        self.adding.get()
    }

    /// Input is offered only to the connected owner of the domain.
    pub fn show_input(&self) -> bool {
        self.wallet.is_connected() && self.domain_store.is_owner(self.wallet.address().as_ref())
    }

    /// Enter pressed in the widget input.
    pub async fn submit_input(&self, raw: &str) -> SubmitOutcome {
        if raw.is_empty() || self.adding.get() {
            return SubmitOutcome::Ignored;
        }

        if looks_like_email(raw) {
            return SubmitOutcome::Mailto(format!("mailto:{}", self.config.contact_email));
        }

        self.adding.set(true);
        let toast = self.notifier.loading(PROCESSING);

        let widget = match try_parse_classified(classify(raw)) {
            Ok(value) => Widget::twitter(value.value, value.embed),
            Err(err) => {
                let message = into_parsed(raw, Err(err), self.diagnostics.as_ref())
                    .error()
                    .unwrap_or_default()
                    .to_owned();
                self.notifier
                    .update(toast, ToastUpdate::error(message.clone(), PARSE_ERROR_AUTO_CLOSE_MS));
                self.adding.set(false);
                return SubmitOutcome::Rejected(message);
            }
        };

        let outcome = match self.create_widget(widget).await {
            Ok(receipt) => {
                self.on_success(toast, &receipt);
                SubmitOutcome::Created(receipt)
            }
            Err(err) => {
                let message = self.on_failed(toast, &err);
                SubmitOutcome::Failed(message)
            }
        };

        self.adding.set(false);
        self.input_value.replace(String::new());
        outcome
    }

    async fn create_widget(&self, widget: Widget) -> Result<SubmitReceipt> {
        self.ensure_connected().await?;
        self.widget_store
            .create_widget(&self.wallet, &self.registry, &self.domain_name, widget)
            .await
    }

    pub async fn delete_widget(&self, widget_id: WidgetId) -> Result<SubmitReceipt> {
        let toast = self.notifier.loading(PROCESSING);
        let result = async {
            self.ensure_connected().await?;
            self.widget_store
                .delete_widget(&self.wallet, &self.registry, &self.domain_name, widget_id)
                .await
        }
        .await;
        self.finish(toast, result)
    }

    /// Clear the record's legacy `url` field, which removes the legacy card.
    pub async fn delete_legacy_url(&self) -> Result<SubmitReceipt> {
        let toast = self.notifier.loading(PROCESSING);
        let result = async {
            self.ensure_connected().await?;
            let receipt = self
                .wallet
                .submit(LedgerCall::UpdateUrl {
                    domain: self.domain_name.clone(),
                    url: String::new(),
                })
                .await
                .with_context(|| format!("clear legacy url on {}", self.domain_name))?;
            if !receipt.accepted {
                anyhow::bail!("transaction {} was rejected", receipt.tx_hash);
            }
            Ok::<_, anyhow::Error>(receipt)
        }
        .await;
        let result = self.finish(toast, result);

        if let Err(err) = self
            .domain_store
            .load_domain_record(&self.registry, &self.domain_name)
            .await
        {
            warn!("domain record reload failed: {:#}", err);
        }
        result
    }

    async fn ensure_connected(&self) -> Result<()> {
        if !self.wallet.is_connected() {
            let address = self.wallet.connect().await.context("connect wallet")?;
            info!(%address, "wallet connected");
        }
        Ok(())
    }

    fn finish(&self, toast: ToastId, result: Result<SubmitReceipt>) -> Result<SubmitReceipt> {
        match &result {
            Ok(receipt) => self.on_success(toast, receipt),
            Err(err) => {
                self.on_failed(toast, err);
            }
        }
        result
    }

    fn on_success(&self, toast: ToastId, receipt: &SubmitReceipt) {
        let link = ToastLink {
            label: "View transaction".to_owned(),
            href: self.registry.explorer_uri(&receipt.tx_hash),
        };
        self.notifier
            .update(toast, ToastUpdate::success("Done!", Some(link), SUCCESS_AUTO_CLOSE_MS));
    }

    fn on_failed(&self, toast: ToastId, err: &anyhow::Error) -> String {
        warn!("widget transaction failed: {:#}", err);
        let message = format!("Failed {err:#}");
        self.notifier
            .update(toast, ToastUpdate::error(message.clone(), FAILURE_AUTO_CLOSE_MS));
        message
    }

    pub fn view(&self) -> PageView {
        let is_owner = self.domain_store.is_owner(self.wallet.address().as_ref());
        let diagnostics = self.diagnostics.as_ref();

        let widgets = self
            .widget_store
            .widget_list()
            .into_iter()
            .map(|widget| WidgetCard {
                widget_id: Some(widget.id),
                key: format!("{}-{}", widget.id, widget.value),
                embed: widget_embed(&widget.value, widget.embed, diagnostics),
                deletable: is_owner,
            })
            .collect();

        let record = self.domain_store.domain_record();

        let legacy_widget = record
            .as_ref()
            .filter(|record| record.has_legacy_url())
            .map(|record| WidgetCard {
                widget_id: None,
                key: "legacy-url".to_owned(),
                embed: widget_embed(&record.url, Default::default(), diagnostics),
                deletable: is_owner,
            });

        let tx_panel = record.map(|record| {
            let tx_hash = self.widget_store.tx_domain();
            TxPanel {
                domain_name: self.domain_store.domain_name(),
                record,
                loading: self.widget_store.tx_domain_loading(),
                explorer_uri: tx_hash.as_ref().map(|hash| self.registry.explorer_uri(hash)),
                tx_hash,
            }
        });

        PageView {
            show_input: self.show_input(),
            placeholder: self.config.widget_placeholder.clone(),
            input_value: self.input_value(),
            adding: self.adding.get(),
            widgets,
            legacy_widget,
            tx_panel,
            wallet_prompt: WalletPrompt::for_wallet(
                self.wallet.is_connected(),
                self.wallet.is_metamask_available(),
            ),
        }
    }
}
