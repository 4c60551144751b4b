use dc_api_types::{DomainRecord, TxHash, WidgetId};
use dc_widget_parser::WidgetEmbed;

/// Everything the domain page renders, computed from the stores and wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub show_input: bool,
    pub placeholder: String,
    pub input_value: String,
    pub adding: bool,
    pub widgets: Vec<WidgetCard>,
    /// Rendering of the record's legacy `url` field.
    pub legacy_widget: Option<WidgetCard>,
    pub tx_panel: Option<TxPanel>,
    pub wallet_prompt: Option<WalletPrompt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCard {
    /// `None` for the legacy URL card.
    pub widget_id: Option<WidgetId>,
    pub key: String,
    pub embed: WidgetEmbed,
    pub deletable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPanel {
    pub domain_name: String,
    pub record: DomainRecord,
    pub loading: bool,
    pub tx_hash: Option<TxHash>,
    pub explorer_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletPrompt {
    /// Injected wallet present but not connected.
    Metamask,
    /// No injected wallet; offer WalletConnect instead.
    WalletConnect,
}

impl WalletPrompt {
    pub fn for_wallet(connected: bool, metamask_available: bool) -> Option<Self> {
        if !metamask_available {
            Some(Self::WalletConnect)
        } else if !connected {
            Some(Self::Metamask)
        } else {
            None
        }
    }
}
