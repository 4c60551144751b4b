use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// Hex addresses compare case-insensitively (checksummed vs lowercase).
    pub fn matches(&self, other: &WalletAddress) -> bool {
        !self.0.is_empty() && self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type WidgetId = u64;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    #[default]
    Twitter,
}

/// How a widget value is embedded on the page.
///
/// Widgets stored before the field existed deserialize as `Feed`, which keeps
/// the "bare string renders as a profile" behaviour for them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmbedKind {
    #[default]
    Feed,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Widget {
    /// Assigned by the ledger; ignored on create.
    #[serde(default)]
    pub id: WidgetId,
    #[serde(rename = "type", default)]
    pub widget_type: WidgetType,
    pub value: String,
    #[serde(default)]
    pub embed: EmbedKind,
}

impl Widget {
    pub fn twitter(value: impl Into<String>, embed: EmbedKind) -> Self {
        Self {
            id: 0,
            widget_type: WidgetType::Twitter,
            value: value.into(),
            embed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRecord {
    pub name: String,
    pub owner: WalletAddress,
    #[serde(default)]
    pub renter: Option<WalletAddress>,
    /// Legacy single-URL field that predates the widget list.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub rent_time: u64,
    #[serde(default)]
    pub expiration_time: u64,
}

impl DomainRecord {
    pub fn is_rented(&self) -> bool {
        self.renter.as_ref().is_some_and(|renter| !renter.0.is_empty())
    }

    pub fn has_legacy_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Result of normalizing a widget input: exactly one of `value` or `error`.
///
/// Serializes as `{"value": "..."}` or `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParsedWidgetValue {
    Value(String),
    Error(String),
}

impl ParsedWidgetValue {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

/// A state-changing call submitted to the ledger by a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerCall {
    Register {
        domain: String,
        #[serde(default)]
        url: String,
    },
    CreateWidget {
        domain: String,
        widget: Widget,
    },
    DeleteWidget {
        domain: String,
        widget_id: WidgetId,
    },
    UpdateUrl {
        domain: String,
        url: String,
    },
}

impl LedgerCall {
    pub fn domain(&self) -> &str {
        match self {
            Self::Register { domain, .. }
            | Self::CreateWidget { domain, .. }
            | Self::DeleteWidget { domain, .. }
            | Self::UpdateUrl { domain, .. } => domain,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::CreateWidget { .. } => "create_widget",
            Self::DeleteWidget { .. } => "delete_widget",
            Self::UpdateUrl { .. } => "update_url",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub tx_hash: TxHash,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSubmitRequest {
    pub from: WalletAddress,
    pub call: LedgerCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetParseRequest {
    pub raw: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetListResponse {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainTxResponse {
    pub tx_hash: Option<TxHash>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerLinkResponse {
    pub tx_hash: TxHash,
    pub explorer_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parsed_value_has_single_field_shape() {
        let ok = serde_json::to_value(ParsedWidgetValue::Value("123".to_owned())).unwrap();
        assert_eq!(ok, json!({ "value": "123" }));

        let err = serde_json::to_value(ParsedWidgetValue::Error("cannot parse tweet id".to_owned())).unwrap();
        assert_eq!(err, json!({ "error": "cannot parse tweet id" }));
    }

    #[test]
    fn widget_without_embed_defaults_to_feed() {
        let widget: Widget = serde_json::from_value(json!({
            "id": 4,
            "type": "twitter",
            "value": "harmonyprotocol"
        }))
        .unwrap();

        assert_eq!(widget.embed, EmbedKind::Feed);
        assert_eq!(widget.widget_type, WidgetType::Twitter);
    }

    #[test]
    fn ledger_call_is_tagged_by_kind() {
        let call = LedgerCall::DeleteWidget {
            domain: "alice".to_owned(),
            widget_id: 7,
        };
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value, json!({ "kind": "delete_widget", "domain": "alice", "widget_id": 7 }));
        assert_eq!(call.domain(), "alice");
    }

    #[test]
    fn record_without_renter_is_not_rented() {
        let record: DomainRecord = serde_json::from_value(json!({
            "name": "fresh",
            "owner": "0x0000000000000000000000000000000000000000"
        }))
        .unwrap();
        assert!(!record.is_rented());
        assert!(!record.has_legacy_url());
    }

    #[test]
    fn address_match_ignores_case() {
        let a = WalletAddress("0xAbCd".to_owned());
        let b = WalletAddress("0xabcd".to_owned());
        assert!(a.matches(&b));
        assert!(!WalletAddress(String::new()).matches(&WalletAddress(String::new())));
    }
}
