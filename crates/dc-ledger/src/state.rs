use dc_api_types::{DomainRecord, LedgerCall, TxHash, WalletAddress, Widget};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::LedgerError;

const RENT_PERIOD_SECS: u64 = 365 * 24 * 60 * 60;

/// Everything the ledger keeps for one name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainState {
    pub record: DomainRecord,
    pub widgets: Vec<Widget>,
    pub next_widget_id: u64,
    pub tx_count: u64,
    pub last_tx: Option<TxHash>,
}

/// Lowercase, trimmed; letters, digits and inner hyphens only.
pub fn normalize_name(name: &str) -> Result<String, LedgerError> {
    let name = name.trim().to_ascii_lowercase();
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if !valid {
        return Err(LedgerError::InvalidName(name));
    }
    Ok(name)
}

/// Apply `call` from `from` on top of the current state of its domain.
///
/// Returns the new state and the hash of the transaction that produced it.
pub fn apply_call(
    current: Option<DomainState>,
    from: &WalletAddress,
    call: &LedgerCall,
    now_secs: u64,
) -> Result<(DomainState, TxHash), LedgerError> {
    let domain = normalize_name(call.domain())?;

    let mut state = match (current, call) {
        (Some(existing), LedgerCall::Register { .. }) if existing.record.is_rented() => {
            return Err(LedgerError::AlreadyRegistered(domain));
        }
        (existing, LedgerCall::Register { url, .. }) => {
            let (tx_count, last_tx) = existing
                .map(|state| (state.tx_count, state.last_tx))
                .unwrap_or((0, None));
            DomainState {
                record: DomainRecord {
                    name: domain.clone(),
                    owner: from.clone(),
                    renter: Some(from.clone()),
                    url: url.clone(),
                    rent_time: now_secs,
                    expiration_time: now_secs.saturating_add(RENT_PERIOD_SECS),
                },
                widgets: Vec::new(),
                next_widget_id: 1,
                tx_count,
                last_tx,
            }
        }
        (None, _) => return Err(LedgerError::DomainNotFound(domain)),
        (Some(existing), _) => {
            if !existing.record.owner.matches(from) {
                return Err(LedgerError::NotOwner {
                    domain,
                    from: from.clone(),
                });
            }
            existing
        }
    };

    match call {
        LedgerCall::Register { .. } => {}
        LedgerCall::CreateWidget { widget, .. } => {
            let mut widget = widget.clone();
            widget.id = state.next_widget_id;
            state.next_widget_id += 1;
            state.widgets.push(widget);
        }
        LedgerCall::DeleteWidget { widget_id, .. } => {
            let before = state.widgets.len();
            state.widgets.retain(|widget| widget.id != *widget_id);
            if state.widgets.len() == before {
                return Err(LedgerError::WidgetNotFound {
                    domain,
                    id: *widget_id,
                });
            }
        }
        LedgerCall::UpdateUrl { url, .. } => {
            state.record.url = url.clone();
        }
    }

    let tx_hash = tx_hash(from, call, state.tx_count)?;
    state.tx_count += 1;
    state.last_tx = Some(tx_hash.clone());

    Ok((state, tx_hash))
}

fn tx_hash(from: &WalletAddress, call: &LedgerCall, sequence: u64) -> Result<TxHash, LedgerError> {
    let call_json = serde_json::to_string(call).map_err(|err| LedgerError::Storage(err.to_string()))?;
    let payload = format!("{}:{}:{}", from.0.to_ascii_lowercase(), call_json, sequence);
    let digest = Sha256::digest(payload.as_bytes());
    Ok(TxHash(format!("0x{}", hex_lower(&digest))))
}

fn hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}
