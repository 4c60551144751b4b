//! Domain page core.
//!
//! Stores mirroring the ledger state of one domain, the widget module that
//! turns owner input into on-chain widgets, and the home page router. No DOM
//! access happens here; the browser crate renders [`PageView`].

pub mod config;
pub mod domain_store;
pub mod home;
pub mod view;
pub mod widget_list_store;
pub mod widget_module;

#[cfg(test)]
mod testing;

pub use config::PageConfig;
pub use domain_store::DomainStore;
pub use home::{HomeRoute, domain_name_from_host, route_home};
pub use view::{PageView, TxPanel, WalletPrompt, WidgetCard};
pub use widget_list_store::WidgetListStore;
pub use widget_module::{SubmitOutcome, WidgetModule, looks_like_email};
