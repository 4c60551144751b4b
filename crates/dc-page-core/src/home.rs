use anyhow::Result;
use dc_api_types::DomainRecord;
use dc_chain_client::DomainRegistry;

use crate::config::PageConfig;
use crate::domain_store::DomainStore;

/// What the home page shows for the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeRoute {
    Search,
    Loading,
    Domain,
    /// Unrented name: send the visitor to the registration site.
    Redirect(String),
}

impl HomeRoute {
    pub fn resolve(domain_name: &str, record: Option<&DomainRecord>, loaded: bool, config: &PageConfig) -> Self {
        if domain_name.is_empty() {
            return Self::Search;
        }
        if !loaded {
            return Self::Loading;
        }
        match record {
            Some(record) if record.is_rented() => Self::Domain,
            _ => Self::Redirect(format!(
                "{}?domain={}",
                config.hostname.trim_end_matches('/'),
                domain_name
            )),
        }
    }
}

/// `alice.country` → `alice`; the bare TLD host, `www` and foreign hosts
/// have no domain name.
pub fn domain_name_from_host(host: &str, tld: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let suffix = format!(".{}", tld.to_ascii_lowercase());
    let Some(prefix) = host.strip_suffix(&suffix) else {
        return String::new();
    };

    let label = prefix.rsplit('.').next().unwrap_or_default();
    if label == "www" {
        return String::new();
    }
    label.to_owned()
}

/// Load the record for `domain_name` (when there is one) and pick the route.
pub async fn route_home(
    domain_name: &str,
    store: &DomainStore,
    registry: &dyn DomainRegistry,
    config: &PageConfig,
) -> Result<HomeRoute> {
    if !domain_name.is_empty() {
        store.load_domain_record(registry, domain_name).await?;
    }
    Ok(HomeRoute::resolve(
        domain_name,
        store.domain_record().as_ref(),
        store.is_loaded(),
        config,
    ))
}
