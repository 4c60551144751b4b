//! DotCountry domain page, WASM front-end.
//!
//! Resolves the domain from the host name, routes between the search page,
//! the registration redirect and the domain page, and renders the widget
//! module's view.

pub mod api;
pub mod console;
pub mod dom;
pub mod events;
pub mod render;
pub mod state;
pub mod toast;
pub mod wallet;

use dc_page_core::{HomeRoute, PageConfig, WidgetModule, domain_name_from_host};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let config = PageConfig::default();

    let domain_name = domain_name_from_host(&dom::hostname(), &config.tld);
    if domain_name.is_empty() {
        show_route(&els, &HomeRoute::Search);
        return events::bind_search_events(&els, &config.tld);
    }
    show_route(&els, &HomeRoute::Loading);

    let wallet = wallet::InjectedWallet::default();
    wallet.restore().await;

    let module = WidgetModule::new(
        domain_name.clone(),
        config.clone(),
        api::HttpRegistry::new(config.explorer_url.clone()),
        wallet,
        toast::DomToasts::new(els.toasts.clone()),
    )
    .with_diagnostics(console::ConsoleSink);
    let module = state::set_module(module);

    if let Err(err) = module.init().await {
        gloo_console::error!(format!("loading {domain_name} failed: {err:#}"));
    }

    let store = module.domain_store();
    let route = HomeRoute::resolve(
        &domain_name,
        store.domain_record().as_ref(),
        store.is_loaded(),
        &config,
    );
    show_route(&els, &route);

    match route {
        HomeRoute::Redirect(href) => dom::navigate(&href),
        HomeRoute::Domain => {
            dom::set_text(&els.domain_title, &format!("{}.{}", domain_name, config.tld));
            render::render(&els, &module.view());
            events::bind_page_events(&els)?;
        }
        HomeRoute::Search | HomeRoute::Loading => {}
    }

    Ok(())
}

fn show_route(els: &dom::Elements, route: &HomeRoute) {
    dom::set_hidden(&els.search_section, *route != HomeRoute::Search);
    dom::set_hidden(&els.loading, !matches!(route, HomeRoute::Loading | HomeRoute::Redirect(_)));
    dom::set_hidden(&els.page_section, *route != HomeRoute::Domain);
}
