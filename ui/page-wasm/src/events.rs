//! Event binding.
//!
//! Async handlers are spawned via `wasm_bindgen_futures::spawn_local` and
//! re-render the page once the widget module settles.

use crate::dom::{self, Elements};
use crate::render;
use crate::state;
use dc_chain_client::WalletClient;
use dc_page_core::SubmitOutcome;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn rerender(els: &Elements) {
    if let Some(module) = state::module() {
        render::render(els, &module.view());
    }
}

/// Bind the domain page listeners. Call once after the module is stored.
pub fn bind_page_events(els: &Elements) -> Result<(), JsValue> {
    {
        let els2 = els.clone();
        listen(&els.widget_input, "input", move |_: Event| {
            if let Some(module) = state::module() {
                module.set_input(&els2.widget_input.value());
            }
        })?;
    }

    {
        let els2 = els.clone();
        listen(&els.widget_input, "keydown", move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_submit(&els3).await;
            });
        })?;
    }

    for container in [&els.widget_list, &els.legacy_widget] {
        let els2 = els.clone();
        listen(container, "click", move |event: web_sys::MouseEvent| {
            let Some(button) = delete_button(&event) else {
                return;
            };
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_delete(&els3, &button).await;
            });
        })?;
    }

    {
        let els2 = els.clone();
        listen(&els.connect_btn, "click", move |_: web_sys::MouseEvent| {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_connect(&els3).await;
            });
        })?;
    }

    Ok(())
}

/// Bind the home page search box.
pub fn bind_search_events(els: &Elements, tld: &str) -> Result<(), JsValue> {
    {
        let els2 = els.clone();
        let tld = tld.to_owned();
        listen(&els.search_btn, "click", move |_: web_sys::MouseEvent| {
            on_search(&els2, &tld);
        })?;
    }
    {
        let els2 = els.clone();
        let tld = tld.to_owned();
        listen(&els.search_input, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                on_search(&els2, &tld);
            }
        })?;
    }
    Ok(())
}

fn delete_button(event: &Event) -> Option<Element> {
    let target: Element = event.target()?.dyn_into().ok()?;
    target.closest("button.widget-delete").ok().flatten()
}

async fn on_submit(els: &Elements) {
    let Some(module) = state::module() else {
        return;
    };
    let raw = dom::get_input_value(&els.widget_input);
    module.set_input(&raw);
    if !raw.is_empty() {
        els.widget_input.set_disabled(true);
    }

    match module.submit_input(&raw).await {
        SubmitOutcome::Mailto(href) => dom::navigate(&href),
        SubmitOutcome::Failed(message) | SubmitOutcome::Rejected(message) => {
            gloo_console::warn!(message);
        }
        SubmitOutcome::Ignored | SubmitOutcome::Created(_) => {}
    }
    rerender(els);
}

async fn on_delete(els: &Elements, button: &Element) {
    let Some(module) = state::module() else {
        return;
    };

    let result = if button.has_attribute("data-legacy-url") {
        module.delete_legacy_url().await
    } else {
        let Some(widget_id) = button
            .get_attribute("data-widget-id")
            .and_then(|id| id.parse().ok())
        else {
            return;
        };
        module.delete_widget(widget_id).await
    };

    if let Err(err) = result {
        gloo_console::warn!(format!("delete failed: {err:#}"));
    }
    rerender(els);
}

async fn on_connect(els: &Elements) {
    let Some(module) = state::module() else {
        return;
    };
    if let Err(err) = module.wallet().connect().await {
        gloo_console::warn!(format!("wallet connect failed: {err:#}"));
    }
    rerender(els);
}

fn on_search(els: &Elements, tld: &str) {
    let name = dom::get_input_value(&els.search_input).to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    dom::navigate(&format!("https://{name}.{tld}"));
}
