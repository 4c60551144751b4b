//! DOM element bindings.
//!
//! All fields are resolved once at startup. The search section is shown on
//! the bare TLD host, the page section on a domain host.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

pub fn window() -> Window {
    web_sys::window().expect("page runs inside a browser window")
}

fn doc() -> Document {
    window().document().expect("window has a document")
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    doc().create_element(tag)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

pub fn navigate(href: &str) {
    if window().location().set_href(href).is_err() {
        gloo_console::error!(format!("navigation to {href} failed"));
    }
}

pub fn hostname() -> String {
    window().location().hostname().unwrap_or_default()
}

/// Escape text for interpolation into markup built with `format!`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// DOM element references used by the domain page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Home
    pub search_section: Element,
    pub search_input: HtmlInputElement,
    pub search_btn: HtmlElement,
    pub loading: Element,

    // Domain page
    pub page_section: Element,
    pub domain_title: Element,
    pub widget_input_row: Element,
    pub widget_input: HtmlInputElement,
    pub widget_list: Element,
    pub legacy_widget: Element,
    pub tx_panel: Element,
    pub wallet_prompt: Element,
    pub connect_btn: HtmlElement,

    pub toasts: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            search_section: get_el!("searchSection"),
            search_input: get_input!("searchInput"),
            search_btn: get_html!("searchBtn"),
            loading: get_el!("loading"),

            page_section: get_el!("pageSection"),
            domain_title: get_el!("domainTitle"),
            widget_input_row: get_el!("widgetInputRow"),
            widget_input: get_input!("widgetInput"),
            widget_list: get_el!("widgetList"),
            legacy_widget: get_el!("legacyWidget"),
            tx_panel: get_el!("txPanel"),
            wallet_prompt: get_el!("walletPrompt"),
            connect_btn: get_html!("connectBtn"),

            toasts: get_el!("toasts"),
        })
    }
}
