//! Render a [`PageView`] into the bound elements.
//!
//! Embeds are emitted as the markup twitter's `widgets.js` upgrades in place;
//! `twttr.widgets.load()` is called after every render.

use crate::dom::{self, Elements, escape_html};
use dc_page_core::{PageView, TxPanel, WalletPrompt, WidgetCard};
use dc_widget_parser::WidgetEmbed;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub fn embed_markup(embed: &WidgetEmbed) -> String {
    match embed {
        WidgetEmbed::Profile(handle) => {
            let handle = escape_html(handle);
            format!(
                "<a class=\"twitter-timeline\" data-height=\"600\" href=\"https://twitter.com/{handle}\">Tweets by {handle}</a>"
            )
        }
        WidgetEmbed::Tweet(id) => format!(
            "<blockquote class=\"twitter-tweet\"><a href=\"https://twitter.com/x/status/{}\"></a></blockquote>",
            escape_html(id.as_str())
        ),
        WidgetEmbed::Invalid(message) => format!("<div class=\"widget-error\">{}</div>", escape_html(message)),
        WidgetEmbed::Empty => String::new(),
    }
}

fn card_markup(card: &WidgetCard) -> String {
    let delete = match (card.deletable, card.widget_id) {
        (true, Some(id)) => format!("<button class=\"widget-delete\" data-widget-id=\"{id}\">Delete</button>"),
        (true, None) => "<button class=\"widget-delete\" data-legacy-url=\"true\">Delete</button>".to_owned(),
        (false, _) => String::new(),
    };
    format!(
        "<div class=\"widget\" data-key=\"{}\">{}{}</div>",
        escape_html(&card.key),
        embed_markup(&card.embed),
        delete
    )
}

fn tx_panel_markup(panel: &TxPanel) -> String {
    let mut html = format!(
        "<div class=\"tx-domain\">{}</div><div class=\"tx-owner\">Owner {}</div>",
        escape_html(&panel.domain_name),
        escape_html(&panel.record.owner.0)
    );
    if panel.record.expiration_time > 0 {
        html.push_str(&format!(
            "<div class=\"tx-expires\" data-expires=\"{}\"></div>",
            panel.record.expiration_time
        ));
    }
    if panel.loading {
        html.push_str("<div class=\"tx-link\">Loading...</div>");
    } else if let (Some(hash), Some(uri)) = (&panel.tx_hash, &panel.explorer_uri) {
        html.push_str(&format!(
            "<a class=\"tx-link\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
            escape_html(uri),
            escape_html(&hash.0)
        ));
    }
    html
}

fn prompt_text(prompt: WalletPrompt) -> &'static str {
    match prompt {
        WalletPrompt::Metamask => "Connect Metamask",
        WalletPrompt::WalletConnect => "Install Metamask or use WalletConnect",
    }
}

pub fn render(els: &Elements, view: &PageView) {
    dom::set_hidden(&els.widget_input_row, !view.show_input);
    els.widget_input.set_placeholder(&view.placeholder);
    els.widget_input.set_disabled(view.adding);
    if els.widget_input.value() != view.input_value {
        els.widget_input.set_value(&view.input_value);
    }

    let list: String = view.widgets.iter().map(card_markup).collect();
    dom::set_inner_html(&els.widget_list, &list);

    match &view.legacy_widget {
        Some(card) => dom::set_inner_html(&els.legacy_widget, &card_markup(card)),
        None => dom::set_inner_html(&els.legacy_widget, ""),
    }

    match &view.tx_panel {
        Some(panel) => dom::set_inner_html(&els.tx_panel, &tx_panel_markup(panel)),
        None => dom::set_inner_html(&els.tx_panel, ""),
    }

    match view.wallet_prompt {
        Some(prompt) => {
            dom::set_text(&els.wallet_prompt, prompt_text(prompt));
            dom::set_hidden(&els.wallet_prompt, false);
            dom::set_hidden(&els.connect_btn, prompt != WalletPrompt::Metamask);
        }
        None => {
            dom::set_hidden(&els.wallet_prompt, true);
            dom::set_hidden(&els.connect_btn, true);
        }
    }

    load_twitter_widgets();
}

/// `window.twttr.widgets.load()`, when widgets.js has loaded.
fn load_twitter_widgets() {
    let get = |target: &JsValue, key: &str| {
        js_sys::Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    };

    let Some(widgets) = get(dom::window().as_ref(), "twttr").and_then(|twttr| get(&twttr, "widgets")) else {
        return;
    };
    if let Some(load) = get(&widgets, "load").and_then(|load| load.dyn_into::<js_sys::Function>().ok()) {
        if let Err(err) = load.call0(&widgets) {
            gloo_console::warn!("twttr.widgets.load failed", err);
        }
    }
}
