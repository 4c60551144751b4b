//! Toast notifications rendered into `#toasts`.

use crate::dom::{self, escape_html};
use dc_chain_client::{NotificationSink, ToastId, ToastKind, ToastUpdate};
use gloo_timers::callback::Timeout;
use std::cell::Cell;
use web_sys::Element;

pub struct DomToasts {
    container: Element,
    next_id: Cell<ToastId>,
}

impl DomToasts {
    pub fn new(container: Element) -> Self {
        Self {
            container,
            next_id: Cell::new(0),
        }
    }

    fn element(&self, id: ToastId) -> Option<Element> {
        self.container
            .query_selector(&format!("[data-toast-id=\"{id}\"]"))
            .ok()
            .flatten()
    }
}

fn kind_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Loading => "toast-loading",
        ToastKind::Success => "toast-success",
        ToastKind::Error => "toast-error",
    }
}

fn toast_markup(update: &ToastUpdate) -> String {
    let mut html = format!("<span>{}</span>", escape_html(&update.message));
    if let Some(link) = &update.link {
        html.push_str(&format!(
            " <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
            escape_html(&link.href),
            escape_html(&link.label)
        ));
    }
    html
}

impl NotificationSink for DomToasts {
    fn loading(&self, message: &str) -> ToastId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        match dom::create_element("div") {
            Ok(el) => {
                let _ = el.set_attribute("data-toast-id", &id.to_string());
                dom::add_class(&el, "toast");
                dom::add_class(&el, kind_class(ToastKind::Loading));
                dom::set_text(&el, message);
                let _ = self.container.append_child(&el);
            }
            Err(err) => gloo_console::error!("toast create failed", err),
        }
        id
    }

    fn update(&self, id: ToastId, update: ToastUpdate) {
        let Some(el) = self.element(id) else {
            return;
        };
        dom::remove_class(&el, kind_class(ToastKind::Loading));
        dom::add_class(&el, kind_class(update.kind));
        dom::set_inner_html(&el, &toast_markup(&update));

        if let Some(ms) = update.auto_close_ms {
            Timeout::new(ms, move || el.remove()).forget();
        }
    }
}
