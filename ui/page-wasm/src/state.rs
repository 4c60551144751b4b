//! Global page state.
//!
//! The widget module sits in a `thread_local!` (WASM is single-threaded) and
//! is handed to event handlers as an `Rc`.

use crate::api::HttpRegistry;
use crate::toast::DomToasts;
use crate::wallet::InjectedWallet;
use dc_page_core::WidgetModule;
use std::cell::RefCell;
use std::rc::Rc;

pub type PageModule = WidgetModule<HttpRegistry, InjectedWallet, DomToasts>;

thread_local! {
    static MODULE: RefCell<Option<Rc<PageModule>>> = const { RefCell::new(None) };
}

pub fn set_module(module: PageModule) -> Rc<PageModule> {
    let module = Rc::new(module);
    MODULE.with(|slot| slot.replace(Some(module.clone())));
    module
}

pub fn module() -> Option<Rc<PageModule>> {
    MODULE.with(|slot| slot.borrow().clone())
}
