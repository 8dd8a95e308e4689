use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, HtmlInputElement, Window};

use mathpad_core::{RequestGate, Session};

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
#[derive(Clone)]
pub struct State {
    pub window: Window,
    pub document: Document,
    pub display: HtmlInputElement,
    pub session: Session,
    /// Serializes calculation requests and discards replies that land
    /// after a clear.
    pub gate: RequestGate,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
