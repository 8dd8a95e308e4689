use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;

mod api;
mod keypad;
mod panels;
mod state;
mod utils;

use crate::state::{STATE, State};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let display = document
        .get_element_by_id("display")
        .ok_or_else(|| JsValue::from_str("display input #display not found"))?
        .dyn_into::<HtmlInputElement>()?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        display,
        session: mathpad_core::Session::new(),
        gate: mathpad_core::RequestGate::new(),
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    keypad::attach_keypad(state.clone())?;
    panels::attach_panels(state.clone())?;

    // Fresh session shows 0.
    let text = state.borrow_mut().session.clear();
    state.borrow().display.set_value(&text);
    Ok(())
}
