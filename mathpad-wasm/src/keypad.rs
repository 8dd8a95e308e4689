use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use mathpad_core::wire::{ApiResult, CalculateRequest, CalculationResult};
use mathpad_core::{EqualsPress, NETWORK_ISSUE_TEXT, Operator, OperatorPress, service_error_text};

use crate::api::post_json;
use crate::state::State;
use crate::utils::log;

/// How an in-flight calculation folds back into the session once the
/// service answers.
enum Completion {
    /// Equals-triggered: the result seeds the next operation.
    Final,
    /// Operator-triggered chain: the result becomes the pending operand and
    /// this operator becomes the pending one.
    Chain(Operator),
}

/// Wires up the calculator keypad: digit keys (`data-digit`), operator keys
/// (`data-operator`), `#equals` and `#clearDisplay`.
pub fn attach_keypad(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Digit and decimal-point keys carry their character in data-digit.
    let keys = doc.query_selector_all("[data-digit]")?;
    for i in 0..keys.length() {
        let Some(node) = keys.item(i) else { continue };
        let el: HtmlElement = node.dyn_into()?;
        let Some(value) = el.dataset().get("digit") else {
            continue;
        };
        let Some(ch) = value.chars().next() else {
            continue;
        };
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            let text = s.session.push_char(ch);
            s.display.set_value(&text);
        }));
        el.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Operator keys carry their wire symbol in data-operator.
    let keys = doc.query_selector_all("[data-operator]")?;
    for i in 0..keys.length() {
        let Some(node) = keys.item(i) else { continue };
        let el: HtmlElement = node.dyn_into()?;
        let Some(symbol) = el.dataset().get("operator") else {
            continue;
        };
        let Some(op) = Operator::from_symbol(&symbol) else {
            log(&format!("unknown operator key: {symbol}"));
            continue;
        };
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            handle_operator(st.clone(), op);
        }));
        el.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(btn) = doc.get_element_by_id("equals") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            handle_equals(st.clone());
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(btn) = doc.get_element_by_id("clearDisplay") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            // Invalidate any response still in flight.
            s.gate.reset();
            let text = s.session.clear();
            s.display.set_value(&text);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    Ok(())
}

fn handle_operator(state: Rc<RefCell<State>>, op: Operator) {
    let press = {
        let mut s = state.borrow_mut();
        if s.gate.busy() {
            return;
        }
        s.session.press_operator(op)
    };
    match press {
        OperatorPress::Ignored => {}
        OperatorPress::Replaced { display } | OperatorPress::Committed { display } => {
            state.borrow().display.set_value(&display);
        }
        OperatorPress::Chained { request } => {
            submit(state, request, Completion::Chain(op));
        }
    }
}

fn handle_equals(state: Rc<RefCell<State>>) {
    let press = {
        let s = state.borrow();
        if s.gate.busy() {
            return;
        }
        s.session.press_equals()
    };
    match press {
        EqualsPress::Incomplete { display } => {
            state.borrow().display.set_value(&display);
        }
        EqualsPress::Submit { request } => {
            submit(state, request, Completion::Final);
        }
    }
}

fn submit(state: Rc<RefCell<State>>, request: CalculateRequest, completion: Completion) {
    let (window, ticket) = {
        let mut s = state.borrow_mut();
        let Some(ticket) = s.gate.begin() else {
            return;
        };
        (s.window.clone(), ticket)
    };
    wasm_bindgen_futures::spawn_local(async move {
        let reply = post_json::<_, CalculationResult>(&window, "calculate", &request).await;
        let mut s = state.borrow_mut();
        if !s.gate.settle(ticket) {
            // Cleared while the request was in flight.
            return;
        }
        let text = match reply {
            Ok(ApiResult::Ok(r)) => match completion {
                Completion::Final => s.session.finish_final(r.result),
                Completion::Chain(next) => s.session.finish_chain(r.result, next),
            },
            Ok(ApiResult::Err(e)) => s.session.fail(service_error_text(&e.error)),
            Err(err) => {
                log(&format!("calculate request failed: {err:?}"));
                s.session.fail(NETWORK_ISSUE_TEXT.to_string())
            }
        };
        s.display.set_value(&text);
    });
}
