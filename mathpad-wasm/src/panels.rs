use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use mathpad_core::panels::{
    ALGEBRA_NETWORK_TEXT, GEOMETRY_NETWORK_TEXT, QuadraticOutcome, circle_request,
    coefficients_request, labeled_value, rectangle_request,
};
use mathpad_core::service_error_text;
use mathpad_core::wire::{
    ApiResult, AreaResult, CircumferenceResult, LinearSolution, PerimeterResult, QuadraticReply,
};

use crate::api::post_json;
use crate::state::State;
use crate::utils::{input_value, log, set_text};

/// Fold a reply into result-span text: render the payload, show the service
/// error, or fall back to the panel's network-failure message.
fn reply_text<T>(
    reply: Result<ApiResult<T>, JsValue>,
    render: impl FnOnce(T) -> String,
    network_text: &str,
) -> String {
    match reply {
        Ok(ApiResult::Ok(payload)) => render(payload),
        Ok(ApiResult::Err(e)) => service_error_text(&e.error),
        Err(err) => {
            log(&format!("panel request failed: {err:?}"));
            network_text.to_string()
        }
    }
}

/// Wires up the six geometry/algebra form buttons.
pub fn attach_panels(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Rectangle area
    if let Some(btn) = doc.get_element_by_id("rectArea") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let length = input_value(&doc, "rectLength");
            let width = input_value(&doc, "rectWidth");
            match rectangle_request(&length, &width) {
                Err(msg) => set_text(&doc, "rectangleAreaResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let reply =
                            post_json::<_, AreaResult>(&win, "geometry/rectangle_area", &req)
                                .await;
                        let text = reply_text(
                            reply,
                            |r| labeled_value("Area", r.area),
                            GEOMETRY_NETWORK_TEXT,
                        );
                        set_text(&doc, "rectangleAreaResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Rectangle perimeter
    if let Some(btn) = doc.get_element_by_id("rectPerimeter") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let length = input_value(&doc, "rectLength");
            let width = input_value(&doc, "rectWidth");
            match rectangle_request(&length, &width) {
                Err(msg) => set_text(&doc, "rectanglePerimeterResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let reply = post_json::<_, PerimeterResult>(
                            &win,
                            "geometry/rectangle_perimeter",
                            &req,
                        )
                        .await;
                        let text = reply_text(
                            reply,
                            |r| labeled_value("Perimeter", r.perimeter),
                            GEOMETRY_NETWORK_TEXT,
                        );
                        set_text(&doc, "rectanglePerimeterResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Circle area
    if let Some(btn) = doc.get_element_by_id("circleArea") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let radius = input_value(&doc, "circleRadius");
            match circle_request(&radius) {
                Err(msg) => set_text(&doc, "circleAreaResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let reply =
                            post_json::<_, AreaResult>(&win, "geometry/circle_area", &req).await;
                        let text = reply_text(
                            reply,
                            |r| labeled_value("Area", r.area),
                            GEOMETRY_NETWORK_TEXT,
                        );
                        set_text(&doc, "circleAreaResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Circle circumference
    if let Some(btn) = doc.get_element_by_id("circleCircumference") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let radius = input_value(&doc, "circleRadius");
            match circle_request(&radius) {
                Err(msg) => set_text(&doc, "circleCircumferenceResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let reply = post_json::<_, CircumferenceResult>(
                            &win,
                            "geometry/circle_circumference",
                            &req,
                        )
                        .await;
                        let text = reply_text(
                            reply,
                            |r| labeled_value("Circumference", r.circumference),
                            GEOMETRY_NETWORK_TEXT,
                        );
                        set_text(&doc, "circleCircumferenceResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Linear equation: ax + b = c
    if let Some(btn) = doc.get_element_by_id("solveLinear") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let a = input_value(&doc, "linearA");
            let b = input_value(&doc, "linearB");
            let c = input_value(&doc, "linearC");
            match coefficients_request(&a, &b, &c) {
                Err(msg) => set_text(&doc, "linearEquationResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let reply =
                            post_json::<_, LinearSolution>(&win, "algebra/solve_linear", &req)
                                .await;
                        let text = reply_text(
                            reply,
                            |r| labeled_value("x", r.x),
                            ALGEBRA_NETWORK_TEXT,
                        );
                        set_text(&doc, "linearEquationResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Quadratic equation: ax^2 + bx + c = 0
    if let Some(btn) = doc.get_element_by_id("solveQuadratic") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let (doc, win) = {
                let s = st.borrow();
                (s.document.clone(), s.window.clone())
            };
            let a = input_value(&doc, "quadA");
            let b = input_value(&doc, "quadB");
            let c = input_value(&doc, "quadC");
            match coefficients_request(&a, &b, &c) {
                Err(msg) => set_text(&doc, "quadraticEquationResult", &msg),
                Ok(req) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let text = match post_json::<_, QuadraticReply>(
                            &win,
                            "algebra/solve_quadratic",
                            &req,
                        )
                        .await
                        {
                            Ok(reply) => QuadraticOutcome::from_reply(reply).text(),
                            Err(err) => {
                                log(&format!("panel request failed: {err:?}"));
                                ALGEBRA_NETWORK_TEXT.to_string()
                            }
                        };
                        set_text(&doc, "quadraticEquationResult", &text);
                    });
                }
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    Ok(())
}
