use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub(crate) fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Set one inline style property, swallowing failures: a styling miss is a
/// visual glitch, not an error.
#[inline]
pub(crate) fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
pub(crate) fn clear_style(el: &web::HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

#[inline]
pub(crate) fn inner_width(window: &web::Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[inline]
pub(crate) fn inner_height(window: &web::Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// One-shot timer. The closure is leaked, as with every listener here.
pub(crate) fn set_timeout(window: &web::Window, delay_ms: i32, f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    );
    closure.forget();
}

/// Repeating timer that lives for the rest of the page's life.
pub(crate) fn set_interval(window: &web::Window, interval_ms: i32, f: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval_ms,
    );
    closure.forget();
}
