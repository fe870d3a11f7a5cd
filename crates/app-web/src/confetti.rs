//! Confetti burst rendered as short-lived glyph elements.

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

const PIECE_COUNT: usize = 20;
const SHAPES: [&str; 8] = ["●", "■", "▲", "♦", "★", "♪", "♫", "♬"];
const COLORS: [&str; 7] = [
    "#FFD700", "#FF6B6B", "#4ECDC4", "#45B7D1", "#FF6B35", "#7B68EE", "#32CD32",
];

fn pick<'a>(options: &[&'a str]) -> &'a str {
    let index = (js_sys::Math::random() * options.len() as f64) as usize;
    options[index.min(options.len() - 1)]
}

/// Scatter a burst of particles from a note's screen center. Purely
/// decorative; element failures are skipped.
pub(crate) fn burst(document: &web::Document, x: f64, y: f64) {
    let Some(body) = document.body() else {
        return;
    };
    let Some(window) = web::window() else {
        return;
    };

    for i in 0..PIECE_COUNT {
        let Some(el) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        el.set_class_name(&format!("confetti confetti-{}", i % 5 + 1));
        let color = pick(&COLORS);
        el.set_text_content(Some(pick(&SHAPES)));

        dom::set_style(&el, "color", color);
        dom::set_style(&el, "position", "fixed");
        dom::set_style(&el, "left", &format!("{:.0}px", x - 10.0));
        dom::set_style(&el, "top", &format!("{:.0}px", y - 10.0));
        dom::set_style(&el, "text-shadow", &format!("0 0 20px {color}"));
        dom::set_style(
            &el,
            "font-size",
            &format!("{:.2}rem", 1.5 + js_sys::Math::random()),
        );
        dom::set_style(&el, "z-index", "99999");
        dom::set_style(&el, "font-weight", "bold");
        dom::set_style(&el, "pointer-events", "none");
        dom::set_style(&el, "opacity", "1");

        // Fan the pieces out, with a little angular jitter per slot
        let angle =
            (i as f64 / 12.0) * std::f64::consts::TAU + (js_sys::Math::random() - 0.5) * 0.5;
        let distance = 40.0 + js_sys::Math::random() * 60.0;
        dom::set_style(&el, "--deltaX", &format!("{:.1}px", angle.cos() * distance));
        dom::set_style(&el, "--deltaY", &format!("{:.1}px", angle.sin() * distance));

        let _ = body.append_child(&el);

        // Staggered cleanup once the fall animation has played out
        let lifetime_ms = 2000.0 + js_sys::Math::random() * 500.0;
        let el = el.clone();
        dom::set_timeout(&window, lifetime_ms as i32, move || el.remove());
    }
}
