//! Warm the browser cache for the hero imagery before it scrolls into view.

use web_sys as web;

const HERO_IMAGE_URLS: [&str; 1] = [
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?ixlib=rb-4.0.3&auto=format&fit=crop&w=1000&q=80",
];

pub(crate) fn preload_hero_images() {
    for url in HERO_IMAGE_URLS {
        match web::HtmlImageElement::new() {
            Ok(img) => img.set_src(url),
            Err(e) => log::warn!("image preload failed: {e:?}"),
        }
    }
}
