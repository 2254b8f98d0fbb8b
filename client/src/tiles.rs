use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::viewport::TileKey;

pub const TILE_CACHE_CAPACITY: usize = 256;
const ONLOAD_HANDLE_KEY: &str = "__imperilTileOnload";
const ONERROR_HANDLE_KEY: &str = "__imperilTileOnerror";

/// Expand `{s}`, `{z}`, `{x}` and `{y}` in a slippy-map URL template. The
/// subdomain rotates with the tile position so neighbours spread across hosts.
pub fn tile_url(template: &str, subdomains: &[&str], key: TileKey) -> String {
    let sub = if subdomains.is_empty() {
        ""
    } else {
        subdomains[(key.x as usize + key.y as usize) % subdomains.len()]
    };
    template
        .replace("{s}", sub)
        .replace("{z}", &key.z.to_string())
        .replace("{x}", &key.x.to_string())
        .replace("{y}", &key.y.to_string())
}

#[derive(Debug, Clone)]
enum TileEntry<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Bounded tile store. Oldest requests are evicted first; failed tiles stay
/// cached so they are not re-requested every frame.
#[derive(Debug)]
pub struct TileCache<T = HtmlImageElement> {
    entries: HashMap<TileKey, TileEntry<T>>,
    order: VecDeque<TileKey>,
    capacity: usize,
}

impl<T> TileCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: TileKey) -> Option<&T> {
        match self.entries.get(&key) {
            Some(TileEntry::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// Record a pending request. Returns false if the tile is already known.
    pub fn begin(&mut self, key: TileKey) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        while self.order.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.entries.insert(key, TileEntry::Loading);
        self.order.push_back(key);
        true
    }

    /// Store a loaded image. Ignored if the request was evicted meanwhile.
    pub fn finish(&mut self, key: TileKey, image: T) {
        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = TileEntry::Ready(image);
        }
    }

    pub fn fail(&mut self, key: TileKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = TileEntry::Failed;
        }
    }
}

/// Start loading `key` unless it is cached or in flight. `on_ready` runs
/// after the image has loaded.
pub fn request_tile(
    cache: &Rc<RefCell<TileCache>>,
    template: &str,
    subdomains: &[&str],
    key: TileKey,
    on_ready: Rc<dyn Fn()>,
) {
    if !cache.borrow_mut().begin(key) {
        return;
    }
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(_) => {
            cache.borrow_mut().fail(key);
            return;
        }
    };
    let src = tile_url(template, subdomains, key);

    let img_for_load = img.clone();
    let cache_load = cache.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        clear_image_handlers(&img_for_load);
        cache_load.borrow_mut().finish(key, img_for_load.clone());
        on_ready();
    });

    let img_for_error = img.clone();
    let cache_error = cache.clone();
    let src_for_error = src.clone();
    let onerror = Closure::<dyn FnMut()>::new(move || {
        clear_image_handlers(&img_for_error);
        cache_error.borrow_mut().fail(key);
        tracing::warn!(url = %src_for_error, "map tile failed to load");
    });

    let onload_js = onload.into_js_value();
    let onerror_js = onerror.into_js_value();
    img.set_onload(Some(onload_js.unchecked_ref()));
    img.set_onerror(Some(onerror_js.unchecked_ref()));
    let _ = Reflect::set(
        img.as_ref(),
        &JsValue::from_str(ONLOAD_HANDLE_KEY),
        &onload_js,
    );
    let _ = Reflect::set(
        img.as_ref(),
        &JsValue::from_str(ONERROR_HANDLE_KEY),
        &onerror_js,
    );
    img.set_src(&src);
}

fn clear_image_handlers(img: &HtmlImageElement) {
    img.set_onload(None);
    img.set_onerror(None);
    let _ = Reflect::delete_property(img.as_ref(), &JsValue::from_str(ONLOAD_HANDLE_KEY));
    let _ = Reflect::delete_property(img.as_ref(), &JsValue::from_str(ONERROR_HANDLE_KEY));
}
