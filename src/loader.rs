//! Fire-and-forget asset loading. Completions insert into the catalog; failures are
//! logged and otherwise dropped (no retry, no timeout).

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlImageElement, Response};

use crate::catalog::{AssetEntry, AssetTemplate};
use crate::error::LoadError;
use crate::model::AssetKind;

pub type OnComplete = Box<dyn FnOnce(AssetTemplate)>;

pub trait AssetLoader {
    fn load(&self, entry: &AssetEntry, on_complete: OnComplete);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebAssetLoader;

impl AssetLoader for WebAssetLoader {
    fn load(&self, entry: &AssetEntry, on_complete: OnComplete) {
        let started = match entry.kind {
            AssetKind::Image => load_image(entry, on_complete),
            AssetKind::Model => load_model(entry, on_complete),
        };
        if let Err(err) = started {
            log::warn!("{err}");
        }
    }
}

fn load_image(entry: &AssetEntry, on_complete: OnComplete) -> Result<(), LoadError> {
    let img = HtmlImageElement::new().map_err(|e| LoadError::Request {
        url: entry.url.clone(),
        reason: format!("{e:?}"),
    })?;
    let onload = {
        let img = img.clone();
        let entry = entry.clone();
        Closure::once_into_js(move || {
            let template = AssetTemplate::image(&entry, img.natural_width(), img.natural_height());
            log::info!("Loaded image: {}", entry.id);
            on_complete(template);
        })
    };
    let onerror = {
        let url = entry.url.clone();
        Closure::once_into_js(move || {
            log::warn!("{}", LoadError::Image { url });
        })
    };
    img.set_onload(Some(onload.unchecked_ref()));
    img.set_onerror(Some(onerror.unchecked_ref()));
    img.set_src(&entry.url);
    Ok(())
}

fn load_model(entry: &AssetEntry, on_complete: OnComplete) -> Result<(), LoadError> {
    let window = web_sys::window().ok_or(LoadError::NoWindow)?;
    let promise: js_sys::Promise = window.fetch_with_str(&entry.url);
    let resolved = {
        let entry = entry.clone();
        Closure::once(move |value: JsValue| match value.dyn_into::<Response>() {
            Ok(resp) if resp.ok() => {
                log::info!("Loaded model: {}", entry.id);
                on_complete(AssetTemplate::model(&entry));
            }
            Ok(resp) => log::warn!(
                "{}",
                LoadError::Status {
                    url: entry.url.clone(),
                    status: resp.status(),
                }
            ),
            Err(other) => log::warn!(
                "{}",
                LoadError::Request {
                    url: entry.url.clone(),
                    reason: format!("{other:?}"),
                }
            ),
        })
    };
    let rejected = {
        let url = entry.url.clone();
        Closure::once(move |reason: JsValue| {
            log::warn!(
                "{}",
                LoadError::Request {
                    url,
                    reason: format!("{reason:?}"),
                }
            );
        })
    };
    let _ = promise.then2(&resolved, &rejected);
    // only one of the two ever runs; both stay alive for the page lifetime
    resolved.forget();
    rejected.forget();
    Ok(())
}
