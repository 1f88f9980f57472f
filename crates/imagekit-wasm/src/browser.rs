//! Browser implementations of the core capabilities.
//!
//! Everything here calls into `web-sys` and only works on
//! `wasm32-unknown-unknown` inside a window context.

use std::rc::Rc;

use imagekit_core::capability::{
    Capabilities, CapabilityError, Clipboard, Downloader, ObjectUrl, ObjectUrls,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

fn browser_error(value: JsValue) -> CapabilityError {
    CapabilityError::Browser(format!("{value:?}"))
}

fn window() -> Result<web_sys::Window, CapabilityError> {
    web_sys::window().ok_or_else(|| CapabilityError::Browser("no global window".into()))
}

/// `URL.createObjectURL` over a `Blob` of the given bytes.
#[derive(Debug, Default)]
pub struct BrowserObjectUrls;

impl ObjectUrls for BrowserObjectUrls {
    fn create(&self, bytes: &[u8], mime_type: &str) -> Result<ObjectUrl, CapabilityError> {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(browser_error)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_error)?;
        Ok(ObjectUrl::new(url))
    }

    fn revoke(&self, url: &ObjectUrl) {
        if let Err(err) = web_sys::Url::revoke_object_url(url.as_str()) {
            log::warn!("failed to revoke {url}: {err:?}");
        }
    }
}

/// `navigator.clipboard.writeText`.
///
/// The write promise settles after this returns; a rejection (usually a
/// missing permission) is logged.
#[derive(Debug, Default)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let clipboard = window()?.navigator().clipboard();
        let promise = clipboard.write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::error!("clipboard write rejected: {err:?}");
            }
        });
        Ok(())
    }
}

/// Clicks a temporary `<a download>` pointing at the object URL.
///
/// The URL is not revoked here; the page that created it owns it.
#[derive(Debug, Default)]
pub struct BrowserDownloader;

impl Downloader for BrowserDownloader {
    fn save(&self, url: &ObjectUrl, filename: &str) -> Result<(), CapabilityError> {
        let document = window()?
            .document()
            .ok_or_else(|| CapabilityError::Browser("no document".into()))?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(browser_error)?
            .dyn_into()
            .map_err(|e| CapabilityError::Browser(format!("failed to cast element: {e:?}")))?;
        anchor.set_href(url.as_str());
        anchor.set_download(filename);

        let body = document
            .body()
            .ok_or_else(|| CapabilityError::Browser("no document body".into()))?;
        body.append_child(&anchor).map_err(browser_error)?;
        anchor.click();
        // The download has started; a failed cleanup is not a failed download.
        let _ = body.remove_child(&anchor);
        Ok(())
    }
}

/// The capability set backed by the current window.
pub fn browser_capabilities() -> Capabilities {
    Capabilities {
        object_urls: Rc::new(BrowserObjectUrls),
        clipboard: Rc::new(BrowserClipboard),
        downloader: Rc::new(BrowserDownloader),
    }
}
