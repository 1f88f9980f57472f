//! Browser capabilities the pages depend on.
//!
//! Pages never reach for globals: object URLs, the clipboard and downloads
//! are injected through these traits. The wasm crate implements them over
//! `web-sys`; [`memory`] provides in-memory versions for tests and headless
//! hosts.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    Browser(String),

    #[error("clipboard access denied")]
    ClipboardDenied,

    #[error("object URL {0} has been revoked")]
    Revoked(ObjectUrl),
}

/// A temporary handle to an in-memory blob (`blob:` URL in a browser).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object URL registry (`URL.createObjectURL` / `URL.revokeObjectURL`).
pub trait ObjectUrls {
    fn create(&self, bytes: &[u8], mime_type: &str) -> Result<ObjectUrl, CapabilityError>;
    fn revoke(&self, url: &ObjectUrl);
}

/// System clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Saves the blob behind an object URL under a file name.
pub trait Downloader {
    fn save(&self, url: &ObjectUrl, filename: &str) -> Result<(), CapabilityError>;
}

/// The capability set handed to a page.
#[derive(Clone)]
pub struct Capabilities {
    pub object_urls: Rc<dyn ObjectUrls>,
    pub clipboard: Rc<dyn Clipboard>,
    pub downloader: Rc<dyn Downloader>,
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

pub mod memory {
    //! In-memory capabilities. Clones share state, so a test can keep one
    //! handle and give another to the page.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::{Capabilities, CapabilityError, Clipboard, Downloader, ObjectUrl, ObjectUrls};

    #[derive(Debug, Default)]
    struct Registry {
        next_id: u64,
        live: HashMap<ObjectUrl, (Vec<u8>, String)>,
        revoked: usize,
    }

    #[derive(Debug, Clone, Default)]
    pub struct MemoryObjectUrls {
        registry: Rc<RefCell<Registry>>,
    }

    impl MemoryObjectUrls {
        /// Number of URLs created and not yet revoked.
        pub fn live_count(&self) -> usize {
            self.registry.borrow().live.len()
        }

        pub fn revoked_count(&self) -> usize {
            self.registry.borrow().revoked
        }

        pub fn is_live(&self, url: &ObjectUrl) -> bool {
            self.registry.borrow().live.contains_key(url)
        }

        /// Bytes and MIME type behind a live URL.
        pub fn resolve(&self, url: &ObjectUrl) -> Option<(Vec<u8>, String)> {
            self.registry.borrow().live.get(url).cloned()
        }
    }

    impl ObjectUrls for MemoryObjectUrls {
        fn create(&self, bytes: &[u8], mime_type: &str) -> Result<ObjectUrl, CapabilityError> {
            let mut registry = self.registry.borrow_mut();
            registry.next_id += 1;
            let url = ObjectUrl::new(format!("blob:memory/{}", registry.next_id));
            registry
                .live
                .insert(url.clone(), (bytes.to_vec(), mime_type.to_string()));
            Ok(url)
        }

        fn revoke(&self, url: &ObjectUrl) {
            let mut registry = self.registry.borrow_mut();
            if registry.live.remove(url).is_some() {
                registry.revoked += 1;
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct MemoryClipboard {
        history: Rc<RefCell<Vec<String>>>,
        denied: Rc<RefCell<bool>>,
    }

    impl MemoryClipboard {
        /// Text most recently written.
        pub fn text(&self) -> Option<String> {
            self.history.borrow().last().cloned()
        }

        pub fn history(&self) -> Vec<String> {
            self.history.borrow().clone()
        }

        /// Simulate a missing clipboard-write permission.
        pub fn set_denied(&self, denied: bool) {
            *self.denied.borrow_mut() = denied;
        }
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
            if *self.denied.borrow() {
                return Err(CapabilityError::ClipboardDenied);
            }
            self.history.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    /// Records downloads. When built with [`MemoryDownloader::backed_by`], saving
    /// a revoked URL fails the way a dead `blob:` link would.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryDownloader {
        saved: Rc<RefCell<Vec<(String, ObjectUrl)>>>,
        urls: Option<MemoryObjectUrls>,
    }

    impl MemoryDownloader {
        pub fn backed_by(urls: MemoryObjectUrls) -> Self {
            Self {
                saved: Rc::default(),
                urls: Some(urls),
            }
        }

        /// File names saved so far, in order.
        pub fn filenames(&self) -> Vec<String> {
            self.saved.borrow().iter().map(|(name, _)| name.clone()).collect()
        }

        pub fn saved(&self) -> Vec<(String, ObjectUrl)> {
            self.saved.borrow().clone()
        }
    }

    impl Downloader for MemoryDownloader {
        fn save(&self, url: &ObjectUrl, filename: &str) -> Result<(), CapabilityError> {
            if let Some(urls) = &self.urls {
                if !urls.is_live(url) {
                    return Err(CapabilityError::Revoked(url.clone()));
                }
            }
            self.saved
                .borrow_mut()
                .push((filename.to_string(), url.clone()));
            Ok(())
        }
    }

    /// Handles to a full in-memory capability set.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryCapabilities {
        pub object_urls: MemoryObjectUrls,
        pub clipboard: MemoryClipboard,
        pub downloader: MemoryDownloader,
    }

    impl MemoryCapabilities {
        pub fn new() -> Self {
            let object_urls = MemoryObjectUrls::default();
            Self {
                downloader: MemoryDownloader::backed_by(object_urls.clone()),
                object_urls,
                clipboard: MemoryClipboard::default(),
            }
        }

        /// Capability set sharing state with these handles.
        pub fn capabilities(&self) -> Capabilities {
            Capabilities {
                object_urls: Rc::new(self.object_urls.clone()),
                clipboard: Rc::new(self.clipboard.clone()),
                downloader: Rc::new(self.downloader.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::*;
    use super::*;

    #[test]
    fn test_object_urls_create_and_revoke() {
        let urls = MemoryObjectUrls::default();
        let a = urls.create(b"abc", "image/png").unwrap();
        let b = urls.create(b"def", "image/png").unwrap();
        assert_ne!(a, b);
        assert_eq!(urls.live_count(), 2);

        urls.revoke(&a);
        urls.revoke(&a);
        assert_eq!(urls.live_count(), 1);
        assert_eq!(urls.revoked_count(), 1);
        assert_eq!(urls.resolve(&b), Some((b"def".to_vec(), "image/png".to_string())));
    }

    #[test]
    fn test_clones_share_state() {
        let clipboard = MemoryClipboard::default();
        let handle = clipboard.clone();
        clipboard.write_text("#ffffff").unwrap();
        assert_eq!(handle.text().as_deref(), Some("#ffffff"));

        handle.set_denied(true);
        assert_eq!(
            clipboard.write_text("x"),
            Err(CapabilityError::ClipboardDenied)
        );
    }

    #[test]
    fn test_downloader_rejects_revoked_urls() {
        let memory = MemoryCapabilities::new();
        let caps = memory.capabilities();
        let url = caps.object_urls.create(b"png", "image/png").unwrap();

        caps.downloader.save(&url, "a.png").unwrap();
        caps.object_urls.revoke(&url);
        assert_eq!(
            caps.downloader.save(&url, "b.png"),
            Err(CapabilityError::Revoked(url.clone()))
        );
        assert_eq!(memory.downloader.filenames(), vec!["a.png"]);
    }
}
