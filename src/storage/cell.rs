//! The storage-cell abstraction.
//!
//! The engine talks to storage through [`ConsentStorage`], so the same core
//! runs against a real browser cookie jar (a WASM host implements the trait
//! over `document.cookie`), the in-memory jar below, or no storage at all.
//! Server-side rendering and other headless contexts use
//! [`HeadlessStorage`]: every read answers `None` and every write or remove
//! is a safe no-op, never an error.

use std::collections::BTreeMap;

use cookie::Cookie;

/// One logical cookie jar holding the consent cell.
pub trait ConsentStorage {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Store the cell. The cookie's name is the storage key and its
    /// attributes (path, domain, Max-Age, SameSite, Secure) travel with it.
    fn write(&mut self, cookie: Cookie<'static>);

    /// Delete the cell at `key` for the given path/domain scope.
    fn remove(&mut self, key: &str, path: &str, domain: Option<&str>);
}

/// In-memory jar for tests and non-browser hosts that still want
/// persistence within a process.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cells: BTreeMap<String, Cookie<'static>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The stored cookie under `key`, attributes included.
    pub fn cookie(&self, key: &str) -> Option<&Cookie<'static>> {
        self.cells.get(key)
    }
}

impl ConsentStorage for MemoryCookieJar {
    fn read(&self, key: &str) -> Option<String> {
        self.cells.get(key).map(|c| c.value().to_string())
    }

    fn write(&mut self, cookie: Cookie<'static>) {
        self.cells.insert(cookie.name().to_string(), cookie);
    }

    fn remove(&mut self, key: &str, _path: &str, _domain: Option<&str>) {
        self.cells.remove(key);
    }
}

// Shared handle so a host (or test) can keep inspecting a jar it handed to
// the engine.
impl<T: ConsentStorage> ConsentStorage for std::rc::Rc<std::cell::RefCell<T>> {
    fn read(&self, key: &str) -> Option<String> {
        self.borrow().read(key)
    }

    fn write(&mut self, cookie: Cookie<'static>) {
        self.borrow_mut().write(cookie);
    }

    fn remove(&mut self, key: &str, path: &str, domain: Option<&str>) {
        self.borrow_mut().remove(key, path, domain);
    }
}

/// No browser context: reads answer `None`, writes and removes do nothing.
#[derive(Debug, Default)]
pub struct HeadlessStorage;

impl ConsentStorage for HeadlessStorage {
    fn read(&self, key: &str) -> Option<String> {
        tracing::debug!(key = %key, "no storage context; consent read answers None");
        None
    }

    fn write(&mut self, cookie: Cookie<'static>) {
        tracing::debug!(key = %cookie.name(), "no storage context; consent write skipped");
    }

    fn remove(&mut self, key: &str, _path: &str, _domain: Option<&str>) {
        tracing::debug!(key = %key, "no storage context; consent remove skipped");
    }
}
