use crate::UrlStateError;
use crate::query::QueryString;

/// Where the query string lives: the browser location, or memory.
pub trait QueryStore {
    fn read(&self) -> Result<QueryString, UrlStateError>;
    fn write(&mut self, query: &QueryString) -> Result<(), UrlStateError>;
}

#[derive(Debug, Default)]
pub struct InMemoryQueryStore {
    query: QueryString,
    writes: usize,
}

impl InMemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a URL search string, as a fresh page load would.
    pub fn from_search(search: &str) -> Self {
        Self {
            query: QueryString::parse(search),
            writes: 0,
        }
    }

    /// Current `?`-prefixed search string.
    pub fn search(&self) -> String {
        self.query.to_search()
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl QueryStore for InMemoryQueryStore {
    fn read(&self) -> Result<QueryString, UrlStateError> {
        Ok(self.query.clone())
    }

    fn write(&mut self, query: &QueryString) -> Result<(), UrlStateError> {
        self.query = query.clone();
        self.writes += 1;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_location {
    use super::QueryStore;
    use crate::UrlStateError;
    use crate::query::QueryString;
    use wasm_bindgen::JsValue;

    /// `window.location.search`, rewritten with `history.replaceState` so
    /// map moves don't pile up history entries.
    #[derive(Debug)]
    pub struct LocationQueryStore {
        window: web_sys::Window,
    }

    impl LocationQueryStore {
        pub fn new() -> Result<Self, UrlStateError> {
            let window = web_sys::window().ok_or(UrlStateError::Unavailable)?;
            Ok(Self { window })
        }
    }

    impl QueryStore for LocationQueryStore {
        fn read(&self) -> Result<QueryString, UrlStateError> {
            let search = self
                .window
                .location()
                .search()
                .map_err(|e| UrlStateError::Io(format!("location.search failed: {:?}", e)))?;
            Ok(QueryString::parse(&search))
        }

        fn write(&mut self, query: &QueryString) -> Result<(), UrlStateError> {
            let location = self.window.location();
            let path = location
                .pathname()
                .map_err(|e| UrlStateError::Io(format!("location.pathname failed: {:?}", e)))?;
            let hash = location.hash().unwrap_or_default();
            let url = format!("{path}{}{hash}", query.to_search());

            let history = self
                .window
                .history()
                .map_err(|e| UrlStateError::Io(format!("history unavailable: {:?}", e)))?;
            history
                .replace_state_with_url(&JsValue::NULL, "", Some(&url))
                .map_err(|e| UrlStateError::Io(format!("replaceState failed: {:?}", e)))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_location::LocationQueryStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocationQueryStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocationQueryStore {
    pub fn new() -> Result<Self, UrlStateError> {
        Err(UrlStateError::Unavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl QueryStore for LocationQueryStore {
    fn read(&self) -> Result<QueryString, UrlStateError> {
        Err(UrlStateError::Unavailable)
    }

    fn write(&mut self, _query: &QueryString) -> Result<(), UrlStateError> {
        Err(UrlStateError::Unavailable)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{InMemoryQueryStore, QueryStore};
    use crate::UrlStateError;
    use crate::query::QueryString;

    /// Refuses the first `failures` writes, then behaves like memory.
    #[derive(Debug, Default)]
    pub struct FailingQueryStore {
        inner: InMemoryQueryStore,
        failures: usize,
    }

    impl FailingQueryStore {
        pub fn failing(failures: usize) -> Self {
            Self {
                inner: InMemoryQueryStore::new(),
                failures,
            }
        }

        pub fn inner(&self) -> &InMemoryQueryStore {
            &self.inner
        }
    }

    impl QueryStore for FailingQueryStore {
        fn read(&self) -> Result<QueryString, UrlStateError> {
            self.inner.read()
        }

        fn write(&mut self, query: &QueryString) -> Result<(), UrlStateError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(UrlStateError::Io("replaceState failed".into()));
            }
            self.inner.write(query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_counts_writes() {
        let mut store = InMemoryQueryStore::from_search("?basemap=dark");
        assert_eq!(store.read().unwrap().get("basemap"), Some("dark"));

        let mut q = store.read().unwrap();
        q.set("labels", "light");
        store.write(&q).unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.search(), "?basemap=dark&labels=light");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn location_store_is_unavailable_natively() {
        assert_eq!(
            LocationQueryStore::new().unwrap_err(),
            UrlStateError::Unavailable
        );
    }
}
