use std::collections::BTreeMap;

use foundation::time::Millis;
use runtime::throttle::Throttle;

use crate::UrlStateError;
use crate::param::{QueryParam, resolve};
use crate::query::QueryString;
use crate::store::QueryStore;

/// Typed access to a [`QueryStore`].
///
/// Reads come from an in-memory copy of the query that always holds the
/// latest values. Writes to throttled keys land in that copy immediately and
/// reach the store at most once per window; call [`UrlState::tick`] from a
/// timer so the trailing value is not lost.
///
/// A write the store refuses stays pending: `tick` and `flush` retry it.
#[derive(Debug)]
pub struct UrlState<S: QueryStore> {
    store: S,
    query: QueryString,
    throttles: BTreeMap<&'static str, Throttle<()>>,
    /// `query` holds values the store has not accepted yet.
    dirty: bool,
}

impl<S: QueryStore> UrlState<S> {
    pub fn load(store: S) -> Result<Self, UrlStateError> {
        let query = store.read()?;
        Ok(Self {
            store,
            query,
            throttles: BTreeMap::new(),
            dirty: false,
        })
    }

    /// Like [`UrlState::load`], but an unreadable store starts empty.
    pub fn new(store: S) -> Self {
        let query = store.read().unwrap_or_else(|err| {
            tracing::warn!(%err, "could not read query string, using defaults");
            QueryString::new()
        });
        Self {
            store,
            query,
            throttles: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn get<P: QueryParam>(&self) -> P::Value {
        resolve::<P>(self.query.get(P::KEY))
    }

    pub fn raw<P: QueryParam>(&self) -> Option<&str> {
        self.query.get(P::KEY)
    }

    /// Store `value` under `P::KEY`. Returns `true` if the store was written.
    pub fn set<P: QueryParam>(
        &mut self,
        value: &P::Value,
        now: Millis,
    ) -> Result<bool, UrlStateError> {
        self.query.set(P::KEY, P::serialize(value));
        self.dirty = true;

        let Some(window_ms) = P::THROTTLE_MS else {
            self.commit(now)?;
            return Ok(true);
        };

        let throttle = self
            .throttles
            .entry(P::KEY)
            .or_insert_with(|| Throttle::new(window_ms));
        if throttle.push((), now).is_some() {
            self.commit(now)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Commit throttled writes whose window has elapsed, and retry writes
    /// the store refused earlier.
    pub fn tick(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        let mut due = false;
        for throttle in self.throttles.values_mut() {
            due |= throttle.poll(now).is_some();
        }
        let retry = self.dirty && !self.throttles.values().any(Throttle::has_pending);
        if !(due || retry) {
            return Ok(false);
        }
        self.commit(now)?;
        Ok(true)
    }

    /// Commit everything still pending, ignoring windows.
    pub fn flush(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        if !self.has_pending() {
            return Ok(false);
        }
        self.commit(now)?;
        Ok(true)
    }

    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Earliest time a pending write becomes due. A refused write is due at once.
    pub fn next_due(&self) -> Option<Millis> {
        let throttled = self
            .throttles
            .values()
            .filter_map(Throttle::next_due)
            .min_by(|a, b| a.0.total_cmp(&b.0));
        match throttled {
            Some(due) => Some(due),
            None if self.dirty => Some(Millis::ZERO),
            None => None,
        }
    }

    /// Re-read the store, dropping pending writes (e.g. on back/forward navigation).
    pub fn reload(&mut self) -> Result<(), UrlStateError> {
        self.query = self.store.read()?;
        self.throttles.clear();
        self.dirty = false;
        Ok(())
    }

    pub fn query(&self) -> &QueryString {
        &self.query
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, now: Millis) -> Result<(), UrlStateError> {
        self.store.write(&self.query)?;
        // The whole query was written, so nothing stays pending.
        for throttle in self.throttles.values_mut() {
            let _ = throttle.flush(now);
        }
        self.dirty = false;
        Ok(())
    }
}
