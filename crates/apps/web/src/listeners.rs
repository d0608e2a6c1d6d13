//! Window listeners live as long as the page, while dashboards come and go
//! with each mount. Track which ones are registered so a remount adds none.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct PageListeners {
    popstate: Cell<bool>,
}

impl PageListeners {
    pub const fn new() -> Self {
        Self {
            popstate: Cell::new(false),
        }
    }

    pub fn has_popstate(&self) -> bool {
        self.popstate.get()
    }

    /// Run `bind` unless a popstate listener is already registered. Returns
    /// whether it ran; a failed `bind` leaves the slot free.
    pub fn bind_popstate<E>(&self, bind: impl FnOnce() -> Result<(), E>) -> Result<bool, E> {
        if self.popstate.get() {
            return Ok(false);
        }
        bind()?;
        self.popstate.set(true);
        Ok(true)
    }
}
