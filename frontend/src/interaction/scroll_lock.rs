use log::debug;
use web_sys::{Document, HtmlElement};

/// Suppresses page scrolling while a modal is up.
///
/// Only the lightbox holds one. A lock still engaged when it is dropped is
/// released, so leaving the page never strands the body unscrollable.
pub struct ScrollLock {
    body: Option<HtmlElement>,
    locked: bool,
}

impl ScrollLock {
    pub fn new(document: &Document) -> Self {
        Self {
            body: document.body(),
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        if let Some(body) = &self.body {
            let _ = body.style().set_property("overflow", "hidden");
        }
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        if let Some(body) = &self.body {
            let _ = body.style().remove_property("overflow");
        }
        self.locked = false;
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        if self.is_locked() {
            debug!("releasing scroll lock on teardown");
            self.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached() -> ScrollLock {
        ScrollLock {
            body: None,
            locked: false,
        }
    }

    #[test]
    fn lock_and_unlock_are_idempotent() {
        let mut lock = detached();
        lock.lock();
        lock.lock();
        assert!(lock.is_locked());
        lock.unlock();
        assert!(!lock.is_locked());
        lock.unlock();
        assert!(!lock.is_locked());
    }
}
