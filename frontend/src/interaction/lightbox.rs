use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Element, HtmlImageElement};

use crate::interaction::scroll_lock::ScrollLock;

pub const DISMISS_KEY: &str = "Escape";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveImage {
    pub src: String,
    pub alt: String,
}

impl ActiveImage {
    pub fn from_element(image: &HtmlImageElement) -> Self {
        Self {
            src: image.src(),
            alt: image.alt(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open,
}

/// A deferred clear handed out by `close`. It only applies if nothing was
/// opened in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingClear {
    generation: u64,
}

/// Lightbox state without any DOM attached.
///
/// Every `open` bumps the generation, which voids clears scheduled by earlier closes.
#[derive(Debug)]
pub struct Lightbox {
    state: LightboxState,
    active_image: Option<ActiveImage>,
    generation: u64,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lightbox {
    pub fn new() -> Self {
        Self {
            state: LightboxState::Closed,
            active_image: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state() == LightboxState::Open
    }

    /// Escape dismisses an open lightbox and means nothing otherwise.
    pub fn dismisses_on(&self, key: &str) -> bool {
        key == DISMISS_KEY && self.is_open()
    }

    pub fn active_image(&self) -> Option<&ActiveImage> {
        self.active_image.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn open(&mut self, image: ActiveImage) {
        self.generation += 1;
        self.state = LightboxState::Open;
        self.active_image = Some(image);
    }

    /// Returns `None` when already closed.
    pub fn close(&mut self) -> Option<PendingClear> {
        if self.state != LightboxState::Open {
            return None;
        }
        self.state = LightboxState::Closed;
        Some(PendingClear {
            generation: self.generation,
        })
    }

    /// Drops the stale image if `pending` is still current. Returns whether it did.
    pub fn clear(&mut self, pending: PendingClear) -> bool {
        if self.state == LightboxState::Closed && pending.generation == self.generation {
            self.active_image = None;
            true
        } else {
            false
        }
    }
}

struct LightboxInner {
    lightbox: RefCell<Lightbox>,
    overlay: Element,
    image: HtmlImageElement,
    scroll_lock: RefCell<ScrollLock>,
    pending_clear: RefCell<Option<Timeout>>,
    clear_delay_ms: u32,
}

/// Modal image viewer bound to the page's `#lightbox` overlay.
#[derive(Clone)]
pub struct LightboxController {
    inner: Rc<LightboxInner>,
}

impl LightboxController {
    pub fn attach(
        overlay: Element,
        image: HtmlImageElement,
        scroll_lock: ScrollLock,
        clear_delay_ms: u32,
    ) -> Self {
        Self {
            inner: Rc::new(LightboxInner {
                lightbox: RefCell::new(Lightbox::new()),
                overlay,
                image,
                scroll_lock: RefCell::new(scroll_lock),
                pending_clear: RefCell::new(None),
                clear_delay_ms,
            }),
        }
    }

    /// Closes the lightbox if `key` dismisses it.
    pub fn handle_key(&self, key: &str) {
        let dismiss = self.inner.lightbox.borrow().dismisses_on(key);
        if dismiss {
            self.close();
        }
    }

    pub fn open(&self, image: ActiveImage) {
        let inner = &self.inner;
        // dropping the timeout cancels it
        inner.pending_clear.borrow_mut().take();

        inner.image.set_src(&image.src);
        inner.image.set_alt(&image.alt);
        let generation = {
            let mut lightbox = inner.lightbox.borrow_mut();
            lightbox.open(image);
            lightbox.generation()
        };
        debug!("lightbox opened (generation {})", generation);

        let _ = inner.overlay.class_list().add_1("open");
        let _ = inner.overlay.set_attribute("aria-hidden", "false");
        inner.scroll_lock.borrow_mut().lock();
    }

    pub fn close(&self) {
        let inner = &self.inner;
        let Some(pending) = inner.lightbox.borrow_mut().close() else {
            return;
        };

        let _ = inner.overlay.class_list().remove_1("open");
        let _ = inner.overlay.set_attribute("aria-hidden", "true");
        inner.scroll_lock.borrow_mut().unlock();

        // keep the image until the fade-out is over
        let weak: Weak<LightboxInner> = Rc::downgrade(inner);
        let timeout = Timeout::new(inner.clear_delay_ms, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.lightbox.borrow_mut().clear(pending) {
                inner.image.set_src("");
            } else {
                debug!("skipping stale lightbox clear");
            }
        });
        *inner.pending_clear.borrow_mut() = Some(timeout);
    }
}
