use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// CSS margin applied to the viewport before intersecting, e.g. `"0px 0px -80px 0px"`.
    pub root_margin: String,
    /// Visible fraction of the element required to count as seen.
    pub threshold: f64,
}

/// One visibility change reported for an observed element.
pub struct Sighting {
    pub element: Element,
    pub ratio: f64,
    pub intersecting: bool,
}

impl Sighting {
    pub fn meets(&self, threshold: f64) -> bool {
        qualifies(self.intersecting, self.ratio, threshold)
    }
}

pub fn qualifies(intersecting: bool, ratio: f64, threshold: f64) -> bool {
    intersecting && ratio >= threshold
}

/// Lets a callback stop watching the element it was just told about.
pub struct Watch<'a> {
    observer: &'a IntersectionObserver,
}

impl Watch<'_> {
    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

/// Owns one `IntersectionObserver` and the closure it calls back into.
///
/// Dropping the notifier disconnects the observer, so every element it was
/// watching is released at once.
pub struct VisibilityNotifier {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityNotifier {
    pub fn new<F>(options: &VisibilityOptions, mut on_sighting: F) -> Result<Self, JsValue>
    where
        F: FnMut(Sighting, &Watch<'_>) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let watch = Watch { observer: &observer };
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    on_sighting(
                        Sighting {
                            element: entry.target(),
                            ratio: entry.intersection_ratio(),
                            intersecting: entry.is_intersecting(),
                        },
                        &watch,
                    );
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for VisibilityNotifier {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_both_intersection_and_ratio() {
        assert!(qualifies(true, 0.08, 0.08));
        assert!(qualifies(true, 1.0, 0.3));
        assert!(!qualifies(true, 0.05, 0.08));
        assert!(!qualifies(false, 0.5, 0.08));
    }
}
