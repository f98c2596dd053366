use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::config::EngineConfig;
use crate::interaction::visibility::{VisibilityNotifier, VisibilityOptions};

const INDEX_ATTRIBUTE: &str = "data-reveal-index";

/// Remembers which tiles have been revealed. A tile reveals at most once.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(tiles: usize) -> Self {
        Self {
            revealed: vec![false; tiles],
        }
    }

    /// Returns true only the first time `index` is revealed.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}

pub fn stagger_bucket(index: usize, config: &EngineConfig) -> usize {
    index % config.reveal_stagger_buckets.max(1)
}

pub fn stagger_delay_secs(index: usize, config: &EngineConfig) -> f64 {
    stagger_bucket(index, config) as f64 * config.reveal_stagger_step_secs
}

/// Fades gallery tiles in the first time they scroll into view.
pub struct RevealController {
    _notifier: VisibilityNotifier,
    tracker: Rc<RefCell<RevealTracker>>,
}

impl RevealController {
    pub fn attach(tiles: &[Element], config: &EngineConfig) -> Result<Self, JsValue> {
        let tracker = Rc::new(RefCell::new(RevealTracker::new(tiles.len())));
        let options = VisibilityOptions {
            root_margin: config.reveal_root_margin.to_string(),
            threshold: config.reveal_threshold,
        };

        let notifier = {
            let tracker = tracker.clone();
            let threshold = config.reveal_threshold;
            VisibilityNotifier::new(&options, move |sighting, watch| {
                if !sighting.meets(threshold) {
                    return;
                }
                let Some(index) = tile_index(&sighting.element) else {
                    return;
                };
                watch.unobserve(&sighting.element);
                // a burst of callbacks can arrive before the unobserve lands
                if tracker.borrow_mut().reveal(index) {
                    let _ = sighting.element.class_list().add_1("visible");
                }
            })?
        };

        for (index, tile) in tiles.iter().enumerate() {
            let _ = tile.set_attribute(INDEX_ATTRIBUTE, &index.to_string());
            if let Some(tile) = tile.dyn_ref::<HtmlElement>() {
                let _ = tile.style().set_property(
                    "transition-delay",
                    &format!("{:.2}s", stagger_delay_secs(index, config)),
                );
            }
            notifier.observe(tile);
        }
        debug!("reveal watching {} tiles", tiles.len());

        Ok(Self {
            _notifier: notifier,
            tracker,
        })
    }

    pub fn revealed_count(&self) -> usize {
        self.tracker.borrow().revealed_count()
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        debug!("reveal detached after {} reveals", self.revealed_count());
    }
}

fn tile_index(element: &Element) -> Option<usize> {
    element.get_attribute(INDEX_ATTRIBUTE)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_tile_reveals_once() {
        let mut tracker = RevealTracker::new(3);
        assert!(tracker.reveal(1));
        assert!(!tracker.reveal(1));
        assert!(!tracker.reveal(1));
        assert!(tracker.is_revealed(1));
        assert!(!tracker.is_revealed(0));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn burst_of_sightings_reveals_every_tile_exactly_once() {
        let mut tracker = RevealTracker::new(12);
        let burst = [0, 3, 3, 7, 0, 11, 7, 3, 5, 5, 0];
        let fired: Vec<usize> = burst.iter().copied().filter(|i| tracker.reveal(*i)).collect();
        assert_eq!(fired, vec![0, 3, 7, 11, 5]);
        assert_eq!(tracker.revealed_count(), 5);
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut tracker = RevealTracker::new(2);
        assert!(!tracker.reveal(2));
        assert!(!tracker.is_revealed(2));
        assert_eq!(tracker.revealed_count(), 0);
    }

    #[test]
    fn stagger_cycles_through_six_buckets() {
        let config = EngineConfig::default();
        let buckets: Vec<usize> = (0..14).map(|i| stagger_bucket(i, &config)).collect();
        assert_eq!(buckets, vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5, 0, 1]);
        assert_eq!(stagger_delay_secs(0, &config), 0.0);
        assert_eq!(format!("{:.2}s", stagger_delay_secs(3, &config)), "0.18s");
        assert_eq!(stagger_delay_secs(8, &config), stagger_delay_secs(2, &config));
    }
}
