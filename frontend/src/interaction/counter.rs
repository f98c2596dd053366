use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::config::EngineConfig;
use crate::interaction::visibility::{VisibilityNotifier, VisibilityOptions};

pub const TARGET_ATTRIBUTE: &str = "data-target";

/// What a single count-up step produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Frame {
    /// Show the value and schedule another step.
    Continue(f64),
    /// Show the value and stop; it is always the exact target.
    Finished(f64),
}

impl Frame {
    pub fn value(&self) -> f64 {
        match self {
            Frame::Continue(v) | Frame::Finished(v) => *v,
        }
    }

    pub fn display(&self) -> String {
        format!("{}", self.value())
    }
}

/// Linear count-up from zero to `target` over a fixed number of steps.
///
/// The running total is kept apart from the displayed (rounded up) value so the
/// animation does not drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountUp {
    target: f64,
    current: f64,
    steps: u32,
    total_steps: u32,
}

impl CountUp {
    pub fn new(target: f64, total_steps: u32) -> Self {
        Self {
            target,
            current: 0.0,
            steps: 0,
            total_steps,
        }
    }

    pub fn increment(&self) -> f64 {
        self.target / self.total_steps.max(1) as f64
    }

    pub fn advance(&mut self) -> Frame {
        // NaN and non-positive targets fail this comparison and finish immediately
        if self.current < self.target {
            self.steps += 1;
            self.current = if self.steps >= self.total_steps {
                self.target
            } else {
                (self.current + self.increment()).min(self.target)
            };
            Frame::Continue(self.current.ceil())
        } else {
            self.current = self.target;
            Frame::Finished(self.target)
        }
    }
}

/// Reads a counter target; anything unparseable or non-finite becomes NaN and shows as such.
pub fn parse_target(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Latches the first qualifying sighting of a stats container.
#[derive(Debug, Default)]
pub struct Activation {
    started: Cell<bool>,
}

impl Activation {
    /// True exactly once: for the first sighting that qualifies.
    pub fn admit(&self, qualifying: bool) -> bool {
        qualifying && !self.started.replace(true)
    }
}

/// The pending frame handle of each running count-up, one slot per widget.
///
/// Dropping a handle cancels its frame. Once `cancel_all` has run, handles
/// offered to `store` are dropped on the spot, so no loop outlives teardown.
pub struct FrameSlots<H> {
    slots: Vec<Option<H>>,
    cancelled: bool,
}

impl<H> Default for FrameSlots<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FrameSlots<H> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            cancelled: false,
        }
    }

    pub fn reset(&mut self, len: usize) {
        if !self.cancelled {
            self.slots.resize_with(len, || None);
        }
    }

    /// Returns false when the handle was refused and dropped.
    pub fn store(&mut self, slot: usize, handle: Option<H>) -> bool {
        if self.cancelled {
            return false;
        }
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = handle;
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn cancel_all(&mut self) {
        self.cancelled = true;
        self.slots.clear();
    }
}

type SharedFrames = Rc<RefCell<FrameSlots<AnimationFrame>>>;
type WeakFrames = Weak<RefCell<FrameSlots<AnimationFrame>>>;

/// Starts every stat counter once their container is sufficiently on screen.
pub struct CounterController {
    _notifier: VisibilityNotifier,
    frames: SharedFrames,
}

impl CounterController {
    pub fn attach(
        container: &Element,
        widgets: Vec<Element>,
        config: &EngineConfig,
    ) -> Result<Self, JsValue> {
        let frames: SharedFrames = Rc::new(RefCell::new(FrameSlots::new()));
        let activation = Activation::default();
        let options = VisibilityOptions {
            root_margin: "0px".to_string(),
            threshold: config.counter_threshold,
        };

        let notifier = {
            let frames = frames.clone();
            let threshold = config.counter_threshold;
            let total_steps = config.counter_steps;
            VisibilityNotifier::new(&options, move |sighting, watch| {
                let qualifying = sighting.meets(threshold);
                if qualifying {
                    watch.unobserve(&sighting.element);
                }
                if !activation.admit(qualifying) {
                    return;
                }
                debug!("stats visible, starting {} counters", widgets.len());
                frames.borrow_mut().reset(widgets.len());
                for (slot, widget) in widgets.iter().enumerate() {
                    let target = parse_target(widget.get_attribute(TARGET_ATTRIBUTE).as_deref());
                    step(
                        widget.clone(),
                        CountUp::new(target, total_steps),
                        slot,
                        Rc::downgrade(&frames),
                    );
                }
            })?
        };
        notifier.observe(container);

        Ok(Self {
            _notifier: notifier,
            frames,
        })
    }
}

impl Drop for CounterController {
    fn drop(&mut self) {
        let mut frames = self.frames.borrow_mut();
        debug!("cancelling {} running counters", frames.pending());
        frames.cancel_all();
    }
}

fn step(widget: Element, mut count: CountUp, slot: usize, frames: WeakFrames) {
    let Some(shared) = frames.upgrade() else {
        return;
    };
    let frame = count.advance();
    widget.set_text_content(Some(&frame.display()));

    let next = match frame {
        Frame::Continue(_) => Some(request_animation_frame(move |_| {
            step(widget, count, slot, frames)
        })),
        Frame::Finished(_) => None,
    };
    shared.borrow_mut().store(slot, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::visibility::qualifies;

    fn run(target: f64) -> Vec<Frame> {
        let mut count = CountUp::new(target, 100);
        let mut frames = Vec::new();
        loop {
            let frame = count.advance();
            frames.push(frame);
            if let Frame::Finished(_) = frame {
                return frames;
            }
            assert!(frames.len() <= 1_000, "count-up did not terminate");
        }
    }

    #[test]
    fn counts_up_to_exact_target() {
        let frames = run(2836.0);
        let values: Vec<f64> = frames.iter().map(Frame::value).collect();

        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| *v <= 2836.0));
        assert_eq!(values.last(), Some(&2836.0));

        // the target is on screen after at most 100 steps
        let first_hit = values.iter().position(|v| *v == 2836.0).unwrap();
        assert!(first_hit < 100);
        assert_eq!(frames.len(), 101);
    }

    #[test]
    fn steps_round_up_the_running_total() {
        let mut count = CountUp::new(2836.0, 100);
        assert_eq!(count.advance(), Frame::Continue(29.0));
        assert_eq!(count.advance(), Frame::Continue(57.0));
        assert_eq!(count.advance(), Frame::Continue(86.0));
    }

    #[test]
    fn small_targets_still_take_bounded_steps() {
        let frames = run(15.0);
        assert_eq!(frames.first(), Some(&Frame::Continue(1.0)));
        assert_eq!(frames.last(), Some(&Frame::Finished(15.0)));
        assert!(frames.len() <= 101);
    }

    #[test]
    fn huge_targets_do_not_take_longer() {
        assert_eq!(run(1.0e9).len(), 101);
    }

    #[test]
    fn zero_target_finishes_without_ticking() {
        let mut count = CountUp::new(0.0, 100);
        let frame = count.advance();
        assert_eq!(frame, Frame::Finished(0.0));
        assert_eq!(frame.display(), "0");
    }

    #[test]
    fn nan_target_displays_nan_and_stops() {
        let target = parse_target(Some("lots"));
        assert!(target.is_nan());
        let frame = CountUp::new(target, 100).advance();
        assert!(matches!(frame, Frame::Finished(v) if v.is_nan()));
        assert_eq!(frame.display(), "NaN");
    }

    #[test]
    fn burst_of_sightings_starts_counters_once() {
        let activation = Activation::default();
        let burst = [(false, 0.1), (true, 0.31), (true, 0.6), (true, 1.0)];
        let starts = burst
            .iter()
            .filter(|(intersecting, ratio)| {
                activation.admit(qualifies(*intersecting, *ratio, 0.3))
            })
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn sightings_below_threshold_do_not_use_up_activation() {
        let activation = Activation::default();
        assert!(!activation.admit(false));
        assert!(activation.admit(true));
        assert!(!activation.admit(true));
    }

    struct Handle(Rc<Cell<usize>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn cancel_all_drops_pending_frames() {
        let dropped = Rc::new(Cell::new(0));
        let mut slots = FrameSlots::new();
        slots.reset(3);
        assert!(slots.store(0, Some(Handle(dropped.clone()))));
        assert!(slots.store(2, Some(Handle(dropped.clone()))));
        assert_eq!(slots.pending(), 2);

        slots.cancel_all();
        assert_eq!(dropped.get(), 2);
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn frames_scheduled_after_teardown_are_refused() {
        let dropped = Rc::new(Cell::new(0));
        let mut slots = FrameSlots::new();
        slots.reset(1);
        slots.cancel_all();

        assert!(!slots.store(0, Some(Handle(dropped.clone()))));
        assert_eq!(dropped.get(), 1);
        slots.reset(4);
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn finished_counter_clears_its_slot() {
        let dropped = Rc::new(Cell::new(0));
        let mut slots = FrameSlots::new();
        slots.reset(1);
        slots.store(0, Some(Handle(dropped.clone())));
        slots.store(0, None);
        assert_eq!(dropped.get(), 1);
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn parses_declared_targets() {
        assert_eq!(parse_target(Some("2836")), 2836.0);
        assert_eq!(parse_target(Some(" 15 ")), 15.0);
        assert!(parse_target(None).is_nan());
        assert!(parse_target(Some("")).is_nan());
    }

    #[test]
    fn non_finite_targets_read_as_nan() {
        assert!(parse_target(Some("inf")).is_nan());
        assert!(parse_target(Some("-infinity")).is_nan());
        assert!(parse_target(Some("nan")).is_nan());
        assert_eq!(CountUp::new(parse_target(Some("inf")), 100).advance().display(), "NaN");
    }

    #[test]
    fn display_has_no_fraction() {
        assert_eq!(Frame::Continue(29.0).display(), "29");
        assert_eq!(Frame::Finished(2836.0).display(), "2836");
    }
}
