use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use crate::config::EngineConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroState {
    pub shrunk: bool,
    pub offset_px: f64,
}

impl HeroState {
    pub fn from_scroll(y: f64, hero_height: f64, config: &EngineConfig) -> Self {
        // overscroll on some platforms reports negative offsets
        let y = y.max(0.0);
        let threshold = hero_height * config.hero_shrink_ratio;
        let depth = (y / config.parallax_divisor).clamp(0.0, config.parallax_max_depth);

        Self {
            shrunk: y > threshold,
            offset_px: -depth * config.parallax_scale,
        }
    }

    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.offset_px)
    }
}

/// Scroll-linked shrink and parallax for the hero section.
pub struct HeroParallax {
    _listener: EventListener,
}

impl HeroParallax {
    /// `layer` receives the translation; the hero itself is used when the page has no inner layer.
    pub fn attach(
        window: &Window,
        hero: Element,
        layer: Option<Element>,
        config: EngineConfig,
    ) -> Self {
        // measured once, the hero does not resize with scrolling
        let hero_height = hero
            .dyn_ref::<HtmlElement>()
            .map(|el| el.offset_height() as f64)
            .unwrap_or(0.0);
        let layer = layer
            .unwrap_or_else(|| hero.clone())
            .dyn_into::<HtmlElement>()
            .ok();

        // restored scroll offsets (back navigation) must start out shrunk
        let initial = HeroState::from_scroll(scroll_y(window), hero_height, &config);
        apply_shrunk(&hero, initial.shrunk);
        debug!("hero attached, height {}px, shrunk {}", hero_height, initial.shrunk);

        let listener = {
            let target = window.clone();
            let window = window.clone();
            EventListener::new(&target, "scroll", move |_| {
                let state = HeroState::from_scroll(scroll_y(&window), hero_height, &config);
                apply_shrunk(&hero, state.shrunk);
                if let Some(layer) = &layer {
                    let _ = layer.style().set_property("transform", &state.transform());
                }
            })
        };

        Self { _listener: listener }
    }
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn apply_shrunk(hero: &Element, shrunk: bool) {
    let classes = hero.class_list();
    let _ = if shrunk {
        classes.add_1("shrunk")
    } else {
        classes.remove_1("shrunk")
    };
}
