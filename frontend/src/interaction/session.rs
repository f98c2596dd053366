use gloo_events::{EventListener, EventListenerOptions};
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, KeyboardEvent};

use crate::config::EngineConfig;
use crate::interaction::anchor::AnchorScroll;
use crate::interaction::counter::{CounterController, TARGET_ATTRIBUTE};
use crate::interaction::dispatch::{Capability, ClickDispatch};
use crate::interaction::hero::HeroParallax;
use crate::interaction::lightbox::{ActiveImage, LightboxController};
use crate::interaction::reveal::RevealController;
use crate::interaction::scroll_lock::ScrollLock;

/// Everything the interaction engine attaches to one mounted page.
///
/// Built when the page mounts and dropped when it unmounts; dropping it
/// removes every listener, disconnects the visibility notifiers, cancels
/// running count-ups and pending timers, and releases the scroll lock.
pub struct PageSession {
    _hero: Option<HeroParallax>,
    _reveal: Option<RevealController>,
    _counters: Option<CounterController>,
    _lightbox: Option<LightboxController>,
    _listeners: Vec<EventListener>,
}

impl PageSession {
    /// Attaches whichever controllers the page markup under `root` supports.
    pub fn mount(root: &Element, config: EngineConfig) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let hero = query(root, ".hero").map(|hero| {
            let layer = query(&hero, ".hero-inner");
            HeroParallax::attach(&window, hero, layer, config.clone())
        });

        let tiles = query_all(root, ".masonry-item");
        let reveal = if tiles.is_empty() {
            None
        } else {
            RevealController::attach(&tiles, &config)
                .map_err(|e| warn!("gallery reveal unavailable: {:?}", e))
                .ok()
        };

        let counters = query(root, "[data-counters]").and_then(|container| {
            let widgets = query_all(&container, &format!("[{}]", TARGET_ATTRIBUTE));
            CounterController::attach(&container, widgets, &config)
                .map_err(|e| warn!("stat counters unavailable: {:?}", e))
                .ok()
        });

        let lightbox = query(root, "#lightbox").and_then(|overlay| {
            let image = query(&overlay, "img")?.dyn_into::<HtmlImageElement>().ok()?;
            Some(LightboxController::attach(
                overlay,
                image,
                ScrollLock::new(&document),
                config.lightbox_clear_delay_ms,
            ))
        });

        let mut dispatch = ClickDispatch::new();
        if let Some(lightbox) = &lightbox {
            let opener = lightbox.clone();
            dispatch.on(Capability::GalleryImage, move |target, _| {
                if let Some(image) = target.dyn_ref::<HtmlImageElement>() {
                    opener.open(ActiveImage::from_element(image));
                }
            });
            let closer = lightbox.clone();
            dispatch.on(Capability::LightboxClose, move |_, _| closer.close());
            let closer = lightbox.clone();
            dispatch.on(Capability::LightboxBackdrop, move |_, _| closer.close());
        }
        let anchors = AnchorScroll::new(window.clone(), document.clone(), config);
        dispatch.on(Capability::AnchorLink, move |link, event| {
            event.prevent_default();
            anchors.follow(link);
        });

        let mut listeners = Vec::new();
        listeners.push(EventListener::new_with_options(
            &document,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    dispatch.dispatch(&target, event);
                }
            },
        ));

        if let Some(lightbox) = &lightbox {
            let lightbox = lightbox.clone();
            listeners.push(EventListener::new(&window, "keydown", move |event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    lightbox.handle_key(&key.key());
                }
            }));
        }

        info!(
            "page session mounted (hero: {}, tiles: {}, counters: {}, lightbox: {})",
            hero.is_some(),
            tiles.len(),
            counters.is_some(),
            lightbox.is_some()
        );

        Some(Self {
            _hero: hero,
            _reveal: reveal,
            _counters: counters,
            _lightbox: lightbox,
            _listeners: listeners,
        })
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        info!("page session torn down");
    }
}

fn query(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

fn query_all(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
