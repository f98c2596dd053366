use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{Element, Event};

/// Click roles the page markup opts elements into with `data-capability`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    GalleryImage,
    LightboxClose,
    LightboxBackdrop,
    AnchorLink,
}

impl Capability {
    pub const ATTRIBUTE: &'static str = "data-capability";

    pub fn tag(self) -> &'static str {
        match self {
            Capability::GalleryImage => "gallery-image",
            Capability::LightboxClose => "lightbox-close",
            Capability::LightboxBackdrop => "lightbox-backdrop",
            Capability::AnchorLink => "anchor-link",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "gallery-image" => Some(Capability::GalleryImage),
            "lightbox-close" => Some(Capability::LightboxClose),
            "lightbox-backdrop" => Some(Capability::LightboxBackdrop),
            "anchor-link" => Some(Capability::AnchorLink),
            _ => None,
        }
    }

    /// Only the element that was actually clicked counts; clicks that bubble
    /// up from children never take on their ancestors' capability.
    pub fn of(target: &Element) -> Option<Self> {
        Self::from_tag(&target.get_attribute(Self::ATTRIBUTE)?)
    }
}

pub type ClickHandler = Rc<dyn Fn(&Element, &Event)>;

/// Routes page clicks to the controller registered for the clicked element's capability.
#[derive(Default, Clone)]
pub struct ClickDispatch {
    handlers: HashMap<Capability, ClickHandler>,
}

impl ClickDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler`, replacing any earlier handler for the same capability.
    pub fn on<F>(&mut self, capability: Capability, handler: F) -> &mut Self
    where
        F: Fn(&Element, &Event) + 'static,
    {
        self.handlers.insert(capability, Rc::new(handler));
        self
    }

    #[cfg(test)]
    pub fn handles(&self, capability: Capability) -> bool {
        self.handlers.contains_key(&capability)
    }

    #[cfg(test)]
    pub fn handler_for(&self, tag: &str) -> Option<&ClickHandler> {
        self.handlers.get(&Capability::from_tag(tag)?)
    }

    /// Returns whether a handler ran.
    pub fn dispatch(&self, target: &Element, event: &Event) -> bool {
        let Some(capability) = Capability::of(target) else {
            return false;
        };
        match self.handlers.get(&capability) {
            Some(handler) => {
                handler(target, event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Capability; 4] = [
        Capability::GalleryImage,
        Capability::LightboxClose,
        Capability::LightboxBackdrop,
        Capability::AnchorLink,
    ];

    #[test]
    fn tags_round_trip() {
        for capability in ALL {
            assert_eq!(Capability::from_tag(capability.tag()), Some(capability));
        }
        assert_eq!(Capability::from_tag("IMG"), None);
        assert_eq!(Capability::from_tag(""), None);
    }

    #[test]
    fn routes_only_registered_capabilities() {
        let mut dispatch = ClickDispatch::new();
        dispatch
            .on(Capability::GalleryImage, |_, _| {})
            .on(Capability::AnchorLink, |_, _| {});

        assert!(dispatch.handles(Capability::GalleryImage));
        assert!(!dispatch.handles(Capability::LightboxClose));
        assert!(dispatch.handler_for("anchor-link").is_some());
        assert!(dispatch.handler_for("lightbox-backdrop").is_none());
        assert!(dispatch.handler_for("button").is_none());
    }

    #[test]
    fn later_registration_wins() {
        let mut dispatch = ClickDispatch::new();
        let first: ClickHandler = Rc::new(|_: &Element, _: &Event| {});
        dispatch.handlers.insert(Capability::LightboxClose, first.clone());
        dispatch.on(Capability::LightboxClose, |_, _| {});

        let current = dispatch.handler_for("lightbox-close").unwrap();
        assert!(!Rc::ptr_eq(current, &first));
    }
}
