use log::debug;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use crate::config::EngineConfig;

pub const NAV_HEIGHT_PROPERTY: &str = "--nav-height";

/// Reads the nav height the way the stylesheet declares it (`"68px"`, `" 72 "`).
///
/// Only a leading integer counts. A missing, unparseable or zero value falls back.
pub fn parse_nav_height(raw: &str, fallback: f64) -> f64 {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<f64>() {
        Ok(value) if value != 0.0 => sign * value,
        _ => fallback,
    }
}

pub fn scroll_target(target_top: f64, scroll_y: f64, nav_height: f64, gap: f64) -> f64 {
    target_top + scroll_y - nav_height - gap
}

/// The element id an in-page link points at, if it is one.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Smooth scrolling for in-page nav links, clearing the fixed nav bar.
pub struct AnchorScroll {
    window: Window,
    document: Document,
    config: EngineConfig,
}

impl AnchorScroll {
    pub fn new(window: Window, document: Document, config: EngineConfig) -> Self {
        Self {
            window,
            document,
            config,
        }
    }

    fn nav_height(&self) -> f64 {
        let raw = self
            .document
            .document_element()
            .and_then(|root| self.window.get_computed_style(&root).ok().flatten())
            .and_then(|style| style.get_property_value(NAV_HEIGHT_PROPERTY).ok())
            .unwrap_or_default();
        parse_nav_height(&raw, self.config.nav_height_fallback)
    }

    /// Scrolls to the link's target. Returns the offset used, or `None` when
    /// the link has no resolvable target.
    pub fn follow(&self, link: &Element) -> Option<f64> {
        let href = link.get_attribute("href")?;
        let id = fragment_id(&href)?;
        let Some(target) = self.document.get_element_by_id(id) else {
            debug!("anchor #{} has no target on this page", id);
            return None;
        };

        let top = scroll_target(
            target.get_bounding_client_rect().top(),
            self.window.scroll_y().unwrap_or(0.0),
            self.nav_height(),
            self.config.anchor_gap,
        );
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
        Some(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_height_reads_leading_integer() {
        assert_eq!(parse_nav_height("68px", 68.0), 68.0);
        assert_eq!(parse_nav_height(" 72px", 68.0), 72.0);
        assert_eq!(parse_nav_height("80.5px", 68.0), 80.0);
        assert_eq!(parse_nav_height("-4px", 68.0), -4.0);
    }

    #[test]
    fn nav_height_falls_back() {
        assert_eq!(parse_nav_height("", 68.0), 68.0);
        assert_eq!(parse_nav_height("auto", 68.0), 68.0);
        assert_eq!(parse_nav_height("0px", 68.0), 68.0);
        assert_eq!(parse_nav_height("px", 68.0), 68.0);
    }

    #[test]
    fn target_clears_nav_and_gap() {
        // #leaders 900px below the viewport top, page already scrolled 300px
        let nav = parse_nav_height("", 68.0);
        assert_eq!(scroll_target(900.0, 300.0, nav, 12.0), 900.0 + 300.0 - 68.0 - 12.0);
        assert_eq!(scroll_target(-200.0, 1500.0, 80.0, 12.0), 1208.0);
    }

    #[test]
    fn only_fragment_links_resolve() {
        assert_eq!(fragment_id("#leaders"), Some("leaders"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/teams"), None);
        assert_eq!(fragment_id("https://example.com/#x"), None);
    }
}
