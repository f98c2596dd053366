
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:8000"  // Development URL when running the stats API locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Page-level tunables for the interaction engine.
///
/// The styling layer mirrors some of these (fade duration, nav height), so
/// changing one here usually means touching the page CSS too.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Fraction of the hero height the page must scroll past before the hero shrinks.
    pub hero_shrink_ratio: f64,
    /// Scroll pixels per unit of parallax depth.
    pub parallax_divisor: f64,
    /// Upper bound for the parallax depth.
    pub parallax_max_depth: f64,
    /// Pixels of translation per unit of depth.
    pub parallax_scale: f64,
    pub reveal_root_margin: &'static str,
    pub reveal_threshold: f64,
    /// Tiles cycle through this many stagger buckets.
    pub reveal_stagger_buckets: usize,
    pub reveal_stagger_step_secs: f64,
    pub counter_threshold: f64,
    /// Number of frames a count-up is spread over.
    pub counter_steps: u32,
    /// Must match the lightbox fade-out in the page CSS.
    pub lightbox_clear_delay_ms: u32,
    pub nav_height_fallback: f64,
    pub anchor_gap: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hero_shrink_ratio: 0.2,
            parallax_divisor: 12.0,
            parallax_max_depth: 50.0,
            parallax_scale: 0.12,
            reveal_root_margin: "0px 0px -80px 0px",
            reveal_threshold: 0.08,
            reveal_stagger_buckets: 6,
            reveal_stagger_step_secs: 0.06,
            counter_threshold: 0.3,
            counter_steps: 100,
            lightbox_clear_delay_ms: 300,
            nav_height_fallback: 68.0,
            anchor_gap: 12.0,
        }
    }
}
