use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// DOM hooks used by the browser binding, plus navbar behavior.
///
/// Ids are looked up with `getElementById`, selectors with
/// `querySelector(All)`. Every element is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PageOptions {
    /// Scroll offset in CSS pixels past which the navbar is "scrolled".
    pub navbar_scrolled_threshold: f32,
    /// Id of the element that hosts the render canvas.
    pub canvas_container_id: String,
    /// Id of the navbar.
    pub navbar_id: String,
    /// Id of the hamburger toggle.
    pub hamburger_id: String,
    /// Id of the navigation menu.
    pub nav_menu_id: String,
    /// Id of the overlay behind the open menu.
    pub overlay_id: String,
    /// Selector for in-page navigation links.
    pub nav_link_selector: String,
    /// Id of the region that drives the carousel.
    pub tour_region_id: String,
    /// Selector for the hero block whose children fade in on load.
    pub hero_selector: String,
    /// Selector for the about-section text block.
    pub about_content_selector: String,
    /// Selector for the about-section visual.
    pub about_visual_selector: String,
    /// Class toggled on the hamburger, menu and overlay when open.
    pub active_class: String,
    /// Class added to the navbar once scrolled.
    pub scrolled_class: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            navbar_scrolled_threshold: 50.0,
            canvas_container_id: "canvas-container".to_owned(),
            navbar_id: "navbar".to_owned(),
            hamburger_id: "hamburger".to_owned(),
            nav_menu_id: "navMenu".to_owned(),
            overlay_id: "overlay".to_owned(),
            nav_link_selector: ".nav-menu a".to_owned(),
            tour_region_id: "virtual-tour".to_owned(),
            hero_selector: ".hero-content".to_owned(),
            about_content_selector: "#about .about-content".to_owned(),
            about_visual_selector: "#about .about-visual".to_owned(),
            active_class: "active".to_owned(),
            scrolled_class: "scrolled".to_owned(),
        }
    }
}
