//! DOM lookups and writes for the page around the canvas.
//!
//! Every element is optional. Missing ones are logged once at startup and
//! the features that need them are skipped.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::options::PageOptions;
use crate::page::{EntranceAnimation, NavMenu};
use crate::scroll::RegionRect;
use crate::stage::{PageElements, ScrollSnapshot};

/// Handles to the page elements tourview reads or writes.
pub struct PageDom {
    /// Owning document.
    pub document: Document,
    /// Element the canvas is appended to.
    pub canvas_container: Option<Element>,
    /// Navbar that shrinks on scroll.
    pub navbar: Option<Element>,
    /// Menu toggle.
    pub hamburger: Option<Element>,
    /// Navigation menu.
    pub nav_menu: Option<Element>,
    /// Overlay behind the open menu.
    pub overlay: Option<Element>,
    /// In-page navigation links.
    pub nav_links: Vec<Element>,
    /// Region that drives the carousel.
    pub tour_region: Option<Element>,
    /// About-text block (trigger for its children).
    pub about_content: Option<Element>,
    /// Hero children animated on load.
    pub hero_children: Option<Vec<HtmlElement>>,
    /// About-text children animated on scroll.
    pub about_content_children: Option<Vec<HtmlElement>>,
    /// About visual animated on scroll.
    pub about_visual: Option<HtmlElement>,
}

fn by_id(document: &Document, id: &str) -> Option<Element> {
    let found = document.get_element_by_id(id);
    if found.is_none() {
        log::warn!("#{id} not found");
    }
    found
}

fn select(document: &Document, selector: &str) -> Option<Element> {
    let found = document.query_selector(selector).ok().flatten();
    if found.is_none() {
        log::warn!("{selector} not found");
    }
    found
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html_children(element: &Element) -> Vec<HtmlElement> {
    let children = element.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl PageDom {
    /// Look up every element named in `options`.
    #[must_use]
    pub fn query(document: Document, options: &PageOptions) -> Self {
        let about_content = select(&document, &options.about_content_selector);
        let about_content_children = about_content.as_ref().map(html_children);
        let hero_children = select(&document, &options.hero_selector)
            .map(|hero| html_children(&hero));
        let about_visual = select(&document, &options.about_visual_selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Self {
            canvas_container: by_id(&document, &options.canvas_container_id),
            navbar: by_id(&document, &options.navbar_id),
            hamburger: by_id(&document, &options.hamburger_id),
            nav_menu: by_id(&document, &options.nav_menu_id),
            overlay: by_id(&document, &options.overlay_id),
            nav_links: select_all(&document, &options.nav_link_selector),
            tour_region: by_id(&document, &options.tour_region_id),
            about_content,
            hero_children,
            about_content_children,
            about_visual,
            document,
        }
    }

    /// Which optional elements exist.
    #[must_use]
    pub fn elements(&self) -> PageElements {
        PageElements {
            hamburger: self.hamburger.is_some(),
            tour_region: self.tour_region.is_some(),
            hero_children: self.hero_children.as_ref().map(Vec::len),
            about_content_children: self
                .about_content_children
                .as_ref()
                .map(Vec::len),
            about_visual: self.about_visual.is_some(),
        }
    }

    /// Current scroll offset and tracked element rects.
    #[must_use]
    pub fn snapshot(&self, window: &Window) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y: window.scroll_y().unwrap_or(0.0) as f32,
            viewport_height: viewport_size(window).1,
            tour: self.tour_region.as_ref().map(rect),
            about_content: self.about_content.as_ref().map(rect),
            about_visual: self.about_visual.as_ref().map(|el| rect(el)),
        }
    }

    /// Mirror the menu state onto the `active` class.
    pub fn apply_menu(&self, menu: &NavMenu, active_class: &str) {
        for el in [&self.hamburger, &self.nav_menu, &self.overlay]
            .into_iter()
            .flatten()
        {
            set_class(el, active_class, menu.is_open());
        }
    }

    /// Smooth-scroll to the element with `id`, if it exists.
    pub fn scroll_to(&self, id: &str) {
        let Some(target) = self.document.get_element_by_id(id) else {
            log::debug!("link target #{id} not on page");
            return;
        };
        let opts = web_sys::ScrollIntoViewOptions::new();
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Viewport-relative vertical extent of an element.
#[must_use]
pub fn rect(element: &Element) -> RegionRect {
    let r = element.get_bounding_client_rect();
    RegionRect::new(r.top() as f32, r.bottom() as f32)
}

/// Window inner size in CSS pixels.
#[must_use]
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Add or remove `class` on `element`.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        log::warn!("class update failed: {e:?}");
    }
}

/// Write each target's current pose as inline styles.
pub fn apply_poses(targets: &[HtmlElement], animation: &EntranceAnimation) {
    for (i, el) in targets.iter().enumerate() {
        let pose = animation.sample(i);
        let style = el.style();
        let written = style
            .set_property("opacity", &format!("{:.4}", pose.opacity))
            .and_then(|()| style.set_property("transform", &pose.css_transform()));
        if let Err(e) = written {
            log::warn!("style update failed: {e:?}");
        }
    }
}
