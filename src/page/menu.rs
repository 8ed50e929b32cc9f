//! Mobile navigation menu state.

/// Open/closed state of the navigation menu.
///
/// Only the hamburger decides whether the menu can open; the menu and
/// overlay elements may be missing. Hosts mirror [`NavMenu::is_open`]
/// onto the `active` class of the elements that are present.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    has_hamburger: bool,
    open: bool,
}

impl NavMenu {
    /// Closed menu; `has_hamburger` is whether the toggle button exists.
    #[must_use]
    pub fn new(has_hamburger: bool) -> Self {
        if !has_hamburger {
            log::info!("no hamburger on page; menu toggle disabled");
        }
        Self {
            has_hamburger,
            open: false,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger click. Without a hamburger there is nothing to click and
    /// the call does nothing. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        if self.has_hamburger {
            self.open = !self.open;
        }
        self.open
    }

    /// Overlay click or any other dismissal. Returns whether anything
    /// changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Menu link click: closes the menu and returns the id to scroll to,
    /// if `href` is a fragment link. Hosts cancel the browser's default
    /// navigation for every menu link, fragment or not, so a `None` here
    /// means the click only closes the menu.
    pub fn link_clicked(&mut self, href: &str) -> Option<String> {
        let _ = self.close();
        let id = href.strip_prefix('#')?;
        (!id.is_empty()).then(|| id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamburger_toggles_and_overlay_closes() {
        let mut menu = NavMenu::new(true);
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(menu.close());
        assert!(!menu.is_open());
        assert!(!menu.close());
    }

    #[test]
    fn missing_hamburger_is_inert() {
        let mut menu = NavMenu::new(false);
        assert!(!menu.toggle());
        assert!(!menu.is_open());
        assert_eq!(menu.link_clicked("#about").as_deref(), Some("about"));
    }

    #[test]
    fn link_click_closes_and_resolves_target() {
        let mut menu = NavMenu::new(true);
        let _ = menu.toggle();
        assert_eq!(menu.link_clicked("#virtual-tour").as_deref(), Some("virtual-tour"));
        assert!(!menu.is_open());
        assert_eq!(menu.link_clicked("https://example.com/"), None);
        assert_eq!(menu.link_clicked("#"), None);
    }

    #[test]
    fn non_fragment_link_only_closes_menu() {
        let mut menu = NavMenu::new(true);
        for href in ["/contact", "https://example.com/#about", ""] {
            let _ = menu.toggle();
            assert!(menu.is_open());
            assert_eq!(menu.link_clicked(href), None);
            assert!(!menu.is_open());
        }
    }
}
