//! The scene host: owns every piece of page state and advances it once
//! per frame.
//!
//! Hosts (the browser binding and the native viewer) translate their
//! events into calls on [`Stage`] and hand it to
//! [`SceneRenderer::render`](crate::renderer::SceneRenderer::render)
//! after [`Stage::frame`].

use crate::camera::{Camera, ParallaxDriver, PointerSample};
use crate::options::Options;
use crate::page::{EntranceAnimation, NavMenu, NavbarState, ScrollEntrance};
use crate::scene::{
    CarouselBuilder, ImageLoader, LoadSender, PivotGroup, PlaneUpload,
    SceneLights, Viewport,
};
use crate::scroll::{RegionRect, ScrollReveal};

/// Scroll position plus the viewport rects of every tracked element.
/// Elements missing from the page are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSnapshot {
    /// Page scroll offset in CSS pixels.
    pub scroll_y: f32,
    /// Viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Region that drives the carousel.
    pub tour: Option<RegionRect>,
    /// About-section text block.
    pub about_content: Option<RegionRect>,
    /// About-section visual.
    pub about_visual: Option<RegionRect>,
}

/// Which optional page elements exist, found once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageElements {
    /// Menu toggle button.
    pub hamburger: bool,
    /// Region that drives the carousel.
    pub tour_region: bool,
    /// Number of hero children, if the hero block exists.
    pub hero_children: Option<usize>,
    /// Number of about-text children, if the block exists.
    pub about_content_children: Option<usize>,
    /// Whether the about visual exists.
    pub about_visual: bool,
}

/// What changed during one [`Stage::frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Planes attached to the pivot this frame.
    pub planes_added: usize,
    /// Whether any entrance pose moved.
    pub entrances_changed: bool,
}

/// Page state driven by scroll, pointer, resize and load events.
pub struct Stage {
    options: Options,
    viewport: Viewport,
    camera: Camera,
    lights: SceneLights,
    builder: CarouselBuilder,
    pivot: PivotGroup,
    loader: ImageLoader,
    uploads: Vec<PlaneUpload>,
    reveal: ScrollReveal,
    parallax: ParallaxDriver,
    menu: NavMenu,
    navbar: NavbarState,
    hero: Option<EntranceAnimation>,
    about_content: Option<ScrollEntrance>,
    about_visual: Option<ScrollEntrance>,
}

impl Stage {
    /// Build the scene for a `width` x `height` viewport. The carousel
    /// starts empty and hidden; planes arrive as image loads complete.
    #[must_use]
    pub fn new(
        options: Options,
        page: PageElements,
        width: f32,
        height: f32,
        device_ratio: f32,
    ) -> Self {
        let viewport = Viewport::new(
            width,
            height,
            device_ratio,
            options.display.max_pixel_ratio,
        );
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        let builder = CarouselBuilder::new(&options.carousel);
        let pivot = builder.build();
        let loader = ImageLoader::new(builder.uris().len());

        if !page.tour_region {
            log::warn!(
                "tracked region #{} not found; carousel stays hidden",
                options.page.tour_region_id
            );
        }

        let entrance = &options.entrance;
        let hero = page
            .hero_children
            .map(|n| EntranceAnimation::new(&entrance.hero, n));
        let about_content = page
            .about_content_children
            .map(|n| ScrollEntrance::new(&entrance.about_content, n));
        let about_visual = page
            .about_visual
            .then(|| ScrollEntrance::new(&entrance.about_visual, 1));

        log::info!(
            "stage ready: {} images, viewport {}x{} @{}x",
            builder.uris().len(),
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio()
        );

        Self {
            lights: SceneLights::from_options(&options.lighting),
            reveal: ScrollReveal::new(
                &options.reveal,
                options.carousel.hidden_offset,
            ),
            parallax: ParallaxDriver::new(&options.parallax),
            menu: NavMenu::new(page.hamburger),
            navbar: NavbarState::new(options.page.navbar_scrolled_threshold),
            viewport,
            camera,
            builder,
            pivot,
            loader,
            uploads: Vec::new(),
            hero,
            about_content,
            about_visual,
            options,
        }
    }

    /// Options the stage was built from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Image locators in ring-slot order.
    #[must_use]
    pub fn image_uris(&self) -> &[String] {
        self.builder.uris()
    }

    /// Handle for image load tasks to report through.
    #[must_use]
    pub fn load_sender(&self) -> LoadSender {
        self.loader.sender()
    }

    /// Image loads finished so far, failures included.
    #[must_use]
    pub fn loads_settled(&self) -> usize {
        self.loader.settled()
    }

    /// Image loads still outstanding.
    #[must_use]
    pub fn loads_pending(&self) -> usize {
        self.loader.pending()
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Scene camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Scene lights.
    #[must_use]
    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    /// Carousel pivot and its planes.
    #[must_use]
    pub fn pivot(&self) -> &PivotGroup {
        &self.pivot
    }

    /// Take the pixels of planes attached since the last call. The
    /// renderer uploads them once; the stage keeps no pixel data.
    pub fn take_uploads(&mut self) -> Vec<PlaneUpload> {
        std::mem::take(&mut self.uploads)
    }

    /// Carousel reveal state.
    #[must_use]
    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    /// Navigation menu.
    #[must_use]
    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    /// Mutable navigation menu, for click handlers.
    pub fn menu_mut(&mut self) -> &mut NavMenu {
        &mut self.menu
    }

    /// Navbar shrink state.
    #[must_use]
    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    /// Hero entrance, if the hero block exists.
    #[must_use]
    pub fn hero(&self) -> Option<&EntranceAnimation> {
        self.hero.as_ref()
    }

    /// About-text entrance, if the block exists.
    #[must_use]
    pub fn about_content(&self) -> Option<&EntranceAnimation> {
        self.about_content.as_ref().map(ScrollEntrance::animation)
    }

    /// About-visual entrance, if the element exists.
    #[must_use]
    pub fn about_visual(&self) -> Option<&EntranceAnimation> {
        self.about_visual.as_ref().map(ScrollEntrance::animation)
    }

    /// Window resize: camera aspect and surface pixel ratio follow.
    pub fn resize(&mut self, width: f32, height: f32, device_ratio: f32) {
        self.viewport.resize(width, height, device_ratio);
        self.camera.set_aspect(self.viewport.width(), self.viewport.height());
        log::debug!(
            "resize to {}x{} @{}x",
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.pixel_ratio()
        );
    }

    /// Pointer moved to client coordinates. Only the latest sample is
    /// kept.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        self.parallax.set_sample(PointerSample::from_client(
            client_x,
            client_y,
            self.viewport.width(),
            self.viewport.height(),
        ));
    }

    /// Scroll (or layout) change. Returns the navbar's new scrolled state
    /// when it flips.
    pub fn scroll(&mut self, snapshot: &ScrollSnapshot) -> Option<bool> {
        let vh = snapshot.viewport_height;
        self.reveal
            .on_scroll(snapshot.tour, vh, self.pivot.transform_mut());
        if let Some(entrance) = &mut self.about_content {
            entrance.on_scroll(snapshot.about_content, vh);
        }
        if let Some(entrance) = &mut self.about_visual {
            entrance.on_scroll(snapshot.about_visual, vh);
        }
        self.navbar.update(snapshot.scroll_y)
    }

    /// Window finished loading: start the hero entrance.
    pub fn page_loaded(&mut self) {
        if let Some(hero) = &mut self.hero {
            hero.play();
        }
    }

    /// Advance one frame of `dt` seconds: attach newly loaded planes,
    /// step the reveal tween, drift the camera, and step entrances.
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();

        for outcome in self.loader.drain() {
            if let Some(upload) = self.builder.place(outcome, &mut self.pivot) {
                self.uploads.push(upload);
                report.planes_added += 1;
            }
        }
        if report.planes_added > 0 && self.loader.pending() == 0 {
            log::info!(
                "carousel loads settled: {} of {} planes",
                self.pivot.items().len(),
                self.builder.uris().len()
            );
        }

        self.reveal.advance(dt, self.pivot.transform_mut());
        self.parallax.apply(&mut self.camera);

        if let Some(hero) = &mut self.hero {
            report.entrances_changed |= hero.advance(dt);
        }
        for entrance in [&mut self.about_content, &mut self.about_visual]
            .into_iter()
            .flatten()
        {
            report.entrances_changed |= entrance.advance(dt);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{DecodedImage, LoadOutcome};
    use crate::scroll::RevealState;

    fn page() -> PageElements {
        PageElements {
            hamburger: true,
            tour_region: true,
            hero_children: Some(2),
            about_content_children: Some(3),
            about_visual: true,
        }
    }

    fn stage(page: PageElements) -> Stage {
        Stage::new(Options::default(), page, 1280.0, 720.0, 1.0)
    }

    fn snapshot(scroll_y: f32, tour: bool) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y,
            viewport_height: 720.0,
            tour: tour.then(|| RegionRect::from_page(1600.0, 1200.0, scroll_y)),
            about_content: None,
            about_visual: None,
        }
    }

    fn run(stage: &mut Stage, seconds: f32) {
        for _ in 0..((seconds * 60.0).ceil() as usize + 2) {
            let _ = stage.frame(1.0 / 60.0);
        }
    }

    #[test]
    fn starts_hidden_with_camera_on_axis() {
        let stage = stage(page());
        assert_eq!(stage.pivot().transform().vertical_offset, -50.0);
        assert_eq!(stage.camera().eye, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(stage.loads_pending(), 5);
    }

    #[test]
    fn resize_updates_aspect_and_pixel_ratio() {
        let mut stage = stage(page());
        stage.resize(800.0, 400.0, 3.0);
        assert!((stage.camera().aspect - 2.0).abs() < 1e-6);
        assert_eq!(stage.viewport().pixel_ratio(), 2.0);
        for dpr in [0.0, 0.5, 1.0, 1.75, 2.0, 2.5, 8.0] {
            stage.resize(800.0, 400.0, dpr);
            let expected: f32 = dpr.min(2.0);
            assert_eq!(stage.viewport().pixel_ratio(), expected);
        }
    }

    #[test]
    fn scroll_into_view_raises_carousel() {
        let mut stage = stage(page());
        let _ = stage.scroll(&snapshot(1500.0, true));
        assert_eq!(stage.reveal().state(), RevealState::Revealed);
        run(&mut stage, 1.2);
        assert_eq!(stage.pivot().transform().vertical_offset, 0.0);

        let _ = stage.scroll(&snapshot(0.0, true));
        run(&mut stage, 1.0);
        assert_eq!(stage.pivot().transform().vertical_offset, -50.0);
    }

    #[test]
    fn missing_hamburger_does_not_block_the_scene() {
        let mut stage = stage(PageElements {
            hamburger: false,
            ..page()
        });
        assert!(!stage.menu_mut().toggle());
        let _ = stage.scroll(&snapshot(1500.0, true));
        assert_eq!(stage.reveal().state(), RevealState::Revealed);
    }

    #[test]
    fn absent_region_leaves_pivot_alone() {
        let mut stage = stage(PageElements {
            tour_region: false,
            ..page()
        });
        let before = *stage.pivot().transform();
        for y in [0.0, 800.0, 2000.0, 5000.0, 100.0] {
            let _ = stage.scroll(&snapshot(y, false));
            let _ = stage.frame(0.1);
        }
        assert_eq!(*stage.pivot().transform(), before);
    }

    #[test]
    fn navbar_flips_past_threshold() {
        let mut stage = stage(page());
        assert_eq!(stage.scroll(&snapshot(10.0, true)), None);
        assert_eq!(stage.scroll(&snapshot(60.0, true)), Some(true));
        assert_eq!(stage.scroll(&snapshot(0.0, true)), Some(false));
    }

    #[test]
    fn frame_attaches_loaded_planes() {
        let mut stage = stage(page());
        let sender = stage.load_sender();
        for index in [4, 2] {
            sender.complete(LoadOutcome {
                index,
                uri: stage.image_uris()[index].clone(),
                result: Ok(DecodedImage::solid(1, 1, [255; 4]).into()),
            });
        }
        let report = stage.frame(1.0 / 60.0);
        assert_eq!(report.planes_added, 2);
        assert_eq!(stage.pivot().items().len(), 2);
        assert_eq!(stage.loads_settled(), 2);

        let mut slots: Vec<usize> =
            stage.take_uploads().iter().map(|u| u.slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![2, 4]);
        assert!(stage.take_uploads().is_empty());
        let _ = stage.frame(1.0 / 60.0);
        assert!(stage.take_uploads().is_empty());
    }

    #[test]
    fn pointer_drives_camera_drift() {
        let mut stage = stage(page());
        stage.pointer_moved(1280.0, 720.0);
        run(&mut stage, 5.0);
        let eye = stage.camera().eye;
        assert!((eye.x - 0.25).abs() < 1e-3);
        assert!((eye.y + 0.25).abs() < 1e-3);
        assert_eq!(eye.z, 5.0);
    }

    #[test]
    fn hero_plays_on_page_load() {
        let mut stage = stage(page());
        assert_eq!(stage.hero().map(|h| h.sample(0).opacity), Some(0.0));
        stage.page_loaded();
        let report = stage.frame(0.5);
        assert!(report.entrances_changed);
        run(&mut stage, 2.0);
        assert!(stage.hero().is_some_and(EntranceAnimation::is_complete));
    }
}
