//! Standalone carousel window backed by winit.
//!
//! There is no page to scroll natively, so the viewer simulates one: the
//! mouse wheel moves a scroll offset over a page of configurable height
//! that contains the tracked region, and the stage sees the same scroll
//! snapshots a browser would produce.
//!
//! ```no_run
//! # use tourview::Viewer;
//! Viewer::builder()
//!     .with_images(vec!["/images/event_1.jpg".to_owned()])
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::TourviewError,
    options::{Options, ViewerOptions},
    renderer::SceneRenderer,
    scene::loader::spawn_file_loads,
    scroll::RegionRect,
    stage::{PageElements, ScrollSnapshot, Stage},
    util::frame_timing::FrameTiming,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    images: Option<Vec<String>>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with the default title, image list and options.
    fn new() -> Self {
        Self {
            images: None,
            options: None,
            title: "Tourview".into(),
        }
    }

    /// Replace the configured carousel images.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(images) = self.images {
            options.carousel.images = images;
        }
        Viewer {
            options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the carousel over a simulated page.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`TourviewError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), TourviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TourviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            stage: None,
            renderer: None,
            page: SimulatedPage::new(&self.options.viewer),
            timing: FrameTiming::new(),
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TourviewError::Viewer(e.to_string()))
    }
}

// ── Simulated page ───────────────────────────────────────────────────────

/// Scroll state of the page the viewer pretends to show.
#[derive(Debug, Clone)]
struct SimulatedPage {
    geometry: ViewerOptions,
    scroll_y: f32,
}

impl SimulatedPage {
    fn new(geometry: &ViewerOptions) -> Self {
        Self {
            geometry: geometry.clone(),
            scroll_y: 0.0,
        }
    }

    fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.geometry.page_height - viewport_height).max(0.0)
    }

    /// Scroll by `lines` wheel notches; positive lines move up the page.
    fn scroll_lines(&mut self, lines: f32, viewport_height: f32) {
        self.scroll_pixels(lines * self.geometry.line_scroll, viewport_height);
    }

    /// Scroll by a pixel delta; positive deltas move up the page.
    fn scroll_pixels(&mut self, delta: f32, viewport_height: f32) {
        self.scroll_y = (self.scroll_y - delta)
            .clamp(0.0, self.max_scroll(viewport_height));
    }

    fn snapshot(&self, viewport_height: f32) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y: self.scroll_y,
            viewport_height,
            tour: Some(RegionRect::from_page(
                self.geometry.tour_top,
                self.geometry.tour_height,
                self.scroll_y,
            )),
            about_content: None,
            about_visual: None,
        }
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    stage: Option<Stage>,
    renderer: Option<SceneRenderer>,
    page: SimulatedPage,
    timing: FrameTiming,
    options: Option<Options>,
    title: String,
}

/// Logical size and scale factor of a window.
fn logical_size(window: &Window) -> (f32, f32, f32) {
    let inner = window.inner_size();
    let scale = window.scale_factor() as f32;
    (inner.width as f32 / scale, inner.height as f32 / scale, scale)
}

impl ViewerApp {
    fn push_scroll(&mut self) {
        if let Some(stage) = &mut self.stage {
            let vh = stage.viewport().height();
            let _ = stage.scroll(&self.page.snapshot(vh));
        }
    }

    fn resize(&mut self) {
        let (Some(window), Some(stage)) = (&self.window, &mut self.stage)
        else {
            return;
        };
        let (w, h, scale) = logical_size(window);
        stage.resize(w, h, scale);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(stage.viewport());
        }
        // Clamp against the new height and re-measure the region.
        self.page.scroll_pixels(0.0, h);
        self.push_scroll();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (w, h, scale) = logical_size(&window);
        let asset_root = PathBuf::from(&options.carousel.asset_root);
        let page = PageElements {
            tour_region: true,
            ..PageElements::default()
        };
        let mut stage = Stage::new(options, page, w, h, scale);

        let renderer =
            match pollster::block_on(SceneRenderer::new(window.clone(), &stage)) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {e}");
                    event_loop.exit();
                    return;
                }
            };

        spawn_file_loads(
            stage.image_uris(),
            &asset_root,
            renderer.max_texture_dimension(),
            &stage.load_sender(),
        );
        stage.page_loaded();

        window.request_redraw();
        self.window = Some(window);
        self.stage = Some(stage);
        self.renderer = Some(renderer);
        self.push_scroll();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: window, stage and renderer must all be initialised.
        if self.window.is_none() || self.stage.is_none() || self.renderer.is_none()
        {
            return;
        }

        match event {
            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. } => self.resize(),

            WindowEvent::RedrawRequested => {
                let dt = self.timing.tick();
                if let (Some(stage), Some(renderer)) =
                    (&mut self.stage, &mut self.renderer)
                {
                    let _ = stage.frame(dt);
                    if let Err(e) = renderer.render(stage) {
                        log::error!("render error: {e:?}");
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(window), Some(stage)) =
                    (&self.window, &mut self.stage)
                {
                    let scale = window.scale_factor();
                    stage.pointer_moved(
                        (position.x / scale) as f32,
                        (position.y / scale) as f32,
                    );
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (vh, scale) = match (&self.window, &self.stage) {
                    (Some(w), Some(s)) => {
                        (s.viewport().height(), w.scale_factor())
                    }
                    _ => return,
                };
                match delta {
                    MouseScrollDelta::LineDelta(_, y) => {
                        self.page.scroll_lines(y, vh);
                    }
                    MouseScrollDelta::PixelDelta(pos) => {
                        self.page.scroll_pixels((pos.y / scale) as f32, vh);
                    }
                }
                self.push_scroll();
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_scroll_clamps_to_page() {
        let mut page = SimulatedPage::new(&ViewerOptions::default());
        page.scroll_lines(3.0, 800.0);
        assert_eq!(page.scroll_y, 0.0);
        page.scroll_lines(-10.0, 800.0);
        assert_eq!(page.scroll_y, 600.0);
        page.scroll_pixels(-1.0e6, 800.0);
        assert_eq!(page.scroll_y, 3200.0);
    }

    #[test]
    fn snapshot_tracks_region_against_scroll() {
        let mut page = SimulatedPage::new(&ViewerOptions::default());
        page.scroll_pixels(-1000.0, 800.0);
        let snap = page.snapshot(800.0);
        let tour = snap.tour.unwrap();
        assert_eq!(tour.top, 600.0);
        assert_eq!(tour.bottom, 1800.0);
        assert_eq!(snap.scroll_y, 1000.0);
    }

    #[test]
    fn builder_overrides_images() {
        let viewer = Viewer::builder()
            .with_images(vec!["a.png".to_owned()])
            .with_title("t")
            .build();
        assert_eq!(viewer.options.carousel.images, vec!["a.png".to_owned()]);
        assert_eq!(viewer.title, "t");
    }
}
