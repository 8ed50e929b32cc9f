//! Browser binding: wires the page's DOM events into a [`Stage`] and
//! drives it from `requestAnimationFrame`.
//!
//! ```js
//! import init, { startTour } from "./tourview.js";
//! await init();
//! const tour = await startTour();
//! // later: tour.stop();
//! ```

/// DOM lookups, rects and style writes.
pub mod dom;
/// `requestAnimationFrame` loop.
pub mod frame_loop;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};
use web_time::Duration;

use self::dom::PageDom;
use self::frame_loop::FrameLoop;
use crate::error::TourviewError;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{
    fit_dimensions, DecodedImage, LoadOutcome, LoadSender, PlaneImage, Viewport,
};
use crate::stage::Stage;
use crate::util::frame_timing::clamp_step;

impl From<TourviewError> for JsValue {
    fn from(e: TourviewError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

fn js_error(e: &JsValue) -> TourviewError {
    TourviewError::Web(format!("{e:?}"))
}

/// An event listener removed again when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, TourviewError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(
                event,
                closure.as_ref().unchecked_ref(),
            )
            .map_err(|e| js_error(&e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Everything the event handlers share.
struct Tour {
    window: Window,
    dom: PageDom,
    stage: Stage,
    renderer: Option<SceneRenderer>,
    canvas: Option<HtmlCanvasElement>,
    last_timestamp: Option<f64>,
}

impl Tour {
    fn on_scroll(&mut self) {
        let snapshot = self.dom.snapshot(&self.window);
        if let Some(scrolled) = self.stage.scroll(&snapshot) {
            if let Some(navbar) = &self.dom.navbar {
                let class = &self.stage.options().page.scrolled_class;
                dom::set_class(navbar, class, scrolled);
            }
        }
    }

    fn on_resize(&mut self) {
        let (w, h) = dom::viewport_size(&self.window);
        self.stage
            .resize(w, h, self.window.device_pixel_ratio() as f32);
        let viewport = *self.stage.viewport();
        if let Some(canvas) = &self.canvas {
            size_canvas(canvas, &viewport);
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(&viewport);
        }
        self.on_scroll();
    }

    fn apply_entrances(&self) {
        if let (Some(targets), Some(anim)) =
            (&self.dom.hero_children, self.stage.hero())
        {
            dom::apply_poses(targets, anim);
        }
        if let (Some(targets), Some(anim)) =
            (&self.dom.about_content_children, self.stage.about_content())
        {
            dom::apply_poses(targets, anim);
        }
        if let (Some(target), Some(anim)) =
            (&self.dom.about_visual, self.stage.about_visual())
        {
            dom::apply_poses(std::slice::from_ref(target), anim);
        }
    }

    fn on_frame(&mut self, timestamp: f64) {
        let elapsed = self
            .last_timestamp
            .map_or(0.0, |last| ((timestamp - last) / 1000.0).max(0.0));
        self.last_timestamp = Some(timestamp);
        let dt = clamp_step(Duration::from_secs_f64(elapsed));

        let report = self.stage.frame(dt);
        if report.entrances_changed {
            self.apply_entrances();
        }
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(&mut self.stage) {
                log::error!("render error: {e:?}");
            }
        }
    }
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.physical_size();
    canvas.set_width(w);
    canvas.set_height(h);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", viewport.width()));
    let _ = style.set_property("height", &format!("{}px", viewport.height()));
}

async fn fetch_blob(window: &Window, uri: &str) -> Result<web_sys::Blob, JsValue> {
    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str(uri)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    JsFuture::from(response.blob()?).await?.dyn_into()
}

/// Fetch one image and let the browser decode it off the main thread.
/// Images over the texture limit are rare; they are decoded and scaled
/// here instead.
async fn fetch_image(
    window: &Window,
    uri: &str,
    max_dim: u32,
) -> Result<PlaneImage, TourviewError> {
    let load_error = |e: JsValue| TourviewError::image_load(uri, format!("{e:?}"));
    let blob = fetch_blob(window, uri).await.map_err(load_error)?;
    let bitmap: web_sys::ImageBitmap = JsFuture::from(
        window
            .create_image_bitmap_with_blob(&blob)
            .map_err(load_error)?,
    )
    .await
    .and_then(JsCast::dyn_into)
    .map_err(load_error)?;

    let (width, height) = (bitmap.width(), bitmap.height());
    if fit_dimensions(width, height, max_dim) == (width, height) {
        return Ok(PlaneImage::Bitmap(bitmap));
    }
    bitmap.close();
    log::info!("{uri} is {width}x{height}; scaling to the {max_dim}px texture limit");
    let buffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(load_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(DecodedImage::decode(uri, &bytes)?.fit_within(max_dim).into())
}

/// Fetch and decode every image concurrently, one task per image.
fn spawn_fetches(
    window: &Window,
    uris: &[String],
    max_dim: u32,
    sender: &LoadSender,
) {
    for (index, uri) in uris.iter().enumerate() {
        let window = window.clone();
        let sender = sender.clone();
        let uri = uri.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_image(&window, &uri, max_dim).await;
            sender.complete(LoadOutcome { index, uri, result });
        });
    }
}

/// Running tour; keeps listeners and the frame loop alive.
#[wasm_bindgen]
pub struct TourHandle {
    frame_loop: FrameLoop,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl TourHandle {
    /// Stop rendering and remove every event listener.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
        self.listeners.clear();
    }
}

/// Initialize the carousel and page behaviors.
///
/// `options_toml` overrides the defaults. Missing page elements only
/// disable what depends on them; a missing canvas container or an
/// unavailable GPU leaves the page glue running without the 3D scene.
///
/// # Errors
///
/// Rejects when there is no window or document, or the options fail to
/// parse.
#[wasm_bindgen(js_name = startTour)]
pub async fn start_tour(options_toml: Option<String>) -> Result<TourHandle, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let options = match options_toml {
        Some(toml) => Options::from_toml(&toml)?,
        None => Options::default(),
    };
    let window = web_sys::window()
        .ok_or_else(|| TourviewError::Web("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| TourviewError::Web("no document".to_owned()))?;

    let dom = PageDom::query(document, &options.page);
    let (w, h) = dom::viewport_size(&window);
    let stage = Stage::new(
        options,
        dom.elements(),
        w,
        h,
        window.device_pixel_ratio() as f32,
    );

    let canvas = match &dom.canvas_container {
        Some(container) => {
            let canvas: HtmlCanvasElement = dom
                .document
                .create_element("canvas")?
                .dyn_into()?;
            size_canvas(&canvas, stage.viewport());
            let _ = container.append_child(&canvas)?;
            Some(canvas)
        }
        None => None,
    };
    let renderer = match &canvas {
        Some(canvas) => {
            let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
            match SceneRenderer::new(target, &stage).await {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    log::error!("3D scene disabled: {e}");
                    None
                }
            }
        }
        None => None,
    };
    if let Some(renderer) = &renderer {
        spawn_fetches(
            &window,
            stage.image_uris(),
            renderer.max_texture_dimension(),
            &stage.load_sender(),
        );
    }

    let tour = Rc::new(RefCell::new(Tour {
        window: window.clone(),
        dom,
        stage,
        renderer,
        canvas,
        last_timestamp: None,
    }));
    {
        let tour = tour.borrow();
        // Entrances render their start pose before playing.
        tour.apply_entrances();
    }

    let listeners = wire_listeners(&window, &tour)?;
    tour.borrow_mut().on_scroll();

    let frame_tour = Rc::clone(&tour);
    let frame_loop = FrameLoop::start(move |timestamp| {
        frame_tour.borrow_mut().on_frame(timestamp);
    })?;

    log::info!("tour started");
    Ok(TourHandle {
        frame_loop,
        listeners,
    })
}

fn wire_listeners(
    window: &Window,
    tour: &Rc<RefCell<Tour>>,
) -> Result<Vec<Listener>, TourviewError> {
    let mut listeners = Vec::new();
    let t = tour.borrow();
    let active = t.stage.options().page.active_class.clone();

    if let Some(hamburger) = &t.dom.hamburger {
        let tour = Rc::clone(tour);
        let active = active.clone();
        listeners.push(Listener::add(hamburger, "click", move |_| {
            let mut t = tour.borrow_mut();
            let _ = t.stage.menu_mut().toggle();
            t.dom.apply_menu(t.stage.menu(), &active);
        })?);
    }

    if let Some(overlay) = &t.dom.overlay {
        let tour = Rc::clone(tour);
        let active = active.clone();
        listeners.push(Listener::add(overlay, "click", move |_| {
            let mut t = tour.borrow_mut();
            if t.stage.menu_mut().close() {
                t.dom.apply_menu(t.stage.menu(), &active);
            }
        })?);
    }

    for link in &t.dom.nav_links {
        let tour = Rc::clone(tour);
        let active = active.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        listeners.push(Listener::add(link, "click", move |event| {
            event.prevent_default();
            let mut t = tour.borrow_mut();
            let target = t.stage.menu_mut().link_clicked(&href);
            t.dom.apply_menu(t.stage.menu(), &active);
            if let Some(id) = target {
                t.dom.scroll_to(&id);
            }
        })?);
    }

    let document: &EventTarget = &t.dom.document;
    {
        let tour = Rc::clone(tour);
        listeners.push(Listener::add(document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                tour.borrow_mut()
                    .stage
                    .pointer_moved(mouse.client_x() as f32, mouse.client_y() as f32);
            }
        })?);
    }
    {
        let tour = Rc::clone(tour);
        listeners.push(Listener::add(window, "scroll", move |_| {
            tour.borrow_mut().on_scroll();
        })?);
    }
    {
        let tour = Rc::clone(tour);
        listeners.push(Listener::add(window, "resize", move |_| {
            tour.borrow_mut().on_resize();
        })?);
    }
    {
        let tour = Rc::clone(tour);
        listeners.push(Listener::add(window, "load", move |_| {
            tour.borrow_mut().stage.page_loaded();
        })?);
    }
    if document_complete(&t.dom.document) {
        drop(t);
        tour.borrow_mut().stage.page_loaded();
    }
    Ok(listeners)
}

/// Whether the window `load` event has already fired.
fn document_complete(document: &web_sys::Document) -> bool {
    document.ready_state() == web_sys::DocumentReadyState::Complete
}
