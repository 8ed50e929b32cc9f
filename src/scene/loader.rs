//! Asynchronous carousel image loading.
//!
//! Loads run independently of each other and complete in any order. Every
//! outcome travels over one channel to the frame loop, which drains it
//! once per frame and hands results to the carousel builder. On native
//! targets each file is read and decoded on its own thread; the web host
//! feeds the same channel from fetch futures that let the browser decode.
//!
//! Images larger than the GPU's texture limit are scaled down to fit
//! before they reach the renderer.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::TourviewError;

/// Largest size with the same aspect ratio whose sides both fit in
/// `max_dim`. Sizes already within the limit, and a zero limit, are
/// returned unchanged.
#[must_use]
pub fn fit_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let larger = width.max(height);
    if max_dim == 0 || larger <= max_dim {
        return (width, height);
    }
    let scale = f64::from(max_dim) / f64::from(larger);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_dim);
    (fit(width), fit(height))
}

/// RGBA8 pixels decoded from an image file.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl DecodedImage {
    /// Decode an encoded image (PNG or JPEG) into RGBA8.
    pub fn decode(uri: &str, bytes: &[u8]) -> Result<Self, TourviewError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| TourviewError::image_load(uri, e))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TourviewError::image_load(uri, "image has no pixels"));
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Single-colour image, used as a stand-in texture.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 rows, top row first.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Scale down so neither side exceeds `max_dim`, keeping the aspect
    /// ratio. Images already within the limit come back untouched.
    #[must_use]
    pub fn fit_within(self, max_dim: u32) -> Self {
        let (width, height) = fit_dimensions(self.width, self.height, max_dim);
        if (width, height) == (self.width, self.height) {
            return self;
        }
        log::debug!(
            "downscaling {}x{} image to {width}x{height}",
            self.width,
            self.height
        );
        let Some(src) =
            image::RgbaImage::from_raw(self.width, self.height, self.rgba)
        else {
            return Self::solid(width, height, [0; 4]);
        };
        let resized = image::imageops::resize(
            &src,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Self {
            width,
            height,
            rgba: resized.into_raw(),
        }
    }
}

/// Pixels for one carousel plane, waiting for texture upload.
#[derive(Debug)]
pub enum PlaneImage {
    /// RGBA8 pixels decoded in Rust.
    Decoded(DecodedImage),
    /// Bitmap decoded by the browser off the main thread.
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    Bitmap(web_sys::ImageBitmap),
}

impl PlaneImage {
    /// Width and height in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Decoded(image) => (image.width, image.height),
            #[cfg(all(feature = "web", target_arch = "wasm32"))]
            Self::Bitmap(bitmap) => (bitmap.width(), bitmap.height()),
        }
    }
}

impl From<DecodedImage> for PlaneImage {
    fn from(image: DecodedImage) -> Self {
        Self::Decoded(image)
    }
}

/// Result of one image load, tagged with its slot in the image list.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Index in the configured image list.
    pub index: usize,
    /// Locator the image was requested from.
    pub uri: String,
    /// Decoded pixels, or why the load failed.
    pub result: Result<PlaneImage, TourviewError>,
}

/// Cloneable handle that load tasks report completion through.
#[derive(Debug, Clone)]
pub struct LoadSender {
    tx: Sender<LoadOutcome>,
}

impl LoadSender {
    /// Report a finished load. Outcomes sent after the receiving loader
    /// is gone are dropped.
    pub fn complete(&self, outcome: LoadOutcome) {
        if self.tx.send(outcome).is_err() {
            log::debug!("image load finished after loader shut down");
        }
    }
}

/// Receiving end of the load channel, with settle bookkeeping.
#[derive(Debug)]
pub struct ImageLoader {
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    total: usize,
    settled: usize,
}

impl ImageLoader {
    /// Loader expecting `total` outcomes.
    #[must_use]
    pub fn new(total: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            total,
            settled: 0,
        }
    }

    /// Handle for load tasks.
    #[must_use]
    pub fn sender(&self) -> LoadSender {
        LoadSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every outcome that has arrived since the last call.
    pub fn drain(&mut self) -> Vec<LoadOutcome> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => out.push(outcome),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.settled += out.len();
        out
    }

    /// Outcomes received so far, successful or not.
    #[must_use]
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Loads still outstanding.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.settled)
    }
}

/// Map an image locator onto a file. Paths that exist as given are used
/// directly; anything else, including page-absolute locators such as
/// `/images/a.jpg`, is looked up under `root`.
#[must_use]
pub fn resolve_asset_path(root: &Path, uri: &str) -> PathBuf {
    let path = Path::new(uri);
    if path.is_file() {
        return path.to_path_buf();
    }
    root.join(uri.trim_start_matches('/'))
}

/// Read and decode every image on its own worker thread, scaling it to
/// fit `max_dim` (the GPU's 2D texture limit).
///
/// Each thread reports through `sender`. A thread that cannot be spawned
/// reports a failed outcome for its slot instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_file_loads(
    uris: &[String],
    root: &Path,
    max_dim: u32,
    sender: &LoadSender,
) {
    for (index, uri) in uris.iter().enumerate() {
        let path = resolve_asset_path(root, uri);
        let uri = uri.clone();
        let task_sender = sender.clone();
        let task_uri = uri.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("tourview-load-{index}"))
            .spawn(move || {
                let result = std::fs::read(&path)
                    .map_err(|e| {
                        TourviewError::image_load(
                            &task_uri,
                            format!("{}: {e}", path.display()),
                        )
                    })
                    .and_then(|bytes| DecodedImage::decode(&task_uri, &bytes))
                    .map(|image| PlaneImage::from(image.fit_within(max_dim)));
                task_sender.complete(LoadOutcome {
                    index,
                    uri: task_uri,
                    result,
                });
            });
        if let Err(e) = spawned {
            sender.complete(LoadOutcome {
                index,
                uri,
                result: Err(TourviewError::ThreadSpawn(e)),
            });
        }
    }
}
