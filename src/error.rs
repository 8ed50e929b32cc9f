//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the tourview crate.
///
/// None of these are fatal to a page: hosts log them and skip the feature
/// that failed.
#[derive(Debug)]
pub enum TourviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A carousel image could not be fetched or decoded.
    ImageLoad {
        /// Source locator of the failed image.
        uri: String,
        /// Human-readable failure reason.
        reason: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options or option value parsing failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser API call failed.
    Web(String),
}

impl fmt::Display for TourviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ImageLoad { uri, reason } => {
                write!(f, "failed to load image {uri}: {reason}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "browser error: {msg}"),
        }
    }
}

impl std::error::Error for TourviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for TourviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for TourviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl TourviewError {
    /// Build an [`ImageLoad`](Self::ImageLoad) error from any displayable
    /// reason.
    pub fn image_load(uri: &str, reason: impl fmt::Display) -> Self {
        Self::ImageLoad {
            uri: uri.to_owned(),
            reason: reason.to_string(),
        }
    }
}
