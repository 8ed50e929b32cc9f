// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-reactive 3D image carousel with mouse parallax, built on wgpu.
//!
//! Tourview drives the 3D backdrop of a single marketing page: a ring of
//! image planes that rises into view and spins as the visitor scrolls
//! through the "virtual tour" section, a camera that drifts toward the
//! pointer, and the small pieces of page glue around it (navigation menu,
//! navbar shrink, staggered entrance animations).
//!
//! # Key entry points
//!
//! - [`stage::Stage`] - platform-independent state for one page: camera,
//!   carousel pivot, scroll reveal, parallax and page widgets
//! - [`renderer::SceneRenderer`] - wgpu host that draws a [`stage::Stage`]
//! - [`options::Options`] - runtime configuration with TOML presets
//! - `Viewer` (feature `viewer`) - standalone winit window with a simulated
//!   page scroll
//! - `web::start_tour` (feature `web`) - DOM binding for the browser
//!
//! # Architecture
//!
//! Everything is single-threaded and event driven. Hosts forward pointer,
//! scroll, resize and load events into the [`stage::Stage`], then call
//! [`stage::Stage::frame`] once per display refresh followed by
//! [`renderer::SceneRenderer::render`]. Carousel images decode off the
//! render path and are attached to the pivot as they arrive, in any order.

pub mod animation;
pub mod camera;
pub mod error;
pub mod gpu;
pub mod options;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod scroll;
pub mod stage;
pub mod util;

#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::TourviewError;
pub use options::Options;
pub use stage::{PageElements, ScrollSnapshot, Stage};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
