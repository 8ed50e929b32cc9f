//! Page chrome around the carousel: navigation menu, navbar shrink, and
//! content entrance animations. Plain state machines; the web host binds
//! them to DOM elements.

pub mod entrance;
pub mod menu;
pub mod navbar;

pub use entrance::{EntranceAnimation, Pose, ScrollEntrance};
pub use menu::NavMenu;
pub use navbar::NavbarState;
