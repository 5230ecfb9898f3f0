#![allow(clippy::needless_range_loop)]

mod app;
mod camera;
mod config;
mod curve;
mod misc;
mod rig;

pub mod prelude {
    pub use crate::app::*;
    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::curve::*;
    pub use crate::misc::*;
    pub use crate::rig::*;
}
