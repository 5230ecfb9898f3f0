pub mod panel_field;
pub mod rig_config;
pub use panel_field::*;
pub use rig_config::*;
