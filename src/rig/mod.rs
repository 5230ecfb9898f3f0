pub mod add_point_panel;
pub mod control_handle;
#[cfg(feature = "flow")]
pub mod curve_flow;
pub mod curve_rig;
pub mod picking;
pub mod transform_gizmo;
pub mod traveler;

pub use add_point_panel::*;
pub use control_handle::*;
#[cfg(feature = "flow")]
pub use curve_flow::*;
pub use curve_rig::*;
pub use picking::*;
pub use transform_gizmo::*;
pub use traveler::*;
