pub mod bounding_box;
pub mod floating_point;
pub mod frenet_frame;
pub mod plane;
pub mod ray;

pub use bounding_box::*;
pub use floating_point::*;
pub use frenet_frame::*;
pub use plane::*;
pub use ray::*;
