pub mod arc_length;
pub mod catmull_rom_curve;
pub mod cubic_poly;
pub mod curve_type;
pub use arc_length::*;
pub use catmull_rom_curve::*;
pub use cubic_poly::*;
pub use curve_type::*;
