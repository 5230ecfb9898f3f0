pub mod curve_app;
pub use curve_app::*;

#[cfg(test)]
mod tests;
