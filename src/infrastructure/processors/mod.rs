// Processors module
pub mod minifier;
pub mod property_mangler;

pub use minifier::*;
pub use property_mangler::*;
