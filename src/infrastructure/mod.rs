// Infrastructure layer
pub mod bundler;
pub mod file_system;
pub mod processors;

pub use bundler::*;
pub use file_system::*;
pub use processors::*;
