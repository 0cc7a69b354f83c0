pub mod loader;
pub mod resize;
