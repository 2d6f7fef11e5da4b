// Form builder library - exposes all core modules for testing

// Core modules at root level
pub mod config;
pub mod error;

// Organized modules
pub mod export;
pub mod input;
pub mod layout;
pub mod model;

pub use error::FormError;
