// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod image_loader;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod swipe;
pub mod view;
