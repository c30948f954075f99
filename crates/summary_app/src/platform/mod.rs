pub mod app;
pub mod clipboard;
pub mod effects;
pub mod input;
pub mod logging;
pub mod ui;

pub use app::run_app;
