mod app;
mod effects;
mod input;
mod logging;
mod persistence;
mod timers;
mod ui;

pub use app::{run_app, AppError};
