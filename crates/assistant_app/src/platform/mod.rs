mod app;
mod args;
mod effects;
mod ui;

pub use app::run_app;
pub use args::Args;
