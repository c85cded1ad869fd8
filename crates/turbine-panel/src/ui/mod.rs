mod app;
mod event;
mod view;

pub use app::{run_tui, TuiApp};
