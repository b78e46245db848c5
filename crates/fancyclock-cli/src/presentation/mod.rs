pub mod renderers;
pub mod view_models;

pub use renderers::{ConsoleClockView, TuiClockRenderer};
pub use view_models::ClockViewModel;
