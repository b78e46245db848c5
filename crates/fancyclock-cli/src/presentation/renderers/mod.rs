pub mod console;
pub mod tui;

pub use console::ConsoleClockView;
pub use tui::TuiClockRenderer;
