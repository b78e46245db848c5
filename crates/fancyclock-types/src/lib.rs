pub mod error;
pub mod formatter;
pub mod locale;
pub mod style;
pub mod timestamp;

pub use error::{Error, Result};
pub use formatter::DisplayFormatter;
pub use locale::{DateOrder, HourCycle, LocaleProfile};
pub use style::{FormatStyle, StyleConfig};
pub use timestamp::Timestamp;
