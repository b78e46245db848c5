pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod run_loop;
pub mod surface;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, DisplayConfig, LogConfig, resolve_config_path};
pub use controller::{
    ClockController, ControllerOptions, ControllerState, DEFAULT_INTERVAL, RegionRole,
};
pub use error::{Error, Result};
pub use layout::ClockLayout;
pub use run_loop::{RunLoop, TimerHandle};
pub use surface::{DisplaySurface, Region, RegionFrame, RegionHandle, TextSurface};
