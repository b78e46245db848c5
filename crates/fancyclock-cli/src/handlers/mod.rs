pub mod config;
pub mod now;
pub mod show;
pub mod watch;

use anyhow::Result;
use fancyclock_runtime::RegionFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Geometry for hosts that print text instead of placing it.
pub(crate) const CONSOLE_BOUNDS: RegionFrame = RegionFrame::new(0, 0, 80, 3);

/// Flag set by SIGINT. The loops poll it between ticks.
pub(crate) fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(interrupted)
}
