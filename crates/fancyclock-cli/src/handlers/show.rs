use crate::args::DisplayArgs;
use crate::context::ExecutionContext;
use crate::presentation::TuiClockRenderer;
use anyhow::Result;
use fancyclock_runtime::{ClockController, SystemClock};
use is_terminal::IsTerminal;
use std::io;
use std::rc::Rc;

use super::install_interrupt_flag;
use super::watch::{self, WatchLimits};

pub fn handle(ctx: &ExecutionContext, display: &DisplayArgs) -> Result<()> {
    if !io::stdout().is_terminal() {
        tracing::debug!("stdout is not a terminal; falling back to console output");
        return watch::handle(ctx, display, WatchLimits::default());
    }

    let options = ctx.controller_options(display)?;
    let footer = format!("{} · q to quit", options.locale);
    let interrupted = install_interrupt_flag()?;

    let controller = ClockController::new(options, Rc::new(SystemClock::new()));
    TuiClockRenderer::new(controller, footer, interrupted).run()
}
