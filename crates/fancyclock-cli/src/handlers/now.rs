use crate::args::DisplayArgs;
use crate::context::ExecutionContext;
use crate::presentation::{ClockViewModel, ConsoleClockView};
use anyhow::{Context, Result};
use fancyclock_runtime::{Clock, ClockController, ManualClock, RunLoop, SystemClock, TextSurface};
use fancyclock_types::Timestamp;
use is_terminal::IsTerminal;
use std::io;
use std::rc::Rc;

use super::CONSOLE_BOUNDS;

pub fn handle(ctx: &ExecutionContext, display: &DisplayArgs, at: Option<&str>) -> Result<()> {
    let vm = render_once(ctx, display, at)?;
    ConsoleClockView::new(ctx.format, io::stdout().is_terminal()).print(&vm)
}

/// One activation, one paint, teardown.
pub fn render_once(
    ctx: &ExecutionContext,
    display: &DisplayArgs,
    at: Option<&str>,
) -> Result<ClockViewModel> {
    let options = ctx.controller_options(display)?;
    let clock: Rc<dyn Clock> = match at {
        Some(at) => {
            let ts = Timestamp::parse_rfc3339(at).context("invalid --at value")?;
            Rc::new(ManualClock::new(ts))
        }
        None => Rc::new(SystemClock::new()),
    };

    let mut controller = ClockController::new(options, clock);
    let mut surface = TextSurface::new();
    let mut run_loop = RunLoop::new();
    controller.activate(&mut surface, &mut run_loop, CONSOLE_BOUNDS)?;

    let vm = ClockViewModel::capture(&controller, &surface);
    controller.teardown(&mut surface, &mut run_loop);

    Ok(vm)
}
