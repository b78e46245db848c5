/// Console watch handler - prints one ClockViewModel line per refresh
use crate::args::DisplayArgs;
use crate::context::ExecutionContext;
use crate::presentation::{ClockViewModel, ConsoleClockView};
use anyhow::Result;
use fancyclock_runtime::{ClockController, RunLoop, SystemClock, TextSurface};
use is_terminal::IsTerminal;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{CONSOLE_BOUNDS, install_interrupt_flag};

const IDLE_WAIT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchLimits {
    /// Stop after this many refreshes, counting the first paint
    pub count: Option<u64>,
    pub duration: Option<Duration>,
}

pub fn handle(ctx: &ExecutionContext, display: &DisplayArgs, limits: WatchLimits) -> Result<()> {
    let options = ctx.controller_options(display)?;
    let view = ConsoleClockView::new(ctx.format, io::stdout().is_terminal());
    let interrupted = install_interrupt_flag()?;

    let mut controller = ClockController::new(options, Rc::new(SystemClock::new()));
    let mut surface = TextSurface::new();
    let mut run_loop = RunLoop::new();
    controller.activate(&mut surface, &mut run_loop, CONSOLE_BOUNDS)?;

    let result = stream(
        &controller,
        &mut surface,
        &mut run_loop,
        &view,
        limits,
        &interrupted,
    );
    controller.teardown(&mut surface, &mut run_loop);

    result
}

fn stream(
    controller: &ClockController,
    surface: &mut TextSurface,
    run_loop: &mut RunLoop<TextSurface>,
    view: &ConsoleClockView,
    limits: WatchLimits,
    interrupted: &AtomicBool,
) -> Result<()> {
    let deadline = limits.duration.map(|d| Instant::now() + d);
    let mut printed: u64 = 0;
    let mut pending = limits.count != Some(0);

    loop {
        if pending {
            view.print(&ClockViewModel::capture(controller, surface))?;
            printed += 1;
            pending = false;
        }

        if limits.count.is_some_and(|count| printed >= count)
            || interrupted.load(Ordering::SeqCst)
        {
            break;
        }

        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            break;
        }

        let mut wait = run_loop.time_until_next(now).unwrap_or(IDLE_WAIT);
        if let Some(d) = deadline {
            wait = wait.min(d.saturating_duration_since(now));
        }
        std::thread::sleep(wait);

        pending = run_loop.fire_due(Instant::now(), surface) > 0;
    }

    tracing::debug!(printed, "watch finished");
    Ok(())
}
