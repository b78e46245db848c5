//! Drives a ClockController against a host-defined surface through the
//! public API only.

use fancyclock_runtime::{
    Clock, ClockController, ControllerOptions, ControllerState, DisplaySurface, ManualClock, RegionFrame,
    RegionHandle, RunLoop, TextSurface,
};
use fancyclock_types::{FormatStyle, LocaleProfile, Timestamp};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Surface that keeps a log of every accepted write and can drop regions
/// behind the controller's back.
#[derive(Default)]
struct RecordingSurface {
    inner: TextSurface,
    writes: Vec<(RegionHandle, String)>,
    frames: HashMap<RegionHandle, RegionFrame>,
}

impl RecordingSurface {
    fn texts_at_write(&self, n: usize) -> &str {
        &self.writes[n].1
    }

    fn drop_region(&mut self, handle: RegionHandle) {
        self.inner.detach(handle);
    }
}

impl DisplaySurface for RecordingSurface {
    fn attach(&mut self, frame: RegionFrame) -> RegionHandle {
        let handle = self.inner.attach(frame);
        self.frames.insert(handle, frame);
        handle
    }

    fn detach(&mut self, handle: RegionHandle) -> bool {
        self.inner.detach(handle)
    }

    fn set_text(&mut self, handle: RegionHandle, text: &str) -> bool {
        let accepted = self.inner.set_text(handle, text);
        if accepted {
            self.writes.push((handle, text.to_string()));
        }
        accepted
    }

    fn set_frame(&mut self, handle: RegionHandle, frame: RegionFrame) -> bool {
        let accepted = self.inner.set_frame(handle, frame);
        if accepted {
            self.frames.insert(handle, frame);
        }
        accepted
    }

    fn is_alive(&self, handle: RegionHandle) -> bool {
        self.inner.is_alive(handle)
    }
}

const BOUNDS: RegionFrame = RegionFrame::new(0, 0, 40, 9);

fn start() -> Timestamp {
    Timestamp::parse_rfc3339("2017-04-24T23:59:59.950+00:00").unwrap()
}

fn options(locale: &str) -> ControllerOptions {
    ControllerOptions {
        locale: LocaleProfile::from_name(locale).unwrap(),
        interval: Duration::from_millis(50),
        ..ControllerOptions::default()
    }
}

/// Fire the controller's timer exactly once.
fn fire_once(run_loop: &mut RunLoop<RecordingSurface>, surface: &mut RecordingSurface) -> usize {
    let deadline = run_loop.next_deadline().unwrap();
    run_loop.fire_due(deadline.max(Instant::now()), surface)
}

#[test]
fn test_regions_stay_on_the_same_instant_across_midnight() {
    let clock = Rc::new(ManualClock::new(start()));
    let mut controller = ClockController::new(options("en_US"), clock.clone());
    let mut surface = RecordingSurface::default();
    let mut run_loop = RunLoop::new();

    controller
        .activate(&mut surface, &mut run_loop, BOUNDS)
        .unwrap();
    assert_eq!(surface.texts_at_write(0), "11:59:59 PM");
    assert_eq!(surface.texts_at_write(1), "Monday, April 24, 2017");

    clock.advance(50);
    assert_eq!(fire_once(&mut run_loop, &mut surface), 1);

    // Both regions flip together: no "12:00:00 AM" next to Monday.
    assert_eq!(surface.texts_at_write(2), "12:00:00 AM");
    assert_eq!(surface.texts_at_write(3), "Tuesday, April 25, 2017");
    assert_eq!(controller.ticks(), 2);
    assert_eq!(controller.last_tick_at(), Some(clock.now()));

    controller.teardown(&mut surface, &mut run_loop);
}

#[test]
fn test_dropped_region_is_skipped_without_error() {
    let clock = Rc::new(ManualClock::new(start()));
    let mut controller = ClockController::new(options("en_GB"), clock.clone());
    let mut surface = RecordingSurface::default();
    let mut run_loop = RunLoop::new();

    controller
        .activate(&mut surface, &mut run_loop, BOUNDS)
        .unwrap();
    let regions = controller.regions();
    assert_eq!(regions.len(), 2);

    surface.drop_region(regions[1]);
    let before = surface.writes.len();

    clock.advance(1_000);
    fire_once(&mut run_loop, &mut surface);

    let new_writes = &surface.writes[before..];
    assert_eq!(new_writes.len(), 1);
    assert_eq!(new_writes[0].0, regions[0]);
    assert_eq!(controller.state(), ControllerState::Active);
    assert_eq!(controller.ticks(), 2);

    controller.teardown(&mut surface, &mut run_loop);
    assert_eq!(run_loop.timer_count(), 0);
    assert!(surface.inner.is_empty());
}

#[test]
fn test_relayout_moves_regions_inside_new_bounds() {
    let clock = Rc::new(ManualClock::new(start()));
    let mut controller = ClockController::new(options("en_US"), clock);
    let mut surface = RecordingSurface::default();
    let mut run_loop = RunLoop::new();

    controller
        .activate(&mut surface, &mut run_loop, BOUNDS)
        .unwrap();

    let wide = RegionFrame::new(0, 0, 120, 30);
    controller.relayout(&mut surface, wide);

    for handle in controller.regions() {
        let frame = surface.frames[&handle];
        assert!(frame.x + frame.width <= wide.width);
        assert!(frame.y + frame.height <= wide.height);
        assert!(frame.y > BOUNDS.height / 2);
    }

    controller.teardown(&mut surface, &mut run_loop);
}

#[test]
fn test_teardown_stops_further_writes() {
    let clock = Rc::new(ManualClock::new(start()));
    let mut controller = ClockController::new(
        ControllerOptions {
            time_style: FormatStyle::Short,
            show_date: false,
            ..options("en_US")
        },
        clock.clone(),
    );
    let mut surface = RecordingSurface::default();
    let mut run_loop = RunLoop::new();

    controller
        .activate(&mut surface, &mut run_loop, BOUNDS)
        .unwrap();
    assert_eq!(surface.writes.len(), 1);
    assert_eq!(surface.texts_at_write(0), "11:59 PM");

    controller.teardown(&mut surface, &mut run_loop);
    controller.teardown(&mut surface, &mut run_loop);
    assert_eq!(controller.state(), ControllerState::TornDown);

    clock.advance(60_000);
    let fired = run_loop.fire_due(Instant::now() + Duration::from_secs(1), &mut surface);
    assert_eq!(fired, 0);
    assert_eq!(surface.writes.len(), 1);
}
