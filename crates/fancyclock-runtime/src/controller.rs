//! Clock Display Controller.
//!
//! Owns the formatters and region handles for one clock view and keeps the
//! regions' text current from a repeating timer on the host's run loop.
//!
//! ```text
//! Inactive --activate--> Active --teardown--> TornDown
//!     \___________________teardown_____________^
//! ```
//!
//! The timer callback holds only non-owning [`RegionHandle`]s. Each tick checks
//! that a region is still alive before writing to it, so a region detached by
//! the host (view dismissed) makes the tick a silent no-op for that region.

use fancyclock_types::{DisplayFormatter, FormatStyle, LocaleProfile, StyleConfig, Timestamp};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Clock;
use crate::layout::ClockLayout;
use crate::run_loop::{RunLoop, TimerHandle};
use crate::surface::{DisplaySurface, RegionFrame, RegionHandle};
use crate::{Error, Result};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub time_style: FormatStyle,
    pub date_style: FormatStyle,
    /// strftime pattern rendered into a single region instead of the two styles
    pub pattern: Option<String>,
    pub show_date: bool,
    pub locale: LocaleProfile,
    pub interval: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            time_style: FormatStyle::Medium,
            date_style: FormatStyle::Full,
            pattern: None,
            show_date: true,
            locale: LocaleProfile::default(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl ControllerOptions {
    /// One style configuration per region, in display order.
    pub fn style_configs(&self) -> Vec<StyleConfig> {
        if let Some(pattern) = &self.pattern {
            return vec![StyleConfig::pattern(pattern.clone())];
        }

        let mut configs = Vec::with_capacity(2);
        if !self.time_style.is_none() {
            configs.push(StyleConfig::time(self.time_style));
        }
        if self.show_date && !self.date_style.is_none() {
            configs.push(StyleConfig::date(self.date_style));
        }
        configs
    }
}

/// What a region shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRole {
    Time,
    Date,
    /// Output of a custom pattern
    Text,
}

impl RegionRole {
    pub fn of(config: &StyleConfig) -> Self {
        if config.pattern.is_some() {
            RegionRole::Text
        } else if !config.time.is_none() {
            RegionRole::Time
        } else {
            RegionRole::Date
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Inactive,
    Active,
    TornDown,
}

#[derive(Debug)]
struct Binding {
    formatter: DisplayFormatter,
    region: RegionHandle,
}

/// State shared between the controller and its timer callback.
#[derive(Debug, Default)]
struct TickState {
    bindings: Vec<Binding>,
    ticks: u64,
    last_tick_at: Option<Timestamp>,
}

impl TickState {
    fn tick<S: DisplaySurface>(&mut self, now: Timestamp, surface: &mut S) {
        self.ticks += 1;
        self.last_tick_at = Some(now);
        tracing::trace!(tick = self.ticks, "tick");

        for binding in &self.bindings {
            if !surface.is_alive(binding.region) {
                tracing::trace!(region = ?binding.region, "region released; skipping update");
                continue;
            }
            let text = binding.formatter.format(&now);
            surface.set_text(binding.region, &text);
        }
    }
}

pub struct ClockController {
    options: ControllerOptions,
    clock: Rc<dyn Clock>,
    state: ControllerState,
    shared: Rc<RefCell<TickState>>,
    timer: Option<TimerHandle>,
}

impl ClockController {
    pub fn new(options: ControllerOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            options,
            clock,
            state: ControllerState::Inactive,
            shared: Rc::new(RefCell::new(TickState::default())),
            timer: None,
        }
    }

    /// Build formatters, attach regions inside `bounds`, paint the first frame
    /// and start the repeating timer.
    pub fn activate<S>(
        &mut self,
        surface: &mut S,
        run_loop: &mut RunLoop<S>,
        bounds: RegionFrame,
    ) -> Result<()>
    where
        S: DisplaySurface + 'static,
    {
        if self.state != ControllerState::Inactive {
            return Err(Error::InvalidState(format!(
                "cannot activate a controller that is {:?}",
                self.state
            )));
        }

        let configs = self.options.style_configs();
        if configs.is_empty() {
            return Err(fancyclock_types::Error::InvalidStyle(
                "nothing to display: time style is 'none' and the date is hidden".to_string(),
            )
            .into());
        }
        let formatters = configs
            .iter()
            .map(|config| DisplayFormatter::new(config, &self.options.locale))
            .collect::<fancyclock_types::Result<Vec<_>>>()?;

        let frames = frames_for(bounds, formatters.len());
        let bindings: Vec<Binding> = formatters
            .into_iter()
            .zip(frames)
            .map(|(formatter, frame)| Binding {
                formatter,
                region: surface.attach(frame),
            })
            .collect();

        let shared = Rc::clone(&self.shared);
        let clock = Rc::clone(&self.clock);
        // First frame is painted below, before activate returns.
        let interval = self.options.interval;
        let timer = match run_loop.schedule_repeating(interval, false, move |surface: &mut S| {
            shared.borrow_mut().tick(clock.now(), surface);
        }) {
            Ok(timer) => timer,
            Err(err) => {
                for binding in &bindings {
                    surface.detach(binding.region);
                }
                return Err(err);
            }
        };

        {
            let mut shared = self.shared.borrow_mut();
            shared.bindings = bindings;
            shared.tick(self.clock.now(), surface);
        }

        self.timer = Some(timer);
        self.state = ControllerState::Active;
        tracing::debug!(
            locale = %self.options.locale,
            regions = self.shared.borrow().bindings.len(),
            interval_ms = self.options.interval.as_millis() as u64,
            "clock controller activated"
        );
        Ok(())
    }

    /// Reposition the regions for a new host area.
    pub fn relayout<S: DisplaySurface>(&mut self, surface: &mut S, bounds: RegionFrame) {
        if self.state != ControllerState::Active {
            return;
        }
        let shared = self.shared.borrow();
        let frames = frames_for(bounds, shared.bindings.len());
        for (binding, frame) in shared.bindings.iter().zip(frames) {
            surface.set_frame(binding.region, frame);
        }
    }

    /// Release anything that can be rebuilt on demand.
    pub fn did_receive_memory_warning(&mut self) {
        let mut shared = self.shared.borrow_mut();
        for binding in &mut shared.bindings {
            binding.formatter.release_cache();
        }
        tracing::debug!("formatter caches released");
    }

    /// Stop the timer and detach the regions. Safe to call more than once.
    pub fn teardown<S: DisplaySurface>(&mut self, surface: &mut S, run_loop: &mut RunLoop<S>) {
        if let Some(timer) = self.timer.take() {
            run_loop.invalidate(timer);
        }
        for binding in self.shared.borrow_mut().bindings.drain(..) {
            surface.detach(binding.region);
        }
        if self.state != ControllerState::TornDown {
            tracing::debug!(ticks = self.ticks(), "clock controller torn down");
        }
        self.state = ControllerState::TornDown;
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Number of refreshes so far, including the first paint.
    pub fn ticks(&self) -> u64 {
        self.shared.borrow().ticks
    }

    pub fn last_tick_at(&self) -> Option<Timestamp> {
        self.shared.borrow().last_tick_at
    }

    /// Region handles in display order (time first).
    pub fn regions(&self) -> Vec<RegionHandle> {
        self.shared
            .borrow()
            .bindings
            .iter()
            .map(|binding| binding.region)
            .collect()
    }

    /// Region handles paired with what each one shows, in display order.
    pub fn region_roles(&self) -> Vec<(RegionRole, RegionHandle)> {
        self.shared
            .borrow()
            .bindings
            .iter()
            .map(|binding| (RegionRole::of(binding.formatter.style()), binding.region))
            .collect()
    }

    /// Render `ts` with every configured formatter, in region order.
    pub fn render(&self, ts: &Timestamp) -> Vec<String> {
        self.shared
            .borrow()
            .bindings
            .iter()
            .map(|binding| binding.formatter.format(ts))
            .collect()
    }

    pub fn caches_warm(&self) -> bool {
        self.shared
            .borrow()
            .bindings
            .iter()
            .all(|binding| binding.formatter.is_cached())
    }
}

fn frames_for(bounds: RegionFrame, count: usize) -> Vec<RegionFrame> {
    let layout = ClockLayout::compute(bounds, count > 1);
    std::iter::once(layout.time)
        .chain(layout.date)
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};
    use crate::surface::TextSurface;
    use std::time::Instant;

    const BOUNDS: RegionFrame = RegionFrame::new(0, 0, 80, 24);

    fn monday_afternoon() -> Timestamp {
        Timestamp::from_parts(2017, 4, 24, 14, 5, 9, 0).unwrap()
    }

    fn manual() -> (Rc<ManualClock>, ClockController) {
        let clock = Rc::new(ManualClock::new(monday_afternoon()));
        let controller = ClockController::new(ControllerOptions::default(), clock.clone());
        (clock, controller)
    }

    #[test]
    fn test_activate_paints_both_regions() {
        let (_clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();

        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        assert_eq!(controller.state(), ControllerState::Active);
        assert_eq!(run_loop.timer_count(), 1);
        let regions = controller.regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(surface.text(regions[0]), Some("2:05:09 PM"));
        assert_eq!(surface.text(regions[1]), Some("Monday, April 24, 2017"));
        assert_eq!(controller.ticks(), 1);
    }

    #[test]
    fn test_tick_shows_timestamp_captured_in_same_tick() {
        let (clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        let mut now = Instant::now();
        for _ in 0..25 {
            clock.advance(100);
            now += DEFAULT_INTERVAL * 2;
            run_loop.fire_due(now, &mut surface);

            let captured = controller.last_tick_at().unwrap();
            assert_eq!(captured, clock.now());
            let expected = controller.render(&captured);
            let shown: Vec<String> = controller
                .regions()
                .into_iter()
                .map(|r| surface.text(r).unwrap().to_string())
                .collect();
            assert_eq!(shown, expected);
        }
        assert_eq!(controller.ticks(), 26);
        assert_eq!(surface.text(controller.regions()[0]), Some("2:05:11 PM"));
    }

    #[test]
    fn test_tick_after_region_released_is_noop() {
        let (clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        let regions = controller.regions();
        assert!(surface.detach(regions[0]));
        let revision = surface.revision();

        clock.advance(1000);
        run_loop.fire_due(Instant::now() + DEFAULT_INTERVAL * 2, &mut surface);

        assert_eq!(controller.ticks(), 2);
        assert_eq!(surface.text(regions[0]), None);
        // Only the date region was written.
        assert_eq!(surface.revision(), revision + 1);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_tick_after_every_region_released() {
        let (_clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        for region in controller.regions() {
            surface.detach(region);
        }
        let revision = surface.revision();
        run_loop.fire_due(Instant::now() + DEFAULT_INTERVAL * 2, &mut surface);
        assert_eq!(surface.revision(), revision);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_time_only() {
        let clock = Rc::new(ManualClock::new(monday_afternoon()));
        let options = ControllerOptions {
            show_date: false,
            ..ControllerOptions::default()
        };
        let mut controller = ClockController::new(options, clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        assert_eq!(controller.regions().len(), 1);
        let region = surface.region(controller.regions()[0]).unwrap();
        assert_eq!(region.frame, RegionFrame::new(0, 11, 80, 1));
    }

    #[test]
    fn test_region_roles_follow_styles() {
        let clock = Rc::new(ManualClock::new(monday_afternoon()));
        let options = ControllerOptions {
            time_style: FormatStyle::None,
            ..ControllerOptions::default()
        };
        let mut controller = ClockController::new(options, clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        let roles = controller.region_roles();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].0, RegionRole::Date);
        assert_eq!(surface.text(roles[0].1), Some("Monday, April 24, 2017"));

        let (_, mut both) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        both.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();
        let roles: Vec<RegionRole> = both.region_roles().into_iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![RegionRole::Time, RegionRole::Date]);
    }

    #[test]
    fn test_pattern_replaces_styles() {
        let clock = Rc::new(ManualClock::new(monday_afternoon()));
        let options = ControllerOptions {
            pattern: Some("%Y-%m-%d %H:%M:%S".to_string()),
            ..ControllerOptions::default()
        };
        let mut controller = ClockController::new(options, clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        let regions = controller.regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(surface.text(regions[0]), Some("2017-04-24 14:05:09"));
    }

    #[test]
    fn test_nothing_to_display_is_error() {
        let clock = Rc::new(SystemClock::new());
        let options = ControllerOptions {
            time_style: FormatStyle::None,
            show_date: false,
            ..ControllerOptions::default()
        };
        let mut controller = ClockController::new(options, clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();

        let err = controller
            .activate(&mut surface, &mut run_loop, BOUNDS)
            .unwrap_err();
        assert!(matches!(err, Error::Types(_)));
        assert_eq!(controller.state(), ControllerState::Inactive);
        assert!(surface.is_empty());
        assert_eq!(run_loop.timer_count(), 0);
    }

    #[test]
    fn test_invalid_interval_detaches_regions() {
        let clock = Rc::new(SystemClock::new());
        let options = ControllerOptions {
            interval: Duration::ZERO,
            ..ControllerOptions::default()
        };
        let mut controller = ClockController::new(options, clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();

        let err = controller
            .activate(&mut surface, &mut run_loop, BOUNDS)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInterval(_)));
        assert!(surface.is_empty());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let (_clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();

        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();
        assert!(matches!(
            controller.activate(&mut surface, &mut run_loop, BOUNDS),
            Err(Error::InvalidState(_))
        ));

        controller.teardown(&mut surface, &mut run_loop);
        assert_eq!(controller.state(), ControllerState::TornDown);
        assert_eq!(run_loop.timer_count(), 0);
        assert!(surface.is_empty());
        assert!(controller.regions().is_empty());

        controller.teardown(&mut surface, &mut run_loop);
        assert_eq!(controller.state(), ControllerState::TornDown);
        assert!(matches!(
            controller.activate(&mut surface, &mut run_loop, BOUNDS),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_teardown_before_activate() {
        let (_clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop: RunLoop<TextSurface> = RunLoop::new();
        controller.teardown(&mut surface, &mut run_loop);
        assert_eq!(controller.state(), ControllerState::TornDown);
    }

    #[test]
    fn test_memory_warning_keeps_display() {
        let (clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();
        assert!(controller.caches_warm());

        controller.did_receive_memory_warning();
        assert!(!controller.caches_warm());

        clock.advance(60_000);
        run_loop.fire_due(Instant::now() + DEFAULT_INTERVAL * 2, &mut surface);
        assert_eq!(surface.text(controller.regions()[0]), Some("2:06:09 PM"));
        assert!(controller.caches_warm());
    }

    #[test]
    fn test_relayout_moves_regions() {
        let (_clock, mut controller) = manual();
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        controller.relayout(&mut surface, RegionFrame::new(0, 0, 40, 10));
        let regions = controller.regions();
        assert_eq!(surface.region(regions[0]).unwrap().frame, RegionFrame::new(0, 3, 40, 1));
        assert_eq!(surface.region(regions[1]).unwrap().frame, RegionFrame::new(0, 5, 40, 1));
    }

    #[test]
    fn test_refreshes_within_350ms() {
        let clock = Rc::new(SystemClock::new());
        let mut controller = ClockController::new(ControllerOptions::default(), clock);
        let mut surface = TextSurface::new();
        let mut run_loop = RunLoop::new();
        controller.activate(&mut surface, &mut run_loop, BOUNDS).unwrap();

        let first = controller.last_tick_at().unwrap();
        run_loop.run_for(Duration::from_millis(350), &mut surface);

        assert!(
            controller.ticks() >= 3,
            "expected at least 3 refreshes, got {}",
            controller.ticks()
        );
        let last = controller.last_tick_at().unwrap();
        assert!(last > first);
        assert!(last.millis_since(&first) < 1_000);
    }
}
