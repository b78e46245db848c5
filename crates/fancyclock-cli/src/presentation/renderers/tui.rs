//! Full-screen clock.
//!
//! The renderer is the host for the clock controller: it owns the surface
//! and the run loop, waits on terminal input for at most the time until the
//! next timer deadline, then fires due timers and repaints when the surface
//! changed.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fancyclock_runtime::{ClockController, RegionFrame, RegionRole, RunLoop, TextSurface};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

/// Poll timeout when no timer is registered.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct TuiClockRenderer {
    controller: ClockController,
    surface: TextSurface,
    run_loop: RunLoop<TextSurface>,
    footer: String,
    should_quit: bool,
    interrupted: Arc<AtomicBool>,
}

impl TuiClockRenderer {
    pub fn new(controller: ClockController, footer: String, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            controller,
            surface: TextSurface::new(),
            run_loop: RunLoop::new(),
            footer,
            should_quit: false,
            interrupted,
        }
    }

    pub fn run(mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);
        self.controller
            .teardown(&mut self.surface, &mut self.run_loop);

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let size = terminal.size()?;
        self.controller.activate(
            &mut self.surface,
            &mut self.run_loop,
            clock_bounds(size.width, size.height),
        )?;

        let mut drawn_revision = None;
        loop {
            if drawn_revision != Some(self.surface.revision()) {
                terminal.draw(|f| self.render(f))?;
                drawn_revision = Some(self.surface.revision());
            }

            let timeout = self
                .run_loop
                .time_until_next(Instant::now())
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key_event(key),
                    Event::Resize(width, height) => {
                        self.controller
                            .relayout(&mut self.surface, clock_bounds(width, height));
                        drawn_revision = None;
                    }
                    _ => {}
                }
            }

            self.run_loop.fire_due(Instant::now(), &mut self.surface);

            if self.should_quit || self.interrupted.load(Ordering::SeqCst) {
                break;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn render(&self, f: &mut Frame) {
        let area = f.area();

        for (role, handle) in self.controller.region_roles() {
            let Some(region) = self.surface.region(handle) else {
                continue;
            };
            let frame = region.frame;
            let rect = Rect::new(frame.x, frame.y, frame.width, frame.height).intersection(area);
            if rect.is_empty() {
                continue;
            }

            let style = region_style(role);
            let paragraph = Paragraph::new(region.text.as_str())
                .style(style)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, rect);
        }

        if area.height > 0 {
            let footer_rect = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let footer = Paragraph::new(self.footer.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(footer, footer_rect);
        }
    }
}

/// Time (or pattern output) stands out; the date sits quieter below it.
fn region_style(role: RegionRole) -> Style {
    match role {
        RegionRole::Time | RegionRole::Text => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RegionRole::Date => Style::default().fg(Color::Gray),
    }
}

/// Host area for the clock: the whole screen minus the footer row.
pub fn clock_bounds(width: u16, height: u16) -> RegionFrame {
    RegionFrame::new(0, 0, width, height.saturating_sub(1))
}
