use crate::presentation::view_models::ClockViewModel;
use crate::types::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{self, Write};

const SEPARATOR: &str = "  ";

/// Line-oriented clock output for pipes, scripts and non-interactive terminals.
pub struct ConsoleClockView {
    format: OutputFormat,
    color: bool,
}

impl ConsoleClockView {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn line(&self, vm: &ClockViewModel) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(vm)?),
            OutputFormat::Plain => Ok(self.plain_line(vm)),
        }
    }

    pub fn print(&self, vm: &ClockViewModel) -> Result<()> {
        let line = self.line(vm)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }

    fn plain_line(&self, vm: &ClockViewModel) -> String {
        if !self.color {
            return vm.lines().collect::<Vec<_>>().join(SEPARATOR);
        }

        let mut parts = Vec::with_capacity(2);
        if let Some(time) = &vm.time {
            parts.push(time.bold().to_string());
        }
        if let Some(date) = &vm.date {
            parts.push(date.dimmed().to_string());
        }
        if let Some(text) = &vm.text {
            parts.push(text.bold().to_string());
        }
        parts.join(SEPARATOR)
    }
}
