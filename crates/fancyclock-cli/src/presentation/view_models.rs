use fancyclock_runtime::{ClockController, RegionRole, TextSurface};
use fancyclock_types::Timestamp;
use serde::Serialize;

/// What one refresh put on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Custom-pattern output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub tick: u64,
    pub captured_at: Option<Timestamp>,
}

impl ClockViewModel {
    /// Read the controller's regions back off the surface. Regions that are
    /// gone are left empty.
    pub fn capture(controller: &ClockController, surface: &TextSurface) -> Self {
        let mut vm = Self {
            time: None,
            date: None,
            text: None,
            tick: controller.ticks(),
            captured_at: controller.last_tick_at(),
        };

        for (role, region) in controller.region_roles() {
            let Some(shown) = surface.text(region).map(str::to_string) else {
                continue;
            };
            let field = match role {
                RegionRole::Time => &mut vm.time,
                RegionRole::Date => &mut vm.date,
                RegionRole::Text => &mut vm.text,
            };
            *field = Some(shown);
        }

        vm
    }

    /// Displayed strings in region order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [&self.time, &self.date, &self.text]
            .into_iter()
            .filter_map(|s| s.as_deref())
    }
}
