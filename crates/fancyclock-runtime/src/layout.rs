use crate::surface::RegionFrame;

/// Empty rows between the time and date regions.
const GAP_ROWS: u16 = 1;

/// Frames for the clock's regions inside a host area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockLayout {
    pub time: RegionFrame,
    pub date: Option<RegionFrame>,
}

impl ClockLayout {
    /// Centre a one-row time region in `bounds`, with the date region (when
    /// `with_date`) one gap row below it. Rows that fall outside `bounds`
    /// collapse to zero height.
    pub fn compute(bounds: RegionFrame, with_date: bool) -> Self {
        let block_height = if with_date { 2 + GAP_ROWS } else { 1 };
        let top = bounds
            .y
            .saturating_add(bounds.height.saturating_sub(block_height) / 2);

        let time = row(bounds, top);
        let date = with_date.then(|| row(bounds, top.saturating_add(1 + GAP_ROWS)));

        Self { time, date }
    }
}

fn row(bounds: RegionFrame, y: u16) -> RegionFrame {
    let bottom = bounds.y.saturating_add(bounds.height);
    let height = if y < bottom { 1 } else { 0 };
    RegionFrame::new(bounds.x, y.min(bottom), bounds.width, height)
}
