//! Display surface and non-owning region handles.
//!
//! Regions live in generational slots. A [`RegionHandle`] names a slot and
//! the generation it was issued for; once the region is detached the slot's
//! generation moves on, so every outstanding handle reports dead and writes
//! through it are refused. Holding a handle never keeps a region alive.

use serde::Serialize;

/// Position and size of a region, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RegionFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl RegionFrame {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle {
    index: usize,
    generation: u32,
}

/// A rectangular area showing one line of text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Region {
    pub frame: RegionFrame,
    pub text: String,
}

/// What the controller needs from a host's visible surface.
pub trait DisplaySurface {
    fn attach(&mut self, frame: RegionFrame) -> RegionHandle;

    /// Remove a region. Returns false if it was already gone.
    fn detach(&mut self, handle: RegionHandle) -> bool;

    /// Replace a region's text. Returns false, with no effect, for a dead handle.
    fn set_text(&mut self, handle: RegionHandle, text: &str) -> bool;

    fn set_frame(&mut self, handle: RegionHandle, frame: RegionFrame) -> bool;

    fn is_alive(&self, handle: RegionHandle) -> bool;
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    region: Option<Region>,
}

/// In-memory surface that hosts paint from.
#[derive(Debug, Default)]
pub struct TextSurface {
    slots: Vec<Slot>,
    revision: u64,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alive regions in slot order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.slots.iter().filter_map(|slot| slot.region.as_ref())
    }

    pub fn region(&self, handle: RegionHandle) -> Option<&Region> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.region.as_ref())
    }

    pub fn text(&self, handle: RegionHandle) -> Option<&str> {
        self.region(handle).map(|region| region.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every successful text or frame change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn region_mut(&mut self, handle: RegionHandle) -> Option<&mut Region> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.region.as_mut())
    }
}

impl DisplaySurface for TextSurface {
    fn attach(&mut self, frame: RegionFrame) -> RegionHandle {
        let region = Region {
            frame,
            text: String::new(),
        };
        self.revision += 1;

        if let Some(index) = self.slots.iter().position(|slot| slot.region.is_none()) {
            let slot = &mut self.slots[index];
            slot.region = Some(region);
            return RegionHandle {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            region: Some(region),
        });
        RegionHandle {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    fn detach(&mut self, handle: RegionHandle) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation && slot.region.is_some())
        else {
            return false;
        };
        slot.region = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.revision += 1;
        true
    }

    fn set_text(&mut self, handle: RegionHandle, text: &str) -> bool {
        let Some(region) = self.region_mut(handle) else {
            return false;
        };
        if region.text != text {
            region.text.clear();
            region.text.push_str(text);
        }
        self.revision += 1;
        true
    }

    fn set_frame(&mut self, handle: RegionHandle, frame: RegionFrame) -> bool {
        let Some(region) = self.region_mut(handle) else {
            return false;
        };
        region.frame = frame;
        self.revision += 1;
        true
    }

    fn is_alive(&self, handle: RegionHandle) -> bool {
        self.region(handle).is_some()
    }
}
