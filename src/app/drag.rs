use eframe::egui::Vec2;

use super::sim::Simulation;

/// Energy floor held while at least one drag is in flight. Keeps the
/// layout relaxing around the pinned bubble instead of freezing mid-drag.
pub const DRAG_ENERGY_FLOOR: f32 = 0.03;

/// Translates pointer gestures into pin updates and energy-floor changes.
/// The in-flight count means only the first concurrent drag raises the
/// floor and only the last one lowers it.
#[derive(Default)]
pub struct DragController {
    active: usize,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_started(&mut self, sim: &mut Simulation, index: usize, pointer: Vec2) {
        if self.active == 0 {
            sim.set_floor(DRAG_ENERGY_FLOOR);
        }
        self.active += 1;
        sim.pin(index, pointer);
    }

    pub fn drag_moved(&self, sim: &mut Simulation, index: usize, pointer: Vec2) {
        sim.pin(index, pointer);
    }

    /// The floor drops back to zero once the last drag ends, so the
    /// layout can actually re-settle afterwards.
    pub fn drag_ended(&mut self, sim: &mut Simulation, index: usize) {
        sim.unpin(index);
        self.active = self.active.saturating_sub(1);
        if self.active == 0 {
            sim.set_floor(0.0);
        }
    }
}
