use eframe::egui::{Vec2, vec2};

use super::Node;

pub(super) const CENTER_STRENGTH: f32 = 0.05;
pub(super) const CHARGE_STRENGTH: f32 = 0.1;
pub(super) const COLLISION_STRENGTH: f32 = 0.2;
pub(super) const COLLISION_PADDING: f32 = 3.0;

/// Floor on pair distances before any inverse-distance term.
const MIN_DISTANCE: f32 = 1.0;

/// Unit direction from `b` to `a` and the floored distance between them.
/// Coincident pairs get a deterministic direction derived from their
/// indices, so a fresh layout (every node at the center) unfolds the same
/// way each run.
fn separation(a: Vec2, b: Vec2, from: usize, to: usize) -> (Vec2, f32) {
    let delta = a - b;
    let distance = delta.length();
    if distance > 0.0001 {
        (delta / distance, distance.max(MIN_DISTANCE))
    } else {
        let angle =
            ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
        (vec2(angle.cos(), angle.sin()), MIN_DISTANCE)
    }
}

/// Pulls every node toward the layout center, proportional to its
/// displacement and the remaining energy.
pub(super) fn apply_centering(nodes: &mut [Node], center: Vec2, energy: f32) {
    for node in nodes {
        node.velocity += (center - node.position) * CENTER_STRENGTH * energy;
    }
}

/// Pairwise charge in the many-body convention where a positive strength
/// pulls nodes together. The strength is deliberately weak so the bubbles
/// cluster instead of scattering.
pub(super) fn apply_charge(nodes: &mut [Node], energy: f32) {
    for from in 0..nodes.len() {
        for to in (from + 1)..nodes.len() {
            let (direction, distance) =
                separation(nodes[from].position, nodes[to].position, from, to);
            let pull = direction * (CHARGE_STRENGTH * energy / (distance * distance));
            nodes[from].velocity -= pull;
            nodes[to].velocity += pull;
        }
    }
}

/// One relaxation pass keeping circles (padded by 3 px each) apart. The
/// push is split between the pair by relative radius squared, so small
/// bubbles yield to large ones. A single pass per step means deep
/// overlaps resolve over several steps rather than instantly.
pub(super) fn apply_collision(nodes: &mut [Node]) {
    for from in 0..nodes.len() {
        for to in (from + 1)..nodes.len() {
            let (direction, distance) =
                separation(nodes[from].position, nodes[to].position, from, to);

            let min_distance =
                nodes[from].radius + nodes[to].radius + (2.0 * COLLISION_PADDING);
            if distance >= min_distance {
                continue;
            }

            let push = (min_distance - distance) * COLLISION_STRENGTH;
            let from_sq = nodes[from].radius * nodes[from].radius;
            let to_sq = nodes[to].radius * nodes[to].radius;
            let share = to_sq / (from_sq + to_sq);

            nodes[from].velocity += direction * (push * share);
            nodes[to].velocity -= direction * (push * (1.0 - share));
        }
    }
}
