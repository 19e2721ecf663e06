//! Per-frame body transforms: self-rotation, revolution and parent-relative
//! placement.
//!
//! Rebuilt bodies use
//! `world = translate(parent_pos) * rotY(revolution) * translate(offset) * rotY(spin) * scale`
//! (roots drop the parent and revolution terms). Compounded bodies instead
//! fold a fresh rotation step into the matrix they already have.

use glam::{Mat4, Vec3};

use crate::api::config::RevolutionMode;
use crate::components::body::CelestialBody;
use crate::core::hierarchy::BodyGraph;
use crate::math;

/// How a single body advances this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Accumulate angles and rebuild the matrix from scratch.
    Rebuild,
    /// Fold spin (right) and revolution (left) steps into the existing matrix.
    Compound,
}

/// Pick the rule for `body` under `mode`. Compounding only applies to roots
/// and to bodies whose parent is a root; anything orbiting a moving parent is
/// always rebuilt so the parent's motion is not applied twice.
pub fn rule_for(body: &CelestialBody, graph: &BodyGraph, mode: RevolutionMode) -> BodyRule {
    match mode {
        RevolutionMode::Rebuild => BodyRule::Rebuild,
        RevolutionMode::Compound if body.is_root() || graph.orbits_root(body.id) => {
            BodyRule::Compound
        }
        RevolutionMode::Compound => BodyRule::Rebuild,
    }
}

/// World matrix from the body's current angles.
pub fn rebuild_world(body: &CelestialBody, parent_position: Option<Vec3>) -> Mat4 {
    let local = math::multiply(
        math::translation(body.orbit_offset),
        math::multiply(math::rotation_y(body.spin_angle), math::scale_uniform(body.scale)),
    );
    match parent_position {
        None => local,
        Some(parent) => math::multiply(
            math::translation(parent),
            math::multiply(math::rotation_y(body.revolution_angle), local),
        ),
    }
}

/// Fold one tick of spin and revolution into an existing world matrix.
///
/// Spin goes on the right so the body turns about its own origin. Revolution
/// goes on the left, pivoting about the parent's position on world +Y.
pub fn compound_step(world: Mat4, spin_deg: f32, revolution: Option<(Vec3, f32)>) -> Mat4 {
    let spun = math::multiply(world, math::rotation_y(spin_deg));
    match revolution {
        None => spun,
        Some((pivot, degrees)) => {
            let step = math::multiply(
                math::translation(pivot),
                math::multiply(math::rotation_y(degrees), math::translation(-pivot)),
            );
            math::multiply(step, spun)
        }
    }
}

/// Advance one body by `dt` seconds. The parent must already be updated.
fn step_body(body: &mut CelestialBody, parent_position: Option<Vec3>, rule: BodyRule, dt: f32) {
    match rule {
        BodyRule::Rebuild => {
            body.spin_angle = math::wrap_degrees(body.spin_angle + body.spin_rate * dt);
            if parent_position.is_some() {
                body.revolution_angle =
                    math::wrap_degrees(body.revolution_angle + body.revolution_rate * dt);
            }
            let world = rebuild_world(body, parent_position);
            body.set_world(world);
        }
        BodyRule::Compound => {
            let revolution = parent_position.map(|p| (p, body.revolution_rate * dt));
            let world = compound_step(*body.world(), body.spin_rate * dt, revolution);
            body.set_world(world);
        }
    }
}

/// Place every body at its rest pose (all angles as currently stored).
/// Called once at scene construction, in update order.
pub fn place_bodies(bodies: &mut [CelestialBody], graph: &BodyGraph) {
    for &id in graph.update_order() {
        let parent_position = bodies[id.index()]
            .parent
            .map(|p| bodies[p.index()].position());
        let body = &mut bodies[id.index()];
        let world = rebuild_world(body, parent_position);
        body.set_world(world);
    }
}

/// Advance every body by `dt` seconds in the graph's update order.
pub fn step_bodies(bodies: &mut [CelestialBody], graph: &BodyGraph, mode: RevolutionMode, dt: f32) {
    for &id in graph.update_order() {
        let parent_position = bodies[id.index()]
            .parent
            .map(|p| bodies[p.index()].position());
        let rule = rule_for(&bodies[id.index()], graph, mode);
        step_body(&mut bodies[id.index()], parent_position, rule, dt);
    }
}
