//! The stock solar system: one star, eight planets and earth's moon.
//!
//! Stylized, not physical. Distances are scene units from the sun, rates
//! are degrees per second of wall time.

use glam::Vec3;

use crate::api::config::BodyConfig;
use crate::api::types::{BodyKind, Shading};

/// Half-size of the skybox cube.
pub const SKYBOX_DISTANCE: f32 = 100.0;

pub const SUN_SCALE: f32 = 0.05;
/// The sun turns faster than anything else.
pub const SUN_SPIN_RATE: f32 = 60.0;
/// Every planet shares the same self-rotation rate.
pub const PLANET_SPIN_RATE: f32 = 25.0;

pub const MOON_SCALE: f32 = 0.006;
pub const MOON_REVOLUTION_RATE: f32 = 35.0;
/// Moon orbit offset from earth's center.
pub const MOON_OFFSET: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Per-planet layout (indexed in orbital order).
struct PlanetRow {
    name: &'static str,
    offset: Vec3,
    scale: f32,
    revolution_rate: f32,
}

const PLANETS: [PlanetRow; 8] = [
    PlanetRow {
        name: "mercury",
        offset: Vec3::new(4.0, 0.0, 0.0),
        scale: 0.007,
        revolution_rate: 45.0,
    },
    PlanetRow {
        name: "venus",
        offset: Vec3::new(0.0, 0.0, 6.0),
        scale: 0.01,
        revolution_rate: 35.0,
    },
    PlanetRow {
        name: "earth",
        offset: Vec3::new(9.0, 0.0, 0.0),
        scale: 0.01,
        revolution_rate: 25.0,
    },
    PlanetRow {
        name: "mars",
        offset: Vec3::new(0.0, 0.0, -12.0),
        scale: 0.007,
        revolution_rate: 20.0,
    },
    PlanetRow {
        name: "jupiter",
        offset: Vec3::new(-14.0, 0.0, 0.0),
        scale: 0.013,
        revolution_rate: 15.0,
    },
    PlanetRow {
        name: "saturn",
        offset: Vec3::new(0.0, 0.0, 16.0),
        scale: 0.011,
        revolution_rate: 10.0,
    },
    PlanetRow {
        name: "uranus",
        offset: Vec3::new(18.0, 0.0, 0.0),
        scale: 0.011,
        revolution_rate: 8.0,
    },
    PlanetRow {
        name: "neptune",
        offset: Vec3::new(0.0, 0.0, -20.0),
        scale: 0.011,
        revolution_rate: 5.0,
    },
];

/// Venus is drawn with its atmosphere texture.
fn planet_material(name: &str) -> &str {
    match name {
        "venus" => "venus_atmosphere",
        other => other,
    }
}

/// Bodies in declaration (and draw) order: sun, planets, with the moon
/// declared right after earth.
pub fn solar_system_bodies() -> Vec<BodyConfig> {
    let mut bodies = Vec::with_capacity(PLANETS.len() + 2);

    bodies.push(
        BodyConfig::new("sun", BodyKind::Star, SUN_SCALE)
            .with_spin(SUN_SPIN_RATE)
            .with_shading(Shading::Emissive),
    );

    for row in &PLANETS {
        bodies.push(
            BodyConfig::new(row.name, BodyKind::Planet, row.scale)
                .with_parent("sun")
                .with_offset(row.offset)
                .with_spin(PLANET_SPIN_RATE)
                .with_revolution(row.revolution_rate)
                .with_material(planet_material(row.name)),
        );

        if row.name == "earth" {
            bodies.push(
                BodyConfig::new("moon", BodyKind::Moon, MOON_SCALE)
                    .with_parent("earth")
                    .with_offset(MOON_OFFSET)
                    .with_revolution(MOON_REVOLUTION_RATE),
            );
        }
    }

    bodies
}
