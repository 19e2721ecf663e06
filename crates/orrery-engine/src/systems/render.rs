use glam::{Mat4, Vec3};

use crate::api::types::{BodyKind, MaterialId, Shading};
use crate::components::body::CelestialBody;
use crate::renderer::frame::{DrawItem, Frame};
use crate::renderer::instance::{DrawBuffer, DrawInstance};

/// Fill `frame.draws`: skybox faces first (point-lit like the planets), then
/// bodies in declaration order. Sets `frame.skybox_count`.
pub fn collect_draws(skybox: &[(MaterialId, Mat4)], bodies: &[CelestialBody], frame: &mut Frame) {
    frame.draws.clear();
    frame.draws.extend(skybox.iter().map(|(material, world)| DrawItem {
        world: *world,
        material: *material,
        shading: Shading::Lit,
    }));
    frame.skybox_count = frame.draws.len();
    frame.draws.extend(bodies.iter().map(|body| DrawItem {
        world: *body.world(),
        material: body.material,
        shading: body.shading,
    }));
}

/// Light source position: the first root star, else the first root, else
/// the origin.
pub fn light_position(bodies: &[CelestialBody]) -> Vec3 {
    bodies
        .iter()
        .find(|b| b.is_root() && b.kind == BodyKind::Star)
        .or_else(|| bodies.iter().find(|b| b.is_root()))
        .map(CelestialBody::position)
        .unwrap_or(Vec3::ZERO)
}

/// Pack a frame's draw list into the wire-format buffer.
pub fn build_draw_buffer(frame: &Frame, buffer: &mut DrawBuffer) {
    buffer.clear();
    for (i, item) in frame.draws.iter().enumerate() {
        if i == frame.skybox_count {
            buffer.mark_body_start();
        }
        buffer.push(DrawInstance::new(&item.world, item.material, item.shading));
    }
    if frame.draws.len() == frame.skybox_count {
        buffer.mark_body_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;

    fn bodies() -> Vec<CelestialBody> {
        vec![
            CelestialBody::new(BodyId(0), "sun", BodyKind::Star, 0.05)
                .with_material(MaterialId(6), Shading::Emissive),
            CelestialBody::new(BodyId(1), "earth", BodyKind::Planet, 0.01)
                .with_parent(BodyId(0))
                .with_material(MaterialId(7), Shading::Lit),
        ]
    }

    #[test]
    fn skybox_draws_come_first() {
        let sky = vec![(MaterialId(0), Mat4::IDENTITY), (MaterialId(1), Mat4::IDENTITY)];
        let mut frame = Frame::default();
        collect_draws(&sky, &bodies(), &mut frame);
        assert_eq!(frame.draws.len(), 4);
        assert_eq!(frame.skybox_count, 2);
        assert!(frame.skybox_draws().iter().all(|d| d.shading == Shading::Lit));
        assert_eq!(frame.body_draws()[0].material, MaterialId(6));
        assert_eq!(frame.body_draws()[1].shading, Shading::Lit);
    }

    #[test]
    fn draw_buffer_marks_body_start() {
        let sky = vec![(MaterialId(0), Mat4::IDENTITY)];
        let mut frame = Frame::default();
        collect_draws(&sky, &bodies(), &mut frame);
        let mut buf = DrawBuffer::new();
        build_draw_buffer(&frame, &mut buf);
        assert_eq!(buf.instance_count(), 3);
        assert_eq!(buf.body_start, 1);
        assert_eq!(buf.instances[1].material, 6.0);

        collect_draws(&sky, &[], &mut frame);
        build_draw_buffer(&frame, &mut buf);
        assert_eq!(buf.body_start, 1);
    }

    #[test]
    fn light_follows_root_star() {
        let mut list = bodies();
        list[0].set_world(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(light_position(&list), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(light_position(&list[1..]), Vec3::ZERO);
    }
}
