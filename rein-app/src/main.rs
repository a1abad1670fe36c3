//! Headless walkthrough: a character crosses a yard, brushes a handrail and
//! gets shoved by a sliding door.
//!
//! Run with `RUST_LOG=debug` to see the library's own tracing output.

use glam::Vec3;
use rein_locomotion::physics::contact::{ContactManifold, ContactPoint};
use rein_locomotion::{
    BodyKind, Character, ContactLifecycle, HandIkConfig, HandTargetComponent, Limb,
    LocomotionConfig, MotionEvent, MotionProgress, PoseTargets, SimulatedBody,
    StraightLineNavigator, YawTurner,
};

const DT: f32 = 1.0 / 60.0;
const BODY_RADIUS: f32 = 0.35;
const HAND_HEIGHT: f32 = 1.0;

/// Axis-aligned box obstacle.
#[derive(Debug, Clone, Copy)]
struct BoxCollider {
    center: Vec3,
    half_extents: Vec3,
}

/// Constant velocity for kinematic obstacles.
#[derive(Debug, Clone, Copy)]
struct Sweep(Vec3);

/// Sphere-vs-box test at hand height; the normal points from the character into the obstacle.
fn probe(
    character: hecs::Entity,
    feet: Vec3,
    other: hecs::Entity,
    collider: &BoxCollider,
) -> Option<ContactManifold> {
    let center = feet + Vec3::Y * HAND_HEIGHT;
    let closest = center.clamp(
        collider.center - collider.half_extents,
        collider.center + collider.half_extents,
    );
    let offset = closest - center;
    let distance = offset.length();
    if distance > BODY_RADIUS {
        return None;
    }
    Some(ContactManifold {
        entity_a: character,
        entity_b: other,
        normal: offset.normalize_or(Vec3::Z),
        contacts: vec![ContactPoint {
            position: closest,
            penetration: BODY_RADIUS - distance,
        }],
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut world = hecs::World::new();
    let player = world.spawn((BodyKind::Dynamic,));
    world.spawn((
        BoxCollider {
            center: Vec3::new(0.35, 1.0, 4.0),
            half_extents: Vec3::new(0.05, 0.05, 2.0),
        },
        HandTargetComponent::active(),
        BodyKind::Static,
    ));
    world.spawn((
        BoxCollider {
            center: Vec3::new(-0.7, 1.0, 9.0),
            half_extents: Vec3::new(0.5, 1.0, 0.1),
        },
        Sweep(Vec3::new(0.2, 0.0, 0.0)),
        BodyKind::Kinematic,
    ));

    let mut body = SimulatedBody::standing_at(Vec3::ZERO, 0.9);
    let mut turner = YawTurner::default();
    let nav = StraightLineNavigator::new();
    let mut pose = PoseTargets::default();
    let mut lifecycle = ContactLifecycle::new();
    let mut character = Character::new(LocomotionConfig::default(), HandIkConfig::default(), &body)?;

    character.move_to(Vec3::new(0.0, 0.0, 12.0), &body, &nav)?;

    for frame in 0..60 * 20 {
        character.tick_movement(&mut body, &nav, &mut turner, DT);
        body.rotation = turner.rotation();
        body.step(DT);

        for (_, (collider, sweep)) in world.query_mut::<(&mut BoxCollider, &Sweep)>() {
            collider.center += sweep.0 * DT;
        }

        let feet = body.feet();
        let manifolds: Vec<ContactManifold> = world
            .query::<&BoxCollider>()
            .iter()
            .filter_map(|(entity, collider)| probe(player, feet, entity, collider))
            .collect();
        let began = lifecycle.dispatch(player, &manifolds, &world, character.contacts_mut());
        for collision in began {
            log::info!("frame {frame}: {:?} body hit at {}", collision.kind, collision.point);
            character.on_body_collision(collision, &body, &nav)?;
        }

        character.evaluate_animation(&body, DT, &mut pose);

        for event in character.drain_motion_events() {
            log::info!("frame {frame}: {event:?}");
            if let MotionEvent::NavigationFailed(err) = event {
                return Err(err.into());
            }
        }

        if frame % 30 == 0 {
            let right = pose.limb(Limb::Right);
            let left = pose.limb(Limb::Left);
            log::info!(
                "frame {frame}: pos={:.2} speed={:.2} remaining={:.2} hands R={:.2} L={:.2}",
                body.position,
                pose.speed,
                character.motion().distance_remaining(),
                right.weight,
                left.weight,
            );
        }

        if !character.motion().is_in_progress() && character.hands().assigned_count() == 0 {
            log::info!("frame {frame}: settled at {:.2}", body.position);
            break;
        }
    }

    Ok(())
}
