//! Scene setup shared by the locomotion benchmarks.

use glam::Vec3;
use rein_locomotion::physics::contact::{ContactManifold, ContactPoint};
use rein_locomotion::{
    BodyKind, Character, ContactTracker, HandIkConfig, HandTargetComponent, LocomotionConfig,
    ObjectId, PoseTargets, SimulatedBody, StraightLineNavigator, YawTurner,
};

pub const DT: f32 = 1.0 / 60.0;

/// A single character on open ground plus everything its tick needs.
pub struct Scene {
    pub body: SimulatedBody,
    pub turner: YawTurner,
    pub nav: StraightLineNavigator,
    pub pose: PoseTargets,
    pub character: Character,
}

impl Scene {
    pub fn new() -> anyhow::Result<Self> {
        let body = SimulatedBody::standing_at(Vec3::ZERO, 0.9);
        let character = Character::new(LocomotionConfig::default(), HandIkConfig::default(), &body)?;
        Ok(Self {
            body,
            turner: YawTurner::default(),
            nav: StraightLineNavigator::new(),
            pose: PoseTargets::default(),
            character,
        })
    }

    /// One host frame: movement, physics step, then animation.
    pub fn frame(&mut self) {
        self.character
            .tick_movement(&mut self.body, &self.nav, &mut self.turner, DT);
        self.body.rotation = self.turner.rotation();
        self.body.step(DT);
        self.character
            .evaluate_animation(&self.body, DT, &mut self.pose);
    }
}

/// Tracker holding `n` active contacts spread on a ring around the origin at hand height.
pub fn ring_contacts(n: usize) -> ContactTracker {
    let mut tracker = ContactTracker::new();
    for i in 0..n {
        let angle = i as f32 / n.max(1) as f32 * std::f32::consts::TAU;
        let point = Vec3::new(angle.sin() * 0.5, 1.0, angle.cos() * 0.5);
        let normal = -Vec3::new(point.x, 0.0, point.z).normalize_or_zero();
        tracker.on_contact_begin(ObjectId(i as u64), Some(&true), point, normal);
    }
    tracker
}

/// Drive `frames` frames of a walk toward `target` from a fresh scene.
pub fn run_walk(target: Vec3, frames: usize) -> anyhow::Result<Scene> {
    let mut scene = Scene::new()?;
    scene
        .character
        .move_to(target, &scene.body, &scene.nav)?;
    for _ in 0..frames {
        scene.frame();
    }
    Ok(scene)
}

/// World with a character and `n` static hand targets ringed around it, plus
/// the manifolds a physics step would report for all of them touching.
pub fn touching_world(n: usize) -> (hecs::World, hecs::Entity, Vec<ContactManifold>) {
    let mut world = hecs::World::new();
    let character = world.spawn((BodyKind::Dynamic,));
    let manifolds = (0..n)
        .map(|i| {
            let angle = i as f32 / n.max(1) as f32 * std::f32::consts::TAU;
            let point = Vec3::new(angle.sin() * 0.4, 1.0, angle.cos() * 0.4);
            let kind = if i % 4 == 0 {
                BodyKind::Kinematic
            } else {
                BodyKind::Static
            };
            let other = world.spawn((HandTargetComponent::active(), kind));
            ContactManifold {
                entity_a: character,
                entity_b: other,
                normal: Vec3::new(point.x, 0.0, point.z).normalize_or_zero(),
                contacts: vec![ContactPoint {
                    position: point,
                    penetration: 0.01,
                }],
            }
        })
        .collect();
    (world, character, manifolds)
}
