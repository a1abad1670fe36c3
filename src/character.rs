//! Per-character aggregate tying motion, contacts and hand IK together.
//!
//! A host frame runs, in order:
//!
//! 1. [`Character::tick_movement`] before the physics step,
//! 2. the host physics step,
//! 3. contact callbacks into [`Character::contacts_mut`] and
//!    [`Character::on_body_collision`],
//! 4. [`Character::evaluate_animation`] once physics has settled.

use glam::Vec3;

use crate::animation::LocomotionAnimationBridge;
use crate::config::{HandIkConfig, LocomotionConfig};
use crate::contact::ContactTracker;
use crate::error::{ConfigError, NavigationError};
use crate::ik::{HandAssignments, HandPlacementCoordinator};
use crate::interfaces::{AnimationBackend, CharacterBody, NavigationQuery, OrientationController};
use crate::motion::{
    DirectMotionController, MotionContext, MotionEvent, MotionProgress, MoveOutcome,
};
use crate::physics::body::BodyKind;

/// An unexpected collision between the character body and another body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCollision {
    /// World-space contact point.
    pub point: Vec3,
    /// Rigid body type of the other object.
    pub kind: BodyKind,
}

/// One locomotion-driven, hand-IK-enabled character.
#[derive(Debug)]
pub struct Character {
    motion: DirectMotionController,
    contacts: ContactTracker,
    hands: HandPlacementCoordinator,
    bridge: LocomotionAnimationBridge,
}

impl Character {
    pub fn new(
        locomotion: LocomotionConfig,
        hand_ik: HandIkConfig,
        body: &dyn CharacterBody,
    ) -> Result<Self, ConfigError> {
        locomotion.validate()?;
        hand_ik.validate()?;

        let bridge = LocomotionAnimationBridge::new(locomotion.speed_fade_radius);
        Ok(Self {
            motion: DirectMotionController::new(locomotion, body),
            contacts: ContactTracker::new(),
            hands: HandPlacementCoordinator::new(hand_ik),
            bridge,
        })
    }

    pub fn motion(&self) -> &DirectMotionController {
        &self.motion
    }

    pub fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    /// Feed contact begin/persist/end callbacks here.
    pub fn contacts_mut(&mut self) -> &mut ContactTracker {
        &mut self.contacts
    }

    pub fn hands(&self) -> &HandPlacementCoordinator {
        &self.hands
    }

    /// Assigned and unassigned hand contacts, for UI and debug views.
    pub fn hand_assignments(&self) -> HandAssignments {
        self.hands.assignments(&self.contacts)
    }

    pub fn move_to(
        &mut self,
        target: Vec3,
        body: &dyn CharacterBody,
        navigation: &dyn NavigationQuery,
    ) -> Result<MoveOutcome, NavigationError> {
        self.motion.move_to(target, body, navigation)
    }

    pub fn stop(&mut self) {
        self.motion.stop();
    }

    pub fn drain_motion_events(&mut self) -> Vec<MotionEvent> {
        self.motion.drain_events()
    }

    /// React to a collision that began this step; kinematic bodies push the character away.
    pub fn on_body_collision(
        &mut self,
        collision: BodyCollision,
        body: &dyn CharacterBody,
        navigation: &dyn NavigationQuery,
    ) -> Result<MoveOutcome, NavigationError> {
        if collision.kind != BodyKind::Kinematic {
            return Ok(MoveOutcome::Ignored);
        }
        self.motion.recoil_from(collision.point, body, navigation)
    }

    /// Movement progression for this tick. Runs before the physics step.
    pub fn tick_movement(
        &mut self,
        body: &mut dyn CharacterBody,
        navigation: &dyn NavigationQuery,
        orientation: &mut dyn OrientationController,
        dt: f32,
    ) {
        let mut ctx = MotionContext {
            body,
            navigation,
            orientation,
            active_hand_contacts: self.hands.assigned_count(),
            dt,
        };
        self.motion.tick(&mut ctx);
    }

    /// Hand IK and speed parameter for this tick. Runs after the physics step.
    pub fn evaluate_animation(
        &mut self,
        body: &dyn CharacterBody,
        dt: f32,
        backend: &mut dyn AnimationBackend,
    ) {
        let frame = body.frame();
        self.hands.evaluate(&self.contacts, &frame, dt, backend);
        self.bridge.push(body.velocity(), &self.motion, backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PoseTargets;
    use crate::contact::ObjectId;
    use crate::interfaces::{HandTarget, Limb};
    use crate::navigation::StraightLineNavigator;
    use crate::orientation::YawTurner;
    use crate::physics::body::SimulatedBody;

    const DT: f32 = 1.0 / 60.0;
    const ACTIVE: Option<&dyn HandTarget> = Some(&true);

    struct Scene {
        body: SimulatedBody,
        turner: YawTurner,
        nav: StraightLineNavigator,
        pose: PoseTargets,
        character: Character,
    }

    impl Scene {
        fn new() -> Self {
            let body = SimulatedBody::standing_at(Vec3::ZERO, 0.9);
            let character =
                Character::new(LocomotionConfig::default(), HandIkConfig::default(), &body).unwrap();
            Self {
                body,
                turner: YawTurner::default(),
                nav: StraightLineNavigator::new(),
                pose: PoseTargets::default(),
                character,
            }
        }

        fn frame(&mut self) {
            self.character
                .tick_movement(&mut self.body, &self.nav, &mut self.turner, DT);
            self.body.rotation = self.turner.rotation();
            self.body.step(DT);
            self.character
                .evaluate_animation(&self.body, DT, &mut self.pose);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let body = SimulatedBody::standing_at(Vec3::ZERO, 0.9);
        let result = Character::new(
            LocomotionConfig::default().with_acceleration(-1.0),
            HandIkConfig::default(),
            &body,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_walk_reports_speed_then_settles() {
        let mut scene = Scene::new();
        scene
            .character
            .move_to(Vec3::new(10.0, 0.0, 0.0), &scene.body, &scene.nav)
            .unwrap();

        let mut peak: f32 = 0.0;
        for _ in 0..1_000 {
            scene.frame();
            peak = peak.max(scene.pose.speed);
            if !scene.character.motion().is_in_progress() {
                break;
            }
        }
        assert!(peak > 2.5, "peak speed parameter {peak}");
        assert!(!scene.character.motion().is_in_progress());
        assert_eq!(scene.pose.speed, 0.0);
        assert_eq!(scene.body.position.x, 10.0);
    }

    #[test]
    fn test_hands_reach_for_contacts_while_walking() {
        let mut scene = Scene::new();
        scene
            .character
            .move_to(Vec3::new(0.0, 0.0, 10.0), &scene.body, &scene.nav)
            .unwrap();
        for _ in 0..30 {
            scene.frame();
        }

        // A rail on the right-hand side, slightly ahead.
        let rail = scene.body.position + Vec3::new(0.35, 0.0, 0.3);
        scene
            .character
            .contacts_mut()
            .on_contact_begin(ObjectId(9), ACTIVE, rail, Vec3::NEG_X);
        scene.frame();

        let assignments = scene.character.hand_assignments();
        assert!(assignments.right.is_some());
        assert!(assignments.left.is_none());
        assert!(scene.pose.limb(Limb::Right).weight > 0.0);
        assert_eq!(scene.pose.limb(Limb::Left).weight, 0.0);

        scene.character.contacts_mut().on_contact_end(ObjectId(9));
        for _ in 0..60 {
            scene.frame();
        }
        assert_eq!(scene.character.hand_assignments(), HandAssignments::default());
        assert_eq!(scene.pose.limb(Limb::Right).weight, 0.0);
    }

    #[test]
    fn test_kinematic_collision_recoils() {
        let mut scene = Scene::new();
        let hit = BodyCollision {
            point: Vec3::new(0.0, 1.0, 0.4),
            kind: BodyKind::Kinematic,
        };
        let outcome = scene
            .character
            .on_body_collision(hit, &scene.body, &scene.nav)
            .unwrap();
        assert!(matches!(outcome, MoveOutcome::Started { .. }));
        assert!((scene.character.motion().destination() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let wall = BodyCollision {
            point: Vec3::new(0.0, 1.0, 0.4),
            kind: BodyKind::Static,
        };
        let mut other = Scene::new();
        let outcome = other
            .character
            .on_body_collision(wall, &other.body, &other.nav)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
    }

    #[test]
    fn test_stop_resets_progress() {
        let mut scene = Scene::new();
        scene
            .character
            .move_to(Vec3::new(10.0, 0.0, 0.0), &scene.body, &scene.nav)
            .unwrap();
        for _ in 0..10 {
            scene.frame();
        }
        scene.character.stop();
        let motion = scene.character.motion();
        assert!(!motion.is_in_progress());
        assert_eq!(motion.total_distance(), 0.0);
        assert_eq!(motion.distance_remaining(), 0.0);
    }
}
