//! Direct velocity control along a navigation path.

use glam::Vec3;

use super::{MotionEvent, MotionProgress, PathPlan};
use crate::config::LocomotionConfig;
use crate::error::NavigationError;
use crate::frame::{horizontal, move_towards};
use crate::interfaces::{CharacterBody, NavigationQuery, OrientationController};
use crate::orientation::ALIGNED_EPSILON;
use crate::physics::material::SurfaceFriction;

/// Collaborators borrowed for one movement tick.
pub struct MotionContext<'a> {
    pub body: &'a mut dyn CharacterBody,
    pub navigation: &'a dyn NavigationQuery,
    pub orientation: &'a mut dyn OrientationController,
    /// Hands currently holding an IK contact.
    pub active_hand_contacts: usize,
    /// Time since the previous tick (seconds).
    pub dt: f32,
}

/// Result of a `move_to` request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The target was within tolerance of the current destination.
    Ignored,
    /// A command is now heading for the resolved destination.
    Started { destination: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Following the path.
    Moving,
    /// Arrived; finishing the turn toward the last heading.
    Turning,
}

/// The in-flight command. Dropping it is how a command is cancelled.
#[derive(Debug, Clone)]
struct MotionCommand {
    phase: Phase,
    /// Last horizontal heading handed to the orientation controller.
    direction: Vec3,
    /// Horizontal velocity the controller is steering with.
    velocity: Vec3,
}

/// Drives the body's horizontal velocity toward the end of a path, one tick at a time.
///
/// Per tick while moving: the path is recomputed from the feet to the
/// destination, the remaining length updated, and either arrival is declared
/// (position snapped onto the final corner, horizontal velocity zeroed,
/// friction maxed) or the velocity is accelerated toward the next corner with
/// friction dropped to zero. After arrival the controller keeps turning toward
/// the last heading until the orientation controller reports alignment.
#[derive(Debug, Clone)]
pub struct DirectMotionController {
    config: LocomotionConfig,
    destination: Vec3,
    total_distance: f32,
    distance_remaining: f32,
    path: Option<PathPlan>,
    command: Option<MotionCommand>,
    completed: bool,
    events: Vec<MotionEvent>,
}

impl DirectMotionController {
    /// Create an idle controller whose destination is the body's current feet position.
    pub fn new(config: LocomotionConfig, body: &dyn CharacterBody) -> Self {
        let destination = body.position() - body.frame().up() * config.height_offset;
        Self {
            config,
            destination,
            total_distance: 0.0,
            distance_remaining: 0.0,
            path: None,
            command: None,
            completed: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Authoritative destination (the final corner of the last accepted path).
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Most recently computed path, kept for inspection after the command ends.
    pub fn path(&self) -> Option<&PathPlan> {
        self.path.as_ref()
    }

    /// Whether the last command ran to completion.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether the body has arrived and only the residual turn is left.
    pub fn is_settling(&self) -> bool {
        matches!(self.command, Some(MotionCommand { phase: Phase::Turning, .. }))
    }

    /// Take the notifications emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    fn feet(&self, body: &dyn CharacterBody) -> Vec3 {
        body.position() - body.frame().up() * self.config.height_offset
    }

    /// Request movement to `target`.
    ///
    /// Targets within `destination_tolerance` of the current destination are
    /// ignored. Otherwise any in-flight command is cancelled and a path is
    /// queried; on failure no command is started.
    pub fn move_to(
        &mut self,
        target: Vec3,
        body: &dyn CharacterBody,
        navigation: &dyn NavigationQuery,
    ) -> Result<MoveOutcome, NavigationError> {
        if target.distance(self.destination) <= self.config.destination_tolerance {
            return Ok(MoveOutcome::Ignored);
        }

        self.stop();

        let feet = self.feet(body);
        let plan = match navigation
            .find_path(feet, target)
            .and_then(PathPlan::new)
        {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(%err, ?target, "navigation error");
                self.events.push(MotionEvent::NavigationFailed(err.clone()));
                return Err(err);
            }
        };

        self.total_distance = plan.length();
        self.distance_remaining = plan.length();
        self.destination = plan.last();
        self.completed = false;
        self.path = Some(plan);
        self.command = Some(MotionCommand {
            phase: Phase::Moving,
            direction: Vec3::ZERO,
            velocity: horizontal(body.velocity()),
        });

        tracing::debug!(
            destination = ?self.destination,
            distance = self.total_distance,
            "move started"
        );
        self.events.push(MotionEvent::Started {
            destination: self.destination,
        });
        Ok(MoveOutcome::Started {
            destination: self.destination,
        })
    }

    /// Back away from a kinematic body that bumped into the character.
    pub fn recoil_from(
        &mut self,
        contact_point: Vec3,
        body: &dyn CharacterBody,
        navigation: &dyn NavigationQuery,
    ) -> Result<MoveOutcome, NavigationError> {
        let away = horizontal(body.position() - contact_point).normalize_or_zero();
        if away == Vec3::ZERO {
            return Ok(MoveOutcome::Ignored);
        }
        let target = self.feet(body) + away * self.config.recoil_distance;
        self.move_to(target, body, navigation)
    }

    /// Cancel any in-flight command and zero the distance readouts.
    pub fn stop(&mut self) {
        self.total_distance = 0.0;
        self.distance_remaining = 0.0;
        if self.command.take().is_some() {
            tracing::debug!("move cancelled");
            self.events.push(MotionEvent::Cancelled);
        }
    }

    /// Advance the in-flight command by one tick. No-op when idle.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>) {
        let Some(mut command) = self.command.take() else {
            return;
        };

        let keep = match command.phase {
            Phase::Moving => self.advance(&mut command, ctx),
            Phase::Turning => true,
        };
        if !keep {
            return;
        }

        if command.phase == Phase::Turning {
            let remaining_turn = ctx.orientation.turn_toward(command.direction, ctx.dt);
            if remaining_turn <= ALIGNED_EPSILON {
                tracing::debug!("move completed");
                self.completed = true;
                self.events.push(MotionEvent::Completed);
                return;
            }
        }

        self.command = Some(command);
    }

    /// One path-following step. Returns false when the command was aborted.
    fn advance(&mut self, command: &mut MotionCommand, ctx: &mut MotionContext<'_>) -> bool {
        let feet = self.feet(&*ctx.body);
        let plan = match ctx
            .navigation
            .find_path(feet, self.destination)
            .and_then(PathPlan::new)
        {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(%err, destination = ?self.destination, "navigation error");
                self.events.push(MotionEvent::NavigationFailed(err));
                return false;
            }
        };

        self.distance_remaining = plan.length();
        let velocity = ctx.body.velocity();

        if velocity.length() * ctx.dt >= self.distance_remaining {
            ctx.body.set_friction(SurfaceFriction::GRIPPING);
            self.distance_remaining = 0.0;

            let goal = plan.last();
            let mut position = ctx.body.position();
            position.x = goal.x;
            position.z = goal.z;
            ctx.body.set_position(position);
            ctx.body.set_velocity(Vec3::new(0.0, velocity.y, 0.0));

            command.phase = Phase::Turning;
            tracing::debug!(?position, "arrived");
            self.events.push(MotionEvent::Arrived { position });
        } else {
            ctx.body.set_friction(SurfaceFriction::SLIDING);

            let direction = horizontal(plan.next_corner() - feet).normalize_or_zero();
            command.direction = direction;
            ctx.orientation.turn_toward(direction, ctx.dt);

            // Hands braced on a surface: follow what physics actually did.
            if ctx.active_hand_contacts > 0 {
                command.velocity = horizontal(velocity);
            }

            let factor = (self.distance_remaining / self.config.slowdown_radius)
                .clamp(self.config.min_speed_factor, 1.0);
            let target_velocity = direction * self.config.speed * factor;
            command.velocity = move_towards(
                command.velocity,
                target_velocity,
                self.config.acceleration * ctx.dt,
            );

            ctx.body.set_velocity(Vec3::new(
                command.velocity.x,
                velocity.y,
                command.velocity.z,
            ));
            tracing::trace!(
                remaining = self.distance_remaining,
                velocity = ?command.velocity,
                "moving"
            );
        }

        self.path = Some(plan);
        true
    }
}

impl MotionProgress for DirectMotionController {
    fn is_in_progress(&self) -> bool {
        self.command.is_some()
    }

    fn total_distance(&self) -> f32 {
        self.total_distance
    }

    fn distance_remaining(&self) -> f32 {
        self.distance_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Aabb, StraightLineNavigator};
    use crate::orientation::YawTurner;
    use crate::physics::body::SimulatedBody;
    use std::cell::Cell;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        body: SimulatedBody,
        turner: YawTurner,
        controller: DirectMotionController,
    }

    impl Rig {
        fn new() -> Self {
            let body = SimulatedBody::standing_at(Vec3::ZERO, 0.9);
            let controller = DirectMotionController::new(LocomotionConfig::default(), &body);
            Self {
                body,
                turner: YawTurner::default(),
                controller,
            }
        }

        fn tick(&mut self, navigation: &dyn NavigationQuery, hands: usize) {
            let mut ctx = MotionContext {
                body: &mut self.body,
                navigation,
                orientation: &mut self.turner,
                active_hand_contacts: hands,
                dt: DT,
            };
            self.controller.tick(&mut ctx);
            self.body.rotation = self.turner.rotation();
            self.body.step(DT);
        }
    }

    /// Straight-line navigator that can be switched off mid-run.
    struct Flaky {
        inner: StraightLineNavigator,
        up: Cell<bool>,
    }

    impl NavigationQuery for Flaky {
        fn find_path(&self, from: Vec3, to: Vec3) -> Result<Vec<Vec3>, NavigationError> {
            if self.up.get() {
                self.inner.find_path(from, to)
            } else {
                Err(NavigationError::NoRoute { from, to })
            }
        }
    }

    #[test]
    fn test_straight_path_arrives_exactly() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();

        let outcome = rig
            .controller
            .move_to(Vec3::new(10.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Started {
                destination: Vec3::new(10.0, 0.0, 0.0)
            }
        );
        assert!(rig.controller.is_in_progress());
        assert_eq!(rig.controller.total_distance(), 10.0);

        let mut last_remaining = rig.controller.distance_remaining();
        let mut arrival_friction = None;
        let mut ticks = 0;
        while rig.controller.is_in_progress() {
            let was_settling = rig.controller.is_settling();
            rig.tick(&nav, 0);
            ticks += 1;
            assert!(ticks < 2_000, "controller never arrived");

            let c = &rig.controller;
            assert!(c.distance_remaining() <= last_remaining + 1e-4);
            assert!(
                (c.distance_traveled() + c.distance_remaining() - c.total_distance()).abs() < 1e-4
            );
            last_remaining = c.distance_remaining();

            if !was_settling && arrival_friction.is_none() && c.distance_remaining() == 0.0 {
                arrival_friction = Some(rig.body.friction);
            }
        }

        assert_eq!(rig.body.position.x, 10.0);
        assert!(rig.body.position.z.abs() < 1e-4);
        assert_eq!(arrival_friction, Some(SurfaceFriction::GRIPPING));
        assert!(rig.controller.is_complete());
        assert_eq!(rig.controller.distance_rate(), 1.0);

        let events = rig.controller.drain_events();
        assert!(matches!(events.first(), Some(MotionEvent::Started { .. })));
        assert!(events.iter().any(|e| matches!(e, MotionEvent::Arrived { .. })));
        assert_eq!(events.last(), Some(&MotionEvent::Completed));
    }

    #[test]
    fn test_turns_before_completing() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();
        rig.turner.turn_rate = 0.5;
        // Short hop to the side: arrives long before the slow turn finishes.
        rig.controller
            .move_to(Vec3::new(0.3, 0.0, 0.0), &rig.body, &nav)
            .unwrap();

        let mut settled_ticks = 0;
        for _ in 0..2_000 {
            if !rig.controller.is_in_progress() {
                break;
            }
            if rig.controller.is_settling() {
                settled_ticks += 1;
            }
            rig.tick(&nav, 0);
        }
        assert!(settled_ticks > 0);
        assert!(rig.controller.is_complete());
        assert!((rig.turner.forward() - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn test_near_duplicate_target_is_ignored() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();

        // Current destination is the feet position.
        let outcome = rig
            .controller
            .move_to(Vec3::new(0.1, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert!(!rig.controller.is_in_progress());

        rig.controller
            .move_to(Vec3::new(5.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        rig.tick(&nav, 0);
        let destination = rig.controller.destination();
        let outcome = rig
            .controller
            .move_to(Vec3::new(5.0, 0.0, 0.1), &rig.body, &nav)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(rig.controller.destination(), destination);
        assert!(rig.controller.is_in_progress());
    }

    #[test]
    fn test_new_target_redirects() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();
        rig.controller
            .move_to(Vec3::new(5.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        for _ in 0..30 {
            rig.tick(&nav, 0);
        }
        rig.controller.drain_events();

        rig.controller
            .move_to(Vec3::new(0.0, 0.0, 5.0), &rig.body, &nav)
            .unwrap();
        assert!(rig.controller.is_in_progress());
        assert_eq!(rig.controller.destination(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(
            rig.controller.drain_events(),
            vec![
                MotionEvent::Cancelled,
                MotionEvent::Started {
                    destination: Vec3::new(0.0, 0.0, 5.0)
                }
            ]
        );
    }

    #[test]
    fn test_destination_snaps_to_clipped_path() {
        let nav = StraightLineNavigator::with_bounds(Aabb::new(
            Vec3::new(-4.0, -1.0, -4.0),
            Vec3::new(4.0, 1.0, 4.0),
        ));
        let mut rig = Rig::new();
        rig.controller
            .move_to(Vec3::new(10.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        assert_eq!(rig.controller.destination(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(rig.controller.total_distance(), 4.0);
    }

    #[test]
    fn test_stop_mid_command() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();
        rig.controller
            .move_to(Vec3::new(10.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        for _ in 0..20 {
            rig.tick(&nav, 0);
        }

        rig.controller.stop();
        assert!(!rig.controller.is_in_progress());
        assert_eq!(rig.controller.total_distance(), 0.0);
        assert_eq!(rig.controller.distance_remaining(), 0.0);
        assert_eq!(rig.controller.distance_rate(), 0.0);
        assert!(!rig.controller.is_complete());

        rig.controller.stop();
        let cancels = rig
            .controller
            .drain_events()
            .into_iter()
            .filter(|e| *e == MotionEvent::Cancelled)
            .count();
        assert_eq!(cancels, 1);

        // A stopped controller ignores ticks.
        let velocity = rig.body.linear_velocity;
        let mut ctx = MotionContext {
            body: &mut rig.body,
            navigation: &nav,
            orientation: &mut rig.turner,
            active_hand_contacts: 0,
            dt: DT,
        };
        rig.controller.tick(&mut ctx);
        assert_eq!(rig.body.linear_velocity, velocity);
    }

    #[test]
    fn test_failed_query_does_not_start() {
        let nav = Flaky {
            inner: StraightLineNavigator::new(),
            up: Cell::new(false),
        };
        let mut rig = Rig::new();
        let result = rig
            .controller
            .move_to(Vec3::new(10.0, 0.0, 0.0), &rig.body, &nav);
        assert!(result.is_err());
        assert!(!rig.controller.is_in_progress());
        assert!(matches!(
            rig.controller.drain_events().as_slice(),
            [MotionEvent::NavigationFailed(NavigationError::NoRoute { .. })]
        ));
    }

    #[test]
    fn test_failure_mid_traversal_aborts() {
        let nav = Flaky {
            inner: StraightLineNavigator::new(),
            up: Cell::new(true),
        };
        let mut rig = Rig::new();
        rig.controller
            .move_to(Vec3::new(10.0, 0.0, 0.0), &rig.body, &nav)
            .unwrap();
        for _ in 0..20 {
            rig.tick(&nav, 0);
        }
        let remaining = rig.controller.distance_remaining();

        nav.up.set(false);
        rig.tick(&nav, 0);
        assert!(!rig.controller.is_in_progress());
        assert!(!rig.controller.is_complete());
        assert_eq!(rig.controller.distance_remaining(), remaining);
        assert!(rig
            .controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, MotionEvent::NavigationFailed(_))));

        // No automatic retry.
        nav.up.set(true);
        rig.tick(&nav, 0);
        assert!(!rig.controller.is_in_progress());
    }

    #[test]
    fn test_hand_contacts_resample_velocity() {
        let nav = StraightLineNavigator::new();
        let target = Vec3::new(10.0, 0.0, 0.0);

        let mut free = Rig::new();
        let mut braced = Rig::new();
        for rig in [&mut free, &mut braced] {
            rig.controller.move_to(target, &rig.body, &nav).unwrap();
            rig.tick(&nav, 0);
            // Something shoves the body sideways.
            rig.body.linear_velocity.z = 2.0;
        }

        free.tick(&nav, 0);
        braced.tick(&nav, 1);

        // Without braced hands the controller keeps its own baseline and overrides the shove.
        assert!(free.body.linear_velocity.z.abs() < 1e-5);
        // With braced hands it continues from the shoved velocity.
        assert!(braced.body.linear_velocity.z > 1.5);
    }

    #[test]
    fn test_recoil_moves_away_from_contact() {
        let nav = StraightLineNavigator::new();
        let mut rig = Rig::new();
        let outcome = rig
            .controller
            .recoil_from(Vec3::new(0.5, 1.0, 0.0), &rig.body, &nav)
            .unwrap();
        match outcome {
            MoveOutcome::Started { destination } => {
                assert!((destination - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
            }
            MoveOutcome::Ignored => panic!("recoil should start a command"),
        }
    }
}
