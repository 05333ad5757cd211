use stride_anim::{AnimationBlender, AnimationSignal, AnimationSink};
use stride_camera::{CameraRig, CameraState};
use stride_common::{ActorId, GroundProbe, Integrator, RigidBody};
use stride_input::{DeviceSource, InputSampler, MovementInput};
use stride_locomotion::{LocomotionController, LocomotionEvent, MovementState, TickOutcome};

/// What happened during one call to [`ActorCoordinator::frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Fixed locomotion steps run this frame.
    pub fixed_steps: u32,
    pub state: MovementState,
    pub grounded: bool,
    pub interacting: bool,
    pub signal: AnimationSignal,
    /// Transition requests forwarded to the animation layer.
    pub events: Vec<LocomotionEvent>,
}

/// One playable actor and its per-frame phase schedule.
///
/// Collaborators are injected through [`crate::ActorBuilder`]; the
/// physics integrator is borrowed per frame so a host world can step
/// several actors.
#[derive(Debug)]
pub struct ActorCoordinator<B, G, A, D> {
    id: ActorId,
    fixed_step: f32,
    accumulator: f64,
    body: B,
    probe: G,
    sink: A,
    source: D,
    sampler: InputSampler,
    input: MovementInput,
    camera: CameraRig,
    controller: LocomotionController,
    blender: AnimationBlender,
    interacting: bool,
    signal: AnimationSignal,
}

impl<B, G, A, D> ActorCoordinator<B, G, A, D>
where
    B: RigidBody,
    G: GroundProbe,
    A: AnimationSink,
    D: DeviceSource,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        id: ActorId,
        fixed_step: f32,
        body: B,
        probe: G,
        sink: A,
        source: D,
        camera: CameraRig,
        controller: LocomotionController,
        blender: AnimationBlender,
    ) -> Self {
        Self {
            id,
            fixed_step,
            accumulator: 0.0,
            body,
            probe,
            sink,
            source,
            sampler: InputSampler::new(),
            input: MovementInput::NEUTRAL,
            camera,
            controller,
            blender,
            interacting: false,
            signal: AnimationSignal::default(),
        }
    }

    /// Run one presentation frame of `dt` seconds.
    ///
    /// Fixed steps run as many times as the accumulated time allows; the
    /// remainder carries into the next frame.
    pub fn frame<I>(&mut self, dt: f32, integrator: &mut I) -> FrameReport
    where
        I: Integrator<B> + ?Sized,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.sample_input();
        self.update_camera(dt);

        let step = f64::from(self.fixed_step);
        self.accumulator += f64::from(dt);
        let mut fixed_steps = 0;
        while self.accumulator >= step {
            self.accumulator -= step;
            self.integrate_locomotion(self.fixed_step, integrator);
            fixed_steps += 1;
        }

        let events = self.reconcile_animation_state(dt);
        FrameReport {
            fixed_steps,
            state: self.controller.state(),
            grounded: self.controller.is_grounded(),
            interacting: self.interacting,
            signal: self.signal,
            events,
        }
    }

    /// Poll the device and fold in any jump the previous frame never
    /// reached a fixed step to consume.
    pub fn sample_input(&mut self) -> MovementInput {
        let _span = tracing::trace_span!("sample_input", actor = %self.id.short()).entered();
        let mut sampled = self.sampler.sample(&mut self.source);
        sampled.carry_jump_from(&self.input);
        if sampled.toggle_cursor_lock {
            self.camera.toggle_cursor_lock();
        }
        self.input = sampled;
        sampled
    }

    pub fn update_camera(&mut self, dt: f32) -> CameraState {
        let _span = tracing::trace_span!("update_camera", actor = %self.id.short()).entered();
        self.camera.update(self.input.look, self.body.position(), dt)
    }

    /// One fixed step: locomotion writes the body, then the host integrates it.
    pub fn integrate_locomotion<I>(&mut self, dt: f32, integrator: &mut I) -> TickOutcome
    where
        I: Integrator<B> + ?Sized,
    {
        let _span = tracing::trace_span!("integrate_locomotion", actor = %self.id.short()).entered();
        let previous = self.controller.state();
        let outcome = self.controller.fixed_update(
            &mut self.body,
            &self.probe,
            &mut self.input,
            self.camera.basis(),
            self.interacting,
            dt,
        );
        integrator.integrate(&mut self.body, dt);
        if outcome.state != previous {
            tracing::debug!(actor = %self.id.short(), from = ?previous, to = ?outcome.state, "movement state changed");
        }
        outcome
    }

    /// Forward transition requests, publish blend parameters and adopt the
    /// animation layer's confirmed flags.
    pub fn reconcile_animation_state(&mut self, dt: f32) -> Vec<LocomotionEvent> {
        let _span =
            tracing::trace_span!("reconcile_animation_state", actor = %self.id.short()).entered();
        self.sink.update(dt);

        let events = self.controller.drain_events();
        for &event in &events {
            self.blender.request(event, &mut self.sink);
        }

        let signal = self
            .blender
            .blend(0.0, self.input.move_amount(), self.input.is_sprinting(), dt)
            .with_grounded(self.controller.is_grounded());
        self.blender.publish(&signal, &mut self.sink);

        let feedback = self.blender.observe(&self.sink);
        self.controller.reconcile(feedback);
        if feedback.is_interacting != self.interacting {
            tracing::debug!(actor = %self.id.short(), interacting = feedback.is_interacting, "interaction lock changed");
        }
        self.interacting = feedback.is_interacting;
        self.signal = AnimationSignal {
            is_interacting: feedback.is_interacting,
            is_jumping: feedback.is_jumping,
            ..signal
        };
        events
    }

    /// Start a non-movement animation (an attack, say). The lock engages
    /// once the animation layer confirms it at the end of the frame.
    pub fn play_target_animation(&mut self, name: &str, interacting: bool) {
        self.blender.play_target_animation(&mut self.sink, name, interacting);
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn state(&self) -> MovementState {
        self.controller.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// The signal published on the last reconcile.
    pub fn signal(&self) -> AnimationSignal {
        self.signal
    }

    pub fn input(&self) -> MovementInput {
        self.input
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Vec2, Vec3};
    use stride_anim::{SimulatedAnimator, param, state};
    use stride_common::RigidBody;
    use stride_input::{Action, ActionSource, DeviceFrame, ScriptedSource};
    use stride_kernel::{Ground, GroundPatch, SandboxWorld, SimBody};

    use super::*;
    use crate::ActorBuilder;
    use crate::config::ActorConfig;

    const DT: f32 = 1.0 / 50.0;

    type Actor<D> = ActorCoordinator<SimBody, Arc<Ground>, SimulatedAnimator, D>;

    fn spawn<D: DeviceSource>(world: &SandboxWorld, position: Vec3, source: D) -> Actor<D> {
        ActorBuilder::new()
            .config(ActorConfig::default())
            .rigid_body(SimBody::new(position))
            .ground_probe(world.ground())
            .animation_sink(SimulatedAnimator::new())
            .input_source(source)
            .build()
            .unwrap()
    }

    fn forward(amount: f32) -> DeviceFrame {
        DeviceFrame {
            movement: Vec2::new(0.0, amount),
            ..Default::default()
        }
    }

    #[test]
    fn idle_actor_does_not_drift() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(DeviceFrame::default(), 200));
        for _ in 0..200 {
            let report = actor.frame(DT, &mut world);
            assert_eq!(report.fixed_steps, 1);
            assert_eq!(report.state, MovementState::Grounded);
            assert!(report.events.is_empty());
        }
        assert_eq!(actor.body().position(), Vec3::ZERO);
    }

    #[test]
    fn input_gaps_degrade_to_standing_still() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().gap(30));
        for _ in 0..30 {
            actor.frame(DT, &mut world);
        }
        assert_eq!(actor.body().position(), Vec3::ZERO);
        assert!(actor.is_grounded());
    }

    #[test]
    fn walking_forward_moves_along_camera_forward() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(forward(1.0), 50));
        for _ in 0..50 {
            actor.frame(DT, &mut world);
        }
        let p = actor.body().position();
        // One second at running speed, camera looking down -Z.
        assert!((p.z + 5.0).abs() < 0.2, "{p}");
        assert!(p.x.abs() < 1e-4);
        assert_eq!(p.y, 0.0);
        assert!(actor.is_grounded());
        assert_eq!(actor.signal().target_vertical, 1.0);
    }

    #[test]
    fn sprint_publishes_sentinel() {
        let mut world = SandboxWorld::flat(50.0);
        let frame = DeviceFrame {
            sprint: true,
            ..forward(1.0)
        };
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(frame, 10));
        for _ in 0..10 {
            actor.frame(DT, &mut world);
        }
        assert!(actor.controller().is_sprinting());
        assert_eq!(actor.signal().target_vertical, 2.0);
        assert_eq!(actor.sink().float(param::VERTICAL), Some(actor.signal().vertical));
    }

    #[test]
    fn jump_requests_confirms_and_lands() {
        let mut world = SandboxWorld::flat(50.0);
        let press = DeviceFrame {
            jump_held: true,
            ..Default::default()
        };
        let script = ScriptedSource::new()
            .hold(press, 1)
            .hold(DeviceFrame::default(), 300);
        let mut actor = spawn(&world, Vec3::ZERO, script);

        let first = actor.frame(DT, &mut world);
        assert_eq!(first.events, vec![LocomotionEvent::Jumped]);
        assert_eq!(first.state, MovementState::Airborne);
        assert!(first.signal.is_jumping);
        assert!(!first.interacting);
        assert!(actor.controller().jump_in_progress());

        let mut seen = first.events;
        let mut peak = 0.0_f32;
        for _ in 0..300 {
            let report = actor.frame(DT, &mut world);
            peak = peak.max(actor.body().position().y);
            seen.extend(report.events);
            if report.grounded && !report.interacting {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                LocomotionEvent::Jumped,
                LocomotionEvent::StartedFalling,
                LocomotionEvent::Landed
            ]
        );
        assert!(peak > 2.0 && peak < 4.5, "peak {peak}");
        assert_eq!(actor.body().position().y, 0.0);
        assert!(actor.is_grounded());
        let fades: Vec<&str> = actor.sink().history().iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(fades, vec![state::JUMP, state::FALLING, state::LANDING]);
    }

    #[test]
    fn jump_latched_until_a_fixed_step_runs() {
        let mut world = SandboxWorld::flat(50.0);
        let mut source = ActionSource::new();
        source.push(Action::Jump(true));
        source.push(Action::Jump(false));
        let mut actor = spawn(&world, Vec3::ZERO, source);

        // Too short for a fixed step.
        let report = actor.frame(DT * 0.4, &mut world);
        assert_eq!(report.fixed_steps, 0);
        assert!(actor.input().jump_requested());

        let report = actor.frame(DT * 0.7, &mut world);
        assert_eq!(report.fixed_steps, 1);
        assert_eq!(report.events, vec![LocomotionEvent::Jumped]);
        assert!(!actor.input().jump_requested());
    }

    #[test]
    fn jump_while_airborne_is_dropped() {
        let mut ground = Ground::new();
        ground.add_patch(GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 0.0));
        let mut world = SandboxWorld::new(ground);
        let mut actor = spawn(&world, Vec3::new(0.0, 10.0, 0.0), ActionSource::new());

        let report = actor.frame(DT, &mut world);
        assert_eq!(report.state, MovementState::Airborne);

        actor.source_mut().push(Action::Jump(true));
        let report = actor.frame(DT, &mut world);
        assert!(!report.events.contains(&LocomotionEvent::Jumped));
        assert!(!actor.input().jump_requested());
        assert_eq!(report.state, MovementState::Airborne);
    }

    #[test]
    fn walking_off_a_ledge_falls_then_lands() {
        let mut ground = Ground::new();
        ground.add_patch(GroundPatch::new(Vec2::new(-5.0, -1.0), Vec2::new(5.0, 5.0), 2.0));
        ground.add_patch(GroundPatch::new(Vec2::splat(-50.0), Vec2::splat(50.0), 0.0));
        let mut world = SandboxWorld::new(ground);
        let mut actor = spawn(
            &world,
            Vec3::new(0.0, 2.0, 0.0),
            ScriptedSource::new().hold(forward(1.0), 400),
        );

        let mut seen = Vec::new();
        for _ in 0..400 {
            let report = actor.frame(DT, &mut world);
            seen.extend(report.events);
            if seen.contains(&LocomotionEvent::Landed) {
                break;
            }
        }
        assert_eq!(seen, vec![LocomotionEvent::StartedFalling, LocomotionEvent::Landed]);
        assert!(actor.body().position().z < -1.0);
        assert!(actor.body().position().y.abs() < 1e-3);
        assert!(actor.is_interacting());
    }

    #[test]
    fn interaction_lock_freezes_horizontal_movement() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(forward(1.0), 30));
        actor.play_target_animation("Attack", true);

        // The lock is adopted at the end of the first frame.
        actor.frame(DT, &mut world);
        assert!(actor.is_interacting());
        let before = actor.body().position();

        for _ in 0..10 {
            actor.frame(DT, &mut world);
        }
        let after = actor.body().position();
        assert_eq!(after.x, before.x);
        assert_eq!(after.z, before.z);
        assert!(actor.is_grounded());

        // Attack is an unknown clip: the simulated animator ends it after 0.5 s.
        for _ in 0..20 {
            actor.frame(DT, &mut world);
        }
        assert!(!actor.is_interacting());
        assert!(actor.body().position().z < after.z);
    }

    #[test]
    fn attack_mid_run_stops_the_actor() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(forward(1.0), 30));
        for _ in 0..10 {
            actor.frame(DT, &mut world);
        }
        assert!(actor.body().velocity().z < -4.0);

        actor.play_target_animation("Attack", true);
        actor.frame(DT, &mut world);
        assert!(actor.is_interacting());
        let before = actor.body().position();

        for _ in 0..10 {
            let report = actor.frame(DT, &mut world);
            assert!(report.interacting);
        }
        let after = actor.body().position();
        assert_eq!((after.x, after.z), (before.x, before.z));
        assert_eq!(actor.body().velocity().z, 0.0);
    }

    #[test]
    fn cursor_toggle_reaches_camera() {
        let mut world = SandboxWorld::flat(50.0);
        let mut source = ActionSource::new();
        source.push(Action::ToggleCursorLock);
        let mut actor = spawn(&world, Vec3::ZERO, source);
        assert!(actor.camera().cursor_locked());
        actor.frame(DT, &mut world);
        assert!(!actor.camera().cursor_locked());
    }

    #[test]
    fn long_frame_runs_several_fixed_steps() {
        let mut world = SandboxWorld::flat(50.0);
        let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new());
        let report = actor.frame(DT * 3.5, &mut world);
        assert_eq!(report.fixed_steps, 3);
        let report = actor.frame(DT * 0.5, &mut world);
        assert_eq!(report.fixed_steps, 1);
        assert_eq!(world.tick(), 4);
    }

    #[test]
    fn identical_runs_hash_identically() {
        let run = || {
            let mut world = SandboxWorld::flat(50.0);
            let frame = DeviceFrame {
                movement: Vec2::new(0.6, 0.8),
                look: Vec2::new(0.3, 0.0),
                ..Default::default()
            };
            let mut actor = spawn(&world, Vec3::ZERO, ScriptedSource::new().hold(frame, 120));
            for _ in 0..120 {
                actor.frame(1.0 / 60.0, &mut world);
            }
            world.state_hash(actor.body())
        };
        assert_eq!(run(), run());
    }
}
