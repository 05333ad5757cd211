use glam::Vec3;
use stride_common::{CameraBasis, ConfigError, GroundProbe, RigidBody, facing_toward};
use stride_input::MovementInput;

use crate::params::{LocomotionParameters, RUN_THRESHOLD};
use crate::state::{AnimationFeedback, LocomotionEvent, MovementState};

/// Window over which a moving landing eases onto the ground height.
pub const LANDING_BLEND_TIME: f32 = 0.1;

/// Summary of one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// State at the start of the tick.
    pub previous: MovementState,
    /// The tick passed through `Jumping` (an impulse fired).
    pub jumped: bool,
    /// State at the end of the tick.
    pub state: MovementState,
}

/// Fixed-step movement state machine for one actor.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    params: LocomotionParameters,
    state: MovementState,
    air_timer: f32,
    falling: bool,
    jump_in_progress: bool,
    move_velocity: Vec3,
    moving: bool,
    sprinting: bool,
    events: Vec<LocomotionEvent>,
}

impl LocomotionController {
    pub fn new(params: LocomotionParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            state: MovementState::Grounded,
            air_timer: 0.0,
            falling: false,
            jump_in_progress: false,
            move_velocity: Vec3::ZERO,
            moving: false,
            sprinting: false,
            events: Vec::new(),
        })
    }

    pub fn params(&self) -> &LocomotionParameters {
        &self.params
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    /// Seconds since the actor last left the ground, counted while falling.
    pub fn air_timer(&self) -> f32 {
        self.air_timer
    }

    /// A jump was launched and the animation layer still reports it playing.
    pub fn jump_in_progress(&self) -> bool {
        self.jump_in_progress
    }

    /// Horizontal velocity written on the last movement update.
    pub fn move_velocity(&self) -> Vec3 {
        self.move_velocity
    }

    /// Running rather than walking on the last movement update.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn jump_velocity(&self) -> f32 {
        self.params.jump_velocity()
    }

    pub fn events(&self) -> &[LocomotionEvent] {
        &self.events
    }

    /// Drain transition requests for the animation layer.
    pub fn drain_events(&mut self) -> Vec<LocomotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one fixed step.
    ///
    /// Order: jump impulse, falling and landing, then movement and rotation
    /// unless `interacting` locks them. Grounding still runs while locked.
    pub fn fixed_update<B, G>(
        &mut self,
        body: &mut B,
        probe: &G,
        input: &mut MovementInput,
        basis: CameraBasis,
        interacting: bool,
        dt: f32,
    ) -> TickOutcome
    where
        B: RigidBody + ?Sized,
        G: GroundProbe + ?Sized,
    {
        let previous = self.state;

        let jumped = input.take_jump() && self.try_jump(body);
        self.handle_falling_and_landing(body, probe, input, interacting, dt);
        if interacting {
            self.hold_position(body);
        } else {
            self.handle_movement(body, input, basis);
            self.handle_rotation(body, input, basis, dt);
        }

        if self.state == MovementState::Jumping {
            self.state = MovementState::Airborne;
        }

        TickOutcome {
            previous,
            jumped,
            state: self.state,
        }
    }

    /// Adopt the animation layer's view of the tick that just ran.
    pub fn reconcile(&mut self, feedback: AnimationFeedback) {
        if feedback.is_jumping != self.jump_in_progress {
            tracing::debug!(
                requested = self.jump_in_progress,
                observed = feedback.is_jumping,
                "jump flag reconciled with animation"
            );
        }
        self.jump_in_progress = feedback.is_jumping;
    }

    fn try_jump<B: RigidBody + ?Sized>(&mut self, body: &mut B) -> bool {
        if self.state != MovementState::Grounded {
            tracing::trace!(state = ?self.state, "jump request dropped");
            return false;
        }
        let jump_velocity = self.params.jump_velocity();
        let mut velocity = self.move_velocity;
        velocity.y = jump_velocity;
        body.set_velocity(velocity);

        self.air_timer = 0.0;
        self.falling = false;
        self.jump_in_progress = true;
        self.state = MovementState::Jumping;
        self.events.push(LocomotionEvent::Jumped);
        tracing::debug!(jump_velocity, "jump impulse");
        true
    }

    fn handle_falling_and_landing<B, G>(
        &mut self,
        body: &mut B,
        probe: &G,
        input: &MovementInput,
        interacting: bool,
        dt: f32,
    ) where
        B: RigidBody + ?Sized,
        G: GroundProbe + ?Sized,
    {
        if self.state == MovementState::Jumping {
            return;
        }

        if self.state == MovementState::Airborne && !self.jump_in_progress {
            if !self.falling {
                self.falling = true;
                if !interacting {
                    self.events.push(LocomotionEvent::StartedFalling);
                }
            }
            self.air_timer += dt;
            let forward = body.rotation() * Vec3::NEG_Z;
            body.add_force(forward * self.params.leaping_velocity);
            body.add_force(Vec3::NEG_Y * self.params.falling_velocity * self.air_timer);
        }

        let position = body.position();
        let origin = position + Vec3::Y * self.params.probe_offset;
        let hit = probe.cast_down(
            origin,
            self.params.probe_radius,
            self.params.probe_max_distance,
            self.params.ground_mask,
        );

        match hit {
            Some(hit) if !self.jump_in_progress => {
                if self.state == MovementState::Airborne {
                    self.events.push(LocomotionEvent::Landed);
                    tracing::debug!(air_time = self.air_timer, height = hit.point.y, "landed");
                }
                self.state = MovementState::Grounded;
                self.air_timer = 0.0;
                self.falling = false;

                let target = Vec3::new(position.x, hit.point.y, position.z);
                let snapped = if interacting || input.move_amount() > 0.0 {
                    position.lerp(target, (dt / LANDING_BLEND_TIME).min(1.0))
                } else {
                    target
                };
                if snapped != position {
                    body.set_position(snapped);
                }
            }
            // Contact while a jump is still playing does not end the jump.
            Some(_) => {}
            None => {
                if self.state == MovementState::Grounded {
                    self.state = MovementState::Airborne;
                    self.air_timer = 0.0;
                    tracing::debug!(?position, "lost ground contact");
                }
            }
        }
    }

    /// Stop input-driven sliding while an action holds the lock on the
    /// ground. Airborne momentum carries.
    fn hold_position<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        if self.state != MovementState::Grounded {
            return;
        }
        self.move_velocity = Vec3::ZERO;
        let vertical = body.velocity().y;
        body.set_velocity(Vec3::new(0.0, vertical, 0.0));
    }

    fn handle_movement<B: RigidBody + ?Sized>(&mut self, body: &mut B, input: &MovementInput, basis: CameraBasis) {
        if self.jump_in_progress {
            return;
        }

        let direction = camera_relative(basis, input);
        self.sprinting = input.is_sprinting();
        let speed = if self.sprinting {
            self.params.sprinting_speed
        } else if input.move_amount() >= RUN_THRESHOLD {
            self.moving = true;
            self.params.running_speed
        } else {
            self.moving = false;
            self.params.walking_speed
        };

        self.move_velocity = direction * speed;
        let vertical = body.velocity().y;
        body.set_velocity(Vec3::new(self.move_velocity.x, vertical, self.move_velocity.z));
    }

    fn handle_rotation<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        input: &MovementInput,
        basis: CameraBasis,
        dt: f32,
    ) {
        if self.jump_in_progress {
            return;
        }
        let Some(target) = facing_toward(camera_relative(basis, input)) else {
            return;
        };
        let t = (self.params.rotation_speed * dt).min(1.0);
        body.set_rotation(body.rotation().slerp(target, t).normalize());
    }
}

/// Unit horizontal direction of the stick in camera space, or zero.
fn camera_relative(basis: CameraBasis, input: &MovementInput) -> Vec3 {
    let (forward, right) = basis.horizontal();
    let direction = forward * input.vertical() + right * input.horizontal();
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}
