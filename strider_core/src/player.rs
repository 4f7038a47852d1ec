//! First-person walker.
//!
//! Input intent becomes look angles and a damped velocity; gravity and
//! a held-jump ramp drive the vertical axis. The terrain's landing
//! report re-arms jumping, so the grounded/airborne split lives in one
//! flag. The camera hangs `eye_height` above the feet.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::PlayerConfig;
use crate::input::{Action, InputFrame};
use crate::math::{approach, Vector2, Vector3};
use crate::transform::TransformStack;

pub struct Player {
    pub pos: Vector3,
    pub speed: Vector3,
    pub target: Vector3,
    /// x is pitch measured from the vertical axis (pi/2 = horizon),
    /// y is yaw.
    pub angle: Vector2,
    /// Collision radius; the terrain plane test currently ignores it.
    pub radius: f32,

    move_speed: f32,
    friction: Vector3,
    gravity_target: f32,
    jump_impulse: f32,
    jump_time: f32,
    pitch_range: f32,
    eye_height: f32,
    mouse_sensitivity: f32,

    jump_timer: f32,
    can_jump: bool,
}

impl Player {
    /// Spawns at the configured start position, airborne, looking at
    /// the horizon.
    pub fn new(cfg: &PlayerConfig) -> Self {
        Self {
            pos: cfg.start,
            speed: Vector3::ZERO,
            target: Vector3::ZERO,
            angle: Vector2::new(FRAC_PI_2, 0.0),
            radius: cfg.radius,
            move_speed: cfg.move_speed,
            friction: cfg.friction,
            gravity_target: cfg.gravity_target,
            jump_impulse: cfg.jump_impulse,
            jump_time: cfg.jump_time,
            pitch_range: cfg.pitch_range,
            eye_height: cfg.eye_height,
            mouse_sensitivity: cfg.mouse_sensitivity,
            jump_timer: 0.0,
            can_jump: false,
        }
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Turns raw intent into look angles, a target velocity and jump
    /// impulses. Look deltas apply immediately, movement only sets the
    /// target that `move_step` damps toward.
    pub fn control(&mut self, input: &InputFrame) {
        self.angle.y += input.look_delta.x * self.mouse_sensitivity;
        self.angle.x += input.look_delta.y * self.mouse_sensitivity;

        let mut dir = Vector2::ZERO;
        if input.state(Action::MoveForward).is_down() {
            dir.y += 1.0;
        }
        if input.state(Action::MoveBack).is_down() {
            dir.y -= 1.0;
        }
        if input.state(Action::StrafeRight).is_down() {
            dir.x += 1.0;
        }
        if input.state(Action::StrafeLeft).is_down() {
            dir.x -= 1.0;
        }
        // Keeps diagonal movement at the same speed as cardinal.
        dir.normalize(false);

        let yaw = self.angle.y;
        let forward = Vector2::new((yaw + FRAC_PI_2).cos(), (yaw + FRAC_PI_2).sin());
        let strafe = Vector2::new(yaw.cos(), yaw.sin());

        self.target.x = (forward.x * dir.y + strafe.x * dir.x) * self.move_speed;
        self.target.z = (forward.y * dir.y + strafe.y * dir.x) * self.move_speed;

        let jump = input.state(Action::Jump);
        if jump.pressed_edge() && self.can_jump {
            self.speed.y = self.jump_impulse;
            self.jump_timer = self.jump_time;
            self.can_jump = false;
        } else if jump.released_edge() {
            // Letting go early cuts the ramp short.
            self.jump_timer = 0.0;
        }
    }

    /// Damps velocity toward the target, integrates the position and
    /// keeps the look angles in range.
    pub fn move_step(&mut self, step: f32) {
        if self.jump_timer > 0.0 {
            self.jump_timer -= step;
            self.speed.y = self.jump_impulse;
            self.target.y = self.jump_impulse;
        } else {
            self.target.y = self.gravity_target;
        }

        self.speed.x = approach(self.speed.x, self.target.x, self.friction.x);
        self.speed.y = approach(self.speed.y, self.target.y, self.friction.y);
        self.speed.z = approach(self.speed.z, self.target.z, self.friction.z);

        self.pos = self.pos + self.speed.scaled(step);

        self.angle.x = self
            .angle
            .x
            .clamp(FRAC_PI_2 - self.pitch_range, FRAC_PI_2 + self.pitch_range);
        self.angle.y = self.angle.y.rem_euclid(TAU);
    }

    /// One simulation step. The owning scene runs terrain collision
    /// right after this; a landing there re-arms jumping for the next
    /// step.
    pub fn update(&mut self, input: &InputFrame, step: f32) {
        self.control(input);
        self.move_step(step);
        self.can_jump = false;
    }

    /// Landing callback from terrain collision.
    pub fn land(&mut self) {
        self.can_jump = true;
    }

    /// Unit look direction from the spherical angles.
    pub fn direction(&self) -> Vector3 {
        let pitch = self.angle.x;
        let yaw = self.angle.y + FRAC_PI_2;
        Vector3::new(pitch.sin() * yaw.cos(), pitch.cos(), pitch.sin() * yaw.sin())
    }

    /// Points the view matrix out of the player's eyes.
    pub fn position_camera(&self, transf: &mut TransformStack) {
        let eye = self.pos + Vector3::new(0.0, self.eye_height, 0.0);
        transf.set_view(eye, eye + self.direction());
    }
}
