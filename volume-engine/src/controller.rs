use glam::{Mat4, Quat, Vec3};
use volume_physics::Mover;

pub const MOUSE_SENSITIVITY: f32 = 0.01;
/// Walking speed in units per second.
pub const MOVE_SPEED: f32 = 6.0;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub is_moving_forward: bool,
    pub is_moving_backward: bool,
    pub is_moving_left: bool,
    pub is_moving_right: bool,
}

/// First-person look and walk. Moves the mover on the horizontal plane only;
/// keeping it out of walls is left to the collision pass that follows.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    pub yaw: f32,
    pub pitch: f32,
    pub input: InputState,
}

impl FirstPersonController {
    pub fn new() -> Self {
        Self {
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            input: InputState::default(),
        }
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch + dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Camera view direction, including pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        let forward = self.forward();
        let right = Vec3::Y.cross(forward).normalize();
        let up = forward.cross(right).normalize();
        Mat4::look_at_rh(eye, eye + forward, up)
    }

    pub fn update(&mut self, mover: &mut Mover, dt: f32) {
        let forward = Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin());
        let right = -Vec3::Y.cross(forward).normalize();

        let mut move_delta = Vec3::ZERO;
        if self.input.is_moving_forward {
            move_delta += forward;
        }
        if self.input.is_moving_backward {
            move_delta -= forward;
        }
        if self.input.is_moving_right {
            move_delta += right;
        }
        if self.input.is_moving_left {
            move_delta -= right;
        }

        if move_delta != Vec3::ZERO {
            mover.position += move_delta.normalize() * MOVE_SPEED * dt;
        }
        mover.rotation = Quat::from_rotation_y(-self.yaw);
    }
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::new()
    }
}

/// Scripted input: walks the controller through a list of waypoints.
#[derive(Debug, Clone)]
pub struct Autopilot {
    waypoints: Vec<Vec3>,
    next: usize,
    arrive_radius: f32,
}

impl Autopilot {
    pub fn new(waypoints: Vec<Vec3>, arrive_radius: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            arrive_radius,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    /// Points the controller at the next waypoint and holds forward. Releases
    /// all input once the route is done.
    pub fn steer(&mut self, controller: &mut FirstPersonController, position: Vec3) {
        controller.input = InputState::default();

        while let Some(target) = self.waypoints.get(self.next) {
            let to_target = (*target - position) * Vec3::new(1.0, 0.0, 1.0);
            if to_target.length() > self.arrive_radius {
                let turn = wrap_angle(to_target.z.atan2(to_target.x) - controller.yaw);
                controller.look(turn / MOUSE_SENSITIVITY, 0.0);
                controller.input.is_moving_forward = true;
                return;
            }
            log::debug!("Reached waypoint {} at {}", self.next, position);
            self.next += 1;
        }
    }
}

/// Maps an angle into `[-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
