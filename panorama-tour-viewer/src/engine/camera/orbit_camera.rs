use std::f32::consts::TAU;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::{PerspectiveProjection, Projection};
use tour_constants::camera::{
    AUTO_ROTATE_SPEED, DAMPING_FACTOR, FAR_PLANE, FOV_DEGREES, INITIAL_DISTANCE, MAX_DISTANCE,
    MAX_PITCH, MIN_DISTANCE, NEAR_PLANE, ROTATE_SENSITIVITY, ZOOM_STEP,
};

use crate::engine::core::config::ViewerConfig;

/// Marks the single camera looking out from the panorama centre.
#[derive(Component)]
pub struct PanoramaCamera;

/// Orbit state around `target`. The eye sits `distance` away, so with the
/// default distance the view is effectively from the sphere centre.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Rotation still to be applied, drained by damping.
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub auto_rotate: bool,
    /// Same unit as the web player: 1.0 is one revolution per minute.
    pub auto_rotate_speed: f32,
    /// Share of the pending rotation applied per 60 Hz frame.
    pub damping_factor: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: INITIAL_DISTANCE,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            damping_factor: DAMPING_FACTOR,
        }
    }
}

impl OrbitCamera {
    pub fn with_auto_rotate(auto_rotate: bool) -> Self {
        Self {
            auto_rotate,
            ..default()
        }
    }

    /// Queue rotation from a pointer drag in logical pixels.
    /// Dragging right turns the view right, dragging down tilts it up.
    pub fn drag(&mut self, delta: Vec2) {
        self.yaw_velocity -= delta.x * ROTATE_SENSITIVITY;
        self.pitch_velocity += delta.y * ROTATE_SENSITIVITY;
    }

    /// Positive `steps` move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(steps)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Step damping and auto-rotation forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let applied = if self.damping_factor > 0.0 {
            1.0 - (1.0 - self.damping_factor).powf(dt * 60.0)
        } else {
            1.0
        };

        self.yaw += self.yaw_velocity * applied;
        self.pitch += self.pitch_velocity * applied;
        self.yaw_velocity *= 1.0 - applied;
        self.pitch_velocity *= 1.0 - applied;

        if self.auto_rotate {
            self.yaw -= self.auto_rotate_rate() * dt;
        }

        self.yaw = self.yaw.rem_euclid(TAU);
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

/// Turn auto-rotation on, off, or flip it (`enabled: None`).
#[derive(Event, Debug, Clone)]
pub struct AutoRotateRequest {
    pub enabled: Option<bool>,
}

pub fn apply_auto_rotate_requests(
    mut requests: EventReader<AutoRotateRequest>,
    mut orbit: ResMut<OrbitCamera>,
) {
    for request in requests.read() {
        let enabled = request.enabled.unwrap_or(!orbit.auto_rotate);
        if orbit.auto_rotate != enabled {
            orbit.auto_rotate = enabled;
            info!("Auto-rotate {}", if enabled { "on" } else { "off" });
        }
    }
}

pub fn spawn_panorama_camera(mut commands: Commands, config: Res<ViewerConfig>) {
    let orbit = OrbitCamera::with_auto_rotate(config.auto_rotate);
    commands.spawn((
        PanoramaCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
    ));
    commands.insert_resource(orbit);
}

/// Left-drag rotates, wheel zooms. Drags that start over a UI element are ignored.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<PanoramaCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    ui_interactions: Query<&Interaction>,
    mut dragging: Local<bool>,
    time: Res<Time>,
) {
    let over_ui = ui_interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None);

    if mouse_button.just_pressed(MouseButton::Left) {
        *dragging = !over_ui;
    }
    if !mouse_button.pressed(MouseButton::Left) {
        *dragging = false;
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if *dragging && mouse_delta != Vec2::ZERO {
        orbit.drag(mouse_delta);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if !over_ui && scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    orbit.advance(time.delta_secs());

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}
