// Car state and arcade physics integrator

use glam::Vec2;

use super::config::CarTuning;
use crate::core::math::{clamp, heading_vector};

/// Distance from the car centre to a rear tire, as a fraction of car length
const TIRE_REACH_DIVISOR: f32 = 2.6;

/// Angular offset (degrees) from the nose to each rear tire
const REAR_LEFT_TIRE_DEGREES: f32 = 150.0;
const REAR_RIGHT_TIRE_DEGREES: f32 = 210.0;

/// Longitudinal direction selected by the most recent throttle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Forward
    }
}

/// Directional keys held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// Kinematic state of the player car
#[derive(Debug, Clone, PartialEq)]
pub struct CarState {
    /// Centre of the car in world space
    pub position: Vec2,
    /// Signed speed in world units per frame (negative = reversing)
    pub speed: f32,
    /// Heading in degrees, 0 = up the screen, clockwise positive
    pub angle: f32,
    /// Low-pass filtered heading that lags behind `angle` in turns
    pub drift_angle: f32,
    /// Steering accumulator added to the heading every frame
    pub steering: f32,
    /// Direction of the last throttle input
    pub direction: Direction,
}

impl CarState {
    /// Create a car at rest pointing up the screen
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            speed: 0.0,
            angle: 0.0,
            drift_angle: 0.0,
            steering: 0.0,
            direction: Direction::default(),
        }
    }

    /// Advance the car by one frame
    pub fn step(&mut self, input: CarInput, tuning: &CarTuning, dt: f32) {
        self.update_speed(input, tuning, dt);
        self.update_steering(input, tuning, dt);

        self.angle += self.steering;
        self.drift_angle =
            (self.angle + self.drift_angle * tuning.drift_bias) / (1.0 + tuning.drift_bias);

        // The car receives two independent velocity contributions per frame:
        // one along its heading and one along the lagging drift heading. Their
        // sum is what slides the car sideways through a turn; there is no
        // separate lateral velocity state.
        self.position += heading_vector(self.angle) * self.speed;
        self.position += heading_vector(self.drift_angle) * self.speed;
    }

    fn update_speed(&mut self, input: CarInput, tuning: &CarTuning, dt: f32) {
        if input.accelerate {
            self.direction = Direction::Forward;
            self.speed = clamp(
                self.speed + tuning.speedup * dt,
                -tuning.max_speed,
                tuning.max_speed,
            );
        } else if input.brake {
            self.direction = Direction::Reverse;
            self.speed = clamp(
                self.speed - tuning.speedup * dt,
                -tuning.max_speed,
                tuning.max_speed,
            );
        } else {
            // Coasting: exponential decay is the only friction
            self.speed *= tuning.slowdown;
        }
    }

    fn update_steering(&mut self, input: CarInput, tuning: &CarTuning, dt: f32) {
        // Steering authority scales with speed, so a parked car cannot turn
        let authority = tuning.steering_speed * dt * self.speed.abs();

        if input.steer_left {
            self.steering = clamp(
                self.steering - authority,
                -tuning.max_steering,
                tuning.max_steering,
            );
        } else if input.steer_right {
            self.steering = clamp(
                self.steering + authority,
                -tuning.max_steering,
                tuning.max_steering,
            );
        }

        self.steering *= 1.0 - tuning.steer_back_speed;
    }

    /// Signed divergence between the drift heading and the true heading
    pub fn drift_offset(&self) -> f32 {
        self.drift_angle - self.angle
    }

    /// Whether the car is sliding enough to leave skidmarks
    pub fn is_drifting(&self, tuning: &CarTuning) -> bool {
        self.drift_offset().abs() > tuning.drift_threshold_degrees
    }

    /// World positions of the rear (left, right) tires
    pub fn tire_positions(&self, car_length: f32) -> (Vec2, Vec2) {
        let reach = car_length / TIRE_REACH_DIVISOR;
        let left = self.position + heading_vector(self.angle - REAR_LEFT_TIRE_DEGREES) * reach;
        let right = self.position + heading_vector(self.angle - REAR_RIGHT_TIRE_DEGREES) * reach;
        (left, right)
    }
}
