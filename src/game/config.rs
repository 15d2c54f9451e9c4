// Game tuning - every tunable number in one place
//
// Values are compiled in. `GameConfig::validate` runs once at startup so a bad
// edit fails before the window opens instead of producing a broken simulation.

use glam::Vec2;

/// Car handling parameters consumed by the physics integrator
#[derive(Debug, Clone, PartialEq)]
pub struct CarTuning {
    /// Maximum speed magnitude (world units per frame)
    pub max_speed: f32,
    /// Speed gained per second while the throttle or brake is held
    pub speedup: f32,
    /// Per-frame speed multiplier when coasting (0..1)
    pub slowdown: f32,
    /// Steering gained per second, scaled by current speed
    pub steering_speed: f32,
    /// Maximum steering magnitude (degrees per frame)
    pub max_steering: f32,
    /// Fraction of steering removed every frame (self-centering)
    pub steer_back_speed: f32,
    /// Weight of the previous drift heading in the low-pass filter
    pub drift_bias: f32,
    /// Heading divergence (degrees) above which the car counts as drifting
    pub drift_threshold_degrees: f32,
    /// Sprite width in world units
    pub width: f32,
    /// Sprite length in world units
    pub length: f32,
    /// Radius used for coin pickup
    pub collision_radius: f32,
}

/// Coin placement and reward
#[derive(Debug, Clone, PartialEq)]
pub struct CoinTuning {
    pub radius: f32,
    pub value: u32,
    /// Offset from the car at which a coin (re)spawns
    pub respawn_offset: Vec2,
}

/// Skidmark trail limits
#[derive(Debug, Clone, PartialEq)]
pub struct SkidmarkTuning {
    /// Number of physical slots in the ring buffer
    pub capacity: usize,
    /// Seconds a mark stays visible
    pub lifetime_seconds: f64,
    /// Radius of each drawn tire print
    pub mark_radius: f32,
}

/// Window and presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window: WindowSettings,
    /// World extents in world units
    pub world_width: f32,
    pub world_height: f32,
    pub car: CarTuning,
    pub coin: CoinTuning,
    pub skidmarks: SkidmarkTuning,
    /// Root directory searched for textures
    pub asset_dir: &'static str,
}

/// Configuration errors found by `GameConfig::validate`
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("slowdown must be in [0, 1), got {0}")]
    SlowdownOutOfRange(f32),

    #[error("steer_back_speed must be in [0, 1], got {0}")]
    SteerBackOutOfRange(f32),

    #[error("skidmark capacity must be at least 1")]
    EmptySkidmarkBuffer,
}

/// The shipped configuration
pub const DEFAULT_CONFIG: GameConfig = GameConfig {
    window: WindowSettings {
        title: "Racer",
        width: 1300,
        height: 700,
        target_fps: 60,
    },
    world_width: 5000.0,
    world_height: 5000.0,
    car: CarTuning {
        max_speed: 7.0,
        speedup: 10.0,
        slowdown: 0.97,
        steering_speed: 2.0,
        max_steering: 4.0,
        steer_back_speed: 0.04,
        drift_bias: 15.0,
        drift_threshold_degrees: 30.0,
        width: 80.0,
        length: 150.0,
        collision_radius: 40.0,
    },
    coin: CoinTuning {
        radius: 20.0,
        value: 10,
        respawn_offset: Vec2::new(200.0, 200.0),
    },
    skidmarks: SkidmarkTuning {
        capacity: 500,
        lifetime_seconds: 3.0,
        mark_radius: 6.0,
    },
    asset_dir: "assets",
};

impl Default for GameConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl GameConfig {
    /// World extents as a vector
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Viewport extents as a vector
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.window.width as f32, self.window.height as f32)
    }

    /// Car spawn point: window centre shifted back by half the car's footprint
    pub fn car_start(&self) -> Vec2 {
        let half_width = (self.window.width / 2) as f32;
        let half_height = (self.window.height / 2) as f32;
        Vec2::new(
            half_width - (self.car.width / 2.0).trunc(),
            half_height - (self.car.length / 2.0).trunc(),
        )
    }

    /// Check that every tunable is inside the range the simulation assumes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives: [(&'static str, f64); 11] = [
            ("window.width", self.window.width as f64),
            ("window.height", self.window.height as f64),
            ("window.target_fps", self.window.target_fps as f64),
            ("world_width", self.world_width as f64),
            ("world_height", self.world_height as f64),
            ("car.max_speed", self.car.max_speed as f64),
            ("car.speedup", self.car.speedup as f64),
            ("car.max_steering", self.car.max_steering as f64),
            ("car.collision_radius", self.car.collision_radius as f64),
            ("coin.radius", self.coin.radius as f64),
            ("skidmarks.lifetime_seconds", self.skidmarks.lifetime_seconds),
        ];

        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.car.drift_bias >= 0.0) {
            return Err(ConfigError::Negative {
                field: "car.drift_bias",
                value: self.car.drift_bias as f64,
            });
        }

        if !(0.0..1.0).contains(&self.car.slowdown) {
            return Err(ConfigError::SlowdownOutOfRange(self.car.slowdown));
        }

        if !(0.0..=1.0).contains(&self.car.steer_back_speed) {
            return Err(ConfigError::SteerBackOutOfRange(self.car.steer_back_speed));
        }

        if self.skidmarks.capacity == 0 {
            return Err(ConfigError::EmptySkidmarkBuffer);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_values() {
        let config = GameConfig::default();
        assert_eq!(config.car.max_speed, 7.0);
        assert_eq!(config.coin.value, 10);
        assert_eq!(config.skidmarks.capacity, 500);
        assert_eq!(config.skidmarks.lifetime_seconds, 3.0);
        assert_eq!(config.world_size(), Vec2::new(5000.0, 5000.0));
    }

    #[test]
    fn test_car_start_position() {
        let config = GameConfig::default();
        assert_eq!(config.car_start(), Vec2::new(610.0, 275.0));
    }

    #[test]
    fn test_rejects_zero_world() {
        let mut config = GameConfig::default();
        config.world_width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "world_width",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_slowdown_of_one() {
        let mut config = GameConfig::default();
        config.car.slowdown = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::SlowdownOutOfRange(1.0)));
    }

    #[test]
    fn test_rejects_empty_skidmark_buffer() {
        let mut config = GameConfig::default();
        config.skidmarks.capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptySkidmarkBuffer));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::SlowdownOutOfRange(1.5);
        assert_eq!(err.to_string(), "slowdown must be in [0, 1), got 1.5");
    }
}
