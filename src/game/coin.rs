// Coin pickup and score keeping

use glam::Vec2;
use log::debug;

use super::config::CoinTuning;

/// Running score, only ever increased by coin pickups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(u32);

impl Score {
    /// Current score value
    pub fn value(&self) -> u32 {
        self.0
    }

    fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}

/// The single collectible coin in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub position: Vec2,
    pub radius: f32,
    pub value: u32,
    /// Inactive coins are ignored by collision until respawned
    pub active: bool,
}

impl Coin {
    /// Spawn an active coin at the configured offset from the car.
    ///
    /// Placement is relative to the car, not random in the world.
    pub fn spawn_near(car_position: Vec2, tuning: &CoinTuning) -> Self {
        Self {
            position: car_position + tuning.respawn_offset,
            radius: tuning.radius,
            value: tuning.value,
            active: true,
        }
    }

    /// Whether the coin should be drawn
    pub fn is_visible(&self) -> bool {
        self.active
    }

    /// Check the car against the coin and collect it on overlap.
    ///
    /// Returns the points added to `score` (0 when nothing was collected).
    /// A collected coin is immediately replaced by a fresh one placed
    /// relative to `car_position`.
    pub fn update(
        &mut self,
        car_position: Vec2,
        car_radius: f32,
        tuning: &CoinTuning,
        score: &mut Score,
    ) -> u32 {
        if !self.active {
            return 0;
        }

        let distance = self.position.distance(car_position);
        if distance >= car_radius + self.radius {
            return 0;
        }

        let points = self.value;
        score.add(points);
        self.active = false;
        debug!(
            "Coin collected at ({:.1}, {:.1}), score {}",
            self.position.x,
            self.position.y,
            score.value()
        );

        *self = Self::spawn_near(car_position, tuning);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::DEFAULT_CONFIG;

    const CAR_RADIUS: f32 = 40.0;

    fn tuning() -> CoinTuning {
        DEFAULT_CONFIG.coin.clone()
    }

    #[test]
    fn test_spawn_near_uses_offset() {
        let coin = Coin::spawn_near(Vec2::new(610.0, 275.0), &tuning());
        assert_eq!(coin.position, Vec2::new(810.0, 475.0));
        assert_eq!(coin.radius, 20.0);
        assert_eq!(coin.value, 10);
        assert!(coin.active);
    }

    #[test]
    fn test_car_on_coin_scores_ten() {
        let tuning = tuning();
        let start = Vec2::new(610.0, 275.0);
        let mut coin = Coin::spawn_near(start, &tuning);
        let mut score = Score::default();

        let car = start + Vec2::new(200.0, 200.0);
        let delta = coin.update(car, CAR_RADIUS, &tuning, &mut score);

        assert_eq!(delta, 10);
        assert_eq!(score.value(), 10);
        assert!(coin.active);
        assert_eq!(coin.position, car + tuning.respawn_offset);
    }

    #[test]
    fn test_just_inside_radius_collects() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        let mut score = Score::default();

        let car = coin.position + Vec2::new(59.9, 0.0);
        assert_eq!(coin.update(car, CAR_RADIUS, &tuning, &mut score), 10);
    }

    #[test]
    fn test_touching_edge_does_not_collect() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        let before = coin.clone();
        let mut score = Score::default();

        let car = coin.position + Vec2::new(0.0, 60.0);
        let delta = coin.update(car, CAR_RADIUS, &tuning, &mut score);

        assert_eq!(delta, 0);
        assert_eq!(score.value(), 0);
        assert_eq!(coin, before);
    }

    #[test]
    fn test_far_car_does_nothing() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        let mut score = Score::default();

        coin.update(Vec2::new(4000.0, 4000.0), CAR_RADIUS, &tuning, &mut score);

        assert_eq!(score.value(), 0);
        assert!(coin.active);
        assert_eq!(coin.position, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_inactive_coin_is_ignored() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        coin.active = false;
        let mut score = Score::default();

        let delta = coin.update(coin.position, CAR_RADIUS, &tuning, &mut score);

        assert_eq!(delta, 0);
        assert_eq!(score.value(), 0);
        assert!(!coin.is_visible());
    }

    #[test]
    fn test_respawned_coin_is_out_of_reach() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        let mut score = Score::default();
        let car = coin.position;

        coin.update(car, CAR_RADIUS, &tuning, &mut score);
        // Same car position again: the new coin sits ~283 units away
        coin.update(car, CAR_RADIUS, &tuning, &mut score);

        assert_eq!(score.value(), 10);
    }

    #[test]
    fn test_score_accumulates() {
        let tuning = tuning();
        let mut coin = Coin::spawn_near(Vec2::ZERO, &tuning);
        let mut score = Score::default();

        for _ in 0..5 {
            let car = coin.position;
            coin.update(car, CAR_RADIUS, &tuning, &mut score);
        }

        assert_eq!(score.value(), 50);
    }
}
