/// Upper bound for configured hit points.
pub const MAX_HIT_POINTS: i32 = 999;

/// Tuning knobs for a new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Cards dealt to each player at the start.
    pub hand_size: usize,
    /// Cards generated per player deck, including the opening hand.
    pub deck_size: usize,
    /// Starting and maximum hit points.
    pub hit_points: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            deck_size: 15,
            hit_points: 100,
        }
    }
}

impl GameConfig {
    /// Sets the starting hit points, kept within `1..=MAX_HIT_POINTS`.
    pub fn with_hit_points(mut self, hit_points: i32) -> Self {
        self.hit_points = hit_points.clamp(1, MAX_HIT_POINTS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_points_are_clamped() {
        let config = GameConfig::default();
        assert_eq!(config.with_hit_points(i32::MAX).hit_points, MAX_HIT_POINTS);
        assert_eq!(config.with_hit_points(-5).hit_points, 1);
        assert_eq!(config.with_hit_points(40).hit_points, 40);
    }
}
