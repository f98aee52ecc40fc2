//! Grid food seeking

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qlearn_core::Environment;

/// Heading on the grid, clockwise from up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Decreasing `y`
    Up,
    /// Increasing `x`
    Right,
    /// Increasing `y`
    Down,
    /// Decreasing `x`
    Left,
}

impl Heading {
    fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    fn left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// A walker on a square grid looking for food.
///
/// State is `[heading, up, down, left, right]` where the last four are `1`
/// when the food lies in that direction. Actions are [`FoodGrid::FORWARD`],
/// [`FoodGrid::TURN_LEFT`] and [`FoodGrid::TURN_RIGHT`]; turning also moves
/// one cell in the new heading.
#[derive(Debug, Clone)]
pub struct FoodGrid {
    size: i64,
    heading: Heading,
    player: (i64, i64),
    food: (i64, i64),
    /// Distance to the food before the last move
    last_distance: f64,
    rng: StdRng,
}

impl FoodGrid {
    /// Step in the current heading
    pub const FORWARD: usize = 0;
    /// Turn left, then step
    pub const TURN_LEFT: usize = 1;
    /// Turn right, then step
    pub const TURN_RIGHT: usize = 2;
    /// Number of actions
    pub const ACTIONS: usize = 3;
    /// Number of state components
    pub const STATES: usize = 5;

    /// Reward for walking off the grid
    pub const WALL_REWARD: f64 = -10.0;
    /// Reward for reaching the food
    pub const FOOD_REWARD: f64 = 100.0;
    /// Reward for getting closer to the food
    pub const CLOSER_REWARD: f64 = 0.05;
    /// Reward for any other move
    pub const IDLE_REWARD: f64 = -0.1;

    /// Create a `size x size` grid with food placed from entropy
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::from_rng(size, StdRng::from_entropy())
    }

    /// Create a `size x size` grid with reproducible food placement
    #[must_use]
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::from_rng(size, StdRng::seed_from_u64(seed))
    }

    fn from_rng(size: usize, rng: StdRng) -> Self {
        let size = i64::try_from(size.max(1)).unwrap_or(i64::MAX);
        let mut grid = Self {
            size,
            heading: Heading::Up,
            player: (size / 2, size / 2),
            food: (0, 0),
            last_distance: 0.0,
            rng,
        };
        grid.spawn_food();
        grid.last_distance = grid.distance();
        grid
    }

    fn spawn_food(&mut self) {
        self.food = (self.rng.gen_range(0..self.size), self.rng.gen_range(0..self.size));
    }

    fn distance(&self) -> f64 {
        let dx = (self.food.0 - self.player.0) as f64;
        let dy = (self.food.1 - self.player.1) as f64;
        dx.hypot(dy)
    }

    fn centre(&self) -> (i64, i64) {
        (self.size / 2, self.size / 2)
    }

    fn off_grid(&self) -> bool {
        let (x, y) = self.player;
        x < 0 || y < 0 || x >= self.size || y >= self.size
    }

    /// Player position as `(x, y)`
    #[must_use]
    pub fn player(&self) -> (i64, i64) {
        self.player
    }

    /// Food position as `(x, y)`
    #[must_use]
    pub fn food(&self) -> (i64, i64) {
        self.food
    }

    /// Current heading
    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }
}

impl Environment for FoodGrid {
    fn state(&self) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        vec![
            self.heading.index() as f64,
            flag(self.food.1 < self.player.1),
            flag(self.food.1 > self.player.1),
            flag(self.food.0 < self.player.0),
            flag(self.food.0 > self.player.0),
        ]
    }

    fn perform(&mut self, action: usize) {
        self.last_distance = self.distance();
        self.heading = match action {
            Self::TURN_LEFT => self.heading.left(),
            Self::TURN_RIGHT => self.heading.right(),
            _ => self.heading,
        };
        let (dx, dy) = self.heading.delta();
        self.player = (self.player.0 + dx, self.player.1 + dy);
    }

    fn reward(&mut self) -> f64 {
        if self.off_grid() {
            self.player = self.centre();
            return Self::WALL_REWARD;
        }
        if self.player == self.food {
            self.spawn_food();
            return Self::FOOD_REWARD;
        }
        if self.distance() < self.last_distance {
            Self::CLOSER_REWARD
        } else {
            Self::IDLE_REWARD
        }
    }

    fn render(&self) {
        tracing::trace!(
            player = ?self.player,
            food = ?self.food,
            heading = ?self.heading,
            "food grid"
        );
    }

    fn reset(&mut self) {
        self.player = self.centre();
        self.heading = Heading::Up;
        self.spawn_food();
        self.last_distance = self.distance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_with_food(food: (i64, i64)) -> FoodGrid {
        let mut grid = FoodGrid::seeded(10, 1);
        grid.food = food;
        grid
    }

    #[test]
    fn test_state_flags() {
        let grid = grid_with_food((2, 8));
        // player at (5, 5), food down and to the left
        assert_eq!(grid.state(), vec![0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_turns_move_in_new_heading() {
        let mut grid = grid_with_food((0, 0));
        grid.perform(FoodGrid::TURN_RIGHT);
        assert_eq!(grid.heading(), Heading::Right);
        assert_eq!(grid.player(), (6, 5));

        grid.perform(FoodGrid::TURN_LEFT);
        assert_eq!(grid.heading(), Heading::Up);
        assert_eq!(grid.player(), (6, 4));

        grid.perform(FoodGrid::TURN_LEFT);
        assert_eq!(grid.heading(), Heading::Left);
        assert_eq!(grid.player(), (5, 4));
    }

    #[test]
    fn test_closer_and_idle_rewards() {
        let mut grid = grid_with_food((5, 0));
        grid.perform(FoodGrid::FORWARD);
        assert_relative_eq!(grid.reward(), FoodGrid::CLOSER_REWARD);
        grid.perform(FoodGrid::TURN_LEFT);
        assert_relative_eq!(grid.reward(), FoodGrid::IDLE_REWARD);
    }

    #[test]
    fn test_food_respawns() {
        let mut grid = grid_with_food((5, 4));
        grid.perform(FoodGrid::FORWARD);
        assert_relative_eq!(grid.reward(), FoodGrid::FOOD_REWARD);
        let (x, y) = grid.food();
        assert!((0..10).contains(&x) && (0..10).contains(&y));
    }

    #[test]
    fn test_wall_respawns_at_centre() {
        let mut grid = grid_with_food((9, 9));
        for _ in 0..5 {
            grid.perform(FoodGrid::FORWARD);
            grid.reward();
        }
        assert_eq!(grid.player(), (5, 0));
        grid.perform(FoodGrid::FORWARD);
        assert_relative_eq!(grid.reward(), FoodGrid::WALL_REWARD);
        assert_eq!(grid.player(), (5, 5));
    }

    #[test]
    fn test_seeded_food_is_reproducible() {
        assert_eq!(FoodGrid::seeded(40, 3).food(), FoodGrid::seeded(40, 3).food());
    }
}
