//! Food placement

use rand::Rng;
use tracing::debug;

use super::state::Position;

/// The single food cell on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    /// Position of the food
    pub position: Position,
    grid_width: i32,
    grid_height: i32,
    max_attempts: usize,
}

impl Food {
    /// Create food at a uniformly random cell
    pub fn new<R: Rng + ?Sized>(
        grid_width: usize,
        grid_height: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Self {
        let mut food = Self::at(Position::new(0, 0), grid_width, grid_height, max_attempts);
        food.position = food.spawn(rng);
        food
    }

    /// Create food at a specific position
    pub fn at(
        position: Position,
        grid_width: usize,
        grid_height: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            position,
            grid_width: grid_width as i32,
            grid_height: grid_height as i32,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Pick a uniformly random cell in `[0, width) x [0, height)`
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(0..self.grid_width),
            rng.gen_range(0..self.grid_height),
        )
    }

    /// Move to a random cell not listed in `avoid`
    ///
    /// Gives up after `max_attempts` candidates and keeps the last one even if
    /// it is occupied, so this always terminates on a full board.
    pub fn respawn<'a, R, I>(&mut self, avoid: I, rng: &mut R) -> Position
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Position>,
        I::IntoIter: Clone,
    {
        let avoid = avoid.into_iter();
        let mut attempts = 0;

        let candidate = loop {
            let candidate = self.spawn(rng);
            attempts += 1;

            if !avoid.clone().any(|pos| *pos == candidate) {
                break candidate;
            }
            if attempts >= self.max_attempts {
                debug!(
                    "No free cell after {} attempts, placing food on occupied {:?}",
                    attempts, candidate
                );
                break candidate;
            }
        };

        self.position = candidate;
        self.position
    }

    /// Check if a position matches the food position
    pub fn is_at(&self, pos: Position) -> bool {
        self.position == pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn in_grid(pos: Position, width: i32, height: i32) -> bool {
        (0..width).contains(&pos.x) && (0..height).contains(&pos.y)
    }

    #[test]
    fn test_spawn_stays_in_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let food = Food::new(7, 3, 100, &mut rng);
        assert!(in_grid(food.position, 7, 3));

        for _ in 0..1000 {
            assert!(in_grid(food.spawn(&mut rng), 7, 3));
        }
    }

    #[test]
    fn test_spawn_covers_every_cell() {
        let mut rng = StdRng::seed_from_u64(2);
        let food = Food::at(Position::new(0, 0), 3, 2, 100);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(food.spawn(&mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_respawn_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::at(Position::new(0, 0), 2, 2, 100);

        // Everything except (1,1) is taken
        let avoid = vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)];

        let pos = food.respawn(&avoid, &mut rng);
        assert_eq!(pos, Position::new(1, 1));
        assert_eq!(food.position, pos);
    }

    #[test]
    fn test_respawn_with_sparse_avoid_set() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut food = Food::at(Position::new(0, 0), 20, 20, 100);
        let avoid = vec![Position::new(10, 10), Position::new(9, 10), Position::new(8, 10)];

        for _ in 0..200 {
            let pos = food.respawn(&avoid, &mut rng);
            assert!(!avoid.contains(&pos));
            assert!(in_grid(pos, 20, 20));
        }
    }

    #[test]
    fn test_respawn_on_full_board_terminates() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut food = Food::at(Position::new(0, 0), 3, 3, 100);
        let avoid: Vec<Position> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position::new(x, y)))
            .collect();

        let pos = food.respawn(&avoid, &mut rng);
        assert!(in_grid(pos, 3, 3));
        assert!(avoid.contains(&pos));
    }

    #[test]
    fn test_is_at() {
        let food = Food::at(Position::new(2, 3), 10, 10, 100);
        assert!(food.is_at(Position::new(2, 3)));
        assert!(!food.is_at(Position::new(3, 2)));
    }
}
