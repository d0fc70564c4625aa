use std::collections::VecDeque;

use super::direction::Direction;

/// A position on the game grid
///
/// Bounds are a property of the grid, not of the position: a head one step
/// past the wall is a perfectly valid `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front. Never empty.
    segments: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Set by `grow`, consumed by the next `move_forward`
    growing: bool,
}

impl Snake {
    /// Create a one-segment snake facing right
    pub fn new(head: Position) -> Self {
        Self {
            segments: VecDeque::from([head]),
            direction: Direction::Right,
            growing: false,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments,
            direction,
            growing: false,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // Non-empty by construction; every mutation pushes before it pops.
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Advance one cell in the current direction
    ///
    /// The tail is dropped unless a `grow` is pending, in which case the body
    /// gets one segment longer. No bounds checking happens here.
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.segments.push_front(new_head);

        if !self.growing {
            self.segments.pop_back();
        }
        self.growing = false;
    }

    /// Make the next `move_forward` lengthen the body by one segment
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Turn, unless the request is a 180-degree reversal
    ///
    /// Reversals are dropped silently so the head can never fold back into
    /// the neck.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    /// Check if the head sits exactly on `pos`
    pub fn collides_with(&self, pos: Position) -> bool {
        self.head() == pos
    }

    /// Check if the head overlaps any other segment
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|segment| *segment == head)
    }

    /// Check if a position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)), direction).unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.tail(), Position::new(10, 10));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_growing());
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = Snake::new(Position::new(10, 10));
        snake.move_forward();
        assert_eq!(snake.head(), Position::new(11, 10));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_grow_then_move_lengthens_once() {
        let mut snake = Snake::new(Position::new(10, 10));
        snake.grow();
        assert!(snake.is_growing());

        snake.move_forward();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(11, 10));
        assert_eq!(snake.tail(), Position::new(10, 10));
        assert!(!snake.is_growing());

        // The flag buys exactly one extra segment
        snake.move_forward();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(12, 10));
        assert_eq!(snake.tail(), Position::new(11, 10));
    }

    #[test]
    fn test_move_then_grow_then_move() {
        let mut snake = Snake::new(Position::new(10, 10));
        snake.move_forward();
        snake.grow();
        snake.move_forward();

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(12, 10));
        assert_eq!(snake.tail(), Position::new(11, 10));
    }

    #[test]
    fn test_reversal_is_ignored_for_all_pairs() {
        for dir in Direction::ALL {
            let mut snake = snake(&[(5, 5)], dir);
            snake.change_direction(dir.opposite());
            assert_eq!(snake.direction(), dir);
        }
    }

    #[test]
    fn test_perpendicular_turn_is_applied() {
        let mut snake = snake(&[(5, 5)], Direction::Right);
        snake.change_direction(Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);
        snake.change_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_reversal_does_not_fold_into_neck() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Left);
        snake.change_direction(Direction::Right);
        snake.move_forward();

        assert_eq!(snake.head(), Position::new(4, 5));
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_collides_with() {
        let snake = snake(&[(5, 5), (4, 5)], Direction::Right);
        assert!(snake.collides_with(Position::new(5, 5)));
        assert!(!snake.collides_with(Position::new(4, 5)));
        assert!(snake.occupies(Position::new(4, 5)));
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) heading up into a body that loops around it
        let mut snake = snake(
            &[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)],
            Direction::Left,
        );
        assert!(!snake.collides_with_self());

        snake.change_direction(Direction::Up);
        snake.move_forward();
        assert_eq!(snake.head(), Position::new(5, 5));
        assert!(snake.collides_with_self());
    }

    #[test]
    fn test_single_segment_never_self_collides() {
        let mut snake = Snake::new(Position::new(0, 0));
        for _ in 0..5 {
            snake.move_forward();
            assert!(!snake.collides_with_self());
        }
    }
}
