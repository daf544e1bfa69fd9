/// Simple grid coordinate; row-major with the origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// Applies one movement offset, or None when it would leave a
    /// grid of the given dimensions.
    pub fn step(&self, direction: Direction, height: usize, width: usize) -> Option<Coord> {
        let (drow, dcol) = direction.offset();
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        (row < height && col < width).then_some(Coord { row, col })
    }
}

/// The eight movement directions, laid out on the keyboard as
///
/// ```text
/// y k u
/// h . l
/// b j n
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Maps a movement keystroke (either case) to its direction.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'h' => Some(Direction::Left),
            'l' => Some(Direction::Right),
            'k' => Some(Direction::Up),
            'j' => Some(Direction::Down),
            'y' => Some(Direction::UpLeft),
            'u' => Some(Direction::UpRight),
            'b' => Some(Direction::DownLeft),
            'n' => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// The (row, col) offset of a single step.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key('h'), Some(Direction::Left));
        assert_eq!(Direction::from_key('L'), Some(Direction::Right));
        assert_eq!(Direction::from_key('y'), Some(Direction::UpLeft));
        assert_eq!(Direction::from_key('N'), Some(Direction::DownRight));
        assert_eq!(Direction::from_key('q'), None);
        assert_eq!(Direction::from_key('x'), None);
    }

    #[test]
    fn steps_respect_bounds() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.step(Direction::Left, 3, 7), None);
        assert_eq!(corner.step(Direction::Up, 3, 7), None);
        assert_eq!(corner.step(Direction::DownRight, 3, 7), Some(Coord::new(1, 1)));

        let edge = Coord::new(2, 6);
        assert_eq!(edge.step(Direction::Down, 3, 7), None);
        assert_eq!(edge.step(Direction::Right, 3, 7), None);
        assert_eq!(edge.step(Direction::UpLeft, 3, 7), Some(Coord::new(1, 5)));
    }
}
