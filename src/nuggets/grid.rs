use crate::nuggets::prelude::*;

/// A rectangular character grid. The base map loaded at startup holds
/// pure terrain; the live map cloned from it also carries `*` gold
/// markers and `A`..`Z` player letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl std::str::FromStr for Grid {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        let Some(first) = lines.first() else {
            return Err(anyhow!("map is empty"));
        };

        let width = first.chars().count();
        if width == 0 {
            return Err(anyhow!("map has zero-width lines"));
        }

        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(anyhow!(
                    "map line {row} is {} characters wide; expected {width}",
                    line.chars().count()
                ));
            }
            for ch in line.chars() {
                if !matches!(ch, ' ' | '-' | '|' | '+' | '.' | '#') {
                    return Err(anyhow!("map contains illegal character {ch:?} on line {row}"));
                }
                cells.push(ch);
            }
        }

        Ok(Grid { width, height: lines.len(), cells })
    }
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Retrieves the character at a coord.
    pub fn get(&self, at: Coord) -> char {
        self.cells[at.row * self.width + at.col]
    }

    /// Overwrites the character at a coord.
    pub fn set(&mut self, at: Coord, ch: char) {
        self.cells[at.row * self.width + at.col] = ch;
    }

    /// Whether terrain at a coord stops a sight line. Passages are
    /// opaque even though they are traversable; only open floor
    /// transmits.
    pub fn blocks_sight(&self, at: Coord) -> bool {
        matches!(self.get(at), ' ' | '-' | '|' | '+' | '#')
    }

    /// Renders the whole grid as newline-terminated rows.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuggets::prelude::Coord;

    const ROOM: &str = "+---+\n|...|\n+---+\n";

    #[test]
    fn parses_dimensions() {
        let grid = ROOM.parse::<Grid>().unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(Coord::new(1, 1)), '.');
        assert_eq!(grid.get(Coord::new(0, 0)), '+');
    }

    #[test]
    fn rejects_ragged_lines() {
        assert!("+---+\n|..|\n+---+\n".parse::<Grid>().is_err());
    }

    #[test]
    fn rejects_non_terrain() {
        // the base map never carries gold or players
        assert!("+---+\n|.*.|\n+---+\n".parse::<Grid>().is_err());
        assert!("+---+\n|.A.|\n+---+\n".parse::<Grid>().is_err());
        assert!("".parse::<Grid>().is_err());
    }

    #[test]
    fn render_round_trips() {
        let grid = ROOM.parse::<Grid>().unwrap();
        assert_eq!(grid.render(), ROOM);
    }

    #[test]
    fn passages_and_walls_block_sight() {
        let grid = "+#-| .+\n+#-| .+\n".parse::<Grid>().unwrap();
        assert!(grid.blocks_sight(Coord::new(0, 0)));
        assert!(grid.blocks_sight(Coord::new(0, 1)));
        assert!(grid.blocks_sight(Coord::new(0, 2)));
        assert!(grid.blocks_sight(Coord::new(0, 3)));
        assert!(grid.blocks_sight(Coord::new(0, 4)));
        assert!(!grid.blocks_sight(Coord::new(0, 5)));
    }
}
