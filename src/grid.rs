use crate::error::GridError;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The cell one step away in `dir`. May be out of bounds.
    pub fn offset(self, dir: Direction) -> Position {
        Position {
            x: self.x + dir.dx,
            y: self.y + dir.dy,
        }
    }

    /// Grid distance ignoring walls. Saturates for positions far outside any grid.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A heading. Unit vectors for movement, `NONE` for standing still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };

    /// Neighbor expansion order. Search tie-breaks depend on it, so it is fixed.
    pub const ALL: [Direction; 4] = [
        Direction::RIGHT,
        Direction::LEFT,
        Direction::DOWN,
        Direction::UP,
    ];

    /// The unit step from `from` to an adjacent `to`, if they are adjacent.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if !from.is_adjacent(to) {
            return None;
        }
        Some(Direction {
            dx: to.x - from.x,
            dy: to.y - from.y,
        })
    }

    pub fn is_none(self) -> bool {
        self == Direction::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Empty,
    Dot,
    PowerPellet,
    Bonus,
}

impl Cell {
    /// Tile codes used by the classic layout.
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Dot),
            1 => Some(Cell::Wall),
            2 => Some(Cell::Empty),
            3 => Some(Cell::PowerPellet),
            4 => Some(Cell::Bonus),
            _ => None,
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '#' => Some(Cell::Wall),
            ' ' | '_' => Some(Cell::Empty),
            '.' => Some(Cell::Dot),
            'o' => Some(Cell::PowerPellet),
            '%' => Some(Cell::Bonus),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Empty => ' ',
            Cell::Dot => '.',
            Cell::PowerPellet => 'o',
            Cell::Bonus => '%',
        }
    }

    pub fn is_walkable(self) -> bool {
        self != Cell::Wall
    }

    /// Dots and power pellets. Bonus fruit is edible but never a forage target.
    pub fn is_collectible(self) -> bool {
        matches!(self, Cell::Dot | Cell::PowerPellet)
    }
}

/// The classic 17x18 maze. Codes: 0 dot, 1 wall, 2 empty, 3 power pellet, 4 bonus.
pub const CLASSIC_LAYOUT: [[u8; 18]; 17] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 3, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 3, 0, 0, 0, 3, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 4, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 1],
    [2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 4, 0, 1, 2, 2],
    [1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1],
    [1, 0, 4, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 3, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 3, 0, 0, 0, 3, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 4, 0, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major: `cells[y][x]`.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows of cells.
    ///
    /// # Arguments
    /// * `cells` - Row-major cells, `cells[y][x]`.
    ///
    /// # Returns
    /// `GridError::Empty` for no rows or an empty first row, and
    /// `GridError::RaggedRow` when a row's length differs from the first.
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual: line.len(),
                });
            }
        }
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from numeric tile codes (see [`Cell::from_code`]), one
    /// slice per row.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let line = row
                .as_ref()
                .iter()
                .enumerate()
                .map(|(x, &code)| Cell::from_code(code).ok_or(GridError::UnknownCode { code, x, y }))
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(line);
        }
        Self::from_cells(cells)
    }

    /// Parses an ASCII maze, one row per line. See [`Cell::from_glyph`].
    pub fn parse(layout: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        for (y, row) in layout.lines().enumerate() {
            let line = row
                .chars()
                .enumerate()
                .map(|(x, glyph)| Cell::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, x, y }))
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(line);
        }
        Self::from_cells(cells)
    }

    /// The built-in 17x18 maze the game ships with.
    pub fn classic() -> Self {
        let cells: Vec<Vec<Cell>> = CLASSIC_LAYOUT
            .iter()
            .map(|row| row.iter().filter_map(|&code| Cell::from_code(code)).collect())
            .collect();
        Grid {
            width: CLASSIC_LAYOUT[0].len(),
            height: CLASSIC_LAYOUT.len(),
            cells,
        }
    }

    /// A walled room of `size`x`size`. Each interior cell is a wall with
    /// probability `wall_density` and a dot otherwise.
    ///
    /// `size` is raised to at least 3. `wall_density` is clamped to `0.0..=1.0`
    /// and a NaN density means no interior walls.
    pub fn random<R: Rng>(size: usize, wall_density: f64, rng: &mut R) -> Self {
        let size = size.max(3);
        let density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };
        let cells: Vec<Vec<Cell>> = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                        if border || rng.gen_bool(density) {
                            Cell::Wall
                        } else {
                            Cell::Dot
                        }
                    })
                    .collect()
            })
            .collect();
        Grid {
            width: size,
            height: size,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `pos` lies inside the grid, walls included.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_walkable)
    }

    /// In-bounds walkable neighbors, in [`Direction::ALL`] order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| pos.offset(dir))
            .filter(move |next| self.is_walkable(*next))
    }

    /// Overwrites the cell at `pos`. Returns `false` and changes nothing when
    /// `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.cells[pos.y as usize][pos.x as usize] = cell;
        true
    }

    /// Eats whatever is on `pos`, leaving it empty. Returns what was there.
    /// Walls and out-of-bounds cells are left alone.
    pub fn consume(&mut self, pos: Position) -> Option<Cell> {
        let cell = self.get(pos)?;
        match cell {
            Cell::Dot | Cell::PowerPellet | Cell::Bonus => {
                self.set(pos, Cell::Empty);
                Some(cell)
            }
            Cell::Wall | Cell::Empty => None,
        }
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_collectible())
            .count()
    }

    pub fn walkable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .map(move |x| Position::new(x as i32, y as i32))
                .filter(move |pos| self.is_walkable(*pos))
        })
    }

    /// Print the maze with agents drawn on top.
    pub fn print_grid(&self, agents: &[(Position, char)]) {
        print!("   ");
        for x in 0..self.width {
            print!("{:2}", x % 10);
        }
        println!();

        for y in 0..self.height {
            print!("{:2} ", y);
            for x in 0..self.width {
                let pos = Position::new(x as i32, y as i32);
                let glyph = agents
                    .iter()
                    .rev()
                    .find(|(agent, _)| *agent == pos)
                    .map_or(self.cells[y][x].glyph(), |(_, glyph)| *glyph);
                print!("{} ", glyph);
            }
            println!();
        }
        println!();
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn walkability_respects_bounds_and_walls() {
        let grid = Grid::parse("###\n#.#\n###").unwrap();
        assert!(grid.is_walkable(Position::new(1, 1)));
        assert!(!grid.is_walkable(Position::new(0, 1)));
        assert!(!grid.is_walkable(Position::new(-1, 1)));
        assert!(!grid.is_walkable(Position::new(3, 1)));
        assert!(!grid.is_walkable(Position::new(1, 3)));
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let grid = Grid::parse("#####\n#...#\n#...#\n#...#\n#####").unwrap();
        let center = Position::new(2, 2);
        let neighbors: Vec<_> = grid.neighbors(center).collect();
        assert_eq!(
            neighbors,
            vec![
                Position::new(3, 2),
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn parse_rejects_ragged_and_unknown() {
        assert_eq!(
            Grid::parse("###\n##"),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            Grid::parse("#x#"),
            Err(GridError::UnknownGlyph {
                glyph: 'x',
                x: 1,
                y: 0
            })
        );
        assert_eq!(Grid::parse(""), Err(GridError::Empty));
        assert_eq!(
            Grid::from_codes(&[[1u8, 9]]),
            Err(GridError::UnknownCode { code: 9, x: 1, y: 0 })
        );
    }

    #[test]
    fn classic_layout_matches_codes() {
        let grid = Grid::classic();
        assert_eq!(grid.width(), 18);
        assert_eq!(grid.height(), 17);
        assert_eq!(grid, Grid::from_codes(&CLASSIC_LAYOUT).unwrap());
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::PowerPellet));
        assert_eq!(grid.get(Position::new(0, 7)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(5, 3)), Some(Cell::Bonus));
    }

    #[test]
    fn consume_clears_collectibles_only() {
        let mut grid = Grid::parse("#.o%_#").unwrap();
        assert_eq!(grid.remaining_collectibles(), 2);
        assert_eq!(grid.consume(Position::new(1, 0)), Some(Cell::Dot));
        assert_eq!(grid.consume(Position::new(1, 0)), None);
        assert_eq!(grid.consume(Position::new(3, 0)), Some(Cell::Bonus));
        assert_eq!(grid.consume(Position::new(0, 0)), None);
        assert_eq!(grid.consume(Position::new(9, 0)), None);
        assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Wall));
        assert_eq!(grid.remaining_collectibles(), 1);
    }

    #[test]
    fn random_grid_is_walled_and_reproducible() {
        let a = Grid::random(12, 0.3, &mut StdRng::seed_from_u64(7));
        let b = Grid::random(12, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        for i in 0..12 {
            assert!(!a.is_walkable(Position::new(i, 0)));
            assert!(!a.is_walkable(Position::new(0, i)));
            assert!(!a.is_walkable(Position::new(i, 11)));
            assert!(!a.is_walkable(Position::new(11, i)));
        }
    }

    #[test]
    fn random_grid_tolerates_nan_density() {
        let grid = Grid::random(6, f64::NAN, &mut StdRng::seed_from_u64(3));
        assert_eq!(grid.remaining_collectibles(), 16);
        let full = Grid::random(6, 7.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(full.walkable_positions().count(), 0);
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let a = Position::new(2, 2);
        assert_eq!(Direction::between(a, Position::new(3, 2)), Some(Direction::RIGHT));
        assert_eq!(Direction::between(a, Position::new(2, 1)), Some(Direction::UP));
        assert_eq!(Direction::between(a, Position::new(3, 3)), None);
        assert_eq!(Direction::between(a, a), None);
    }
}
