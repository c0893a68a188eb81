use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::error::{ConfigError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Smallest row or column count that still admits a 4-in-a-row.
pub const MIN_DIMENSION: usize = 4;

/// Discs in a row needed to win.
pub const CONNECT: usize = 4;

/// Direction vectors (row step, col step) of the four alignments:
/// horizontal, vertical, descending right and descending left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::PlayerOne),
            Cell::PlayerTwo => Some(Player::PlayerTwo),
        }
    }

    /// Single-character form used by the text renderer
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }
}

/// Validated board size. Fixed for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDimensions {
    rows: usize,
    cols: usize,
}

impl BoardDimensions {
    pub const STANDARD: BoardDimensions = BoardDimensions {
        rows: ROWS,
        cols: COLS,
    };

    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(ConfigError::InvalidDimensions { rows, cols });
        }
        Ok(BoardDimensions { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Row-major grid of cells. Row 0 is the top; discs settle toward the
/// highest row index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: BoardDimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(dims: BoardDimensions) -> Self {
        Board {
            dims,
            cells: vec![Cell::Empty; dims.cell_count()],
        }
    }

    /// Empty 6x7 board
    pub fn standard() -> Self {
        Self::new(BoardDimensions::STANDARD)
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dims.cols + col
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if the position is outside the board; use [`Board::cell`] for
    /// a checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.rows() && col < self.cols(),
            "position ({row}, {col}) outside {}x{} board",
            self.rows(),
            self.cols()
        );
        self.cells[self.index(row, col)]
    }

    /// Checked cell lookup
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows() && col < self.cols() {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Overwrite a single cell. Does not apply gravity; meant for building
    /// positions by hand.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < self.rows() && col < self.cols(),
            "position ({row}, {col}) outside {}x{} board",
            self.rows(),
            self.cols()
        );
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols() {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns that can still take a disc
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a disc in a column, returns the row where it landed
    pub fn drop_disc(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.cols() {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols(),
            });
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Lowest empty row in this column
        let row = (0..self.rows())
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;
        self.set(row, col, cell);
        Ok(row)
    }

    /// Check if no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// True if `player` owns four contiguous cells in any alignment.
    pub fn check_win(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First 4-in-a-row owned by `player`, as (row, col) positions in scan
    /// order.
    pub fn winning_line(&self, player: Player) -> Option<[(usize, usize); CONNECT]> {
        let target = player.to_cell();
        let rows = self.rows() as isize;
        let cols = self.cols() as isize;
        let reach = CONNECT as isize - 1;

        for (dr, dc) in DIRECTIONS {
            for row in 0..rows {
                for col in 0..cols {
                    let end_row = row + dr * reach;
                    let end_col = col + dc * reach;
                    if !(0..rows).contains(&end_row) || !(0..cols).contains(&end_col) {
                        continue;
                    }

                    let mut line = [(0, 0); CONNECT];
                    let all_owned = (0..CONNECT as isize).all(|step| {
                        let r = (row + dr * step) as usize;
                        let c = (col + dc * step) as usize;
                        line[step as usize] = (r, c);
                        self.get(r, c) == target
                    });
                    if all_owned {
                        return Some(line);
                    }
                }
            }
        }

        None
    }

    /// Iterate over rows from top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dims.cols)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses the `Display` form: one line per row, top first, `.` for empty,
/// `X`/`1` for player one and `O`/`2` for player two. Whitespace inside a
/// line is ignored.
impl FromStr for Board {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed: Vec<Vec<Cell>> = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Ok(Cell::Empty),
                    'X' | 'x' | '1' => Ok(Cell::PlayerOne),
                    'O' | 'o' | '2' => Ok(Cell::PlayerTwo),
                    other => Err(ConfigError::BoardParse(format!(
                        "unexpected cell character '{other}'"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(row);
        }

        let cols = parsed.first().map_or(0, Vec::len);
        if let Some(bad) = parsed.iter().position(|r| r.len() != cols) {
            return Err(ConfigError::BoardParse(format!(
                "row {bad} has {} cells, expected {cols}",
                parsed[bad].len()
            )));
        }

        let dims = BoardDimensions::new(parsed.len(), cols)?;
        Ok(Board {
            dims,
            cells: parsed.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        assert_eq!(board.rows(), ROWS);
        assert_eq!(board.cols(), COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_dimensions_reject_small_boards() {
        assert!(matches!(
            BoardDimensions::new(3, 7),
            Err(ConfigError::InvalidDimensions { rows: 3, cols: 7 })
        ));
        assert!(BoardDimensions::new(6, 3).is_err());
        assert!(BoardDimensions::new(4, 4).is_ok());
    }

    #[test]
    fn test_drop_disc() {
        let mut board = Board::standard();

        let row = board.drop_disc(3, Cell::PlayerOne).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::PlayerOne);

        let row = board.drop_disc(3, Cell::PlayerTwo).unwrap();
        assert_eq!(row, 4); // Stacks on the first disc
        assert_eq!(board.get(4, 3), Cell::PlayerTwo);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();
        for _ in 0..ROWS {
            board.drop_disc(0, Cell::PlayerOne).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(
            board.drop_disc(0, Cell::PlayerTwo),
            Err(MoveError::ColumnFull(0))
        );
        assert_eq!(board.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::standard();
        assert_eq!(
            board.drop_disc(7, Cell::PlayerOne),
            Err(MoveError::InvalidColumn { column: 7, cols: 7 })
        );
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_checked_cell_lookup() {
        let board = Board::standard();
        assert_eq!(board.cell(5, 6), Some(Cell::Empty));
        assert_eq!(board.cell(6, 0), None);
        assert_eq!(board.cell(0, 7), None);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::standard();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_disc(col, Cell::PlayerOne).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            ..XXXX.
            ",
        );
        assert!(b.check_win(Player::PlayerOne));
        assert!(!b.check_win(Player::PlayerTwo));
        assert_eq!(
            b.winning_line(Player::PlayerOne),
            Some([(5, 2), (5, 3), (5, 4), (5, 5)])
        );
    }

    #[test]
    fn test_vertical_win() {
        let b = board(
            "
            .......
            .......
            ...O...
            ...O...
            ...O...
            ...O...
            ",
        );
        assert!(b.check_win(Player::PlayerTwo));
    }

    #[test]
    fn test_diagonal_descending_right_win() {
        let b = board(
            "
            .......
            .......
            ...X...
            ...OX..
            ...OOX.
            ...OOOX
            ",
        );
        assert!(b.check_win(Player::PlayerOne));
        assert_eq!(
            b.winning_line(Player::PlayerOne),
            Some([(2, 3), (3, 4), (4, 5), (5, 6)])
        );
    }

    #[test]
    fn test_diagonal_ascending_right_win() {
        let b = board(
            "
            .......
            .......
            ...X...
            ..XO...
            .XOO...
            XOOO...
            ",
        );
        assert!(b.check_win(Player::PlayerOne));
    }

    #[test]
    fn test_blocked_three_is_not_a_win() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            OXXXO..
            ",
        );
        assert!(!b.check_win(Player::PlayerOne));
        assert!(!b.check_win(Player::PlayerTwo));

        let b = board(
            "
            .......
            .......
            O......
            X......
            X......
            X......
            ",
        );
        assert!(!b.check_win(Player::PlayerOne));
    }

    #[test]
    fn test_win_at_far_edges_of_non_standard_board() {
        let b = board(
            "
            ........X
            .......X.
            ......X..
            .....X...
            ",
        );
        assert!(b.check_win(Player::PlayerOne));

        let b = board(
            "
            ....
            ....
            ....
            ....
            ...O
            ...O
            ...O
            ...O
            ",
        );
        assert!(b.check_win(Player::PlayerTwo));
    }

    #[test]
    fn test_display_roundtrip() {
        let mut b = Board::standard();
        b.drop_disc(2, Cell::PlayerOne).unwrap();
        b.drop_disc(2, Cell::PlayerTwo).unwrap();
        let text = b.to_string();
        assert_eq!(text.lines().count(), ROWS);
        assert_eq!(text.lines().last(), Some("..X...."));
        assert_eq!(text.parse::<Board>().unwrap(), b);
    }

    #[test]
    fn test_parse_rejects_ragged_and_unknown() {
        assert!(matches!(
            "....\n...\n....\n....".parse::<Board>(),
            Err(ConfigError::BoardParse(_))
        ));
        assert!(matches!(
            "....\n..Z.\n....\n....".parse::<Board>(),
            Err(ConfigError::BoardParse(_))
        ));
        assert!(matches!(
            "...\n...\n...".parse::<Board>(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }
}
