use std::fmt;

use crate::Error;

pub const SQUARES: usize = 9;

const WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 3x3 grid, indexed 0..=8 in row-major order starting at the top left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Mark>; SQUARES],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `mark` on the square at `index` if it is still empty.
    ///
    /// Returns `Ok(false)` without touching the board when the square is
    /// already taken. Indices past the end of the board are an error.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<bool, Error> {
        let square = self
            .squares
            .get_mut(index)
            .ok_or(Error::InvalidIndex(index))?;
        if square.is_some() {
            return Ok(false);
        }
        *square = Some(mark);
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.squares = [None; SQUARES];
    }

    pub fn snapshot(&self) -> [Option<Mark>; SQUARES] {
        self.squares
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    /// Whether any row, column or diagonal is filled entirely with `mark`.
    pub fn has_line(&self, mark: Mark) -> bool {
        WIN_SEQUENCES
            .iter()
            .any(|seq| seq.iter().all(|&i| self.squares[i] == Some(mark)))
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    fn display_squares(&self) -> [String; SQUARES] {
        let mut display: [String; SQUARES] = Default::default();
        for (index, (dsquare, square)) in display.iter_mut().zip(self.squares.iter()).enumerate() {
            *dsquare = match square {
                Some(mark) => mark.to_string(),
                None => index.to_string(),
            };
        }
        display
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.display_squares();
        writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[3], ds[4], ds[5])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[6], ds[7], ds[8])?;
        Ok(())
    }
}
