//! Rectangular byte grids for map-style puzzle inputs.

use aoc_solver::ParseError;

/// A `(row, col)` position inside a [`Grid`].
pub type Pos = (usize, usize);

/// Row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl Grid<u8> {
    /// Parse non-empty lines of equal length into a byte grid.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (idx, line) in input.lines().map(str::trim_end).filter(|l| !l.is_empty()).enumerate() {
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected {} columns, found {}",
                        idx + 1,
                        w,
                        line.len()
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

impl<T> Grid<T> {
    /// Grid of `width * height` cells all set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, (row, col): Pos) -> Option<&T> {
        (row < self.height && col < self.width).then(|| &self.cells[row * self.width + col])
    }

    pub fn get_mut(&mut self, (row, col): Pos) -> Option<&mut T> {
        if row < self.height && col < self.width {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Every position with its cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((i / self.width, i % self.width), cell))
    }

    /// Position one step away in direction `(d_row, d_col)`, if still inside.
    pub fn step(&self, (row, col): Pos, (d_row, d_col): (isize, isize)) -> Option<Pos> {
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    /// In-bounds 8-neighbourhood of `pos`.
    pub fn neighbours8(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS.into_iter().filter_map(move |d| self.step(pos, d))
    }

    /// First position whose cell satisfies `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.cells
            .iter()
            .position(|cell| pred(cell))
            .map(|i| (i / self.width, i % self.width))
    }
}
