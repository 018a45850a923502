use glam::IVec2;

use crate::core::Color;

/// One character cell of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

impl Cell {
    pub fn reset(&mut self) {
        *self = Cell::default();
    }
}

/// Fixed-size grid of cells, row-major. Dimensions never change after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Console {
    width: usize,
    height: usize,
    data: Vec<Cell>,
}

impl Console {
    pub fn new(width: usize, height: usize) -> Self {
        Console {
            width,
            height,
            data: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for cell in &mut self.data {
            cell.reset();
        }
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.x as usize + pos.y as usize * self.width)
    }

    pub fn at(&self, pos: IVec2) -> Option<&Cell> {
        self.index(pos).map(|i| &self.data[i])
    }

    pub fn at_mut(&mut self, pos: IVec2) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.data[i])
    }

    /// Write `text` left to right starting at `pos`, one cell per char.
    /// Characters falling outside the console are dropped. A `None` background
    /// leaves each cell's existing background alone.
    pub fn print(&mut self, pos: IVec2, text: &str, fg: Color, bg: Option<Color>) {
        for (offset, ch) in text.chars().enumerate() {
            let at = pos + IVec2::new(offset as i32, 0);
            if let Some(cell) = self.at_mut(at) {
                cell.ch = ch;
                cell.fg = fg;
                if let Some(bg) = bg {
                    cell.bg = bg;
                }
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// The characters of row `y` as a string, handy for logging and tests.
    pub fn row_string(&self, y: usize) -> String {
        self.row(y).iter().map(|cell| cell.ch).collect()
    }

    /// Geometric center, using integer division.
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}
