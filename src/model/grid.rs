//! Grid rectangle state and subdivision
//!
//! The rectangle is half-open: `[lx, ux) × [ly, uy)`. Every operation keeps
//! `lx < ux`, `ly < uy` and the rectangle inside the screen it started on.

/// Which part of an axis to keep: sector `index` out of `divisions`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelect {
    pub index: u32,
    pub divisions: u32,
}

impl AxisSelect {
    pub const fn new(index: u32, divisions: u32) -> Self {
        Self { index, divisions }
    }
}

/// Pan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridState {
    pub lx: i32,
    pub ly: i32,
    pub ux: i32,
    pub uy: i32,
    pub cx: i32,
    pub cy: i32,
    screen_w: i32,
    screen_h: i32,
}

impl GridState {
    /// Full-screen rectangle for a `width × height` screen
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut state = Self {
            lx: 0,
            ly: 0,
            ux: width,
            uy: height,
            cx: 0,
            cy: 0,
            screen_w: width,
            screen_h: height,
        };
        state.recenter();
        state
    }

    pub fn width(&self) -> i32 {
        self.ux - self.lx
    }

    pub fn height(&self) -> i32 {
        self.uy - self.ly
    }

    pub fn center(&self) -> (i32, i32) {
        (self.cx, self.cy)
    }

    fn recenter(&mut self) {
        self.cx = self.lx + self.width() / 2;
        self.cy = self.ly + self.height() / 2;
    }

    /// Shrink to the selected sector on each axis that has a selection.
    ///
    /// An axis whose new span would drop below `min_size` keeps its old bounds.
    /// Returns whether anything changed.
    pub fn focus(
        &mut self,
        row: Option<AxisSelect>,
        col: Option<AxisSelect>,
        min_size: i32,
    ) -> bool {
        let min_size = min_size.max(1);
        let before = *self;

        if let Some(sel) = col {
            if let Some((lo, hi)) = subdivide(self.lx, self.ux, sel, min_size) {
                self.lx = lo;
                self.ux = hi;
            }
        }
        if let Some(sel) = row {
            if let Some((lo, hi)) = subdivide(self.ly, self.uy, sel, min_size) {
                self.ly = lo;
                self.uy = hi;
            }
        }

        self.recenter();
        *self != before
    }

    /// Select sector `(row, col)` of an `nr × nc` grid
    pub fn focus_sector(&mut self, row: u32, col: u32, nr: u32, nc: u32, min_size: i32) -> bool {
        self.focus(
            Some(AxisSelect::new(row, nr)),
            Some(AxisSelect::new(col, nc)),
            min_size,
        )
    }

    /// Keep one half of one axis
    pub fn cut(&mut self, direction: PanDirection, min_size: i32) -> bool {
        match direction {
            PanDirection::Up => self.focus(Some(AxisSelect::new(0, 2)), None, min_size),
            PanDirection::Down => self.focus(Some(AxisSelect::new(1, 2)), None, min_size),
            PanDirection::Left => self.focus(None, Some(AxisSelect::new(0, 2)), min_size),
            PanDirection::Right => self.focus(None, Some(AxisSelect::new(1, 2)), min_size),
        }
    }

    /// Move the rectangle by its own size, clamped to the screen
    pub fn pan(&mut self, direction: PanDirection) {
        let w = self.width();
        let h = self.height();
        match direction {
            PanDirection::Left => {
                self.lx = (self.lx - w).max(0);
                self.ux = self.lx + w;
            }
            PanDirection::Right => {
                self.ux = (self.ux + w).min(self.screen_w);
                self.lx = self.ux - w;
            }
            PanDirection::Up => {
                self.ly = (self.ly - h).max(0);
                self.uy = self.ly + h;
            }
            PanDirection::Down => {
                self.uy = (self.uy + h).min(self.screen_h);
                self.ly = self.uy - h;
            }
        }
        self.recenter();
    }

    /// Positions of the interior lines: `(vertical xs, horizontal ys)`
    pub fn lines(&self, nr: u32, nc: u32) -> (Vec<i32>, Vec<i32>) {
        let nc = nc.max(1) as i32;
        let nr = nr.max(1) as i32;
        let col_w = self.width() / nc;
        let row_h = self.height() / nr;
        (
            (1..nc).map(|i| self.lx + i * col_w).collect(),
            (1..nr).map(|i| self.ly + i * row_h).collect(),
        )
    }
}

fn subdivide(lo: i32, hi: i32, sel: AxisSelect, min_size: i32) -> Option<(i32, i32)> {
    let divisions = sel.divisions.max(1) as i32;
    let index = sel.index as i32;
    if index >= divisions {
        return None;
    }
    let span = (hi - lo) / divisions;
    if span < min_size {
        return None;
    }
    let start = lo + index * span;
    Some((start, start + span))
}
