use crate::quadtree::MxQuadTree;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Terminal preview of the occupied cells of a [`MxQuadTree`], two cells wide and four cells
/// tall per character. North is up: `y = width - 1` is drawn on the top row.
pub struct Preview {
    /// The cell buffer, row major, top row first
    cb: Vec<bool>,

    /// Width of the cell buffer
    w: usize,

    /// Height of the cell buffer
    h: usize,
}

impl Preview {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            cb: vec![false; w * h],
            w,
            h,
        }
    }

    /// A preview large enough to show all of `tree`, capped at `max` cells on a side.
    pub fn fitting(tree: &MxQuadTree, max: usize) -> Self {
        let s = (tree.width() as usize).min(max);

        Self::new(s, s)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turn on every occupied cell of `tree` that falls inside the preview. The bottom-left
    /// corner of the preview is the origin of the tree.
    pub fn draw(&mut self, tree: &MxQuadTree) {
        for p in tree.points() {
            let (x, y) = (p.x as usize, p.y as usize);

            if x < self.w && y < self.h {
                let i = self.xy_from(x, self.h - 1 - y);
                self.cb[i] = true;
            }
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Pack the cell buffer into lines of braille characters, each terminated by `\n`.
    pub fn render(&self) -> String {
        let (bw, bh) = (self.w.div_ceil(2), self.h.div_ceil(4));
        let mut cp = vec![BRAILLE_EMPTY; bw * bh];

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        // Each braille character is 3 bytes, plus one newline per line
        let mut fb = String::with_capacity(3 * (bw * bh) + bh);

        for (i, &c) in cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                fb.push('\n');
            }

            fb.push(char::from_u32(c).unwrap_or(' '));
        }

        if !cp.is_empty() {
            fb.push('\n');
        }

        fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
