//! Structural 4×4 palette layout.
//!
//! The 16 quantized colors are bucketed by dominant channel into four
//! families and laid out as a 4×4 grid, so a packed palette index splits
//! into 2 bits of family and 2 bits of slot. Decoding only needs the
//! index↔color bijection; the grouping exists to make nibble indexing
//! natural on the encode side.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use rgb::{RGB8, RGBA8};

/// Palette row, in fixed grid order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFamily {
    Red,
    Green,
    Blue,
    /// Maximum channel tied between two or more channels (grays included).
    Other,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 4] = [
        ColorFamily::Red,
        ColorFamily::Green,
        ColorFamily::Blue,
        ColorFamily::Other,
    ];

    /// Classify a color by its unique maximum channel.
    pub fn of(color: RGB8) -> ColorFamily {
        let max = color.r.max(color.g).max(color.b);
        let ties =
            u8::from(color.r == max) + u8::from(color.g == max) + u8::from(color.b == max);
        if ties > 1 {
            ColorFamily::Other
        } else if color.r == max {
            ColorFamily::Red
        } else if color.g == max {
            ColorFamily::Green
        } else {
            ColorFamily::Blue
        }
    }

    /// Descending order on the family's defining channel. `Other` compares
    /// by channel sum.
    fn compare(self, a: RGB8, b: RGB8) -> Ordering {
        match self {
            ColorFamily::Red => b.r.cmp(&a.r),
            ColorFamily::Green => b.g.cmp(&a.g),
            ColorFamily::Blue => b.b.cmp(&a.b),
            ColorFamily::Other => channel_sum(b).cmp(&channel_sum(a)),
        }
    }
}

fn channel_sum(c: RGB8) -> u16 {
    u16::from(c.r) + u16::from(c.g) + u16::from(c.b)
}

/// The organized 16-entry palette: 4 families × 4 slots, alpha included.
///
/// Index `(family << 2) | slot` addresses entry
/// `cells[index >> 2][index & 3]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteGrid {
    cells: [[RGBA8; 4]; 4],
}

impl PaletteGrid {
    /// Arrange 16 colors into the grid.
    ///
    /// Each color is classified into a family, families are sorted
    /// descending by their defining channel, then rebalanced to exactly four
    /// entries each: excess members (beyond the first four in sorted order)
    /// go to a shared overflow pool, and short families pull from the pool
    /// front. The pool is sorted with the Red family's comparator no matter
    /// which family is pulling — the original format defined it that way,
    /// and the layout must match byte for byte.
    ///
    /// # Panics
    ///
    /// Panics if `colors` is not exactly 16 entries.
    pub fn organize(colors: &[RGB8]) -> PaletteGrid {
        assert_eq!(colors.len(), 16, "palette must have exactly 16 colors");

        let mut families: [Vec<RGB8>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for &color in colors {
            let family = ColorFamily::of(color);
            families[family as usize].push(color);
        }
        for (family, members) in ColorFamily::ALL.iter().zip(families.iter_mut()) {
            members.sort_by(|a, b| family.compare(*a, *b));
        }

        // 16 colors over 4 families: overflow supply always equals deficit.
        let mut overflow: Vec<RGB8> = Vec::new();
        for members in families.iter_mut() {
            if members.len() > 4 {
                overflow.extend(members.drain(4..));
            }
        }
        overflow.sort_by(|a, b| ColorFamily::Red.compare(*a, *b));
        for members in families.iter_mut() {
            while members.len() < 4 {
                members.push(overflow.remove(0));
            }
        }
        debug_assert!(overflow.is_empty());

        let mut cells = [[RGBA8::new(0, 0, 0, 0); 4]; 4];
        for (row, members) in cells.iter_mut().zip(families.iter()) {
            for (cell, &color) in row.iter_mut().zip(members.iter()) {
                *cell = RGBA8::new(color.r, color.g, color.b, 255);
            }
        }
        PaletteGrid { cells }
    }

    pub(crate) fn from_cells(cells: [[RGBA8; 4]; 4]) -> PaletteGrid {
        PaletteGrid { cells }
    }

    /// Look up a packed 4-bit index: high 2 bits family, low 2 bits slot.
    pub fn color(&self, index: u8) -> RGBA8 {
        self.cells[usize::from((index >> 2) & 0b11)][usize::from(index & 0b11)]
    }

    pub fn cells(&self) -> &[[RGBA8; 4]; 4] {
        &self.cells
    }

    /// Color → packed index, first occurrence winning when duplicate colors
    /// occupy several cells. Keyed on RGB; the grid's alpha is uniform.
    pub(crate) fn index_map(&self) -> BTreeMap<RGB8, u8> {
        let mut map = BTreeMap::new();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                map.entry(cell.rgb()).or_insert(((i << 2) | j) as u8);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rgb(r: u8, g: u8, b: u8) -> RGB8 {
        RGB8 { r, g, b }
    }

    #[test]
    fn classifies_by_unique_max_channel() {
        assert_eq!(ColorFamily::of(rgb(200, 10, 10)), ColorFamily::Red);
        assert_eq!(ColorFamily::of(rgb(5, 90, 10)), ColorFamily::Green);
        assert_eq!(ColorFamily::of(rgb(0, 0, 1)), ColorFamily::Blue);
        // Any tie on the maximum lands in Other, including full gray.
        assert_eq!(ColorFamily::of(rgb(80, 80, 10)), ColorFamily::Other);
        assert_eq!(ColorFamily::of(rgb(7, 7, 7)), ColorFamily::Other);
    }

    #[test]
    fn every_color_lands_in_exactly_one_cell() {
        // 16 distinct colors spread over all families.
        let colors: Vec<RGB8> = (0u8..16)
            .map(|i| match i % 4 {
                0 => rgb(100 + i, i, i),
                1 => rgb(i, 100 + i, i),
                2 => rgb(i, i, 100 + i),
                _ => rgb(50 + i, 50 + i, 50 + i),
            })
            .collect();

        let grid = PaletteGrid::organize(&colors);

        let mut seen: Vec<RGB8> = grid
            .cells()
            .iter()
            .flatten()
            .map(|c| c.rgb())
            .collect();
        seen.sort();
        let mut expected = colors.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn balanced_families_sort_descending_by_defining_channel() {
        let mut colors = Vec::new();
        for i in 0u8..4 {
            colors.push(rgb(200 - i * 10, 0, 0));
            colors.push(rgb(0, 150 - i * 10, 0));
            colors.push(rgb(0, 0, 99 - i * 10));
            colors.push(rgb(60 - i * 10, 60 - i * 10, 60 - i * 10));
        }

        let grid = PaletteGrid::organize(&colors);
        let cells = grid.cells();

        let reds: Vec<u8> = cells[0].iter().map(|c| c.r).collect();
        assert_eq!(reds, vec![200, 190, 180, 170]);
        let greens: Vec<u8> = cells[1].iter().map(|c| c.g).collect();
        assert_eq!(greens, vec![150, 140, 130, 120]);
        let blues: Vec<u8> = cells[2].iter().map(|c| c.b).collect();
        assert_eq!(blues, vec![99, 89, 79, 69]);
        let sums: Vec<u16> = cells[3].iter().map(|c| channel_sum(c.rgb())).collect();
        assert_eq!(sums, vec![180, 150, 120, 90]);
    }

    #[test]
    fn overflow_rebalances_with_red_comparator() {
        // All 16 colors are red-dominant: the Red row keeps the four highest
        // R values, the remaining twelve fill the other rows front-to-back
        // in descending R order.
        let colors: Vec<RGB8> = (0u8..16).map(|i| rgb(255 - i, 10, 20)).collect();

        let grid = PaletteGrid::organize(&colors);
        let cells = grid.cells();

        let flat: Vec<u8> = cells.iter().flatten().map(|c| c.r).collect();
        let expected: Vec<u8> = (0u8..16).map(|i| 255 - i).collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn index_round_trips_through_color_lookup() {
        let colors: Vec<RGB8> = (0u8..16)
            .map(|i| match i % 4 {
                0 => rgb(100 + i, 0, 0),
                1 => rgb(0, 100 + i, 0),
                2 => rgb(0, 0, 100 + i),
                _ => rgb(40 + i, 40 + i, 40 + i),
            })
            .collect();

        let grid = PaletteGrid::organize(&colors);
        let map = grid.index_map();

        assert_eq!(map.len(), 16);
        for (&color, &index) in &map {
            assert_eq!(grid.color(index).rgb(), color);
        }
    }

    #[test]
    fn duplicate_colors_map_to_first_cell() {
        let colors = vec![rgb(9, 9, 9); 16];
        let grid = PaletteGrid::organize(&colors);
        let map = grid.index_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map[&rgb(9, 9, 9)], 0);
    }
}
