//! Hand-authored starting terrain.

use std::collections::BTreeSet;

use garden_core::{CellCoord, GroundType};

const STANDARD_COLUMNS: u32 = 17;
const STANDARD_ROWS: u32 = 8;

/// Terrain description used to populate a fresh [`Grid`](crate::Grid).
///
/// Cells listed neither as inaccessible nor as dirt start out as rock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    columns: u32,
    rows: u32,
    inaccessible: BTreeSet<CellCoord>,
    dirt: BTreeSet<CellCoord>,
}

impl Layout {
    /// Creates an all-rock layout of the provided size.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            inaccessible: BTreeSet::new(),
            dirt: BTreeSet::new(),
        }
    }

    /// The irregular 17x8 garden the game starts with.
    #[must_use]
    pub fn standard() -> Self {
        let mut layout = Self::new(STANDARD_COLUMNS, STANDARD_ROWS);

        let inaccessible = (4..8)
            .map(|row| (0, row))
            .chain((1..9).map(|column| (column, 7)))
            .chain([(0, 0), (1, 0)])
            .chain((0..4).map(|step| (4 + step, step)))
            .chain([(14, 7), (15, 7), (16, 7)])
            .chain([(10, 2), (11, 3), (12, 3), (13, 3)])
            .chain([(9, 0), (9, 1)]);
        for (column, row) in inaccessible {
            layout = layout.with_inaccessible(CellCoord::new(column, row));
        }

        let dirt = (2..5)
            .flat_map(|column| (2..4).map(move |row| (column, row)))
            .chain((10..14).flat_map(|column| (5..7).map(move |row| (column, row))));
        for (column, row) in dirt {
            layout = layout.with_dirt(CellCoord::new(column, row));
        }

        layout
    }

    /// Marks a cell as permanently unusable.
    #[must_use]
    pub fn with_inaccessible(mut self, cell: CellCoord) -> Self {
        let _ = self.inaccessible.insert(cell);
        self
    }

    /// Marks a cell as dug soil.
    #[must_use]
    pub fn with_dirt(mut self, cell: CellCoord) -> Self {
        let _ = self.dirt.insert(cell);
        self
    }

    /// Number of columns spanned by the layout.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows spanned by the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Starting terrain of the provided cell; inaccessibility wins over dirt.
    #[must_use]
    pub fn ground_at(&self, cell: CellCoord) -> GroundType {
        if self.inaccessible.contains(&cell) {
            GroundType::Inaccessible
        } else if self.dirt.contains(&cell) {
            GroundType::Dirt
        } else {
            GroundType::Rock
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_has_two_dirt_patches() {
        let layout = Layout::standard();
        let dirt = (0..layout.rows())
            .flat_map(|row| (0..layout.columns()).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| layout.ground_at(*cell) == GroundType::Dirt)
            .count();
        assert_eq!(dirt, 6 + 8);
        assert_eq!(layout.ground_at(CellCoord::new(3, 3)), GroundType::Dirt);
        assert_eq!(layout.ground_at(CellCoord::new(12, 6)), GroundType::Dirt);
    }

    #[test]
    fn diagonal_ridge_is_inaccessible() {
        let layout = Layout::standard();
        for step in 0..4 {
            assert_eq!(
                layout.ground_at(CellCoord::new(4 + step, step)),
                GroundType::Inaccessible
            );
        }
        assert_eq!(layout.ground_at(CellCoord::new(1, 2)), GroundType::Rock);
    }
}
