//! Board tiles and the placement rules that guard them.

use std::collections::BTreeMap;

use garden_core::{CellCoord, GroundType, PlacementError, TowerSpec, TowerSpecId, TowerType};

use crate::layout::Layout;

/// Mutable state of a single board tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileInfo {
    ground: GroundType,
    tower: Option<TowerSpecId>,
    activation_energy: u32,
}

impl TileInfo {
    /// Creates an empty tile with the provided terrain.
    #[must_use]
    pub const fn new(ground: GroundType) -> Self {
        Self {
            ground,
            tower: None,
            activation_energy: 1,
        }
    }

    /// Terrain of the tile.
    #[must_use]
    pub const fn ground(&self) -> GroundType {
        self.ground
    }

    /// Tower occupying the tile, if any.
    #[must_use]
    pub const fn tower(&self) -> Option<TowerSpecId> {
        self.tower
    }

    /// Days of energy accumulated toward the next activation.
    #[must_use]
    pub const fn activation_energy(&self) -> u32 {
        self.activation_energy
    }

    /// Reports whether a tower occupies the tile.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.tower.is_some()
    }

    /// Replaces the tower, resetting energy whenever the spec changes.
    pub(crate) fn set_tower(&mut self, tower: Option<TowerSpecId>) {
        if self.tower != tower {
            self.tower = tower;
            self.activation_energy = 1;
        }
    }

    pub(crate) fn set_activation_energy(&mut self, energy: u32) {
        self.activation_energy = energy.max(1);
    }

    /// Converts rock to dirt. Returns whether the terrain changed.
    pub(crate) fn dig(&mut self) -> bool {
        if self.ground == GroundType::Rock {
            self.ground = GroundType::Dirt;
            true
        } else {
            false
        }
    }
}

/// Fixed set of tiles making up the board.
///
/// Tiles are created once from a [`Layout`]; afterwards only their contents
/// change.
#[derive(Clone, Debug)]
pub struct Grid {
    tiles: BTreeMap<CellCoord, TileInfo>,
    columns: u32,
    rows: u32,
}

impl Grid {
    /// Builds the board described by the provided layout.
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        let mut tiles = BTreeMap::new();
        for row in 0..layout.rows() {
            for column in 0..layout.columns() {
                let cell = CellCoord::new(column, row);
                let _ = tiles.insert(cell, TileInfo::new(layout.ground_at(cell)));
            }
        }
        Self {
            tiles,
            columns: layout.columns(),
            rows: layout.rows(),
        }
    }

    /// Number of columns spanned by the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows spanned by the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile stored at the provided cell.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<&TileInfo> {
        self.tiles.get(&cell)
    }

    pub(crate) fn tile_mut(&mut self, cell: CellCoord) -> Option<&mut TileInfo> {
        self.tiles.get_mut(&cell)
    }

    /// Tower occupying the provided cell, if any.
    #[must_use]
    pub fn tower_at(&self, cell: CellCoord) -> Option<TowerSpecId> {
        self.tile(cell).and_then(TileInfo::tower)
    }

    /// Iterates every tile in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &TileInfo)> {
        self.tiles.iter().map(|(cell, tile)| (*cell, tile))
    }

    /// Cells holding a tower, in deterministic order.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<CellCoord> {
        self.iter()
            .filter(|(_, tile)| tile.is_occupied())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Existing board cells among the eight neighbours of `cell`.
    pub fn surrounding(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        cell.surrounding()
            .filter(move |neighbour| self.tiles.contains_key(neighbour))
    }

    /// Existing board cells among the four orthogonal neighbours of `cell`.
    pub fn orthogonal(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        cell.orthogonal()
            .filter(move |neighbour| self.tiles.contains_key(neighbour))
    }

    pub(crate) fn set_tower(&mut self, cell: CellCoord, tower: Option<TowerSpecId>) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.set_tower(tower);
        }
    }

    /// Checks whether the spec could be placed at `cell`, ignoring cost.
    pub fn check_placement(&self, spec: &TowerSpec, cell: CellCoord) -> Result<(), PlacementError> {
        let tile = self.tile(cell).ok_or(PlacementError::OutOfBounds)?;
        if tile.is_occupied() {
            return Err(PlacementError::Occupied);
        }
        match tile.ground() {
            GroundType::Inaccessible => Err(PlacementError::Inaccessible),
            GroundType::Rock if !spec.is_utility() => Err(PlacementError::RequiresDirt),
            GroundType::Dirt if spec.tower_type == TowerType::Shovel => {
                Err(PlacementError::AlreadyDug)
            }
            GroundType::Rock | GroundType::Dirt => Ok(()),
        }
    }

    /// Reports whether the spec could be placed at `cell`, ignoring cost.
    #[must_use]
    pub fn can_place_at(&self, spec: &TowerSpec, cell: CellCoord) -> bool {
        self.check_placement(spec, cell).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TowerCatalog;

    fn spec<'a>(catalog: &'a TowerCatalog, name: &str) -> &'a TowerSpec {
        catalog.find(name).expect("catalog entry")
    }

    #[test]
    fn changing_tower_resets_activation_energy() {
        let mut tile = TileInfo::new(GroundType::Dirt);
        tile.set_tower(Some(TowerSpecId::new(3)));
        tile.set_activation_energy(3);

        tile.set_tower(Some(TowerSpecId::new(3)));
        assert_eq!(tile.activation_energy(), 3, "same spec keeps energy");

        tile.set_tower(Some(TowerSpecId::new(4)));
        assert_eq!(tile.activation_energy(), 1);

        tile.set_activation_energy(2);
        tile.set_tower(None);
        assert_eq!(tile.activation_energy(), 1, "clearing also resets");
    }

    #[test]
    fn dig_only_affects_rock() {
        let mut rock = TileInfo::new(GroundType::Rock);
        assert!(rock.dig());
        assert_eq!(rock.ground(), GroundType::Dirt);
        assert!(!rock.dig());

        let mut wall = TileInfo::new(GroundType::Inaccessible);
        assert!(!wall.dig());
        assert_eq!(wall.ground(), GroundType::Inaccessible);
    }

    #[test]
    fn grid_covers_every_layout_cell() {
        let grid = Grid::from_layout(&Layout::standard());
        assert_eq!(grid.iter().count(), 17 * 8);
        assert!(grid.tile(CellCoord::new(17, 0)).is_none());
        assert_eq!(grid.surrounding(CellCoord::new(0, 0)).count(), 3);
        assert_eq!(grid.orthogonal(CellCoord::new(16, 7)).count(), 2);
    }

    #[test]
    fn placement_respects_terrain_rules() {
        let catalog = TowerCatalog::standard();
        let mut grid = Grid::from_layout(&Layout::standard());
        let vine = spec(&catalog, "Fruit Vine");
        let shovel = spec(&catalog, "Shovel");
        let rock = spec(&catalog, "Growing Rock");

        let dirt = CellCoord::new(2, 2);
        let stone = CellCoord::new(1, 2);
        let wall = CellCoord::new(0, 0);

        assert_eq!(grid.check_placement(vine, dirt), Ok(()));
        assert_eq!(
            grid.check_placement(vine, stone),
            Err(PlacementError::RequiresDirt)
        );
        assert_eq!(
            grid.check_placement(shovel, dirt),
            Err(PlacementError::AlreadyDug)
        );
        assert!(grid.can_place_at(shovel, stone));
        assert!(grid.can_place_at(rock, dirt));
        assert_eq!(
            grid.check_placement(rock, wall),
            Err(PlacementError::Inaccessible)
        );
        assert_eq!(
            grid.check_placement(rock, CellCoord::new(40, 40)),
            Err(PlacementError::OutOfBounds)
        );

        grid.set_tower(dirt, Some(vine.id));
        assert_eq!(
            grid.check_placement(rock, dirt),
            Err(PlacementError::Occupied)
        );
    }
}
