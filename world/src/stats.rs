//! Effective stat resolution combining base stats with neighbour auras.

use garden_core::{CellCoord, TowerSpec, TowerStatType};

use crate::{catalog::TowerCatalog, grid::Grid};

/// Effective value of `stat` for the tower standing at `cell`.
///
/// Empty or unknown cells resolve to zero.
#[must_use]
pub fn effective_stat(
    grid: &Grid,
    catalog: &TowerCatalog,
    stat: TowerStatType,
    cell: CellCoord,
) -> i32 {
    grid.tower_at(cell)
        .and_then(|id| catalog.get(id))
        .map_or(0, |spec| effective_stat_for(grid, catalog, spec, stat, cell))
}

/// Effective value of `stat` if `spec` stood at `cell`.
///
/// Production stats gain the growing and lose the withering of the eight
/// neighbours; cycle length gains their slowing. Auras only modify stats the
/// spec actually has, so a positive base value is required. Every other stat
/// resolves to its base value.
#[must_use]
pub fn effective_stat_for(
    grid: &Grid,
    catalog: &TowerCatalog,
    spec: &TowerSpec,
    stat: TowerStatType,
    cell: CellCoord,
) -> i32 {
    let base = spec.stat(stat);
    if base <= 0 {
        return base;
    }

    if stat.is_production() {
        base + neighbour_total(grid, catalog, TowerStatType::Growing, cell)
            - neighbour_total(grid, catalog, TowerStatType::Withering, cell)
    } else if stat == TowerStatType::CycleLength {
        base + neighbour_total(grid, catalog, TowerStatType::Slowing, cell)
    } else {
        base
    }
}

fn neighbour_total(grid: &Grid, catalog: &TowerCatalog, aura: TowerStatType, cell: CellCoord) -> i32 {
    grid.surrounding(cell)
        .filter_map(|neighbour| grid.tower_at(neighbour))
        .filter_map(|id| catalog.get(id))
        .map(|spec| spec.stat(aura))
        .sum()
}

/// Storage limit shared by every storable resource.
#[must_use]
pub fn storage_capacity(grid: &Grid, catalog: &TowerCatalog, base_storage: i32) -> i32 {
    let bonus: i32 = grid
        .iter()
        .filter_map(|(_, tile)| tile.tower())
        .filter_map(|id| catalog.get(id))
        .map(|spec| spec.stat(TowerStatType::Storage))
        .sum();
    (base_storage + bonus).max(0)
}

/// Fraction of the blight cap reached, bounded to `0.0..=1.0`.
#[must_use]
pub fn blight_percent(blight: i32, max_blight: i32) -> f32 {
    if max_blight <= 0 {
        return 1.0;
    }
    (blight as f32 / max_blight as f32).clamp(0.0, 1.0)
}
