//! Daily simulation tick.
//!
//! [`advance_day`] resolves one day across the whole board in fixed phases:
//!
//! 1. storage clamp
//! 2. energy charge and activation selection
//! 3. crop production (shuffled)
//! 4. purification (reshuffled)
//! 5. blight production
//! 6. digging, then removal of self-destructed and purified towers
//! 7. spreading
//! 8. upgrading
//!
//! The phase order is part of the game balance. Every failed roll, exhausted
//! budget or missing target is a silent no-op.

use std::collections::BTreeSet;

use garden_core::{
    CellCoord, Color, FloatingText, ResourceType, TowerSpec, TowerStatType as Stat,
};
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::{
    catalog::TowerCatalog,
    grid::Grid,
    ledger::{ResourceLedger, TextEffect},
    stats::{effective_stat, storage_capacity},
};

/// Marker shown on every tile cleansed by purification.
pub const PURIFIED_MARKER: &str = "X";
/// Marker shown where a utility tower was removed.
pub const REMOVED_UTILITY_MARKER: &str = "!";
/// Marker shown where a tower upgraded.
pub const UPGRADE_MARKER: &str = "^";

/// Ticks between successive production texts on the same tile.
pub const PRODUCTION_TEXT_STAGGER: u32 = 10;

/// Advances the board by one day and returns the floating texts it produced.
///
/// `rng` drives every shuffle and percentage roll, so a seeded generator
/// replays a day exactly.
pub fn advance_day<R>(
    grid: &mut Grid,
    ledger: &mut ResourceLedger,
    catalog: &TowerCatalog,
    base_storage: i32,
    rng: &mut R,
) -> Vec<FloatingText>
where
    R: Rng + ?Sized,
{
    let mut texts = Vec::new();

    clamp_to_storage(grid, ledger, catalog, base_storage);

    let Activations {
        mut activating,
        self_destructing,
    } = select_activations(grid, catalog);
    debug!(
        activating = activating.len(),
        self_destructing = self_destructing.len(),
        "activation selection"
    );

    activating.shuffle(rng);
    produce_crops(grid, catalog, ledger, &activating, &mut texts);

    activating.shuffle(rng);
    let purified = purify(grid, catalog, &activating, &self_destructing, rng, &mut texts);
    debug!(purified = purified.len(), "purification");

    produce_blight(grid, catalog, ledger, &activating, &purified, &mut texts);
    dig(grid, catalog, &activating);

    let removed: BTreeSet<CellCoord> = self_destructing.union(&purified).copied().collect();
    remove_towers(grid, catalog, &removed, &mut texts);
    activating.retain(|cell| !removed.contains(cell));

    spread(grid, catalog, &activating, rng);
    upgrade(grid, catalog, &activating, rng, &mut texts);

    texts
}

/// Discards storable resources above the current storage capacity.
pub fn clamp_to_storage(
    grid: &Grid,
    ledger: &mut ResourceLedger,
    catalog: &TowerCatalog,
    base_storage: i32,
) {
    let capacity = storage_capacity(grid, catalog, base_storage);
    for resource in ResourceType::STORABLE {
        let excess = ledger.get(resource) - capacity;
        if excess > 0 {
            debug!(resource = resource.label(), excess, capacity, "storage clamp");
            let _ = ledger.increment(resource, -excess);
        }
    }
}

struct Activations {
    activating: Vec<CellCoord>,
    self_destructing: BTreeSet<CellCoord>,
}

fn select_activations(grid: &mut Grid, catalog: &TowerCatalog) -> Activations {
    let mut activating = Vec::new();
    let mut self_destructing = BTreeSet::new();

    for cell in grid.occupied_cells() {
        let dormant = effective_stat(grid, catalog, Stat::NonActivating, cell) > 0;
        let cycle_length = effective_stat(grid, catalog, Stat::CycleLength, cell);
        let cycle_length = u32::try_from(cycle_length).unwrap_or(1).max(1);
        let destructs = effective_stat(grid, catalog, Stat::SelfDestruct, cell) > 0;

        let Some(tile) = grid.tile_mut(cell) else {
            continue;
        };

        if dormant {
            tile.set_activation_energy(1);
            continue;
        }

        let energy = tile.activation_energy();
        if energy >= cycle_length {
            tile.set_activation_energy(1);
            activating.push(cell);
            if destructs {
                let _ = self_destructing.insert(cell);
            }
        } else {
            tile.set_activation_energy(energy + 1);
        }
    }

    Activations {
        activating,
        self_destructing,
    }
}

fn produce_crops(
    grid: &Grid,
    catalog: &TowerCatalog,
    ledger: &mut ResourceLedger,
    activating: &[CellCoord],
    texts: &mut Vec<FloatingText>,
) {
    for &cell in activating {
        let mut delay = 0;
        for (stat, resource) in Stat::HARVEST_PRODUCTION {
            let amount = effective_stat(grid, catalog, stat, cell);
            if amount > 0 {
                let _ = ledger.increment_with_effect(
                    resource,
                    amount,
                    TextEffect::delayed(cell, delay),
                    texts,
                );
                delay += PRODUCTION_TEXT_STAGGER;
            }
        }
    }
}

fn purify<R>(
    grid: &Grid,
    catalog: &TowerCatalog,
    activating: &[CellCoord],
    self_destructing: &BTreeSet<CellCoord>,
    rng: &mut R,
    texts: &mut Vec<FloatingText>,
) -> BTreeSet<CellCoord>
where
    R: Rng + ?Sized,
{
    let mut purified = BTreeSet::new();

    for &cell in activating {
        let mut budget = effective_stat(grid, catalog, Stat::Purifying, cell);
        if budget <= 0 {
            continue;
        }

        let mut neighbours: Vec<CellCoord> = grid.surrounding(cell).collect();
        neighbours.shuffle(rng);

        for neighbour in neighbours {
            if budget <= 0 {
                break;
            }
            if purified.contains(&neighbour) || self_destructing.contains(&neighbour) {
                continue;
            }
            if !spec_at(grid, catalog, neighbour).is_some_and(TowerSpec::is_blight) {
                continue;
            }

            let _ = purified.insert(neighbour);
            budget -= 1;
            texts.push(FloatingText::new(
                PURIFIED_MARKER,
                ResourceType::Blight.color(),
                neighbour,
                0,
            ));
        }
    }

    purified
}

fn produce_blight(
    grid: &Grid,
    catalog: &TowerCatalog,
    ledger: &mut ResourceLedger,
    activating: &[CellCoord],
    purified: &BTreeSet<CellCoord>,
    texts: &mut Vec<FloatingText>,
) {
    for &cell in activating.iter().filter(|cell| !purified.contains(cell)) {
        let amount = effective_stat(grid, catalog, Stat::BlightProduction, cell);
        if amount > 0 {
            let _ = ledger.increment_with_effect(
                ResourceType::Blight,
                amount,
                TextEffect::at(cell),
                texts,
            );
        }
    }
}

fn dig(grid: &mut Grid, catalog: &TowerCatalog, activating: &[CellCoord]) {
    for &cell in activating {
        if effective_stat(grid, catalog, Stat::Dig, cell) <= 0 {
            continue;
        }
        if let Some(tile) = grid.tile_mut(cell) {
            if tile.dig() {
                debug!(column = cell.column(), row = cell.row(), "dug rock into dirt");
            }
        }
    }
}

fn remove_towers(
    grid: &mut Grid,
    catalog: &TowerCatalog,
    removed: &BTreeSet<CellCoord>,
    texts: &mut Vec<FloatingText>,
) {
    for &cell in removed {
        let was_utility = spec_at(grid, catalog, cell).is_some_and(TowerSpec::is_utility);
        grid.set_tower(cell, None);
        if was_utility {
            texts.push(FloatingText::new(
                REMOVED_UTILITY_MARKER,
                Color::WHITE,
                cell,
                0,
            ));
        }
    }
}

fn spread<R>(grid: &mut Grid, catalog: &TowerCatalog, activating: &[CellCoord], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for &cell in activating {
        let chance = effective_stat(grid, catalog, Stat::Spreading, cell);
        if !roll(rng, chance) {
            continue;
        }

        let Some(target) = spec_at(grid, catalog, cell)
            .and_then(|spec| catalog.spec_to_spread(spec.tower_type))
            .and_then(|id| catalog.get(id))
        else {
            continue;
        };

        let mut neighbours: Vec<CellCoord> = grid.orthogonal(cell).collect();
        neighbours.shuffle(rng);

        let destination = neighbours
            .into_iter()
            .find(|neighbour| grid.can_place_at(target, *neighbour));
        if let Some(destination) = destination {
            debug!(
                from_column = cell.column(),
                from_row = cell.row(),
                to_column = destination.column(),
                to_row = destination.row(),
                tower = target.name,
                "spread"
            );
            grid.set_tower(destination, Some(target.id));
        }
    }
}

fn upgrade<R>(
    grid: &mut Grid,
    catalog: &TowerCatalog,
    activating: &[CellCoord],
    rng: &mut R,
    texts: &mut Vec<FloatingText>,
) where
    R: Rng + ?Sized,
{
    for &cell in activating {
        let chance = effective_stat(grid, catalog, Stat::Upgrading, cell);
        if !roll(rng, chance) {
            continue;
        }

        let Some(next) = grid
            .tower_at(cell)
            .and_then(|id| catalog.spec_to_upgrade_to(id))
            .and_then(|id| catalog.get(id))
        else {
            continue;
        };

        debug!(column = cell.column(), row = cell.row(), tower = next.name, "upgrade");
        grid.set_tower(cell, Some(next.id));
        texts.push(FloatingText::new(UPGRADE_MARKER, next.color(), cell, 0));
    }
}

fn spec_at<'a>(grid: &Grid, catalog: &'a TowerCatalog, cell: CellCoord) -> Option<&'a TowerSpec> {
    grid.tower_at(cell).and_then(|id| catalog.get(id))
}

fn roll<R>(rng: &mut R, percent: i32) -> bool
where
    R: Rng + ?Sized,
{
    percent > 0 && rng.gen_range(0..100) < percent
}
