//! Plain-text presentation of the board and resource totals.

use std::fmt::Write as _;

use garden_core::{CellCoord, GroundType, ResourceType, TowerType};
use garden_world::{query, World};

/// Renders the board as rows of two-character tiles.
///
/// Towers show a type letter followed by their level; empty tiles show their
/// terrain (`##` inaccessible, `..` rock, `__` dirt).
pub(crate) fn board(world: &World) -> String {
    let grid = query::grid(world);
    let catalog = query::catalog(world);
    let mut out = String::new();

    out.push_str("   ");
    for column in 0..grid.columns() {
        let _ = write!(out, "{column:>3}");
    }
    out.push('\n');

    for row in 0..grid.rows() {
        let _ = write!(out, "{row:>3}");
        for column in 0..grid.columns() {
            let Some(tile) = grid.tile(CellCoord::new(column, row)) else {
                out.push_str("   ");
                continue;
            };
            let glyph = match tile.tower().and_then(|id| catalog.get(id)) {
                Some(spec) => format!("{}{}", tower_letter(spec.tower_type), spec.level),
                None => ground_glyph(tile.ground()).to_owned(),
            };
            let _ = write!(out, " {glyph}");
        }
        out.push('\n');
    }

    out
}

/// Summarises day, storage, money and blight.
pub(crate) fn resources(world: &World) -> String {
    let capacity = query::storage_capacity(world);
    let storable = ResourceType::STORABLE
        .iter()
        .map(|resource| {
            format!(
                "{} {}/{capacity}",
                resource.label(),
                query::resources(world, *resource)
            )
        })
        .collect::<Vec<_>>()
        .join("  ");

    let blight = query::resources(world, ResourceType::Blight);
    let max_blight = query::config(world).max_blight;
    let percent = (query::blight_percent(world) * 100.0) as u32;

    format!(
        "day {}\n{storable}\nmoney ${}\nBlight at {blight}/{max_blight} ({percent}%)",
        query::day(world),
        query::resources(world, ResourceType::Money),
    )
}

fn tower_letter(tower_type: TowerType) -> char {
    match tower_type {
        TowerType::Fruit => 'F',
        TowerType::Veg => 'V',
        TowerType::Mushroom => 'M',
        TowerType::Flower => 'W',
        TowerType::Blight => 'B',
        TowerType::Shovel => 'S',
        TowerType::Bin => 'U',
        TowerType::Rock => 'R',
        TowerType::Purifier => 'P',
    }
}

fn ground_glyph(ground: GroundType) -> &'static str {
    match ground {
        GroundType::Inaccessible => "##",
        GroundType::Rock => "..",
        GroundType::Dirt => "__",
    }
}
