use garden_core::{CellCoord, Command, TowerSpecId};
use garden_system_inspection::{Inspection, Subject, SELL_HINT};
use garden_world::{self as world, query, World};

fn spec_id(world: &World, name: &str) -> TowerSpecId {
    query::catalog(world).find(name).expect("catalog entry").id
}

fn build(world: &mut World, name: &str, cell: CellCoord) {
    let spec = spec_id(world, name);
    let mut events = Vec::new();
    world::apply(world, Command::SetPendingPurchase { spec: Some(spec) }, &mut events);
    assert!(world::build_at(world, cell, &mut events), "{name} at {cell:?}");
}

fn plain_lines(world: &World, subject: Subject) -> Vec<String> {
    Inspection
        .hover_text(world, subject)
        .expect("hover text")
        .lines()
        .iter()
        .map(|line| line.plain())
        .collect()
}

#[test]
fn shop_entry_lists_cost_and_base_stats() {
    let world = World::new();
    let vine = spec_id(&world, "Fruit Vine");

    assert_eq!(
        plain_lines(&world, Subject::Shop(vine)),
        vec![
            "Fruit Vine  cost: $10",
            "Activates every 3 days.",
            "Produces 1 fruit per activation.",
        ]
    );
}

#[test]
fn stats_follow_declared_display_order() {
    let world = World::new();
    let mushroom = spec_id(&world, "Tiny Mushroom");

    assert_eq!(
        plain_lines(&world, Subject::Shop(mushroom)),
        vec![
            "Tiny Mushroom  cost: $18",
            "Activates every 5 days.",
            "Gives 1 mushroom(s) when sold.",
            "Has a 30% chance to spread per activation.",
            "Has a 20% chance to upgrade per activation.",
        ],
        "sell ratio is hidden and stats keep their declared order",
    );
}

#[test]
fn board_entry_uses_effective_stats() {
    let mut world = World::new();
    let vine = CellCoord::new(2, 2);
    build(&mut world, "Fruit Vine", vine);
    build(&mut world, "Growing Rock", CellCoord::new(1, 2));

    assert_eq!(
        plain_lines(&world, Subject::Board(vine)),
        vec![
            "Fruit Vine  cycle: [X---]  sell: $5",
            "Activates every 4 days.",
            "Produces 2 fruit per activation.",
            "",
            SELL_HINT,
        ]
    );
}

#[test]
fn dormant_towers_show_no_cycle_bar() {
    let mut world = World::new();
    let bin = CellCoord::new(1, 2);
    build(&mut world, "Storage Bin", bin);

    let lines = plain_lines(&world, Subject::Board(bin));
    assert_eq!(lines[0], "Storage Bin  sell: $7");
    assert_eq!(lines[1], "Increases storage of all resources by 5.");
    assert_eq!(lines.last().map(String::as_str), Some(SELL_HINT));
}

#[test]
fn blight_has_no_price_or_hint() {
    let mut world = World::new();
    let cell = CellCoord::new(3, 3);
    let mut events = Vec::new();
    world::apply(&mut world, Command::SpawnBlight { cell }, &mut events);

    let lines = plain_lines(&world, Subject::Board(cell));
    assert_eq!(lines[0], "Blighted Terrain  cycle: [X--]");
    assert!(!lines.iter().any(|line| line == SELL_HINT));
}

#[test]
fn empty_tile_has_no_hover_text() {
    let world = World::new();
    assert!(Inspection
        .hover_text(&world, Subject::Board(CellCoord::new(2, 2)))
        .is_none());
}
