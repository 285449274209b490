use garden_core::{CellCoord, Command, Event, GroundType, ResourceType, TowerStatType, TowerType};
use garden_world::{self as world, query, GameConfig, Layout, ResourceLedger, World};

const STARTING_MONEY: i32 = 100;

fn session() -> World {
    World::with_config(
        GameConfig::default()
            .with_starting_money(STARTING_MONEY)
            .with_seed(7),
    )
}

fn build(world: &mut World, name: &str, cell: CellCoord) {
    let spec = query::catalog(world).find(name).expect("catalog entry").id;
    let mut events = Vec::new();
    world::apply(world, Command::SetPendingPurchase { spec: Some(spec) }, &mut events);
    world::apply(world, Command::BuildAt { cell }, &mut events);
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::TowerBuilt { cell: built, .. } if *built == cell)),
        "{name} should be built at {cell:?}, got {events:?}"
    );
}

fn next_day(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::RequestNextDay, &mut events);
    world::apply(world, Command::Tick, &mut events);
    events
}

fn energy(world: &World, cell: CellCoord) -> u32 {
    query::activation_energy_at(world, cell).expect("tile exists")
}

#[test]
fn root_vegetable_produces_every_day() {
    let mut world = session();
    let cell = CellCoord::new(2, 2);

    build(&mut world, "Root Vegetable", cell);
    assert_eq!(
        query::resources(&world, ResourceType::Money),
        STARTING_MONEY - 6
    );

    let _ = next_day(&mut world);

    assert_eq!(query::resources(&world, ResourceType::Veg), 1);
    assert_eq!(energy(&world, cell), 1);
}

#[test]
fn fruit_vine_charges_for_three_days() {
    let mut world = session();
    let cell = CellCoord::new(2, 2);
    build(&mut world, "Fruit Vine", cell);

    let _ = next_day(&mut world);
    assert_eq!(query::resources(&world, ResourceType::Fruit), 0);
    assert_eq!(energy(&world, cell), 2);

    let _ = next_day(&mut world);
    assert_eq!(query::resources(&world, ResourceType::Fruit), 0);
    assert_eq!(energy(&world, cell), 3);

    let _ = next_day(&mut world);
    assert_eq!(query::resources(&world, ResourceType::Fruit), 1);
    assert_eq!(energy(&world, cell), 1);
}

#[test]
fn growing_rock_boosts_adjacent_vine() {
    let mut world = session();
    let vine = CellCoord::new(2, 2);
    build(&mut world, "Fruit Vine", vine);
    build(&mut world, "Growing Rock", CellCoord::new(1, 2));

    assert_eq!(
        query::effective_stat(&world, TowerStatType::FruitProduction, vine),
        2
    );

    let cycle = query::effective_stat(&world, TowerStatType::CycleLength, vine);
    for _ in 0..cycle {
        let _ = next_day(&mut world);
    }
    assert_eq!(query::resources(&world, ResourceType::Fruit), 2);
}

#[test]
fn purification_tablet_cleanses_adjacent_blight() {
    let mut world = session();
    let mut events = Vec::new();
    let blights = [CellCoord::new(2, 2), CellCoord::new(3, 2)];
    for cell in blights {
        world::apply(&mut world, Command::SpawnBlight { cell }, &mut events);
    }
    let tablet = CellCoord::new(2, 3);
    build(&mut world, "Purification Tablet", tablet);

    let _ = next_day(&mut world);
    assert_eq!(
        query::tower_cells(&world, |spec| spec.is_blight()),
        blights.to_vec()
    );
    let before = query::all_floating_texts(&world).len();

    let _ = next_day(&mut world);

    assert!(query::tower_cells(&world, |_| true).is_empty());
    let markers: Vec<&str> = query::all_floating_texts(&world)[before..]
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(markers.iter().filter(|text| **text == "X").count(), 2);
    assert_eq!(markers.iter().filter(|text| **text == "!").count(), 1);
    assert_eq!(markers.len(), 3);
}

#[test]
fn storage_bin_sells_for_half_its_cost() {
    let mut world = session();
    let cell = CellCoord::new(1, 2);
    build(&mut world, "Storage Bin", cell);
    let before = query::resources(&world, ResourceType::Money);

    let mut events = Vec::new();
    assert!(world::sell_at(&mut world, cell, &mut events));

    assert_eq!(query::resources(&world, ResourceType::Money), before + 7);
    assert!(query::tile_info(&world, cell)
        .expect("tile")
        .tower()
        .is_none());
}

#[test]
fn ledger_underflow_clamps_to_zero() {
    let mut ledger = ResourceLedger::new(10);
    assert_eq!(ledger.increment(ResourceType::Money, -9999), 0);
    assert_eq!(ledger.get(ResourceType::Money), 0);
}

#[test]
fn build_then_sell_never_profits() {
    let catalog = query::catalog(&World::new()).clone();
    let purchasable: Vec<_> = catalog
        .basic_towers()
        .iter()
        .chain(catalog.utility_towers())
        .filter_map(|id| catalog.get(*id))
        .collect();

    for spec in purchasable {
        let mut world = session();
        let cell = if spec.tower_type == TowerType::Shovel {
            CellCoord::new(1, 2)
        } else {
            CellCoord::new(3, 3)
        };
        build(&mut world, spec.name, cell);
        let mut events = Vec::new();
        assert!(world::sell_at(&mut world, cell, &mut events));

        assert_eq!(
            query::resources(&world, ResourceType::Money),
            STARTING_MONEY - spec.cost + spec.sell_price(),
            "{} should refund its sell price",
            spec.name
        );
        assert!(spec.sell_price() <= spec.cost);
    }
}

#[test]
fn blight_cap_is_reported() {
    let mut world = World::with_config(GameConfig {
        max_blight: 2,
        ..GameConfig::default()
    });
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnBlight {
            cell: CellCoord::new(11, 5),
        },
        &mut events,
    );

    let mut reached = false;
    for _ in 0..60 {
        if next_day(&mut world).contains(&Event::BlightCapReached) {
            reached = true;
            break;
        }
    }

    assert!(reached, "upgraded blight should eventually hit the cap");
    assert_eq!(query::blight_percent(&world), 1.0);
}

#[test]
fn custom_layouts_shape_the_board() {
    let layout = Layout::new(3, 2)
        .with_dirt(CellCoord::new(1, 0))
        .with_inaccessible(CellCoord::new(2, 1));
    let mut world = World::with_layout(GameConfig::default().with_seed(3), &layout);

    let ground = |world: &World, column, row| {
        query::tile_info(world, CellCoord::new(column, row)).map(|tile| tile.ground())
    };
    assert_eq!(ground(&world, 1, 0), Some(GroundType::Dirt));
    assert_eq!(ground(&world, 0, 0), Some(GroundType::Rock));
    assert_eq!(ground(&world, 2, 1), Some(GroundType::Inaccessible));
    assert_eq!(ground(&world, 3, 0), None);

    build(&mut world, "Root Vegetable", CellCoord::new(1, 0));
    let veg = query::catalog(&world).find("Root Vegetable").expect("entry").id;
    let mut events = Vec::new();
    world::apply(&mut world, Command::SetPendingPurchase { spec: Some(veg) }, &mut events);
    assert!(!query::can_build_at(&world, CellCoord::new(0, 0)));
    assert!(!query::can_build_at(&world, CellCoord::new(2, 1)));

    let _ = next_day(&mut world);
    assert_eq!(query::resources(&world, ResourceType::Veg), 1);
}
