//! Static registry of tower definitions.

use garden_core::{StatBlock, TowerSpec, TowerSpecId, TowerStatType as Stat, TowerType};

/// Read-only registry mapping tower handles to their specs.
///
/// Specs live in a single arena and tiles refer to them through
/// [`TowerSpecId`] handles, so every placed tower of a kind shares one entry.
#[derive(Clone, Debug)]
pub struct TowerCatalog {
    specs: Vec<TowerSpec>,
    basic: Vec<TowerSpecId>,
    utility: Vec<TowerSpecId>,
}

struct Entry {
    name: &'static str,
    tower_type: TowerType,
    level: u8,
    icon: &'static str,
    stats: StatBlock,
    cost: i32,
}

const fn entry(
    name: &'static str,
    tower_type: TowerType,
    level: u8,
    icon: &'static str,
    stats: StatBlock,
    cost: i32,
) -> Entry {
    Entry {
        name,
        tower_type,
        level,
        icon,
        stats,
        cost,
    }
}

const BASIC_TOWERS: [Entry; 12] = [
    entry(
        "Fruit Vine",
        TowerType::Fruit,
        1,
        "fruit_1",
        StatBlock::new()
            .with(Stat::CycleLength, 3)
            .with(Stat::FruitProduction, 1),
        10,
    ),
    entry(
        "Fruit Bush",
        TowerType::Fruit,
        2,
        "fruit_2",
        StatBlock::new()
            .with(Stat::CycleLength, 4)
            .with(Stat::FruitProduction, 2),
        25,
    ),
    entry(
        "Fruit Tree",
        TowerType::Fruit,
        3,
        "fruit_3",
        StatBlock::new()
            .with(Stat::CycleLength, 4)
            .with(Stat::FruitProduction, 6),
        60,
    ),
    entry(
        "Root Vegetable",
        TowerType::Veg,
        1,
        "veg_1",
        StatBlock::new()
            .with(Stat::CycleLength, 1)
            .with(Stat::VegProduction, 1),
        6,
    ),
    entry(
        "Leafy Vegetable",
        TowerType::Veg,
        2,
        "veg_2",
        StatBlock::new()
            .with(Stat::CycleLength, 2)
            .with(Stat::VegProduction, 3),
        15,
    ),
    entry(
        "Vegetable Stalk",
        TowerType::Veg,
        3,
        "veg_3",
        StatBlock::new()
            .with(Stat::CycleLength, 2)
            .with(Stat::VegProduction, 4)
            .with(Stat::Withering, 1),
        45,
    ),
    entry(
        "Tiny Mushroom",
        TowerType::Mushroom,
        1,
        "mushroom_1",
        StatBlock::new()
            .with(Stat::CycleLength, 5)
            .with(Stat::MushroomHarvest, 1)
            .with(Stat::Spreading, 30)
            .with(Stat::Upgrading, 20)
            .with(Stat::SellToBuyRatio, 33),
        18,
    ),
    entry(
        "Shelf Mushroom",
        TowerType::Mushroom,
        2,
        "mushroom_2",
        StatBlock::new()
            .with(Stat::CycleLength, 5)
            .with(Stat::MushroomHarvest, 2)
            .with(Stat::Spreading, 30)
            .with(Stat::Upgrading, 20)
            .with(Stat::SellToBuyRatio, 33),
        36,
    ),
    entry(
        "Cluster Mushroom",
        TowerType::Mushroom,
        3,
        "mushroom_3",
        StatBlock::new()
            .with(Stat::CycleLength, 5)
            .with(Stat::MushroomHarvest, 5)
            .with(Stat::Spreading, 50)
            .with(Stat::SellToBuyRatio, 33),
        72,
    ),
    entry(
        "Ok Flowers",
        TowerType::Flower,
        1,
        "flower_1",
        StatBlock::new()
            .with(Stat::CycleLength, 4)
            .with(Stat::FlowerProduction, 2)
            .with(Stat::Upgrading, 25)
            .with(Stat::SellToBuyRatio, 75),
        12,
    ),
    entry(
        "Nice Flowers",
        TowerType::Flower,
        2,
        "flower_2",
        StatBlock::new()
            .with(Stat::CycleLength, 4)
            .with(Stat::FlowerProduction, 2)
            .with(Stat::Upgrading, 25)
            .with(Stat::SellToBuyRatio, 75),
        24,
    ),
    entry(
        "Awesome Flowers",
        TowerType::Flower,
        3,
        "flower_3",
        StatBlock::new()
            .with(Stat::CycleLength, 4)
            .with(Stat::FlowerProduction, 2)
            .with(Stat::Spreading, 10)
            .with(Stat::SellToBuyRatio, 75),
        48,
    ),
];

const UTILITY_TOWERS: [Entry; 4] = [
    entry(
        "Shovel",
        TowerType::Shovel,
        1,
        "shovel",
        StatBlock::new()
            .with(Stat::CycleLength, 1)
            .with(Stat::Dig, 1)
            .with(Stat::SelfDestruct, 1),
        25,
    ),
    entry(
        "Growing Rock",
        TowerType::Rock,
        1,
        "growing_rock",
        StatBlock::new()
            .with(Stat::Growing, 1)
            .with(Stat::Slowing, 1)
            .with(Stat::NonActivating, 1),
        30,
    ),
    entry(
        "Purification Tablet",
        TowerType::Purifier,
        1,
        "tombstone",
        StatBlock::new()
            .with(Stat::CycleLength, 2)
            .with(Stat::Purifying, 3)
            .with(Stat::SelfDestruct, 1),
        50,
    ),
    entry(
        "Storage Bin",
        TowerType::Bin,
        1,
        "storage_bin",
        StatBlock::new()
            .with(Stat::Storage, 5)
            .with(Stat::NonActivating, 1),
        15,
    ),
];

const BLIGHT_TOWERS: [Entry; 3] = [
    entry(
        "Blighted Terrain",
        TowerType::Blight,
        1,
        "blight_1",
        StatBlock::new()
            .with(Stat::CycleLength, 3)
            .with(Stat::Upgrading, 30)
            .with(Stat::Spreading, 10),
        -1,
    ),
    entry(
        "Blighted Growth",
        TowerType::Blight,
        2,
        "blight_2",
        StatBlock::new()
            .with(Stat::CycleLength, 2)
            .with(Stat::Upgrading, 30)
            .with(Stat::Spreading, 20)
            .with(Stat::BlightProduction, 1),
        -1,
    ),
    entry(
        "Blighted Abomination",
        TowerType::Blight,
        3,
        "blight_3",
        StatBlock::new()
            .with(Stat::CycleLength, 1)
            .with(Stat::Spreading, 30)
            .with(Stat::BlightProduction, 2),
        -1,
    ),
];

impl TowerCatalog {
    /// Builds the standard catalog shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self {
            specs: Vec::with_capacity(
                BASIC_TOWERS.len() + UTILITY_TOWERS.len() + BLIGHT_TOWERS.len(),
            ),
            basic: Vec::with_capacity(BASIC_TOWERS.len()),
            utility: Vec::with_capacity(UTILITY_TOWERS.len()),
        };

        for entry in BASIC_TOWERS {
            let id = catalog.register(entry);
            catalog.basic.push(id);
        }
        for entry in UTILITY_TOWERS {
            let id = catalog.register(entry);
            catalog.utility.push(id);
        }
        for entry in BLIGHT_TOWERS {
            let _ = catalog.register(entry);
        }

        catalog
    }

    fn register(&mut self, entry: Entry) -> TowerSpecId {
        let id = TowerSpecId::new(self.specs.len() as u16);
        self.specs.push(TowerSpec {
            id,
            name: entry.name,
            tower_type: entry.tower_type,
            level: entry.level,
            icon: entry.icon,
            stats: entry.stats,
            cost: entry.cost,
        });
        id
    }

    /// Retrieves the spec stored under the provided handle.
    #[must_use]
    pub fn get(&self, id: TowerSpecId) -> Option<&TowerSpec> {
        self.specs.get(usize::from(id.get()))
    }

    /// Looks up a spec by its player-facing name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TowerSpec> {
        self.specs
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    /// Iterates every spec in the catalog.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSpec> {
        self.specs.iter()
    }

    /// Plant towers offered in the shop, in shop order.
    #[must_use]
    pub fn basic_towers(&self) -> &[TowerSpecId] {
        &self.basic
    }

    /// Utility towers offered in the shop, in shop order.
    #[must_use]
    pub fn utility_towers(&self) -> &[TowerSpecId] {
        &self.utility
    }

    /// Returns the level-one spec a tower of the provided type spreads as.
    ///
    /// Utility types never spread.
    #[must_use]
    pub fn spec_to_spread(&self, tower_type: TowerType) -> Option<TowerSpecId> {
        match tower_type {
            TowerType::Fruit
            | TowerType::Veg
            | TowerType::Mushroom
            | TowerType::Flower
            | TowerType::Blight => self.spec_at_level(tower_type, 1),
            TowerType::Shovel | TowerType::Bin | TowerType::Rock | TowerType::Purifier => None,
        }
    }

    /// Returns the next spec in the upgrade chain, or `None` when maxed out.
    #[must_use]
    pub fn spec_to_upgrade_to(&self, id: TowerSpecId) -> Option<TowerSpecId> {
        let spec = self.get(id)?;
        let next_level = spec.level.checked_add(1)?;
        self.spec_at_level(spec.tower_type, next_level)
    }

    fn spec_at_level(&self, tower_type: TowerType, level: u8) -> Option<TowerSpecId> {
        self.specs
            .iter()
            .find(|spec| spec.tower_type == tower_type && spec.level == level)
            .map(|spec| spec.id)
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
