#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the garden engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! presentation layers react to. Static tower data is described by
//! [`TowerSpec`] values that tiles reference through [`TowerSpecId`] handles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the garden. Keep the blight at bay.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Selects the tower the player intends to buy, or clears the selection.
    SetPendingPurchase {
        /// Catalog entry to purchase, `None` to clear the selection.
        spec: Option<TowerSpecId>,
    },
    /// Attempts to build the pending purchase on the provided cell.
    BuildAt {
        /// Cell that should receive the tower.
        cell: CellCoord,
    },
    /// Attempts to sell the tower occupying the provided cell.
    SellAt {
        /// Cell holding the tower to sell.
        cell: CellCoord,
    },
    /// Latches a request to advance the day at the next tick boundary.
    RequestNextDay,
    /// Advances the presentation clock by one update tick.
    Tick,
    /// Seeds a level-one blight tower on the provided cell.
    SpawnBlight {
        /// Cell that should become blighted.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the pending purchase selection changed.
    PendingPurchaseChanged {
        /// Catalog entry now selected, if any.
        spec: Option<TowerSpecId>,
    },
    /// Confirms that a tower was bought and placed.
    TowerBuilt {
        /// Cell that received the tower.
        cell: CellCoord,
        /// Catalog entry that was placed.
        spec: TowerSpecId,
        /// Money debited for the purchase.
        cost: i32,
    },
    /// Reports that a build request was rejected.
    BuildRejected {
        /// Cell provided in the build request.
        cell: CellCoord,
        /// Specific reason the build failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was sold and removed.
    TowerSold {
        /// Cell the tower occupied.
        cell: CellCoord,
        /// Catalog entry that was sold.
        spec: TowerSpecId,
        /// Money credited for the sale.
        price: i32,
        /// Mushrooms harvested as part of the sale.
        harvest: i32,
    },
    /// Reports that a sale request was rejected.
    SaleRejected {
        /// Cell provided in the sale request.
        cell: CellCoord,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Acknowledges that a day advance was requested.
    DayRequested,
    /// Indicates that the presentation clock advanced.
    TimeAdvanced {
        /// Number of ticks processed since the session started.
        tick: u64,
    },
    /// Confirms that the daily simulation ran to completion.
    DayAdvanced {
        /// Day counter after the advance.
        day: u32,
    },
    /// Confirms that a blight tower was seeded onto the board.
    BlightSpawned {
        /// Cell that became blighted.
        cell: CellCoord,
    },
    /// Reports that blight could not be seeded onto the requested cell.
    BlightSpawnRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Signals that blight reached its cap; the session is lost.
    BlightCapReached,
}

/// Display color expressed as byte RGB components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self::from_rgb(0xff, 0xff, 0xff);
    /// Neutral gray used for secondary text.
    pub const GRAY: Self = Self::from_rgb(0x80, 0x80, 0x80);
    /// Yellow used for cycle bars and money.
    pub const YELLOW: Self = Self::from_rgb(0xff, 0xff, 0x00);
    /// Light dirt tone.
    pub const DIRT_LIGHT: Self = Self::from_rgb(0xae, 0x99, 0x73);

    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

const FRUIT_COLOR: Color = Color::from_rgb(0xf3, 0x7d, 0x93);
const VEG_COLOR: Color = Color::from_rgb(0xa6, 0xe7, 0x77);
const MUSHROOM_COLOR: Color = Color::from_rgb(0xdc, 0xdc, 0xdc);
const FLOWER_COLOR: Color = Color::from_rgb(0xff, 0xcd, 0x75);
const BLIGHT_COLOR: Color = Color::from_rgb(0xe4, 0x7f, 0xfd);

/// Location of a single board tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell displaced by the provided offsets, if it stays non-negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(CellCoord::new(column, row))
    }

    /// Enumerates the eight orthogonal and diagonal neighbours of the cell.
    ///
    /// Neighbours that would have a negative coordinate are skipped. Whether a
    /// neighbour exists on the board is for the caller to decide.
    pub fn surrounding(self) -> impl Iterator<Item = CellCoord> {
        SURROUNDING_OFFSETS
            .iter()
            .filter_map(move |&(columns, rows)| self.offset(columns, rows))
    }

    /// Enumerates the four orthogonal neighbours of the cell.
    pub fn orthogonal(self) -> impl Iterator<Item = CellCoord> {
        ORTHOGONAL_OFFSETS
            .iter()
            .filter_map(move |&(columns, rows)| self.offset(columns, rows))
    }
}

const SURROUNDING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Resources tracked by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    /// Harvested fruit.
    Fruit,
    /// Harvested vegetables.
    Veg,
    /// Harvested mushrooms.
    Mushroom,
    /// Harvested flowers.
    Flower,
    /// Accumulated blight; the session is lost when it reaches the cap.
    Blight,
    /// Spendable money.
    Money,
    /// Victory points.
    Vp,
}

impl ResourceType {
    /// Every resource in ledger order.
    pub const ALL: [Self; 7] = [
        Self::Fruit,
        Self::Veg,
        Self::Mushroom,
        Self::Flower,
        Self::Blight,
        Self::Money,
        Self::Vp,
    ];

    /// Resources bounded by storage capacity.
    pub const STORABLE: [Self; 4] = [Self::Fruit, Self::Veg, Self::Mushroom, Self::Flower];

    /// Dense index of the resource, suitable for array lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display color used for the resource.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Fruit => FRUIT_COLOR,
            Self::Veg => VEG_COLOR,
            Self::Mushroom => MUSHROOM_COLOR,
            Self::Flower => FLOWER_COLOR,
            Self::Blight => BLIGHT_COLOR,
            Self::Money => Color::YELLOW,
            Self::Vp => Color::WHITE,
        }
    }

    /// Symbol prefixed to amounts of this resource, if any.
    #[must_use]
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::Money => Some('$'),
            _ => None,
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Veg => "veg",
            Self::Mushroom => "mushroom",
            Self::Flower => "flower",
            Self::Blight => "blight",
            Self::Money => "money",
            Self::Vp => "vp",
        }
    }
}

/// Families of towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerType {
    /// Fruit producing plants.
    Fruit,
    /// Vegetable producing plants.
    Veg,
    /// Mushrooms, harvested when sold.
    Mushroom,
    /// Flower producing plants.
    Flower,
    /// Hostile growth that produces blight.
    Blight,
    /// Digging tool that converts rock to dirt.
    Shovel,
    /// Storage extension.
    Bin,
    /// Aura rock affecting neighbours.
    Rock,
    /// Removes adjacent blight.
    Purifier,
}

impl TowerType {
    /// Reports whether the tower may be placed on rock terrain.
    #[must_use]
    pub const fn is_utility(self) -> bool {
        matches!(
            self,
            Self::Shovel | Self::Bin | Self::Rock | Self::Purifier
        )
    }

    /// Display color used for towers of this type.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Fruit => FRUIT_COLOR,
            Self::Veg => VEG_COLOR,
            Self::Mushroom => MUSHROOM_COLOR,
            Self::Flower => FLOWER_COLOR,
            Self::Blight => BLIGHT_COLOR,
            Self::Shovel => Color::DIRT_LIGHT,
            Self::Bin | Self::Rock | Self::Purifier => Color::WHITE,
        }
    }
}

/// Named numeric stats a tower spec can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerStatType {
    /// Days between activations.
    CycleLength,
    /// Fruit credited per activation.
    FruitProduction,
    /// Vegetables credited per activation.
    VegProduction,
    /// Mushrooms credited per activation.
    MushroomProduction,
    /// Flowers credited per activation.
    FlowerProduction,
    /// Blight credited per activation.
    BlightProduction,
    /// Mushrooms credited when the tower is sold.
    MushroomHarvest,
    /// Percent chance to upgrade per activation.
    Upgrading,
    /// Percent chance to spread per activation.
    Spreading,
    /// Production bonus granted to neighbours.
    Growing,
    /// Cycle length penalty granted to neighbours.
    Slowing,
    /// Production penalty granted to neighbours.
    Withering,
    /// Converts rock to dirt on activation.
    Dig,
    /// Storage added to every storable resource.
    Storage,
    /// Number of adjacent blight towers removed per activation.
    Purifying,
    /// Tower never activates.
    NonActivating,
    /// Tower is removed after activating.
    SelfDestruct,
    /// Percentage of the cost refunded on sale.
    SellToBuyRatio,
}

impl TowerStatType {
    /// Number of stat types.
    pub const COUNT: usize = 18;

    /// Every stat type in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CycleLength,
        Self::FruitProduction,
        Self::VegProduction,
        Self::MushroomProduction,
        Self::FlowerProduction,
        Self::BlightProduction,
        Self::MushroomHarvest,
        Self::Upgrading,
        Self::Spreading,
        Self::Growing,
        Self::Slowing,
        Self::Withering,
        Self::Dig,
        Self::Storage,
        Self::Purifying,
        Self::NonActivating,
        Self::SelfDestruct,
        Self::SellToBuyRatio,
    ];

    /// Order in which stats are listed in hover text.
    pub const DISPLAY_ORDER: [Self; Self::COUNT] = [
        Self::CycleLength,
        Self::FruitProduction,
        Self::VegProduction,
        Self::MushroomProduction,
        Self::FlowerProduction,
        Self::BlightProduction,
        Self::MushroomHarvest,
        Self::Storage,
        Self::Dig,
        Self::Purifying,
        Self::Growing,
        Self::Withering,
        Self::Slowing,
        Self::Spreading,
        Self::Upgrading,
        Self::NonActivating,
        Self::SelfDestruct,
        Self::SellToBuyRatio,
    ];

    /// Production stats paired with the resource they credit.
    pub const HARVEST_PRODUCTION: [(Self, ResourceType); 4] = [
        (Self::FruitProduction, ResourceType::Fruit),
        (Self::VegProduction, ResourceType::Veg),
        (Self::MushroomProduction, ResourceType::Mushroom),
        (Self::FlowerProduction, ResourceType::Flower),
    ];

    /// Dense index of the stat, suitable for array lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value assumed when a spec does not declare the stat.
    #[must_use]
    pub const fn default_value(self) -> i32 {
        match self {
            Self::CycleLength => 1,
            Self::SellToBuyRatio => 50,
            _ => 0,
        }
    }

    /// Reports whether growth and wither auras modify the stat.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(
            self,
            Self::FruitProduction
                | Self::VegProduction
                | Self::MushroomProduction
                | Self::FlowerProduction
                | Self::BlightProduction
        )
    }

    /// Reports whether the stat is omitted from hover text.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::SellToBuyRatio)
    }

    /// Color used when listing the stat.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::FruitProduction => FRUIT_COLOR,
            Self::VegProduction => VEG_COLOR,
            Self::MushroomProduction => MUSHROOM_COLOR,
            Self::FlowerProduction => FLOWER_COLOR,
            Self::BlightProduction => BLIGHT_COLOR,
            _ => Color::WHITE,
        }
    }

    /// Renders the player-facing description of the stat at the provided value.
    #[must_use]
    pub fn describe(self, value: i32) -> String {
        match self {
            Self::CycleLength => format!("Activates every {value} days."),
            Self::FruitProduction => format!("Produces {value} fruit per activation."),
            Self::VegProduction => format!("Produces {value} vegetable(s) per activation."),
            Self::MushroomProduction => format!("Produces {value} mushroom(s) per activation."),
            Self::FlowerProduction => format!("Produces {value} flower(s) per activation."),
            Self::BlightProduction => format!("Produces {value} blight per activation."),
            Self::MushroomHarvest => format!("Gives {value} mushroom(s) when sold."),
            Self::Upgrading => format!("Has a {value}% chance to upgrade per activation."),
            Self::Spreading => format!("Has a {value}% chance to spread per activation."),
            Self::Growing => format!("Gives +{value} production to all adjacent tiles."),
            Self::Slowing => format!("Gives +{value} day(s) per activation to all adjacent tiles."),
            Self::Withering => format!("Gives -{value} production to all adjacent tiles."),
            Self::Dig => "Converts rock to dirt.".to_owned(),
            Self::Storage => format!("Increases storage of all resources by {value}."),
            Self::Purifying => format!("Removes blight from up to {value} adjacent tile(s)."),
            Self::NonActivating => "Does not activate.".to_owned(),
            Self::SelfDestruct => "Removed after activating.".to_owned(),
            Self::SellToBuyRatio => format!("Sells for {value}% of purchase price."),
        }
    }
}

/// Fixed-size table of stat values indexed by [`TowerStatType`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatBlock {
    values: [Option<i32>; TowerStatType::COUNT],
}

impl StatBlock {
    /// Creates a block where every stat falls back to its default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [None; TowerStatType::COUNT],
        }
    }

    /// Returns the block with the provided stat set explicitly.
    #[must_use]
    pub const fn with(mut self, stat: TowerStatType, value: i32) -> Self {
        self.values[stat.index()] = Some(value);
        self
    }

    /// Value of the stat, falling back to the declared default.
    #[must_use]
    pub fn get(&self, stat: TowerStatType) -> i32 {
        self.explicit(stat).unwrap_or(stat.default_value())
    }

    /// Value of the stat only when declared explicitly.
    #[must_use]
    pub fn explicit(&self, stat: TowerStatType) -> Option<i32> {
        self.values[stat.index()]
    }

    /// Iterates explicitly declared stats in display order.
    pub fn declared(&self) -> impl Iterator<Item = (TowerStatType, i32)> + '_ {
        TowerStatType::DISPLAY_ORDER
            .iter()
            .filter_map(move |&stat| self.explicit(stat).map(|value| (stat, value)))
    }
}

/// Handle referencing an entry in the tower catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerSpecId(u16);

impl TowerSpecId {
    /// Creates a new spec handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Immutable catalog entry describing a tower.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerSpec {
    /// Handle under which the catalog stores the spec.
    pub id: TowerSpecId,
    /// Player-facing name.
    pub name: &'static str,
    /// Family the tower belongs to.
    pub tower_type: TowerType,
    /// Position within the family's upgrade chain, starting at one.
    pub level: u8,
    /// Sprite key used by presentation layers.
    pub icon: &'static str,
    /// Declared stat values.
    pub stats: StatBlock,
    /// Purchase price; negative marks a tower that cannot be bought or sold.
    pub cost: i32,
}

impl TowerSpec {
    /// Base value of the stat, applying declared defaults.
    #[must_use]
    pub fn stat(&self, stat: TowerStatType) -> i32 {
        self.stats.get(stat)
    }

    /// Reports whether the tower may be bought and sold.
    #[must_use]
    pub const fn can_sell(&self) -> bool {
        self.cost >= 0
    }

    /// Reports whether the tower may be placed on rock terrain.
    #[must_use]
    pub const fn is_utility(&self) -> bool {
        self.tower_type.is_utility()
    }

    /// Reports whether the tower is blight.
    #[must_use]
    pub fn is_blight(&self) -> bool {
        self.tower_type == TowerType::Blight
    }

    /// Display color of the tower.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.tower_type.color()
    }

    /// Sale price using the tower's own sell ratio.
    #[must_use]
    pub fn sell_price(&self) -> i32 {
        self.sell_price_with_ratio(self.stat(TowerStatType::SellToBuyRatio))
    }

    /// Sale price for the provided percentage ratio, rounded down and never negative.
    #[must_use]
    pub fn sell_price_with_ratio(&self, ratio: i32) -> i32 {
        (ratio.saturating_mul(self.cost) / 100).max(0)
    }
}

/// Terrain of a board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundType {
    /// Bare rock; only utility towers may be placed.
    Rock,
    /// Dug soil; any tower except a shovel may be placed.
    Dirt,
    /// Never usable.
    Inaccessible,
}

/// Ephemeral text rendered above the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatingText {
    /// Text to display.
    pub text: String,
    /// Display color.
    pub color: Color,
    /// Tile the text is anchored to.
    pub cell: CellCoord,
    /// Ticks elapsed since the text became visible; negative while delayed.
    pub age: i64,
}

impl FloatingText {
    /// Creates a floating text that becomes visible after `delay` ticks.
    #[must_use]
    pub fn new(text: impl Into<String>, color: Color, cell: CellCoord, delay: u32) -> Self {
        Self {
            text: text.into(),
            color,
            cell,
            age: -i64::from(delay),
        }
    }

    /// Reports whether the delay elapsed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.age >= 0
    }
}

/// Reasons a tower placement may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The cell is not part of the board.
    #[error("cell is outside the board")]
    OutOfBounds,
    /// A tower already occupies the cell.
    #[error("cell is already occupied")]
    Occupied,
    /// The cell can never hold towers.
    #[error("cell is inaccessible")]
    Inaccessible,
    /// The tower needs dug soil but the cell is rock.
    #[error("tower requires dirt")]
    RequiresDirt,
    /// A shovel was aimed at ground that is already dirt.
    #[error("ground is already dug")]
    AlreadyDug,
    /// No tower is selected for purchase.
    #[error("no tower selected")]
    NothingSelected,
    /// The selected tower cannot be bought.
    #[error("tower is not purchasable")]
    NotPurchasable,
    /// The player cannot afford the selected tower.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Reasons a tower sale may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SaleError {
    /// The cell is not part of the board.
    #[error("cell is outside the board")]
    OutOfBounds,
    /// No tower occupies the cell.
    #[error("no tower to sell")]
    EmptyTile,
    /// The tower cannot be sold.
    #[error("tower cannot be sold")]
    NotSellable,
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, PlacementError, ResourceType, SaleError, StatBlock, TowerSpec, TowerSpecId,
        TowerStatType, TowerType,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientFunds);
        assert_round_trip(&SaleError::NotSellable);
    }

    #[test]
    fn surrounding_skips_negative_neighbours() {
        let corner: Vec<_> = CellCoord::new(0, 0).surrounding().collect();
        assert_eq!(
            corner,
            vec![CellCoord::new(1, 0), CellCoord::new(0, 1), CellCoord::new(1, 1)]
        );
        assert_eq!(CellCoord::new(3, 3).surrounding().count(), 8);
        assert!(CellCoord::new(3, 3)
            .surrounding()
            .all(|cell| cell.column().abs_diff(3).max(cell.row().abs_diff(3)) == 1));
    }

    #[test]
    fn orthogonal_excludes_diagonals() {
        let neighbours: Vec<_> = CellCoord::new(2, 2).orthogonal().collect();
        assert_eq!(neighbours.len(), 4);
        assert!(neighbours
            .iter()
            .all(|cell| cell.column() == 2 || cell.row() == 2));
    }

    #[test]
    fn stat_defaults_are_declared_once() {
        let block = StatBlock::new();
        assert_eq!(block.get(TowerStatType::CycleLength), 1);
        assert_eq!(block.get(TowerStatType::SellToBuyRatio), 50);
        assert_eq!(block.get(TowerStatType::Purifying), 0);
        assert_eq!(block.explicit(TowerStatType::CycleLength), None);
    }

    #[test]
    fn declared_stats_follow_display_order() {
        let block = StatBlock::new()
            .with(TowerStatType::Upgrading, 20)
            .with(TowerStatType::CycleLength, 5)
            .with(TowerStatType::MushroomHarvest, 1);
        let order: Vec<_> = block.declared().map(|(stat, _)| stat).collect();
        assert_eq!(
            order,
            vec![
                TowerStatType::CycleLength,
                TowerStatType::MushroomHarvest,
                TowerStatType::Upgrading,
            ]
        );
    }

    #[test]
    fn display_order_covers_every_stat_once() {
        for stat in TowerStatType::ALL {
            let occurrences = TowerStatType::DISPLAY_ORDER
                .iter()
                .filter(|candidate| **candidate == stat)
                .count();
            assert_eq!(occurrences, 1, "{stat:?} listed {occurrences} times");
        }
    }

    #[test]
    fn sell_price_rounds_down() {
        let bin = TowerSpec {
            id: TowerSpecId::new(0),
            name: "Storage Bin",
            tower_type: TowerType::Bin,
            level: 1,
            icon: "storage_bin",
            stats: StatBlock::new(),
            cost: 15,
        };
        assert_eq!(bin.sell_price(), 7);
        assert_eq!(bin.sell_price_with_ratio(33), 4);
    }

    #[test]
    fn only_money_carries_a_symbol() {
        for resource in ResourceType::ALL {
            assert_eq!(resource.symbol().is_some(), resource == ResourceType::Money);
        }
    }
}
