#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative garden state management.
//!
//! The [`World`] owns the board, the resource ledger and the session's random
//! number generator. Every mutation arrives as a [`Command`] through [`apply`]
//! and is reported back as [`Event`] values; read-only access goes through the
//! [`query`] module.

pub mod catalog;
pub mod config;
pub mod day;
pub mod grid;
pub mod layout;
pub mod ledger;
pub mod stats;

use garden_core::{
    CellCoord, Command, Event, PlacementError, ResourceType, SaleError, TowerSpec, TowerSpecId,
    TowerStatType, TowerType, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub use catalog::TowerCatalog;
pub use config::GameConfig;
pub use grid::{Grid, TileInfo};
pub use layout::Layout;
pub use ledger::{FloatingTextLog, ResourceLedger, TextEffect};

/// Ticks the mushroom text waits behind the money text when a tower is sold.
const HARVEST_TEXT_DELAY: u32 = 10;

/// Represents the authoritative garden session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    catalog: TowerCatalog,
    grid: Grid,
    ledger: ResourceLedger,
    texts: FloatingTextLog,
    pending_purchase: Option<TowerSpecId>,
    rng: ChaCha8Rng,
    day: u32,
    tick: u64,
    day_requested: bool,
}

impl World {
    /// Creates a session on the standard layout with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Creates a session on the standard layout with the provided tuning.
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self::with_layout(config, &Layout::standard())
    }

    /// Creates a session on a custom layout.
    #[must_use]
    pub fn with_layout(config: GameConfig, layout: &Layout) -> Self {
        Self {
            banner: WELCOME_BANNER,
            catalog: TowerCatalog::standard(),
            grid: Grid::from_layout(layout),
            ledger: ResourceLedger::new(config.starting_money),
            texts: FloatingTextLog::new(config.floating_text_lifetime),
            pending_purchase: None,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            day: 0,
            tick: 0,
            day_requested: false,
            config,
        }
    }

    fn spec_at(&self, cell: CellCoord) -> Option<&TowerSpec> {
        self.grid.tower_at(cell).and_then(|id| self.catalog.get(id))
    }

    fn check_build(&self, cell: CellCoord) -> Result<&TowerSpec, PlacementError> {
        let spec = self
            .pending_purchase
            .and_then(|id| self.catalog.get(id))
            .ok_or(PlacementError::NothingSelected)?;
        self.grid.check_placement(spec, cell)?;
        if !spec.can_sell() {
            return Err(PlacementError::NotPurchasable);
        }
        if spec.cost > self.ledger.get(ResourceType::Money) {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(spec)
    }

    fn check_sale(&self, cell: CellCoord) -> Result<&TowerSpec, SaleError> {
        let tile = self.grid.tile(cell).ok_or(SaleError::OutOfBounds)?;
        let spec = tile
            .tower()
            .and_then(|id| self.catalog.get(id))
            .ok_or(SaleError::EmptyTile)?;
        if !spec.can_sell() {
            return Err(SaleError::NotSellable);
        }
        Ok(spec)
    }

    fn set_pending_purchase(&mut self, spec: Option<TowerSpecId>, out_events: &mut Vec<Event>) {
        if self.pending_purchase != spec {
            self.pending_purchase = spec;
            out_events.push(Event::PendingPurchaseChanged { spec });
        }
    }

    fn run_day(&mut self, out_events: &mut Vec<Event>) {
        let texts = day::advance_day(
            &mut self.grid,
            &mut self.ledger,
            &self.catalog,
            self.config.base_storage,
            &mut self.rng,
        );
        self.texts.extend(texts);
        self.day = self.day.saturating_add(1);

        info!(
            day = self.day,
            fruit = self.ledger.get(ResourceType::Fruit),
            veg = self.ledger.get(ResourceType::Veg),
            mushroom = self.ledger.get(ResourceType::Mushroom),
            flower = self.ledger.get(ResourceType::Flower),
            blight = self.ledger.get(ResourceType::Blight),
            money = self.ledger.get(ResourceType::Money),
            "day advanced"
        );
        out_events.push(Event::DayAdvanced { day: self.day });

        let blight = self.ledger.get(ResourceType::Blight);
        if stats::blight_percent(blight, self.config.max_blight) >= 1.0 {
            info!(blight, max_blight = self.config.max_blight, "blight cap reached");
            out_events.push(Event::BlightCapReached);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetPendingPurchase { spec } => {
            let purchasable = spec.map_or(true, |id| {
                world.catalog.get(id).is_some_and(TowerSpec::can_sell)
            });
            if purchasable {
                world.set_pending_purchase(spec, out_events);
            } else {
                debug!(?spec, "ignoring selection of a tower that cannot be bought");
            }
        }
        Command::BuildAt { cell } => {
            let _ = build_at(world, cell, out_events);
        }
        Command::SellAt { cell } => {
            let _ = sell_at(world, cell, out_events);
        }
        Command::RequestNextDay => {
            if !world.day_requested {
                world.day_requested = true;
                out_events.push(Event::DayRequested);
            }
        }
        Command::Tick => {
            world.texts.tick();
            world.tick = world.tick.saturating_add(1);
            out_events.push(Event::TimeAdvanced { tick: world.tick });

            if world.day_requested {
                world.day_requested = false;
                world.run_day(out_events);
            }
        }
        Command::SpawnBlight { cell } => {
            let _ = spawn_blight(world, cell, out_events);
        }
    }
}

/// Buys the pending purchase and places it on `cell`.
///
/// Returns whether the tower was built. On success the cost is debited and the
/// pending purchase is cleared.
pub fn build_at(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) -> bool {
    let (id, name, cost) = match world.check_build(cell) {
        Ok(spec) => (spec.id, spec.name, spec.cost),
        Err(reason) => {
            debug!(column = cell.column(), row = cell.row(), %reason, "build rejected");
            out_events.push(Event::BuildRejected { cell, reason });
            return false;
        }
    };

    let _ = world.ledger.increment(ResourceType::Money, -cost);
    world.grid.set_tower(cell, Some(id));
    info!(column = cell.column(), row = cell.row(), tower = name, cost, "tower built");
    out_events.push(Event::TowerBuilt {
        cell,
        spec: id,
        cost,
    });
    world.set_pending_purchase(None, out_events);
    true
}

/// Sells the tower standing on `cell`.
///
/// Returns whether a tower was sold. The price follows the tower's effective
/// sell ratio; mushroom harvest is credited on top.
pub fn sell_at(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) -> bool {
    let (id, name, price, harvest) = match world.check_sale(cell) {
        Ok(spec) => {
            let ratio = stats::effective_stat_for(
                &world.grid,
                &world.catalog,
                spec,
                TowerStatType::SellToBuyRatio,
                cell,
            );
            let harvest = stats::effective_stat_for(
                &world.grid,
                &world.catalog,
                spec,
                TowerStatType::MushroomHarvest,
                cell,
            );
            (spec.id, spec.name, spec.sell_price_with_ratio(ratio), harvest)
        }
        Err(reason) => {
            debug!(column = cell.column(), row = cell.row(), %reason, "sale rejected");
            out_events.push(Event::SaleRejected { cell, reason });
            return false;
        }
    };

    world.grid.set_tower(cell, None);

    let mut texts = Vec::new();
    let _ = world.ledger.increment_with_effect(
        ResourceType::Money,
        price,
        TextEffect::at(cell),
        &mut texts,
    );
    let harvest = harvest.max(0);
    if harvest > 0 {
        let _ = world.ledger.increment_with_effect(
            ResourceType::Mushroom,
            harvest,
            TextEffect::delayed(cell, HARVEST_TEXT_DELAY),
            &mut texts,
        );
    }
    world.texts.extend(texts);

    info!(column = cell.column(), row = cell.row(), tower = name, price, harvest, "tower sold");
    out_events.push(Event::TowerSold {
        cell,
        spec: id,
        price,
        harvest,
    });
    true
}

/// Seeds a level-one blight tower on `cell`.
///
/// Returns whether blight was placed. Blight obeys the ordinary placement
/// rules but never costs money.
pub fn spawn_blight(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) -> bool {
    let placement = world
        .catalog
        .spec_to_spread(TowerType::Blight)
        .and_then(|id| world.catalog.get(id))
        .ok_or(PlacementError::NotPurchasable)
        .and_then(|spec| world.grid.check_placement(spec, cell).map(|()| spec.id));

    match placement {
        Ok(id) => {
            world.grid.set_tower(cell, Some(id));
            info!(column = cell.column(), row = cell.row(), "blight seeded");
            out_events.push(Event::BlightSpawned { cell });
            true
        }
        Err(reason) => {
            debug!(column = cell.column(), row = cell.row(), %reason, "blight rejected");
            out_events.push(Event::BlightSpawnRejected { cell, reason });
            false
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use garden_core::{CellCoord, FloatingText, ResourceType, TowerSpec, TowerSpecId, TowerStatType};

    use super::{stats, GameConfig, Grid, TileInfo, TowerCatalog, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the session was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the tower catalog.
    #[must_use]
    pub fn catalog(world: &World) -> &TowerCatalog {
        &world.catalog
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Tile stored at the provided cell.
    #[must_use]
    pub fn tile_info(world: &World, cell: CellCoord) -> Option<&TileInfo> {
        world.grid.tile(cell)
    }

    /// Cells whose tower satisfies the predicate, in column-major order.
    #[must_use]
    pub fn tower_cells<P>(world: &World, mut predicate: P) -> Vec<CellCoord>
    where
        P: FnMut(&TowerSpec) -> bool,
    {
        world
            .grid
            .occupied_cells()
            .into_iter()
            .filter(|cell| world.spec_at(*cell).is_some_and(&mut predicate))
            .collect()
    }

    /// Amount currently held of the resource.
    #[must_use]
    pub fn resources(world: &World, resource: ResourceType) -> i32 {
        world.ledger.get(resource)
    }

    /// Fraction of the blight cap reached; `1.0` means the session is lost.
    #[must_use]
    pub fn blight_percent(world: &World) -> f32 {
        stats::blight_percent(
            world.ledger.get(ResourceType::Blight),
            world.config.max_blight,
        )
    }

    /// Current storage limit for storable resources.
    #[must_use]
    pub fn storage_capacity(world: &World) -> i32 {
        stats::storage_capacity(&world.grid, &world.catalog, world.config.base_storage)
    }

    /// Activation energy accumulated by the tile, if it exists.
    #[must_use]
    pub fn activation_energy_at(world: &World, cell: CellCoord) -> Option<u32> {
        world.grid.tile(cell).map(TileInfo::activation_energy)
    }

    /// Effective value of `stat` for the tower standing on `cell`.
    #[must_use]
    pub fn effective_stat(world: &World, stat: TowerStatType, cell: CellCoord) -> i32 {
        stats::effective_stat(&world.grid, &world.catalog, stat, cell)
    }

    /// Floating texts whose delay has elapsed.
    #[must_use]
    pub fn floating_texts(world: &World) -> Vec<&FloatingText> {
        world.texts.visible().collect()
    }

    /// Every pending floating text, including delayed ones.
    #[must_use]
    pub fn all_floating_texts(world: &World) -> &[FloatingText] {
        world.texts.all()
    }

    /// Tower currently selected for purchase.
    #[must_use]
    pub fn pending_purchase(world: &World) -> Option<TowerSpecId> {
        world.pending_purchase
    }

    /// Reports whether the pending purchase could be built on `cell` now.
    #[must_use]
    pub fn can_build_at(world: &World, cell: CellCoord) -> bool {
        world.check_build(cell).is_ok()
    }

    /// Reports whether the tower on `cell` may be sold.
    #[must_use]
    pub fn can_sell_at(world: &World, cell: CellCoord) -> bool {
        world.check_sale(cell).is_ok()
    }

    /// Number of days simulated so far.
    #[must_use]
    pub fn day(world: &World) -> u32 {
        world.day
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Reports whether a day advance is waiting for the next tick.
    #[must_use]
    pub fn day_requested(world: &World) -> bool {
        world.day_requested
    }
}
