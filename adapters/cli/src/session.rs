//! Frame loop wiring the shop system to the world.

use anyhow::{Context, Result};
use garden_core::{CellCoord, Command, Event};
use garden_system_shop::{BoardClick, Shop, ShopInput};
use garden_world::{self as world, query, World};
use tracing::{debug, warn};

use crate::script::ScriptedBuild;

/// Headless session feeding scripted input through the shop system.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    shop: Shop,
    events: Vec<Event>,
}

impl Session {
    /// Wraps a freshly created world.
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            shop: Shop::new(),
            events: Vec::new(),
        }
    }

    /// Read-only access to the world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies a command directly, bypassing the shop.
    pub(crate) fn apply(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            log_event(event);
        }
        self.events.extend(events);
    }

    /// Selects the named tower in the shop and clicks the target tile.
    ///
    /// Returns whether the tower was built; unknown tower names are errors.
    pub(crate) fn build(&mut self, build: &ScriptedBuild) -> Result<bool> {
        let spec = query::catalog(&self.world)
            .find(&build.tower)
            .map(|spec| spec.id)
            .with_context(|| format!("unknown tower `{}`", build.tower))?;

        self.frame(ShopInput {
            shop_button: Some(spec),
            ..ShopInput::default()
        });
        self.frame(ShopInput {
            board_click: Some(BoardClick::primary(build.cell)),
            ..ShopInput::default()
        });

        Ok(self
            .events
            .iter()
            .any(|event| matches!(event, Event::TowerBuilt { cell, .. } if *cell == build.cell)))
    }

    /// Right-clicks the tile to sell its tower. Returns whether it was sold.
    pub(crate) fn sell(&mut self, cell: CellCoord) -> bool {
        self.frame(ShopInput {
            board_click: Some(BoardClick::secondary(cell)),
            ..ShopInput::default()
        });
        self.events
            .iter()
            .any(|event| matches!(event, Event::TowerSold { cell: sold, .. } if *sold == cell))
    }

    /// Presses the next-day button and ticks once.
    ///
    /// Returns whether blight reached its cap.
    pub(crate) fn advance_day(&mut self) -> bool {
        self.frame(ShopInput {
            next_day: true,
            ..ShopInput::default()
        });
        self.apply(Command::Tick);

        for text in query::all_floating_texts(&self.world)
            .iter()
            .filter(|text| text.age <= 0)
        {
            debug!(
                column = text.cell.column(),
                row = text.cell.row(),
                text = %text.text,
                "effect"
            );
        }

        self.events.contains(&Event::BlightCapReached)
    }

    fn frame(&mut self, input: ShopInput) {
        let mut commands = Vec::new();
        self.shop.handle(&self.events, input, &mut commands);
        self.events.clear();
        for command in commands {
            self.apply(command);
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::BuildRejected { cell, reason } => {
            warn!(column = cell.column(), row = cell.row(), %reason, "build rejected");
        }
        Event::SaleRejected { cell, reason } => {
            warn!(column = cell.column(), row = cell.row(), %reason, "sale rejected");
        }
        Event::BlightSpawnRejected { cell, reason } => {
            warn!(column = cell.column(), row = cell.row(), %reason, "blight rejected");
        }
        other => debug!(event = ?other, "world event"),
    }
}
