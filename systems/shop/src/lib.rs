#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure shop system translating player clicks into purchase, sale and day commands.

use garden_core::{CellCoord, Command, Event, TowerSpecId};

/// Mouse button used for a board click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickButton {
    /// Builds the pending purchase.
    Primary,
    /// Sells the clicked tower, or cancels the pending purchase.
    Secondary,
}

/// Click landing on a board tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardClick {
    /// Tile that was clicked.
    pub cell: CellCoord,
    /// Button that was pressed.
    pub button: ClickButton,
}

impl BoardClick {
    /// Creates a primary-button click on the provided cell.
    #[must_use]
    pub const fn primary(cell: CellCoord) -> Self {
        Self {
            cell,
            button: ClickButton::Primary,
        }
    }

    /// Creates a secondary-button click on the provided cell.
    #[must_use]
    pub const fn secondary(cell: CellCoord) -> Self {
        Self {
            cell,
            button: ClickButton::Secondary,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShopInput {
    /// Shop button pressed on this frame.
    pub shop_button: Option<TowerSpecId>,
    /// Board tile clicked on this frame.
    pub board_click: Option<BoardClick>,
    /// Indicates whether the player clicked outside every interactive element.
    pub empty_click: bool,
    /// Indicates whether the player pressed the next-day button.
    pub next_day: bool,
}

/// Shop system that keeps track of the pending purchase and emits commands.
#[derive(Clone, Debug, Default)]
pub struct Shop {
    pending: Option<TowerSpecId>,
}

impl Shop {
    /// Creates a new shop system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Purchase the shop believes is selected, as last reported by the world.
    #[must_use]
    pub const fn pending(&self) -> Option<TowerSpecId> {
        self.pending
    }

    /// Consumes world events and frame input to emit shop commands.
    ///
    /// Pressing the selected shop button again deselects it. While a purchase
    /// is pending, a board click attempts to build (primary button only) and
    /// always ends the selection. Without a pending purchase the secondary
    /// button sells the clicked tower.
    pub fn handle(&mut self, events: &[Event], input: ShopInput, out: &mut Vec<Command>) {
        for event in events {
            if let Event::PendingPurchaseChanged { spec } = event {
                self.pending = *spec;
            }
        }

        let mut pending = self.pending;

        if let Some(spec) = input.shop_button {
            pending = if pending == Some(spec) { None } else { Some(spec) };
            out.push(Command::SetPendingPurchase { spec: pending });
        }

        if let Some(click) = input.board_click {
            if pending.is_some() {
                if click.button == ClickButton::Primary {
                    out.push(Command::BuildAt { cell: click.cell });
                }
                out.push(Command::SetPendingPurchase { spec: None });
            } else if click.button == ClickButton::Secondary {
                out.push(Command::SellAt { cell: click.cell });
            }
        } else if input.empty_click && pending.is_some() {
            out.push(Command::SetPendingPurchase { spec: None });
        }

        if input.next_day {
            out.push(Command::RequestNextDay);
        }
    }
}
