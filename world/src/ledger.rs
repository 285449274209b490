//! Resource counters and the floating text they announce.

use garden_core::{CellCoord, FloatingText, ResourceType};
use tracing::warn;

/// Tracks the amount held of every [`ResourceType`]; amounts never drop below zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLedger {
    amounts: [i32; ResourceType::ALL.len()],
}

/// Where and when a ledger change should be announced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextEffect {
    /// Tile the announcement is anchored to.
    pub cell: CellCoord,
    /// Ticks to wait before the announcement becomes visible.
    pub delay: u32,
}

impl TextEffect {
    /// Announces immediately at the provided cell.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self { cell, delay: 0 }
    }

    /// Announces at the provided cell after `delay` ticks.
    #[must_use]
    pub const fn delayed(cell: CellCoord, delay: u32) -> Self {
        Self { cell, delay }
    }
}

impl ResourceLedger {
    /// Creates a ledger holding only the provided starting money.
    ///
    /// Negative starting money is corrected to zero and logged.
    #[must_use]
    pub fn new(starting_money: i32) -> Self {
        let mut ledger = Self {
            amounts: [0; ResourceType::ALL.len()],
        };
        let _ = ledger.increment(ResourceType::Money, starting_money);
        ledger
    }

    /// Amount currently held of the resource.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> i32 {
        self.amounts[resource.index()]
    }

    /// Applies `delta` and returns the new amount.
    ///
    /// A result below zero is corrected to zero and logged.
    pub fn increment(&mut self, resource: ResourceType, delta: i32) -> i32 {
        let slot = &mut self.amounts[resource.index()];
        let raw = slot.saturating_add(delta);
        if raw < 0 {
            warn!(
                resource = resource.label(),
                value = raw,
                "resource fell below zero, correcting"
            );
            *slot = 0;
        } else {
            *slot = raw;
        }
        *slot
    }

    /// Applies `delta` and announces the actual change through `texts`.
    ///
    /// Nothing is announced when the stored amount did not change.
    pub fn increment_with_effect(
        &mut self,
        resource: ResourceType,
        delta: i32,
        effect: TextEffect,
        texts: &mut Vec<FloatingText>,
    ) -> i32 {
        let before = self.get(resource);
        let after = self.increment(resource, delta);
        let change = after - before;
        if change != 0 {
            texts.push(FloatingText::new(
                change_text(resource, change),
                resource.color(),
                effect.cell,
                effect.delay,
            ));
        }
        after
    }
}

fn change_text(resource: ResourceType, change: i32) -> String {
    let sign = if change > 0 { '+' } else { '-' };
    match resource.symbol() {
        Some(symbol) => format!("{sign}{symbol}{}", change.unsigned_abs()),
        None => format!("{sign}{}", change.unsigned_abs()),
    }
}

/// Floating texts awaiting or undergoing display.
#[derive(Clone, Debug)]
pub struct FloatingTextLog {
    texts: Vec<FloatingText>,
    lifetime: u32,
}

impl FloatingTextLog {
    /// Creates an empty log whose texts expire after `lifetime` visible ticks.
    #[must_use]
    pub fn new(lifetime: u32) -> Self {
        Self {
            texts: Vec::new(),
            lifetime,
        }
    }

    /// Appends texts produced by a mutation.
    pub fn extend(&mut self, texts: impl IntoIterator<Item = FloatingText>) {
        self.texts.extend(texts);
    }

    /// Ages every text by one tick and drops expired ones.
    pub fn tick(&mut self) {
        let lifetime = i64::from(self.lifetime);
        for text in &mut self.texts {
            text.age += 1;
        }
        self.texts.retain(|text| text.age <= lifetime);
    }

    /// Texts whose delay has elapsed.
    pub fn visible(&self) -> impl Iterator<Item = &FloatingText> {
        self.texts.iter().filter(|text| text.is_visible())
    }

    /// Every text, including delayed ones.
    #[must_use]
    pub fn all(&self) -> &[FloatingText] {
        &self.texts
    }
}
