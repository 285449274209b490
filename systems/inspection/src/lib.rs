#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure inspection system producing hover text for towers in the shop or on the board.

use std::fmt;

use garden_core::{CellCoord, Color, TowerSpec, TowerSpecId, TowerStatType};
use garden_world::{query, stats, World};

/// Footer shown under sellable towers on the board.
pub const SELL_HINT: &str = "Right-click to sell.";

/// Stat lines reserved above the sell hint so it sits at the bottom.
const STAT_LINE_SLOTS: usize = 3;

/// What the player is pointing at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    /// A shop button offering the tower.
    Shop(TowerSpecId),
    /// A board tile.
    Board(CellCoord),
}

/// Colored run of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Text to render.
    pub text: String,
    /// Render color.
    pub color: Color,
}

impl Span {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// One row of hover text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverLine {
    /// Spans rendered left to right.
    pub spans: Vec<Span>,
}

impl HoverLine {
    fn single(text: impl Into<String>, color: Color) -> Self {
        Self {
            spans: vec![Span::new(text, color)],
        }
    }

    /// Concatenated text of every span, separated by two spaces.
    #[must_use]
    pub fn plain(&self) -> String {
        self.spans
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Multi-line description of a tower.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverText {
    lines: Vec<HoverLine>,
}

impl HoverText {
    /// Lines in display order; the first holds the name, cycle bar and price.
    #[must_use]
    pub fn lines(&self) -> &[HoverLine] {
        &self.lines
    }
}

impl fmt::Display for HoverText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line.plain())?;
        }
        Ok(())
    }
}

/// Produces hover text from read-only world state.
#[derive(Debug, Default)]
pub struct Inspection;

impl Inspection {
    /// Describes the subject, or returns `None` when nothing is there.
    #[must_use]
    pub fn hover_text(&self, world: &World, subject: Subject) -> Option<HoverText> {
        let catalog = query::catalog(world);
        match subject {
            Subject::Shop(id) => catalog.get(id).map(describe_in_shop),
            Subject::Board(cell) => {
                let spec = query::tile_info(world, cell)
                    .and_then(|tile| tile.tower())
                    .and_then(|id| catalog.get(id))?;
                Some(describe_on_board(world, spec, cell))
            }
        }
    }
}

fn describe_in_shop(spec: &TowerSpec) -> HoverText {
    let mut header = HoverLine::single(spec.name, spec.color());
    if spec.can_sell() {
        header
            .spans
            .push(Span::new(format!("cost: ${}", spec.cost), Color::WHITE));
    }

    let mut lines = vec![header];
    lines.extend(stat_lines(spec, |stat| spec.stat(stat)));
    HoverText { lines }
}

fn describe_on_board(world: &World, spec: &TowerSpec, cell: CellCoord) -> HoverText {
    let effective = |stat| {
        stats::effective_stat_for(
            query::grid(world),
            query::catalog(world),
            spec,
            stat,
            cell,
        )
    };

    let mut header = HoverLine::single(spec.name, spec.color());
    if effective(TowerStatType::NonActivating) <= 0 {
        let cycle = u32::try_from(effective(TowerStatType::CycleLength)).unwrap_or(0);
        let energy = query::activation_energy_at(world, cell)
            .unwrap_or(0)
            .min(cycle);
        if let Some(bar) = cycle_bar(energy, cycle) {
            header.spans.push(Span::new(bar, Color::YELLOW));
        }
    }
    if spec.can_sell() {
        let price = spec.sell_price_with_ratio(effective(TowerStatType::SellToBuyRatio));
        header
            .spans
            .push(Span::new(format!("sell: ${price}"), Color::WHITE));
    }

    let mut lines = vec![header];
    let stats = stat_lines(spec, effective);
    let stat_count = stats.len();
    lines.extend(stats);

    if spec.can_sell() && stat_count <= STAT_LINE_SLOTS {
        lines.extend((stat_count..STAT_LINE_SLOTS).map(|_| HoverLine::default()));
        lines.push(HoverLine::single(SELL_HINT, Color::GRAY));
    }

    HoverText { lines }
}

fn stat_lines<F>(spec: &TowerSpec, mut value_of: F) -> Vec<HoverLine>
where
    F: FnMut(TowerStatType) -> i32,
{
    spec.stats
        .declared()
        .filter(|(stat, _)| !stat.is_hidden())
        .filter_map(|(stat, _)| {
            let value = value_of(stat);
            (value > 0).then(|| HoverLine::single(stat.describe(value), stat.color()))
        })
        .collect()
}

fn cycle_bar(energy: u32, cycle: u32) -> Option<String> {
    if cycle == 0 || energy == 0 {
        return None;
    }
    let filled = "X".repeat(energy as usize);
    let empty = "-".repeat((cycle - energy) as usize);
    Some(format!("cycle: [{filled}{empty}]"))
}
