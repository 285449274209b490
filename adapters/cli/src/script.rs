//! Parsers for the scripted actions accepted on the command line.

use anyhow::{bail, Context, Result};
use garden_core::CellCoord;

/// Tower purchase requested on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScriptedBuild {
    /// Catalog name of the tower, matched case-insensitively.
    pub(crate) tower: String,
    /// Tile that should receive the tower.
    pub(crate) cell: CellCoord,
}

/// Parses `COLUMN,ROW` into a cell.
pub(crate) fn parse_cell(value: &str) -> Result<CellCoord> {
    let Some((column, row)) = value.split_once(',') else {
        bail!("expected `COLUMN,ROW`, got `{value}`");
    };
    let column = column
        .trim()
        .parse()
        .with_context(|| format!("invalid column in `{value}`"))?;
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("invalid row in `{value}`"))?;
    Ok(CellCoord::new(column, row))
}

/// Parses `NAME@COLUMN,ROW` into a scripted build.
pub(crate) fn parse_build(value: &str) -> Result<ScriptedBuild> {
    let Some((tower, cell)) = value.rsplit_once('@') else {
        bail!("expected `NAME@COLUMN,ROW`, got `{value}`");
    };
    let tower = tower.trim();
    if tower.is_empty() {
        bail!("missing tower name in `{value}`");
    }
    Ok(ScriptedBuild {
        tower: tower.to_owned(),
        cell: parse_cell(cell)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_accept_surrounding_whitespace() {
        assert_eq!(parse_cell(" 3, 2").ok(), Some(CellCoord::new(3, 2)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("-1,2").is_err());
    }

    #[test]
    fn builds_split_on_the_last_at_sign() {
        let build = parse_build("Fruit Vine@2,3").expect("valid build");
        assert_eq!(
            build,
            ScriptedBuild {
                tower: "Fruit Vine".to_owned(),
                cell: CellCoord::new(2, 3),
            }
        );
        assert!(parse_build("@2,3").is_err());
        assert!(parse_build("Fruit Vine").is_err());
    }
}
