//! Column layout of water balance tables for renderers.

use std::fmt;

use serde::{Serialize, Serializer};
use wb_core::numeric::round_to;

use crate::types::PartitionResult;
use crate::watbal::{SystemTotal, WaterBalance};

/// Columns shared by element rows and the system row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Element,
    Area,
    A,
    G,
    V,
    E,
    Vp,
    Va,
    Vg,
    Vv,
    Ve,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Element,
        Column::Area,
        Column::A,
        Column::G,
        Column::V,
        Column::E,
        Column::Vp,
        Column::Va,
        Column::Vg,
        Column::Vv,
        Column::Ve,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::Element => "Element",
            Column::Area => "Area",
            Column::A => "a",
            Column::G => "g",
            Column::V => "v",
            Column::E => "e",
            Column::Vp => "Vp",
            Column::Va => "Va",
            Column::Vg => "Vg",
            Column::Vv => "Vv",
            Column::Ve => "Ve",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Column::Area => Some("m2"),
            Column::Vp | Column::Va | Column::Vg | Column::Vv | Column::Ve => Some("m3/a"),
            _ => None,
        }
    }

    /// Display decimals; `None` for text columns.
    pub fn decimals(self) -> Option<i32> {
        match self {
            Column::Element => None,
            Column::A | Column::G | Column::V | Column::E => Some(3),
            _ => Some(0),
        }
    }

    /// Withdrawal columns are dropped when nothing is withdrawn.
    pub fn is_withdrawal(self) -> bool {
        matches!(self, Column::E | Column::Ve)
    }

    fn row_cell(self, row: &PartitionResult) -> Cell {
        let value = match self {
            Column::Element => return Cell::Text(row.element.clone()),
            Column::Area => row.area_m2,
            Column::A => row.a,
            Column::G => row.g,
            Column::V => row.v,
            Column::E => row.e,
            Column::Vp => row.vp_m3,
            Column::Va => row.va_m3,
            Column::Vg => row.vg_m3,
            Column::Vv => row.vv_m3,
            Column::Ve => row.ve_m3,
        };
        self.number(value)
    }

    fn total_cell(self, total: &SystemTotal) -> Cell {
        let value = match self {
            Column::Element => return Cell::Text(WaterBalance::SYSTEM_LABEL.to_string()),
            Column::Area => total.area_m2,
            Column::A => total.a,
            Column::G => total.g,
            Column::V => total.v,
            Column::E => total.e,
            Column::Vp => total.vp_m3,
            Column::Va => total.va_m3,
            Column::Vg => total.vg_m3,
            Column::Vv => total.vv_m3,
            Column::Ve => total.ve_m3,
        };
        self.number(value)
    }

    fn number(self, value: f64) -> Cell {
        let decimals = self.decimals().unwrap_or(0);
        Cell::Number {
            value: round_to(value, decimals),
            decimals,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rounded display value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number { value: f64, decimals: i32 },
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number { value, .. } => serializer.serialize_f64(*value),
        }
    }
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number { value, .. } => Some(*value),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number { value, decimals } => {
                let prec = usize::try_from(*decimals).unwrap_or(0);
                // Avoid printing "-0" for values that round to zero.
                let v = if *value == 0.0 { 0.0 } else { *value };
                write!(f, "{v:.prec$}")
            }
        }
    }
}

/// Rounded rows of a water balance, system row last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Presentation {
    pub fn from_balance(wb: &WaterBalance) -> Self {
        let columns: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|c| wb.has_withdrawal() || !c.is_withdrawal())
            .collect();

        let mut rows: Vec<Vec<Cell>> = wb
            .rows()
            .iter()
            .map(|row| columns.iter().map(|c| c.row_cell(row)).collect())
            .collect();
        rows.push(columns.iter().map(|c| c.total_cell(wb.total())).collect());

        Self { columns, rows }
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

impl WaterBalance {
    pub fn columns(&self) -> Vec<Column> {
        self.presentation().columns
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::from_balance(self)
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rendered
                    .iter()
                    .filter_map(|r| r.get(i).map(String::len))
                    .chain(std::iter::once(c.label().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            match c {
                Column::Element => write!(f, "{:<w$}", c.label(), w = widths[i])?,
                _ => write!(f, "{:>w$}", c.label(), w = widths[i])?,
            }
        }
        writeln!(f)?;

        for row in &rendered {
            for (i, (cell, c)) in row.iter().zip(&self.columns).enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                match c {
                    Column::Element => write!(f, "{:<w$}", cell, w = widths[i])?,
                    _ => write!(f, "{:>w$}", cell, w = widths[i])?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ResultTable;
    use crate::types::Partition;
    use crate::watbal::watbal;
    use wb_climate::StudyArea;

    fn balance(p: Partition) -> WaterBalance {
        let row = PartitionResult::surface("Roof", 1000.0, &StudyArea::default(), p);
        watbal(&[ResultTable::single(row)]).unwrap()
    }

    #[test]
    fn withdrawal_columns_dropped_without_withdrawal() {
        let wb = balance(Partition::impervious(0.9101292522403566));
        let cols = wb.columns();
        assert_eq!(cols.len(), 9);
        assert!(!cols.contains(&Column::E));
        assert!(!cols.contains(&Column::Ve));
    }

    #[test]
    fn withdrawal_columns_kept_with_withdrawal() {
        let wb = balance(Partition::runoff_after_withdrawal(0.1, 0.4));
        assert_eq!(wb.columns(), Column::ALL.to_vec());
    }

    #[test]
    fn cells_are_rounded_for_display() {
        let wb = balance(Partition::impervious(0.9101292522403566));
        let pres = wb.presentation();
        assert_eq!(pres.rows.len(), 2);
        let a = pres.column_index(Column::A).unwrap();
        let va = pres.column_index(Column::Va).unwrap();
        assert_eq!(pres.rows[0][a].as_number(), Some(0.91));
        assert_eq!(pres.rows[0][va].as_number(), Some(728.0));
        assert_eq!(pres.rows[0][a].to_string(), "0.910");
        assert_eq!(pres.rows[1][0], Cell::Text("System".into()));
        // stored values stay exact
        assert!((wb.rows()[0].va_m3 - 728.1034017922853).abs() < 1e-9);
    }

    #[test]
    fn table_text_has_header_and_system_row() {
        let text = balance(Partition::impervious(0.9)).presentation().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Element"));
        assert!(lines[2].starts_with("System"));
        assert!(!lines[0].contains("Ve"));
    }

    #[test]
    fn presentation_serializes_plain_values() {
        let pres = balance(Partition::impervious(0.9)).presentation();
        let json = serde_json::to_value(&pres).unwrap();
        assert_eq!(json["columns"][0], "Element");
        assert_eq!(json["rows"][0][0], "Roof");
        assert_eq!(json["rows"][0][2], 0.9);
    }
}
