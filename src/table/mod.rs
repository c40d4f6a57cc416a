//! Loading for the delimited log tables written by the simulator.

pub mod load;
pub mod value;

pub use load::load;
pub use value::Value;

/// An immutable in-memory table: ordered column names plus typed rows.
///
/// Invariant (enforced at parse time): every row has exactly one cell per
/// header column.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// True if the table has a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by header name, first match wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and column name.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }
}
