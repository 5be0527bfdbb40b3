use crate::error::{Result, VizError};

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Numbers are always stored as `f64` so integer
/// columns such as `Run` or `Event` take part in imputation like any other.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

// -- Bitwise Eq/Hash so whole rows can go into a HashSet for deduplication --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Number(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Missing => {}
        }
    }
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    /// Convenience constructor for a column of numbers.
    pub fn numbers(name: impl Into<String>, values: &[f64]) -> Self {
        Column::new(name, values.iter().map(|&v| Value::Number(v)).collect())
    }

    /// A column is numeric when it holds at least one number and no text.
    pub fn is_numeric(&self) -> bool {
        let mut any_number = false;
        for cell in &self.cells {
            match cell {
                Value::Text(_) => return false,
                Value::Number(_) => any_number = true,
                Value::Missing => {}
            }
        }
        any_number
    }

    /// The non-missing numbers of this column, in row order.
    pub fn numbers_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Value::as_f64)
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }
}

// ---------------------------------------------------------------------------
// HasColumns – the capability the plot resolver depends on
// ---------------------------------------------------------------------------

/// Anything that can answer "does column X exist?".
pub trait HasColumns {
    fn has_column(&self, name: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Column-oriented table; every column has the same length and rows are
/// identified only by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns, rejecting ragged input.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |c| c.cells.len());
        if let Some(bad) = columns.iter().find(|c| c.cells.len() != n_rows) {
            return Err(VizError::Load(format!(
                "column '{}' has {} rows, expected {n_rows}",
                bad.name,
                bad.cells.len()
            )));
        }
        Ok(Table { columns, n_rows })
    }

    /// Build a table from a header and row-major cells.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = names.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(VizError::Load(format!(
                    "row {i} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }
        Table::new(columns)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`], but absence is an error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| VizError::ColumnNotFound(name.to_string()))
    }

    /// Cells of row `index` across all columns.
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.cells[index]).collect()
    }

    /// New table holding only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                cells: indices.iter().map(|&i| c.cells[i].clone()).collect(),
            })
            .collect();
        Table {
            columns,
            n_rows: indices.len(),
        }
    }

    /// Paired numbers of two columns, skipping rows where either is not a number.
    pub fn xy_points(&self, x: &str, y: &str) -> Result<Vec<[f64; 2]>> {
        let xs = self.require_column(x)?;
        let ys = self.require_column(y)?;
        Ok(xs
            .cells
            .iter()
            .zip(&ys.cells)
            .filter_map(|(a, b)| Some([a.as_f64()?, b.as_f64()?]))
            .collect())
    }
}

impl HasColumns for Table {
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
