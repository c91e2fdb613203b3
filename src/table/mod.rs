//! The entity table: ordered rows with named, typed columns.

mod loader;
mod writer;

pub use loader::load_csv;
pub use writer::save_csv;

use anyhow::{Result, bail};

/// Data held by a single column.
///
/// Raw input columns start life as [`ColumnData::Text`]; preprocessing coerces
/// the base measurement columns to [`ColumnData::Numeric`], where `None` marks
/// a missing value. Flag columns produced by the category flagger are
/// [`ColumnData::Bool`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<String>),
    Numeric(Vec<Option<f64>>),
    Bool(Vec<bool>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            Self::Text(v) => v.len(),
            Self::Numeric(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// An ordered collection of equally sized columns.
///
/// Columns are only ever appended, never removed; the row order established at
/// load time is preserved for the lifetime of the table. Ownership of the
/// table passes linearly through the pipeline stages, so no stage ever
/// observes another stage's partial mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    columns: Vec<Column>,
    n_rows: usize,
}

impl EntityTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            n_rows: 0,
        }
    }

    #[must_use]
    pub const fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Append a column. Every column has exactly one producer, so a name
    /// collision is an error rather than an overwrite.
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            bail!("column '{name}' already exists; score columns have a single producer");
        }
        if !self.columns.is_empty() && data.len() != self.n_rows {
            bail!(
                "column '{name}' has {} rows, table has {}",
                data.len(),
                self.n_rows
            );
        }
        if self.columns.is_empty() {
            self.n_rows = data.len();
        }
        self.columns.push(Column { name, data });
        Ok(())
    }

    /// Replace the data of an existing column in place. Used by the
    /// preprocessor, which refines raw columns rather than producing new ones.
    pub fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if data.len() != self.n_rows {
            bail!(
                "replacement for column '{name}' has {} rows, table has {}",
                data.len(),
                self.n_rows
            );
        }
        let Some(column) = self.column_mut(name) else {
            bail!("missing required column: {name}");
        };
        column.data = data;
        Ok(())
    }

    /// The values of a numeric column, with missing cells as `None`.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        let Some(column) = self.column(name) else {
            bail!("missing required column: {name}");
        };
        match &column.data {
            ColumnData::Numeric(values) => Ok(values),
            _ => bail!("column '{name}' is not numeric"),
        }
    }

    /// The values of a numeric column that is known to be fully populated
    /// (i.e. after mean imputation). A remaining missing value is an error.
    pub fn numeric_dense(&self, name: &str) -> Result<Vec<f64>> {
        let values = self.numeric(name)?;
        let mut out = Vec::with_capacity(values.len());
        for (row, value) in values.iter().enumerate() {
            match value {
                Some(v) => out.push(*v),
                None => bail!("column '{name}' has a missing value at row {row}"),
            }
        }
        Ok(out)
    }

    /// The values of a text column.
    pub fn text(&self, name: &str) -> Result<&[String]> {
        let Some(column) = self.column(name) else {
            bail!("missing required column: {name}");
        };
        match &column.data {
            ColumnData::Text(values) => Ok(values),
            _ => bail!("column '{name}' is not text"),
        }
    }
}

/// Normalize a raw header: trim, lowercase, spaces to underscores.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// De-duplicate normalized headers by suffixing the second and later
/// occurrences with `_1`, `_2`, and so on.
#[must_use]
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let count = seen.entry(header.clone()).or_insert(0);
        if *count == 0 {
            out.push(header.clone());
        } else {
            out.push(format!("{header}_{count}"));
        }
        *count += 1;
    }
    out
}
