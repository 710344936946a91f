use std::collections::BTreeSet;

/// One cell of a grid: the text snapshot used for matching plus the
/// highlight decision written back by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tags: Vec<String>,
    /// Set by the host to keep this cell out of matching altogether.
    pub ignored: bool,
    pub highlighted: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub visible: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(Cell::new).collect())
    }
}

/// Host-owned table. The engine only reads cell text and writes the
/// `visible` / `highlighted` flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn from_texts<R, I, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(rows.into_iter().map(Row::from_texts).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_row_count(&self) -> usize {
        self.rows.iter().filter(|row| row.visible).count()
    }

    pub fn highlighted_cell_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.highlighted)
            .count()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().filter(|(_, row)| row.visible)
    }

    /// Sets every row's visibility to `visible` and clears all highlights.
    pub fn reset(&mut self, visible: bool) {
        for row in &mut self.rows {
            row.visible = visible;
            for cell in &mut row.cells {
                cell.highlighted = false;
            }
        }
    }
}

/// Cells excluded from matching: by column index and/or by tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreSet {
    pub columns: BTreeSet<usize>,
    pub tag: Option<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I: IntoIterator<Item = usize>>(mut self, columns: I) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn contains(&self, column: usize, cell: &Cell) -> bool {
        if cell.ignored || self.columns.contains(&column) {
            return true;
        }
        self.tag.as_deref().is_some_and(|tag| cell.has_tag(tag))
    }
}
