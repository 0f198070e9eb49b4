use crate::collector::OwnershipMap;

/// Fixed header row of the report.
pub const HEADER: [&str; 2] = ["url", "owners"];

/// Ordered (url, owners) rows, header first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<[String; 2]>,
}

impl ResultTable {
    /// Build the table from collected records.
    ///
    /// Rows follow the map's iteration order; nothing is sorted.
    pub fn from_records(records: &OwnershipMap) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(HEADER.map(str::to_string));
        rows.extend(
            records
                .iter()
                .map(|(url, owners)| [url.clone(), owners.clone()]),
        );
        Self { rows }
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[[String; 2]] {
        &self.rows
    }

    /// Data rows only.
    pub fn records(&self) -> &[[String; 2]] {
        &self.rows[1..]
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&OwnershipMap> for ResultTable {
    fn from(records: &OwnershipMap) -> Self {
        Self::from_records(records)
    }
}
