//! Host-side categorical data shapes.
//!
//! These mirror what the dashboard host hands over on each update: one
//! category (time) column and any number of measure columns, each measure
//! optionally carrying a parallel highlight array for the current selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column metadata supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub query_name: Option<String>,
}

impl ColumnSource {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            query_name: None,
        }
    }
}

/// Time column shared by every measure. `None` entries are missing dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryColumn {
    #[serde(default)]
    pub source: Option<ColumnSource>,
    #[serde(default)]
    pub values: Vec<Option<DateTime<Utc>>>,
}

impl CategoryColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<DateTime<Utc>>>) -> Self {
        Self {
            source: Some(ColumnSource::new(name)),
            values,
        }
    }
}

/// One measure column.
///
/// `highlights == None` means the host has no active selection; otherwise a
/// non-null entry marks the row at that index as selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueColumn {
    #[serde(default)]
    pub source: ColumnSource,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
    #[serde(default)]
    pub highlights: Option<Vec<Option<f64>>>,
}

impl ValueColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            source: ColumnSource::new(name),
            values,
            highlights: None,
        }
    }

    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<Option<f64>>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    /// Highlight state of row `index`; rows beyond the highlight array are not selected.
    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        match &self.highlights {
            None => true,
            Some(highlights) => matches!(highlights.get(index), Some(Some(_))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoricalDataView {
    #[serde(default)]
    pub categories: Option<Vec<CategoryColumn>>,
    #[serde(default)]
    pub values: Option<Vec<ValueColumn>>,
}

impl CategoricalDataView {
    #[must_use]
    pub fn new(category: CategoryColumn, values: Vec<ValueColumn>) -> Self {
        Self {
            categories: Some(vec![category]),
            values: Some(values),
        }
    }

    /// First category column, if it carries source metadata.
    #[must_use]
    pub fn category(&self) -> Option<&CategoryColumn> {
        self.categories
            .as_ref()
            .and_then(|columns| columns.first())
            .filter(|column| column.source.is_some())
    }

    /// Measure columns in source order, if any.
    #[must_use]
    pub fn measures(&self) -> Option<&[ValueColumn]> {
        self.values
            .as_deref()
            .filter(|columns| !columns.is_empty())
    }
}
