use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// One nullable value column aligned by index with the x column.
pub type ValueColumn = Vec<Option<f64>>;

/// Ascending outlier values attached to one index.
pub type OutlierSet = SmallVec<[f64; 4]>;

/// Column-oriented chart data.
///
/// Column `0` is the shared x column; value columns are addressed as
/// `1..column_count()`. Outlier sets, when present, form an extra trailing
/// column of per-index value lists.
///
/// Invariants (checked by the constructors):
/// - x values are finite and non-decreasing
/// - every value column and the outlier column match the x column's length
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesArray {
    x: Vec<f64>,
    columns: Vec<ValueColumn>,
    outliers: Option<Vec<OutlierSet>>,
}

impl SeriesArray {
    pub fn new(x: Vec<f64>, columns: Vec<ValueColumn>) -> ChartResult<Self> {
        if x.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData("x values must be finite".to_owned()));
        }
        if x.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ChartError::InvalidData(
                "x values must be sorted in non-decreasing order".to_owned(),
            ));
        }

        for (offset, column) in columns.iter().enumerate() {
            if column.len() != x.len() {
                return Err(ChartError::ColumnLengthMismatch {
                    column: offset + 1,
                    expected: x.len(),
                    actual: column.len(),
                });
            }
        }

        Ok(Self {
            x,
            columns,
            outliers: None,
        })
    }

    /// Attaches per-index outlier sets as the trailing column.
    ///
    /// Each set is sorted ascending; non-finite entries are dropped.
    pub fn with_outliers(mut self, sets: Vec<Vec<f64>>) -> ChartResult<Self> {
        if sets.len() != self.x.len() {
            return Err(ChartError::ColumnLengthMismatch {
                column: self.column_count(),
                expected: self.x.len(),
                actual: sets.len(),
            });
        }

        let normalized = sets
            .into_iter()
            .map(|set| {
                let mut set: OutlierSet = set.into_iter().filter(|v| v.is_finite()).collect();
                set.sort_by(f64::total_cmp);
                set
            })
            .collect();
        self.outliers = Some(normalized);
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    /// Number of addressable columns, the x column included.
    #[must_use]
    pub fn column_count(&self) -> usize {
        1 + self.columns.len()
    }

    /// Returns value column `column` (`1..column_count()`).
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&[Option<f64>]> {
        let offset = column.checked_sub(1)?;
        self.columns.get(offset).map(Vec::as_slice)
    }

    /// Reads one cell. Null, non-finite and out-of-range cells read as `None`.
    #[must_use]
    pub fn value(&self, column: usize, index: usize) -> Option<f64> {
        let value = if column == 0 {
            self.x.get(index).copied()
        } else {
            self.column(column)?.get(index).copied().flatten()
        };
        value.filter(|v| v.is_finite())
    }

    #[must_use]
    pub fn has_outliers(&self) -> bool {
        self.outliers.is_some()
    }

    /// Outliers at `index`; empty when the index has none.
    #[must_use]
    pub fn outliers(&self, index: usize) -> &[f64] {
        self.outliers
            .as_ref()
            .and_then(|sets| sets.get(index))
            .map(|set| set.as_slice())
            .unwrap_or(&[])
    }

    /// Smallest and largest outlier across all indices, if any index has one.
    #[must_use]
    pub fn outlier_bounds(&self) -> Option<(f64, f64)> {
        let sets = self.outliers.as_ref()?;
        let low = sets
            .iter()
            .filter_map(|set| set.first().copied())
            .map(OrderedFloat)
            .min()?;
        let high = sets
            .iter()
            .filter_map(|set| set.last().copied())
            .map(OrderedFloat)
            .max()?;
        Some((low.into_inner(), high.into_inner()))
    }
}

/// Semantic field name to column index lookup, resolved once per chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIndexMap {
    indices: IndexMap<String, usize>,
}

impl FieldIndexMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the given value-column names onto columns `1..=n` in order.
    #[must_use]
    pub fn from_value_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let indices = names
            .into_iter()
            .enumerate()
            .map(|(offset, name)| (name.into(), offset + 1))
            .collect();
        Self { indices }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, column: usize) -> Self {
        self.indices.insert(name.into(), column);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> ChartResult<usize> {
        self.get(name)
            .ok_or_else(|| ChartError::UnknownField(name.to_owned()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.indices.iter().map(|(name, column)| (name.as_str(), *column))
    }

    /// Checks that every mapped column exists in `series`.
    pub fn validate_for(&self, series: &SeriesArray) -> ChartResult<()> {
        for (name, column) in self.iter() {
            if column >= series.column_count() {
                return Err(ChartError::InvalidConfig(format!(
                    "field `{name}` maps to column {column}, but the series has {} columns",
                    series.column_count()
                )));
            }
        }
        Ok(())
    }
}
