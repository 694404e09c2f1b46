//! Weighted cross-tabulation of adjacent variable pairs

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::ordering::CodedVariable;

/// One nonzero cell of a pair cross-tabulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// Index after dropping empty cells; joins the two ends of one ribbon
    pub row_id: usize,
    /// Position of the left level in the left variable's level order
    pub left: usize,
    pub right: usize,
    pub left_key: String,
    pub right_key: String,
    pub weight: f64,
    /// Running total with rows sorted by (left, right)
    pub left_cum: f64,
    /// Running total with rows sorted by (right, left)
    pub right_cum: f64,
}

impl FrequencyRow {
    /// Vertical span occupied at the left axis
    pub fn left_span(&self) -> [f64; 2] {
        [self.left_cum - self.weight, self.left_cum]
    }

    /// Vertical span occupied at the right axis
    pub fn right_span(&self) -> [f64; 2] {
        [self.right_cum - self.weight, self.right_cum]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairFrequencyTable {
    pub left_variable: String,
    pub right_variable: String,
    pub rows: Vec<FrequencyRow>,
}

impl PairFrequencyTable {
    /// Cross-tabulate two coded variables with per-record weights
    pub fn build(
        left: &CodedVariable,
        right: &CodedVariable,
        weights: &[f64],
    ) -> Result<Self, LayoutError> {
        let mut cells: IndexMap<(usize, usize), f64> = IndexMap::new();
        for ((l, r), w) in left.codes.iter().zip(&right.codes).zip(weights) {
            *cells.entry((*l, *r)).or_insert(0.0) += w;
        }

        let left_keys = left.variable.level_keys();
        let right_keys = right.variable.level_keys();
        Self::from_cells(
            &left.variable.name,
            &right.variable.name,
            &left_keys,
            &right_keys,
            cells.into_iter().map(|((l, r), w)| (l, r, w)),
        )
    }

    /// Build from `(left level, right level, weight)` cells.
    ///
    /// Duplicate cells are summed; empty cells are dropped. Level indices must address
    /// `left_keys` / `right_keys`.
    pub fn from_cells<S: AsRef<str>>(
        left_variable: &str,
        right_variable: &str,
        left_keys: &[S],
        right_keys: &[S],
        cells: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, LayoutError> {
        let mut aggregated: IndexMap<(usize, usize), f64> = IndexMap::new();
        for (l, r, w) in cells {
            check_level(left_variable, l, left_keys.len())?;
            check_level(right_variable, r, right_keys.len())?;
            *aggregated.entry((l, r)).or_insert(0.0) += w;
        }

        let mut rows: Vec<FrequencyRow> = aggregated
            .into_iter()
            .filter(|(_, w)| *w > 0.0)
            .sorted_by_key(|((l, r), _)| (*l, *r))
            .enumerate()
            .map(|(row_id, ((l, r), w))| FrequencyRow {
                row_id,
                left: l,
                right: r,
                left_key: left_keys[l].as_ref().to_string(),
                right_key: right_keys[r].as_ref().to_string(),
                weight: w,
                left_cum: 0.0,
                right_cum: 0.0,
            })
            .collect();

        // rows are already in (left, right) order
        let mut running = 0.0;
        for row in rows.iter_mut() {
            running += row.weight;
            row.left_cum = running;
        }

        let by_right: Vec<usize> = (0..rows.len())
            .sorted_by_key(|i| (rows[*i].right, rows[*i].left))
            .collect();
        let mut running = 0.0;
        for i in by_right {
            running += rows[i].weight;
            rows[i].right_cum = running;
        }

        Ok(Self {
            left_variable: left_variable.to_string(),
            right_variable: right_variable.to_string(),
            rows,
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    pub fn max_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row_id: usize) -> Option<&FrequencyRow> {
        self.rows.iter().find(|r| r.row_id == row_id)
    }

    /// Stack center of every left level that occurs in the table, by level position
    pub fn left_midpoints(&self) -> IndexMap<usize, f64> {
        Self::midpoints(self.rows.iter().map(|r| (r.left, r.weight)))
    }

    /// Stack center of every right level that occurs in the table, by level position
    pub fn right_midpoints(&self) -> IndexMap<usize, f64> {
        Self::midpoints(self.rows.iter().map(|r| (r.right, r.weight)))
    }

    fn midpoints(levels: impl Iterator<Item = (usize, f64)>) -> IndexMap<usize, f64> {
        let mut totals: IndexMap<usize, f64> = IndexMap::new();
        for (level, weight) in levels {
            *totals.entry(level).or_insert(0.0) += weight;
        }
        totals.sort_keys();

        let mut running = 0.0;
        totals
            .into_iter()
            .map(|(level, total)| {
                let mid = running + total / 2.0;
                running += total;
                (level, mid)
            })
            .collect()
    }
}

fn check_level(variable: &str, index: usize, levels: usize) -> Result<(), LayoutError> {
    if index < levels {
        Ok(())
    } else {
        Err(LayoutError::LevelOutOfRange {
            variable: variable.to_string(),
            index,
            levels,
        })
    }
}
