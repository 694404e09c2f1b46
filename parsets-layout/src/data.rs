//! Typed column table used as layout input

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LayoutError;

/// A single table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Column {
    /// Values are indices into `levels`; the order of `levels` is the natural order.
    Categorical { levels: Vec<String>, codes: Vec<usize> },
    Text { values: Vec<String> },
    Numeric { values: Vec<f64> },
}

impl Column {
    pub fn categorical<S: Into<String>>(levels: Vec<S>, codes: Vec<usize>) -> Self {
        Column::Categorical {
            levels: levels.into_iter().map(Into::into).collect(),
            codes,
        }
    }

    pub fn text<S: Into<String>>(values: Vec<S>) -> Self {
        Column::Text {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn numeric(values: Vec<f64>) -> Self {
        Column::Numeric { values }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Categorical { codes, .. } => codes.len(),
            Column::Text { values } => values.len(),
            Column::Numeric { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coerce to categorical form, returning `(levels, codes)`.
    ///
    /// Text levels are sorted lexically and numeric levels numerically; explicit
    /// categorical levels keep their declared order.
    pub fn to_categorical(&self, name: &str) -> Result<(Vec<String>, Vec<usize>), LayoutError> {
        match self {
            Column::Categorical { levels, codes } => {
                if let Some(row) = codes.iter().position(|c| *c >= levels.len()) {
                    return Err(LayoutError::InvalidValue {
                        column: name.to_string(),
                        row,
                        reason: format!(
                            "level code {} out of range for {} levels",
                            codes[row],
                            levels.len()
                        ),
                    });
                }
                Ok((levels.clone(), codes.clone()))
            }
            Column::Text { values } => {
                let distinct: BTreeSet<&str> = values.iter().map(String::as_str).collect();
                let lookup: HashMap<&str, usize> =
                    distinct.iter().enumerate().map(|(i, v)| (*v, i)).collect();
                let codes = values.iter().map(|v| lookup[v.as_str()]).collect();
                Ok((distinct.into_iter().map(str::to_string).collect(), codes))
            }
            Column::Numeric { values } => {
                if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                    return Err(LayoutError::InvalidValue {
                        column: name.to_string(),
                        row,
                        reason: format!("non-finite value {}", values[row]),
                    });
                }
                let distinct: BTreeSet<OrderedFloat<f64>> =
                    values.iter().map(|v| OrderedFloat(*v)).collect();
                let lookup: HashMap<OrderedFloat<f64>, usize> =
                    distinct.iter().enumerate().map(|(i, v)| (*v, i)).collect();
                let codes = values.iter().map(|v| lookup[&OrderedFloat(*v)]).collect();
                Ok((distinct.into_iter().map(|v| v.0.to_string()).collect(), codes))
            }
        }
    }
}

/// How each record is weighted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weight {
    /// Every record counts once
    #[default]
    Unit,
    Constant(f64),
    /// Numeric column holding per-record weights
    Column(String),
}

impl From<&str> for Weight {
    fn from(column: &str) -> Self {
        Weight::Column(column.to_string())
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Weight::Constant(value)
    }
}

/// An ordered set of equal-length named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: IndexMap<String, Column>,
    len: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column; every column must have the same number of records
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self, LayoutError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.len = column.len();
        } else if column.len() != self.len {
            return Err(LayoutError::ColumnLengthMismatch {
                name,
                expected: self.len,
                actual: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(self)
    }

    pub fn from_columns<I, S>(columns: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |ds, (name, col)| ds.with_column(name, col))
    }

    /// Build a dataset from a JSON array of flat objects.
    ///
    /// A column whose values are all numbers becomes numeric, anything else becomes text.
    /// Every record must provide every column seen in the first record.
    pub fn from_json_records(records: &Value) -> Result<Self, LayoutError> {
        let rows = records
            .as_array()
            .ok_or_else(|| LayoutError::InvalidDataset("expected a JSON array of records".to_string()))?;

        let Some(first) = rows.first() else {
            return Ok(Self::new());
        };
        let names: Vec<String> = first
            .as_object()
            .ok_or_else(|| LayoutError::InvalidDataset("record 0 is not an object".to_string()))?
            .keys()
            .cloned()
            .collect();

        let mut raw: IndexMap<String, Vec<&Value>> =
            names.iter().map(|n| (n.clone(), Vec::with_capacity(rows.len()))).collect();
        for (row, record) in rows.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                LayoutError::InvalidDataset(format!("record {row} is not an object"))
            })?;
            for (name, values) in raw.iter_mut() {
                let value = object.get(name).filter(|v| !v.is_null()).ok_or_else(|| {
                    LayoutError::InvalidValue {
                        column: name.clone(),
                        row,
                        reason: "missing value".to_string(),
                    }
                })?;
                values.push(value);
            }
        }

        let columns = raw.into_iter().map(|(name, values)| {
            let column = if values.iter().all(|v| v.is_number()) {
                Column::numeric(values.iter().filter_map(|v| v.as_f64()).collect())
            } else {
                Column::text(
                    values
                        .iter()
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                )
            };
            (name, column)
        });
        Self::from_columns(columns)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Result<&Column, LayoutError> {
        self.columns
            .get(name)
            .ok_or_else(|| LayoutError::ColumnLookupError(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Resolve per-record weights, rejecting negative or non-finite values
    pub fn weights(&self, weight: &Weight) -> Result<Vec<f64>, LayoutError> {
        let weights = match weight {
            Weight::Unit => vec![1.0; self.len],
            Weight::Constant(value) => vec![*value; self.len],
            Weight::Column(name) => match self.column(name)? {
                Column::Numeric { values } => values.clone(),
                _ => {
                    return Err(LayoutError::InvalidValue {
                        column: name.clone(),
                        row: 0,
                        reason: "weight column must be numeric".to_string(),
                    })
                }
            },
        };

        if let Some(row) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(LayoutError::InvalidWeight {
                row,
                value: weights[row],
            });
        }
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_levels_sorted_lexically() -> Result<(), LayoutError> {
        let col = Column::text(vec!["b", "a", "c", "a"]);
        let (levels, codes) = col.to_categorical("x")?;
        assert_eq!(levels, vec!["a", "b", "c"]);
        assert_eq!(codes, vec![1, 0, 2, 0]);
        Ok(())
    }

    #[test]
    fn test_numeric_levels_sorted_numerically() -> Result<(), LayoutError> {
        let col = Column::numeric(vec![8.0, 4.0, 10.0, 4.0, 6.5]);
        let (levels, codes) = col.to_categorical("cyl")?;
        assert_eq!(levels, vec!["4", "6.5", "8", "10"]);
        assert_eq!(codes, vec![2, 0, 3, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_categorical_code_out_of_range() {
        let col = Column::categorical(vec!["a"], vec![0, 1]);
        assert!(matches!(
            col.to_categorical("x"),
            Err(LayoutError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Dataset::new()
            .with_column("a", Column::text(vec!["x", "y"]))
            .and_then(|ds| ds.with_column("b", Column::text(vec!["x"])));
        assert_eq!(
            result,
            Err(LayoutError::ColumnLengthMismatch {
                name: "b".to_string(),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_weights() -> Result<(), LayoutError> {
        let ds = Dataset::from_columns([
            ("a", Column::text(vec!["x", "y", "z"])),
            ("w", Column::numeric(vec![1.0, 0.0, 2.5])),
            ("bad", Column::numeric(vec![1.0, -1.0, 2.0])),
        ])?;
        assert_eq!(ds.weights(&Weight::Unit)?, vec![1.0, 1.0, 1.0]);
        assert_eq!(ds.weights(&Weight::Constant(2.0))?, vec![2.0, 2.0, 2.0]);
        assert_eq!(ds.weights(&"w".into())?, vec![1.0, 0.0, 2.5]);
        assert_eq!(
            ds.weights(&"bad".into()),
            Err(LayoutError::InvalidWeight { row: 1, value: -1.0 })
        );
        assert!(matches!(
            ds.weights(&"a".into()),
            Err(LayoutError::InvalidValue { .. })
        ));
        assert_eq!(
            ds.weights(&"nope".into()),
            Err(LayoutError::ColumnLookupError("nope".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_from_json_records() -> Result<(), LayoutError> {
        let ds = Dataset::from_json_records(&json!([
            {"class": "1st", "survived": "yes", "n": 3},
            {"class": "crew", "survived": "no", "n": 1.5},
        ]))?;
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names().collect::<Vec<_>>(), vec!["class", "survived", "n"]);
        assert_eq!(ds.column("n")?, &Column::numeric(vec![3.0, 1.5]));
        assert_eq!(ds.column("class")?, &Column::text(vec!["1st", "crew"]));
        Ok(())
    }

    #[test]
    fn test_from_json_missing_value() {
        let result = Dataset::from_json_records(&json!([{"a": 1}, {"a": null}]));
        assert!(matches!(
            result,
            Err(LayoutError::InvalidValue { row: 1, .. })
        ));
    }
}
