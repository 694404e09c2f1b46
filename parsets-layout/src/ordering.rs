//! Category level ordering and disambiguated level keys

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::error::LayoutError;

/// How a variable's levels are ordered before layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelOrder {
    /// Heaviest level first (code `1`)
    #[default]
    Descending,
    /// Lightest level first (code `-1`)
    Ascending,
    /// Natural level order (code `0`)
    Unchanged,
}

impl LevelOrder {
    /// Multiplier applied to level weight sums to form the sort key
    fn sign(&self) -> Option<f64> {
        match self {
            LevelOrder::Descending => Some(-1.0),
            LevelOrder::Ascending => Some(1.0),
            LevelOrder::Unchanged => None,
        }
    }
}

impl TryFrom<i64> for LevelOrder {
    type Error = LayoutError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LevelOrder::Descending),
            -1 => Ok(LevelOrder::Ascending),
            0 => Ok(LevelOrder::Unchanged),
            other => Err(LayoutError::InvalidOrderCode(other)),
        }
    }
}

/// A level order for every variable, or one per entry of the variable list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderSpec {
    All(LevelOrder),
    PerVariable(Vec<LevelOrder>),
}

impl Default for OrderSpec {
    fn default() -> Self {
        OrderSpec::All(LevelOrder::default())
    }
}

impl From<LevelOrder> for OrderSpec {
    fn from(order: LevelOrder) -> Self {
        OrderSpec::All(order)
    }
}

impl From<Vec<LevelOrder>> for OrderSpec {
    fn from(orders: Vec<LevelOrder>) -> Self {
        OrderSpec::PerVariable(orders)
    }
}

impl OrderSpec {
    /// Build from integer codes; a single code applies to every variable
    pub fn from_codes(codes: &[i64]) -> Result<Self, LayoutError> {
        let orders = codes
            .iter()
            .map(|c| LevelOrder::try_from(*c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match orders.as_slice() {
            [single] => OrderSpec::All(*single),
            _ => OrderSpec::PerVariable(orders),
        })
    }

    pub fn resolve(&self, num_variables: usize) -> Result<Vec<LevelOrder>, LayoutError> {
        match self {
            OrderSpec::All(order) => Ok(vec![*order; num_variables]),
            OrderSpec::PerVariable(orders) if orders.len() == num_variables => Ok(orders.clone()),
            OrderSpec::PerVariable(orders) => Err(LayoutError::OrderLengthMismatch {
                expected: num_variables,
                actual: orders.len(),
            }),
        }
    }
}

/// The globally unique key of a level: `"<variable>:<level>"`
pub fn level_key(variable: &str, level: &str) -> String {
    format!("{variable}:{level}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Disambiguated key, also used as fill key
    pub key: String,
    /// Original level text
    pub label: String,
    /// Summed record weight
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub levels: Vec<Level>,
}

impl Variable {
    pub fn total_weight(&self) -> f64 {
        self.levels.iter().map(|l| l.weight).sum()
    }

    pub fn level_keys(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.key.as_str()).collect()
    }

    pub fn level_labels(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.label.as_str()).collect()
    }
}

/// A variable together with each record's index into its ordered levels
#[derive(Debug, Clone, PartialEq)]
pub struct CodedVariable {
    pub variable: Variable,
    pub codes: Vec<usize>,
}

/// Order one variable's levels and remap record codes to the new order.
///
/// `levels` is given in natural order and `codes` index into it.
pub fn order_levels(
    name: &str,
    levels: Vec<String>,
    codes: &[usize],
    weights: &[f64],
    order: LevelOrder,
) -> CodedVariable {
    let mut sums = vec![0.0; levels.len()];
    for (code, weight) in codes.iter().zip(weights) {
        sums[*code] += weight;
    }

    let mut permutation: Vec<usize> = (0..levels.len()).collect();
    if let Some(sign) = order.sign() {
        // stable, so ties keep natural order
        permutation.sort_by_key(|i| OrderedFloat(sign * sums[*i]));
    }

    let mut new_position = vec![0; levels.len()];
    for (position, old) in permutation.iter().enumerate() {
        new_position[*old] = position;
    }

    let ordered = permutation
        .iter()
        .map(|old| Level {
            key: level_key(name, &levels[*old]),
            label: levels[*old].clone(),
            weight: sums[*old],
        })
        .collect();

    CodedVariable {
        variable: Variable {
            name: name.to_string(),
            levels: ordered,
        },
        codes: codes.iter().map(|c| new_position[*c]).collect(),
    }
}

/// Coerce and order every distinct variable in `names`.
///
/// A variable listed more than once uses the order flag of its first occurrence.
pub fn code_variables(
    dataset: &Dataset,
    names: &[String],
    weights: &[f64],
    orders: &[LevelOrder],
) -> Result<IndexMap<String, CodedVariable>, LayoutError> {
    let mut coded = IndexMap::new();
    for (name, order) in names.iter().zip(orders) {
        if coded.contains_key(name) {
            continue;
        }
        let (levels, codes) = dataset.column(name)?.to_categorical(name)?;
        coded.insert(name.clone(), order_levels(name, levels, &codes, weights, *order));
    }
    Ok(coded)
}

/// Concatenated level keys of all variables, the canonical fill ordering
pub fn level_ordering<'a>(variables: impl IntoIterator<Item = &'a Variable>) -> Vec<String> {
    variables
        .into_iter()
        .flat_map(|v| v.levels.iter().map(|l| l.key.clone()))
        .collect()
}
