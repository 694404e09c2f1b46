//! Layout engine for parallel sets, common angle and hammock plots of categorical data.
//!
//! [`compute_layout`] turns a [`Dataset`] and a [`LayoutRequest`] into stacked category bars,
//! labels and one set of ribbons per adjacent variable pair, all in data coordinates.

pub mod axis;
pub mod config;
pub mod data;
pub mod error;
pub mod frequency;
pub mod layout;
pub mod ordering;
pub mod ribbons;

pub use config::LayoutConfig;
pub use data::{Column, Dataset, Weight};
pub use error::LayoutError;
pub use layout::{compute_layout, Layout, LayoutRequest};
pub use ordering::{LevelOrder, OrderSpec};
pub use ribbons::Method;
