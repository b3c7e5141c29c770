// Per-edge traversal used by an external shortest path search

mod state;
mod strategy;
mod traverse;

pub use state::TraversalState;
pub use strategy::WeightStrategy;
pub use traverse::{StreetTraversal, TraversalResult};
