//! Derivation forests for Trellis.
//!
//! This crate provides:
//! - [`Forest`] - Append-only hypergraph of category nodes and rule-application edges
//! - [`ForestStats`] - Size and shape summaries
//! - [`EdgeSignature`] - Node-identity-free edge descriptions for comparing forests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod forest;
pub mod stats;

pub use forest::{Edge, EdgeId, Forest, Node, NodeId};
pub use stats::{EdgeSignature, ForestStats, edge_signatures};
