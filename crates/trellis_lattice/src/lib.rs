//! Weighted word lattices for Trellis.
//!
//! This crate provides:
//! - [`Lattice`] - Positions with outgoing weighted arcs; a sentence is the linear case
//! - [`LatticeArc`] - A terminal, a cost, and the number of positions it spans
//! - [`plf`] - Reading and writing the PLF text format

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lattice;
pub mod plf;

pub use lattice::{Lattice, LatticeArc};
pub use plf::{from_text_or_plf, looks_like_plf, parse_plf, to_plf};
