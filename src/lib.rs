//! Artwork valuation engine for the GalleryPia marketplace.
//!
//! Five category sub-scores are combined under a weight set into a final
//! score on `[0, 100]`, which a piecewise curve turns into a price.
//! The [`valuation`] module is pure and holds no state; [`config`] and
//! [`output`] serve the command-line front end.

pub mod config;
pub mod output;
pub mod valuation;
