//! Reserved-syntax checking for `::` left-hand sides.
//!
//! The pipeline for one reference:
//!
//! 1. [`shape::classify`] the left-hand side into a closed set of shapes
//! 2. [`reserved::detect`] primary diagnostics from the shape alone and
//!    strip it to a degraded leaf
//! 3. resolve the leaf once per [`engine`] through a
//!    [`ResolutionOracle`](oracle::ResolutionOracle)
//! 4. [`merge::merge`] primaries with both engines' secondary diagnostics
//!
//! [`check_reference`], [`check_unit`] and [`check_source`] run the whole
//! pipeline.

mod api;
mod config;
pub mod engine;
pub mod merge;
pub mod oracle;
pub mod reserved;
pub mod shape;

pub use api::{
    analyze_reference, check_reference, check_source, check_unit, ReferenceAnalysis, UnitReport,
};
pub use config::{CheckConfig, EngineMode, UnknownEngineMode};
