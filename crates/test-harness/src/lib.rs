//! Test harness for fitting construction.
//!
//! Builds fittings through the real engine against either kernel and checks
//! the results with point and box queries.
//!
//! # Key Components
//!
//! - [`FittingHarness`]: Fluent API for building and probing named fittings
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`helpers`]: Error type and sample-point geometry
//! - [`assertions`]: Turn verdicts into `Result`s with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use workflow::FittingHarness;
