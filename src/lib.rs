//! RegexSolver - client for the RegexSolver API.
//!
//! This crate provides:
//! - [`Term`], a regular expression or fair representation, with a textual encoding
//! - Set operations on terms (intersection, union, subtraction)
//! - Analysis: details (cardinality, length, emptiness, totality), equivalence, subset
//! - String generation
//!
//! All the computation happens remotely; this crate only models terms and
//! talks to the API.
//!
//! # Example
//!
//! ```rust,no_run
//! use regexsolver::{RegexSolver, SolverConfig, Term};
//!
//! # async fn run() -> regexsolver::ApiResult<()> {
//! let solver = RegexSolver::new(SolverConfig::new("my-token"))?;
//!
//! let term = Term::regex("(abc|de)");
//! let details = term.get_details(&solver).await?;
//! println!("{}", details);
//!
//! let strings = term.generate_strings(&solver, 10).await?;
//! assert!(strings.len() <= 10);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod details;
pub mod term;
mod wire;

// Re-export client types
pub use client::{ApiError, ApiResult, RegexSolver};

// Re-export configuration
pub use config::SolverConfig;

// Re-export domain types
pub use details::{Cardinality, Details, Length};
pub use term::{Term, TermType};
