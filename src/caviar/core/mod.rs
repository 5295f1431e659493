//! caviar::core — data, specification and the pure building blocks of
//! CAViaR estimation.
//!
//! Purpose
//! -------
//! Hold everything that does not involve an optimizer: the validated
//! [`data::ReturnSeries`], the [`spec::CaviarSpec`], parameter bounds, the
//! VaR recurrences, the tick loss, configuration structs, and the
//! diagnostics consumed by external backtests.
//!
//! Conventions
//! -----------
//! - Indices are 0-based; `VaR[0]` is always the starting value VaR₀.
//! - All functions here are deterministic and side-effect free.

pub mod bounds;
pub mod data;
pub mod diagnostics;
pub mod news_impact;
pub mod options;
pub mod recurrence;
pub mod spec;
pub mod tick_loss;
