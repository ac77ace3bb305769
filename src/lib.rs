//! Deterministic, auditable daycare-subsidy calculation.
//!
//! Given a household's income and wealth, a daycare centre's posted rate
//! and opening weeks, and the selected weekly attendance pattern, the
//! [`SubsidyCalculator`] produces a five-stage financial breakdown — Base,
//! Gross, Net, per-day and monthly — as ordered ledgers ready for
//! rendering. All monetary arithmetic is exact decimal; the two monthly
//! figures that are actually paid are the only amounts rounded (to five
//! cents).

pub mod calc;
pub mod config;
pub mod daycare;
pub mod directory;
pub mod format;
pub mod services;

mod calculator;

pub use calculator::{Calculation, CalculationError, SubsidyCalculator};
pub use daycare::Daycare;
