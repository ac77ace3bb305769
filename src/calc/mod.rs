//! Ledger arithmetic for the subsidy pipeline: decimal contexts, the
//! five-cent rounding rule and the auditable calculation block.

mod block;
mod context;
mod rounding;

pub use block::{Amount, Block, Line, Operation, OperationKind, ResultLine};
pub use context::CalcContext;
pub use rounding::{round_to_5_cents, RoundedAmount};

/// Failures of the block arithmetic itself. These indicate a defect in the
/// calling code or a nonsensical configuration, never bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("division by zero in calculation block")]
    DivisionByZero,
    #[error("decimal overflow in calculation block")]
    Overflow,
}
