use rust_decimal::Decimal;
use serde::Serialize;

use super::context::CalcContext;
use super::rounding::RoundedAmount;
use super::ArithmeticError;

/// An operand for a block operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Exact(Decimal),
    Rounded(RoundedAmount),
}

impl Amount {
    pub fn exact(value: Decimal) -> Self {
        Self::Exact(value)
    }

    /// Rounds the value to five cents before it enters the ledger.
    pub fn rounded(value: Decimal) -> Self {
        Self::Rounded(RoundedAmount::new(value))
    }

    pub fn value(self) -> Decimal {
        match self {
            Self::Exact(value) => value,
            Self::Rounded(rounded) => rounded.get(),
        }
    }

    pub fn is_rounded(self) -> bool {
        matches!(self, Self::Rounded(_))
    }
}

/// A ledger operation together with its operand.
///
/// The operand lives inside the variant, so an operation can never be built
/// with a missing or superfluous amount: assignments snapshot the running
/// total and take none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Records the amount without a displayed operator. Like the original
    /// tariff sheets, a recorded amount still joins the running total; the
    /// first line of every block is recorded this way.
    Record(Amount),
    Add(Amount),
    Subtract(Amount),
    Multiply(Amount),
    Divide(Amount),
    /// Snapshots the running total as a displayed subtotal.
    Assign,
    /// Snapshots the running total, rounded to five cents for display. The
    /// running total itself stays exact.
    AssignRounded,
}

/// What a rendered line shows as its operator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Record,
    Add,
    Subtract,
    Multiply,
    Divide,
    Assign,
}

impl OperationKind {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Record => "",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Assign => "=",
        }
    }
}

/// One entry of a block's ledger, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultLine {
    pub title: String,
    pub amount: Decimal,
    pub note: Option<String>,
    pub operation: OperationKind,
    pub bold: bool,
    pub rounded: bool,
}

/// Builder for a single ledger line.
#[derive(Debug, Clone)]
pub struct Line {
    title: String,
    operation: Operation,
    note: Option<String>,
    bold: bool,
}

impl Line {
    pub fn new(title: impl Into<String>, operation: Operation) -> Self {
        Self {
            title: title.into(),
            operation,
            note: None,
            bold: false,
        }
    }

    /// Attaches an explanatory note, trimmed of surrounding blank space.
    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.trim_matches(|c| c == ' ' || c == '\n').to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// An ordered ledger of line items with a running total.
///
/// Every operation appends exactly one [`ResultLine`]; insertion order is
/// the display order and is preserved exactly. The block applies its
/// [`CalcContext`] after each mutation of the running total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub title: String,
    #[serde(skip)]
    context: CalcContext,
    total: Decimal,
    results: Vec<ResultLine>,
}

impl Block {
    pub fn new(title: impl Into<String>, context: CalcContext) -> Self {
        Self {
            title: title.into(),
            context,
            total: Decimal::ZERO,
            results: Vec::new(),
        }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn results(&self) -> &[ResultLine] {
        &self.results
    }

    pub fn push(&mut self, line: Line) -> Result<(), ArithmeticError> {
        let (operation, amount, rounded) = match line.operation {
            Operation::Record(amount) => {
                self.total = self.context.add(self.total, amount.value())?;
                (OperationKind::Record, amount.value(), amount.is_rounded())
            }
            Operation::Add(amount) => {
                self.total = self.context.add(self.total, amount.value())?;
                (OperationKind::Add, amount.value(), amount.is_rounded())
            }
            Operation::Subtract(amount) => {
                self.total = self.context.sub(self.total, amount.value())?;
                (OperationKind::Subtract, amount.value(), amount.is_rounded())
            }
            Operation::Multiply(amount) => {
                self.total = self.context.mul(self.total, amount.value())?;
                (OperationKind::Multiply, amount.value(), amount.is_rounded())
            }
            Operation::Divide(amount) => {
                self.total = self.context.div(self.total, amount.value())?;
                (OperationKind::Divide, amount.value(), amount.is_rounded())
            }
            Operation::Assign => (OperationKind::Assign, self.total, false),
            Operation::AssignRounded => {
                (OperationKind::Assign, RoundedAmount::new(self.total).get(), true)
            }
        };

        self.results.push(ResultLine {
            title: line.title,
            amount,
            note: line.note,
            operation,
            bold: line.bold,
            rounded,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn block() -> Block {
        Block::new("Testblock", CalcContext::coarse())
    }

    #[test]
    fn every_operation_appends_exactly_one_line() {
        let mut block = block();
        block
            .push(Line::new("Einkommen", Operation::Record(Amount::exact(dec!(100)))))
            .unwrap();
        block
            .push(Line::new("Zuschlag", Operation::Add(Amount::exact(dec!(20)))))
            .unwrap();
        block.push(Line::new("Zwischentotal", Operation::Assign)).unwrap();
        block
            .push(Line::new("Abzug", Operation::Subtract(Amount::exact(dec!(50)))))
            .unwrap();
        block.push(Line::new("Total", Operation::Assign)).unwrap();

        assert_eq!(block.results().len(), 5);
        assert_eq!(block.total(), dec!(70));

        let titles: Vec<_> = block.results().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Einkommen", "Zuschlag", "Zwischentotal", "Abzug", "Total"]
        );
    }

    #[test]
    fn assign_snapshots_without_mutating_the_total() {
        let mut block = block();
        block
            .push(Line::new("Betrag", Operation::Record(Amount::exact(dec!(12.34)))))
            .unwrap();
        block.push(Line::new("Total", Operation::Assign)).unwrap();
        block.push(Line::new("Total", Operation::Assign)).unwrap();

        assert_eq!(block.total(), dec!(12.34));
        assert_eq!(block.results()[1].amount, dec!(12.34));
        assert_eq!(block.results()[2].amount, dec!(12.34));
    }

    #[test]
    fn rounded_assign_rounds_the_display_amount_only() {
        let mut block = block();
        block
            .push(Line::new("Betrag", Operation::Record(Amount::exact(dec!(113.69)))))
            .unwrap();
        block
            .push(Line::new("Total", Operation::AssignRounded).bold())
            .unwrap();

        let line = &block.results()[1];
        assert_eq!(line.amount, dec!(113.70));
        assert!(line.rounded);
        assert!(line.bold);
        assert_eq!(block.total(), dec!(113.69), "running total stays exact");
    }

    #[test]
    fn rounded_amounts_join_the_total_pre_rounded() {
        let mut block = block();
        block
            .push(Line::new("Betrag", Operation::Record(Amount::rounded(dec!(113.6875)))))
            .unwrap();

        assert_eq!(block.total(), dec!(113.70));
        assert_eq!(block.results()[0].amount, dec!(113.70));
        assert!(block.results()[0].rounded);
    }

    #[test]
    fn multiplication_runs_under_the_coarse_context() {
        let mut block = block();
        block
            .push(Line::new("Übertrag", Operation::Record(Amount::exact(dec!(513.25)))))
            .unwrap();
        block
            .push(Line::new("Faktor", Operation::Multiply(Amount::exact(dec!(4.25)))))
            .unwrap();

        assert_eq!(block.total(), dec!(2181.3));
    }

    #[test]
    fn division_by_zero_is_a_contract_violation() {
        let mut block = block();
        block
            .push(Line::new("Betrag", Operation::Record(Amount::exact(dec!(10)))))
            .unwrap();
        let err = block
            .push(Line::new("Division", Operation::Divide(Amount::exact(dec!(0)))))
            .unwrap_err();

        assert_eq!(err, ArithmeticError::DivisionByZero);
    }

    #[test]
    fn notes_are_trimmed_of_blank_lines() {
        let mut block = block();
        block
            .push(
                Line::new("Betrag", Operation::Record(Amount::exact(dec!(1))))
                    .note("\n  Hinweis zur Berechnung \n"),
            )
            .unwrap();

        assert_eq!(
            block.results()[0].note.as_deref(),
            Some("Hinweis zur Berechnung")
        );
    }
}
