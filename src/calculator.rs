use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::calc::{Amount, ArithmeticError, Block, CalcContext, Line, Operation};
use crate::config::PolicyConfiguration;
use crate::daycare::Daycare;
use crate::format::format_decimal;
use crate::services::{SelectionError, Services};

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// The five ledgers of one subsidy calculation, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub base: Block,
    pub gross: Block,
    pub net: Block,
    pub actual: Block,
    pub monthly: Block,
}

impl Calculation {
    pub fn blocks(&self) -> [&Block; 5] {
        [&self.base, &self.gross, &self.net, &self.actual, &self.monthly]
    }
}

/// Produces the detailed, auditable subsidy calculation for one household.
///
/// The calculator is pure and stateless across calls: every invocation
/// receives immutable snapshots of the policy, the selected centre and the
/// service selection, and returns a fresh [`Calculation`].
#[derive(Debug, Clone)]
pub struct SubsidyCalculator {
    policy: PolicyConfiguration,
}

impl SubsidyCalculator {
    pub fn new(policy: PolicyConfiguration) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfiguration {
        &self.policy
    }

    /// Runs the five-stage pipeline: Base → Gross → Net → Actual →
    /// Monthly. Each stage's first line carries the previous stage's final
    /// total forward exactly.
    ///
    /// All monetary arithmetic runs under the coarse five-digit context;
    /// only the two monthly figures are rounded to five cents, and
    /// independently of each other.
    pub fn calculate(
        &self,
        daycare: &Daycare,
        services: &Services,
        income: Decimal,
        wealth: Decimal,
        rebate: bool,
    ) -> Result<Calculation, CalculationError> {
        services.validate_selection()?;

        let ctx = CalcContext::coarse();
        let cfg = &self.policy;

        // Base rate
        // ---------
        let mut base = Block::new("Berechnungsgrundlage für die Elternbeiträge", ctx);

        base.push(
            Line::new("Steuerbares Einkommen", Operation::Record(Amount::exact(income)))
                .note("Steuerbares Einkommen gemäss letzter Veranlagung"),
        )?;

        let surcharge = ctx
            .mul(ctx.sub(wealth, cfg.max_wealth)?, cfg.wealth_premium)?
            .max(Decimal::ZERO);
        base.push(
            Line::new("Vermögenszuschlag", Operation::Add(Amount::exact(surcharge))).note(
                &format!(
                    "Der Vermögenszuschlag beträgt {} des Vermögens, für das \
                     tatsächlich Steuern anfallen (ab {} CHF).",
                    format_decimal(cfg.wealth_premium),
                    format_decimal(cfg.max_wealth)
                ),
            ),
        )?;

        base.push(Line::new("Massgebendes Gesamteinkommen", Operation::Assign))?;
        base.push(Line::new(
            "Abzüglich Minimaleinkommen",
            Operation::Subtract(Amount::exact(cfg.min_income)),
        ))?;
        base.push(Line::new("Berechnungsgrundlage", Operation::Assign))?;

        debug!(total = %base.total(), "base block computed");

        // Gross contribution
        // ------------------
        let mut gross = Block::new("Berechnung des Brutto-Elternbeitrags", ctx);

        gross.push(Line::new(
            "Übertrag",
            Operation::Record(Amount::exact(base.total())),
        ))?;
        gross.push(
            Line::new("Faktor", Operation::Multiply(Amount::exact(cfg.wealth_factor))).note(
                "Ihr Elternbeitrag wird aufgrund eines Faktors berechnet \
                 (Kita-Reglement Art. 20 Abs 3)",
            ),
        )?;
        gross.push(Line::new(
            "Einkommensabhängiger Elternbeitragsbestandteil",
            Operation::Assign,
        ))?;
        gross.push(Line::new(
            "Mindestbeitrag Eltern",
            Operation::Add(Amount::exact(cfg.min_rate)),
        ))?;
        gross.push(Line::new("Elternbeitrag brutto", Operation::Assign))?;

        // Rebate
        // ------
        let rebate_amount = if rebate {
            ctx.div(ctx.mul(gross.total(), cfg.rebate)?, HUNDRED)?
        } else {
            Decimal::ZERO
        };

        let mut net = Block::new("Berechnung des Rabatts", ctx);

        net.push(Line::new(
            "Übertrag",
            Operation::Record(Amount::exact(gross.total())),
        ))?;
        net.push(
            Line::new("Rabatt", Operation::Subtract(Amount::exact(rebate_amount))).note(&format!(
                "Bei einem Betreuungsumfang von insgesamt mehr als 2 ganzen \
                 Tagen pro Woche gilt ein Rabatt von {}%.",
                format_decimal(cfg.rebate)
            )),
        )?;
        net.push(Line::new("Elternbeitrag netto", Operation::Assign))?;

        // Actual contribution per day
        // ---------------------------
        let mut actual = Block::new(
            "Berechnung des Elternbeitrags und des städtischen Beitrags pro Tag",
            ctx,
        );

        actual.push(Line::new(
            "Übertrag",
            Operation::Record(Amount::exact(net.total())),
        ))?;

        let extra_charge = ctx.sub(daycare.rate, cfg.max_rate)?.max(Decimal::ZERO);
        actual.push(
            Line::new("Zusatzbeitrag Eltern", Operation::Add(Amount::exact(extra_charge))).note(
                &format!(
                    "Zusatzbeitrag für Kitas, deren Tagestarif über {} CHF liegt.",
                    format_decimal(cfg.max_rate)
                ),
            ),
        )?;
        actual.push(
            Line::new("Elternbeitrag pro Tag", Operation::Assign)
                .note("Ihr Beitrag pro Tag (100%) und Kind")
                .bold(),
        )?;

        // Recorded after the per-day subtotal, so the municipal share joins
        // the running total; the weekly tariff below subtracts it back out.
        actual.push(
            Line::new(
                "Städtischer Beitrag pro Tag",
                Operation::Record(Amount::exact(rebate_amount)),
            )
            .note("Städtischer Beitrag für Ihr Kind pro Tag"),
        )?;

        // Monthly flat rate
        // -----------------
        let mut monthly = Block::new(
            "Berechnung des Elternbeitrags und des städtischen Beitrags \
             pro Monat (Monatspauschale)",
            ctx,
        );

        let weekly_tariff = ctx.div(
            ctx.mul(ctx.sub(actual.total(), rebate_amount)?, services.total())?,
            HUNDRED,
        )?;
        monthly.push(
            Line::new("Wochentarif", Operation::Record(Amount::exact(weekly_tariff)))
                .note("Wochentarif: Elternbeiträge der gewählten Betreuungstage"),
        )?;
        monthly.push(
            Line::new("Faktor", Operation::Multiply(Amount::exact(daycare.factor())))
                .note("Faktor für jährliche Öffnungswochen Ihrer Kita"),
        )?;
        monthly.push(
            Line::new("Elternbeitrag pro Monat", Operation::AssignRounded).bold(),
        )?;

        let municipal_monthly = ctx.mul(
            ctx.div(ctx.mul(rebate_amount, services.total())?, HUNDRED)?,
            daycare.factor(),
        )?;
        monthly.push(
            Line::new(
                "Städtischer Beitrag pro Monat",
                Operation::Record(Amount::rounded(municipal_monthly)),
            )
            .note("Städtischer Beitrag für Ihr Kind pro Monat"),
        )?;

        debug!(
            parent_monthly = %monthly.results()[2].amount,
            municipal_monthly = %monthly.results()[3].amount,
            "calculation complete"
        );

        Ok(Calculation {
            base,
            gross,
            net,
            actual,
            monthly,
        })
    }
}
