//! compliance-calc
//!
//! Closed-form statutory calculations for Indian payroll: Provident Fund,
//! ESI, Professional Tax, Bonus and Gratuity. Every function is pure and
//! total; inputs are not validated.

pub mod bonus;
pub mod esi;
pub mod gratuity;
pub mod professional_tax;
pub mod provident_fund;

use serde::{Deserialize, Serialize};

use compliance_core::types::{Query, Scheme};

pub use bonus::{calculate_bonus, BonusEntitlement};
pub use esi::{calculate_esi, EsiContribution};
pub use gratuity::{calculate_gratuity, GratuityEntitlement};
pub use professional_tax::{calculate_pt, ProfessionalTax};
pub use provident_fund::{calculate_pf, PfContribution};

/// Figures for one scheme, tagged with the scheme name when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum CalculationResult {
    ProvidentFund(PfContribution),
    Esi(EsiContribution),
    ProfessionalTax(ProfessionalTax),
    Bonus(BonusEntitlement),
    Gratuity(GratuityEntitlement),
}

/// Compute the figures for `scheme` from the salary fields of `query`.
/// Gratuity uses basic salary as the last drawn salary.
pub fn calculate_for(scheme: Scheme, query: &Query) -> CalculationResult {
    match scheme {
        Scheme::ProvidentFund => CalculationResult::ProvidentFund(calculate_pf(query.basic)),
        Scheme::Esi => CalculationResult::Esi(calculate_esi(query.gross)),
        Scheme::ProfessionalTax => CalculationResult::ProfessionalTax(calculate_pt(&query.state, query.gross)),
        Scheme::Bonus => CalculationResult::Bonus(calculate_bonus(query.gross)),
        Scheme::Gratuity => CalculationResult::Gratuity(calculate_gratuity(query.basic, query.years_of_service)),
    }
}

/// Round half away from zero to 2 decimals.
pub(crate) fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

#[cfg(test)]
mod tests {
    use super::*;

    fn query(question: &str) -> Query {
        Query {
            question: question.into(),
            state: "ka".into(),
            emp_type: "Permanent".into(),
            basic: 20000.0,
            gross: 18000.0,
            years_of_service: 6,
            debug: false,
        }
    }

    #[test]
    fn dispatch_picks_salary_field_per_scheme() {
        let q = query("any");
        match calculate_for(Scheme::ProvidentFund, &q) {
            CalculationResult::ProvidentFund(pf) => assert_eq!(pf.contribution_base, 15000.0),
            other => panic!("unexpected {other:?}"),
        }
        match calculate_for(Scheme::ProfessionalTax, &q) {
            CalculationResult::ProfessionalTax(pt) => {
                assert_eq!(pt.state, "KA");
                assert_eq!(pt.pt_amount, Some(150));
            }
            other => panic!("unexpected {other:?}"),
        }
        match calculate_for(Scheme::Gratuity, &q) {
            CalculationResult::Gratuity(g) => assert_eq!(g.gratuity_amount, 69230.77),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.345_000_1), -2.35);
        assert_eq!(round2(583.1), 583.1);
    }
}
