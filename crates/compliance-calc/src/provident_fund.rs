use serde::{Deserialize, Serialize};

use crate::round2;

pub const WAGE_CEILING: f64 = 15000.0;
pub const EMPLOYEE_RATE: f64 = 0.12;
pub const EMPLOYER_RATE: f64 = 0.12;
pub const EPS_RATE: f64 = 0.0833;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfContribution {
    pub contribution_base: f64,
    pub employee_pf: f64,
    pub employer_pf_total: f64,
    /// Employees' Pension Scheme share of the employer contribution.
    pub eps_contribution: f64,
    /// Employer contribution left in EPF after the EPS carve-out.
    pub epf_from_employer: f64,
}

/// PF contributions on monthly basic wages, capped at the wage ceiling.
pub fn calculate_pf(basic: f64) -> PfContribution {
    let contribution_base = basic.min(WAGE_CEILING);
    let employer_pf_total = round2(contribution_base * EMPLOYER_RATE);
    let eps_contribution = round2(contribution_base * EPS_RATE);
    PfContribution {
        contribution_base,
        employee_pf: round2(contribution_base * EMPLOYEE_RATE),
        employer_pf_total,
        eps_contribution,
        epf_from_employer: round2(employer_pf_total - eps_contribution),
    }
}
