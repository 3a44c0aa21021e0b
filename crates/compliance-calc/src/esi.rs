use serde::{Deserialize, Serialize};

use crate::round2;

/// Monthly gross above this is outside ESI coverage.
pub const ESI_THRESHOLD: f64 = 21000.0;
pub const EMPLOYEE_RATE: f64 = 0.0075;
pub const EMPLOYER_RATE: f64 = 0.0325;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsiContribution {
    pub eligible: bool,
    pub employee_esi: f64,
    pub employer_esi: f64,
}

pub fn calculate_esi(gross: f64) -> EsiContribution {
    if gross > ESI_THRESHOLD {
        return EsiContribution { eligible: false, employee_esi: 0.0, employer_esi: 0.0 };
    }
    EsiContribution {
        eligible: true,
        employee_esi: round2(gross * EMPLOYEE_RATE),
        employer_esi: round2(gross * EMPLOYER_RATE),
    }
}
