use serde::{Deserialize, Serialize};

use crate::round2;

pub const BONUS_ELIGIBILITY_LIMIT: f64 = 21000.0;
pub const BONUS_CALC_CEILING: f64 = 7000.0;
pub const MIN_RATE: f64 = 0.0833;
pub const MAX_RATE: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntitlement {
    pub eligible: bool,
    pub calculation_base: f64,
    pub minimum_bonus: f64,
    pub maximum_bonus: f64,
    pub reason: Option<String>,
}

/// Statutory bonus range on monthly gross. Amounts are zero when not eligible.
pub fn calculate_bonus(gross: f64) -> BonusEntitlement {
    if gross > BONUS_ELIGIBILITY_LIMIT {
        return BonusEntitlement {
            eligible: false,
            calculation_base: 0.0,
            minimum_bonus: 0.0,
            maximum_bonus: 0.0,
            reason: Some("Salary exceeds eligibility limit".to_string()),
        };
    }
    let calculation_base = gross.min(BONUS_CALC_CEILING);
    BonusEntitlement {
        eligible: true,
        calculation_base,
        minimum_bonus: round2(calculation_base * MIN_RATE),
        maximum_bonus: round2(calculation_base * MAX_RATE),
        reason: None,
    }
}
