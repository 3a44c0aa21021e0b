use serde::{Deserialize, Serialize};

use crate::round2;

pub const MIN_YEARS_OF_SERVICE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratuityEntitlement {
    pub eligible: bool,
    pub gratuity_amount: f64,
    pub reason: Option<String>,
}

/// 15 days' wages per completed year, on a 26 working-day month.
pub fn calculate_gratuity(last_drawn_salary: f64, years_of_service: i64) -> GratuityEntitlement {
    if years_of_service < MIN_YEARS_OF_SERVICE {
        return GratuityEntitlement {
            eligible: false,
            gratuity_amount: 0.0,
            reason: Some("Less than 5 years of continuous service".to_string()),
        };
    }
    #[allow(clippy::cast_precision_loss)]
    let years = years_of_service as f64;
    GratuityEntitlement { eligible: true, gratuity_amount: round2(last_drawn_salary * 15.0 * years / 26.0), reason: None }
}
