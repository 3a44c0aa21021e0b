use serde::{Deserialize, Serialize};

pub const NOT_IMPLEMENTED_NOTE: &str = "PT slab not implemented for this state";

/// Monthly professional tax. `pt_amount` is `None` for states without slabs,
/// with `note` explaining why; it is never silently zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalTax {
    pub state: String,
    pub pt_amount: Option<u32>,
    pub note: Option<String>,
}

impl ProfessionalTax {
    pub fn is_implemented(&self) -> bool { self.pt_amount.is_some() }
}

pub fn calculate_pt(state: &str, gross: f64) -> ProfessionalTax {
    let state = state.trim().to_uppercase();
    let pt_amount = match state.as_str() {
        "KA" => Some(karnataka(gross)),
        "MH" => Some(maharashtra(gross)),
        _ => None,
    };
    let note = pt_amount.is_none().then(|| NOT_IMPLEMENTED_NOTE.to_string());
    ProfessionalTax { state, pt_amount, note }
}

fn karnataka(gross: f64) -> u32 {
    if gross <= 15000.0 {
        0
    } else if gross <= 20000.0 {
        150
    } else {
        200
    }
}

fn maharashtra(gross: f64) -> u32 {
    if gross <= 7500.0 {
        0
    } else if gross <= 10000.0 {
        175
    } else {
        200
    }
}
