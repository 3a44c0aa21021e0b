//! Retrieval query expansion.
//!
//! Short questions ("Is PF applicable?") embed poorly against statute text,
//! so the search text carries the salary context and the vocabulary the
//! relevant sections use.
use compliance_core::types::{Query, Scheme};

const GENERIC_HINT: &str = "Answer with eligibility/coverage conditions and thresholds.";

fn scheme_clause(scheme: Scheme, state: &str) -> String {
    match scheme {
        Scheme::ProvidentFund => {
            "Include: wage ceiling 15000, contribution rate 12%, EPS 8.33%, EPF, basic wages definition.".to_string()
        }
        Scheme::Esi => "Include: ESI wage ceiling 21000, employee contribution 0.75%, employer contribution 3.25%, ESIC coverage."
            .to_string(),
        Scheme::Bonus => "Include: Payment of Bonus Act eligibility 21000, calculation ceiling 7000, minimum bonus 8.33%, maximum bonus 20%."
            .to_string(),
        Scheme::Gratuity => {
            "Include: Payment of Gratuity Act, five years continuous service, 15 days wages, 26 working days.".to_string()
        }
        Scheme::ProfessionalTax => format!(
            "Include: professional tax slab, monthly gross salary, state {}, deduction amount.",
            state.trim().to_uppercase()
        ),
    }
}

/// Search text for `query`: the question verbatim, the user inputs and hint lines.
pub fn boost(query: &Query, scheme: Option<Scheme>) -> String {
    let mut out = format!(
        "{}\nState: {}\nEmployee type: {}\nBasic: {}\nGross: {}\n{}",
        query.question, query.state, query.emp_type, query.basic, query.gross, GENERIC_HINT
    );
    if let Some(s) = scheme {
        out.push('\n');
        out.push_str(&scheme_clause(s, &query.state));
    }
    out
}
