use compliance_core::types::Scheme;

fn tokens(lowered: &str) -> Vec<&str> {
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '.'))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Which statutory scheme a question is about, if any.
///
/// Checked in fixed order, first hit wins: PF, ESI, Bonus, Gratuity, PT.
/// Short abbreviations only count as whole words.
pub fn classify(question: &str) -> Option<Scheme> {
    let q = question.to_lowercase();
    let toks = tokens(&q);
    let has = |words: &[&str]| toks.iter().any(|t| words.contains(t));

    if has(&["pf", "epf", "eps"]) || q.contains("provident") {
        return Some(Scheme::ProvidentFund);
    }
    if has(&["esi", "esic"]) || q.contains("state insurance") {
        return Some(Scheme::Esi);
    }
    if q.contains("bonus") {
        return Some(Scheme::Bonus);
    }
    if q.contains("gratuity") {
        return Some(Scheme::Gratuity);
    }
    if q.contains("professional tax") || has(&["pt", "p.t"]) {
        return Some(Scheme::ProfessionalTax);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_each_scheme() {
        assert_eq!(classify("Is PF applicable?"), Some(Scheme::ProvidentFund));
        assert_eq!(classify("What is the EPF rate"), Some(Scheme::ProvidentFund));
        assert_eq!(classify("employees provident fund limit"), Some(Scheme::ProvidentFund));
        assert_eq!(classify("Is ESIC mandatory?"), Some(Scheme::Esi));
        assert_eq!(classify("employees' state insurance coverage"), Some(Scheme::Esi));
        assert_eq!(classify("How much bonus is due"), Some(Scheme::Bonus));
        assert_eq!(classify("Gratuity eligibility"), Some(Scheme::Gratuity));
        assert_eq!(classify("What is professional tax in Karnataka"), Some(Scheme::ProfessionalTax));
        assert_eq!(classify("PT deduction for 18000"), Some(Scheme::ProfessionalTax));
        assert_eq!(classify("is p.t. payable"), Some(Scheme::ProfessionalTax));
    }

    #[test]
    fn abbreviations_need_whole_words() {
        assert_eq!(classify("notice period on resignation"), None);
        assert_eq!(classify("is overtime exempt"), None);
        assert_eq!(classify("attempt to compute leave"), None);
    }

    #[test]
    fn earlier_scheme_wins() {
        assert_eq!(classify("PF and bonus for a new joiner"), Some(Scheme::ProvidentFund));
        assert_eq!(classify("bonus or gratuity first?"), Some(Scheme::Bonus));
        assert_eq!(classify("ESI vs professional tax"), Some(Scheme::Esi));
    }

    #[test]
    fn unrelated_question_has_no_scheme() {
        assert_eq!(classify("What is the minimum wage?"), None);
        assert_eq!(classify(""), None);
    }
}
