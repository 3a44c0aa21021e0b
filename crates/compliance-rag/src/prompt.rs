use compliance_calc::CalculationResult;
use compliance_core::types::{Query, ScoredChunk};

pub const SYSTEM_PROMPT: &str = "You are an Indian Payroll Compliance Assistant.

Use ONLY the provided Context to answer.

Output format (always):
Answer: (Yes/No/Conditional + 1-2 lines)
Conditions: (bullet list if Conditional, else 'N/A')
Formula: (bullet list)
Calculation: (show calculation using given Basic/Gross when applicable, else 'N/A')
Reference: (quote 1-3 short snippets from Context with doc/page if available)

Rules:
- If Context contains thresholds/conditions but not explicit Yes/No, respond \"Conditional\" and list conditions.
- Only say \"Not found in provided documents.\" if Context is empty or clearly unrelated.
- Do NOT invent sections or clauses.
- When Computed Figures are given, use those numbers verbatim in Calculation; do not recompute them.";

/// Non-empty chunk texts, trimmed, separated by blank lines, in retrieval order.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.chunk.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn computed_figures(calculation: Option<&CalculationResult>) -> String {
    calculation
        .and_then(|c| serde_json::to_string_pretty(c).ok())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn compose(query: &Query, context: &str, calculation: Option<&CalculationResult>) -> String {
    format!(
        "{SYSTEM_PROMPT}

Context:
{context}

Computed Figures:
{figures}

User Inputs:
State: {state}
Employee Type: {emp_type}
Monthly Basic: {basic}
Monthly Gross: {gross}
Years of Service: {years}

Question:
{question}
",
        figures = computed_figures(calculation),
        state = query.state,
        emp_type = query.emp_type,
        basic = query.basic,
        gross = query.gross,
        years = query.years_of_service,
        question = query.question,
    )
}
