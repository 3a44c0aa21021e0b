use tracing::debug;

use compliance_core::config::DocumentCatalog;
use compliance_core::types::{DocFilter, Scheme};

/// Maps a classified question to the single statute PDF it should be
/// answered from.
#[derive(Debug, Clone, Default)]
pub struct QueryRouter {
    catalog: DocumentCatalog,
}

impl QueryRouter {
    pub fn new(catalog: DocumentCatalog) -> Self { Self { catalog: catalog.with_uppercase_states() } }

    /// Professional tax is state-specific; an unknown state yields no filter.
    pub fn route(&self, scheme: Option<Scheme>, state: &str) -> Option<DocFilter> {
        let doc = match scheme? {
            Scheme::ProvidentFund => Some(&self.catalog.provident_fund),
            Scheme::Esi => Some(&self.catalog.esi),
            Scheme::Bonus => Some(&self.catalog.bonus),
            Scheme::Gratuity => Some(&self.catalog.gratuity),
            Scheme::ProfessionalTax => self.catalog.professional_tax.get(&state.trim().to_uppercase()),
        };
        let filter = doc.filter(|d| !d.is_empty()).map(DocFilter::doc);
        debug!(?scheme, state, doc = ?filter.as_ref().map(|f| f.doc_name.as_str()), "routed question");
        filter
    }
}
