//! compliance-rag
//!
//! Question answering over the statute corpus. A question is classified to
//! a statutory scheme once; that scheme drives document routing, retrieval
//! query boosting and the deterministic calculation that is handed to the
//! chat model next to the retrieved context.

pub mod booster;
pub mod classify;
pub mod copilot;
pub mod llm;
pub mod prompt;
pub mod router;

pub use classify::classify;
pub use copilot::{AskOutcome, Copilot, RetrievalDebug};
pub use llm::OpenAiChat;
pub use router::QueryRouter;
