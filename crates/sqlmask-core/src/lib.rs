//! SQL identifier masking and restoration
//!
//! This crate contains:
//! - The masking pipeline (protect, extract, classify, alias, substitute)
//! - Restoration from a previously produced alias mapping
//! - History domain models shared with storage and the server

pub mod classify;
pub mod error;
pub mod extract;
pub mod history;
pub mod keywords;
pub mod lexer;
pub mod mapping;
pub mod masker;
pub mod protect;
pub mod substitute;

pub use classify::{Classification, Role, RoleSets};
pub use error::{MaskError, Result};
pub use history::{HistoryRecord, HistorySummary};
pub use mapping::{AliasMapper, AliasMapping};
pub use masker::{MaskPolicy, MaskResult, QueryMasker, SpanPolicy, mask, unmask};
pub use protect::{ProtectedSpan, ProtectedText, SpanKind};
