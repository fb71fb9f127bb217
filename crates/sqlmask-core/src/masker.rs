//! Masking pipeline
//!
//! protect → extract → classify → assign aliases → substitute → reinsert.
//! Every call is a pure function of its input; nothing is kept between calls.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::classify;
use crate::extract::extract;
use crate::lexer::replace_identifiers;
use crate::mapping::{AliasMapper, AliasMapping};
use crate::protect::protect;
use crate::substitute::{restore, substitute};

/// What happens to names that occur inside literals and comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanPolicy {
    /// Literals and comments come back byte-for-byte, names included.
    #[default]
    Preserve,
    /// Names already aliased in live code are also aliased inside literals
    /// and comments. Spans never introduce new aliases.
    MaskKnown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskPolicy {
    #[serde(default)]
    pub protected_spans: SpanPolicy,
}

/// Masked statement plus the mapping needed to undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskResult {
    pub masked: String,
    pub mapping: AliasMapping,
}

#[derive(Debug, Clone, Default)]
pub struct QueryMasker {
    policy: MaskPolicy,
}

impl QueryMasker {
    pub fn new(policy: MaskPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MaskPolicy {
        self.policy
    }

    /// Replace schema, table, column and table-alias names with aliases.
    ///
    /// Never fails: text the heuristics do not recognise is left as is.
    pub fn mask(&self, sql: &str) -> MaskResult {
        let protected = protect(sql);
        let extraction = extract(protected.text());
        let classification = classify(protected.text(), &extraction);
        let mapping = AliasMapper::new().assign(&classification);
        let substituted = substitute(protected.text(), &mapping);

        let masked = match self.policy.protected_spans {
            SpanPolicy::Preserve => protected.restore(&substituted),
            SpanPolicy::MaskKnown => protected.restore_with(&substituted, |span| {
                Cow::Owned(replace_identifiers(&span.text, |word| {
                    mapping.alias_for(word)
                }))
            }),
        };

        debug!(
            spans = protected.spans().len(),
            chains = extraction.chains.len(),
            aliases = mapping.len(),
            "masked statement"
        );

        MaskResult { masked, mapping }
    }

    /// Put original names back into `text` using a mapping from an earlier
    /// [`mask`](Self::mask) call.
    pub fn unmask(&self, text: &str, mapping: &AliasMapping) -> String {
        let restored = restore(text, mapping);
        debug!(aliases = mapping.len(), "restored statement");
        restored
    }
}

/// Mask with the default policy.
pub fn mask(sql: &str) -> MaskResult {
    QueryMasker::default().mask(sql)
}

/// Restore with a previously produced mapping.
pub fn unmask(text: &str, mapping: &AliasMapping) -> String {
    QueryMasker::default().unmask(text, mapping)
}
