//! Token substitution in both directions
//!
//! Both directions are a single left-to-right pass over identifier runs, so
//! an alias written into the output is never matched again and the longest
//! spelling always wins by construction.

use crate::lexer::replace_identifiers;
use crate::mapping::AliasMapping;

/// Replace every whole-token original spelling with its alias.
pub fn substitute(text: &str, mapping: &AliasMapping) -> String {
    replace_identifiers(text, |word| mapping.alias_for(word))
}

/// Replace every whole-token alias with its original spelling.
///
/// Nothing around the aliases is interpreted, so the text may have been
/// reformatted or extended after masking. Aliases inside literals and
/// comments are restored as well.
pub fn restore(text: &str, mapping: &AliasMapping) -> String {
    replace_identifiers(text, |word| mapping.original_for(word))
}
