//! Identifier extraction from protected text

use std::collections::HashSet;

use crate::keywords::is_keyword;
use crate::lexer::{WordRun, word_runs};

/// Two or three identifiers joined by `.` with no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedChain {
    pub segments: Vec<String>,
}

impl DottedChain {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Distinct chains in discovery order.
    pub chains: Vec<DottedChain>,
    /// Distinct non-keyword identifiers in discovery order, chain segments
    /// included.
    pub words: Vec<String>,
}

/// Scan protected text for dotted chains and identifier words.
///
/// Runs of more than three dotted segments are cut greedily into chains of
/// three; a single trailing segment is not a chain.
pub fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen_words = HashSet::new();
    let mut seen_chains = HashSet::new();
    let mut group: Vec<WordRun<'_>> = Vec::new();

    for run in word_runs(text) {
        if !run.is_identifier() {
            flush_group(&mut group, &mut extraction.chains, &mut seen_chains);
            continue;
        }

        if !is_keyword(run.text) && seen_words.insert(run.text) {
            extraction.words.push(run.text.to_string());
        }

        let joined = group
            .last()
            .is_some_and(|prev| &text[prev.end..run.start] == ".");
        if !joined {
            flush_group(&mut group, &mut extraction.chains, &mut seen_chains);
        }
        group.push(run);
    }
    flush_group(&mut group, &mut extraction.chains, &mut seen_chains);

    extraction
}

fn flush_group(
    group: &mut Vec<WordRun<'_>>,
    chains: &mut Vec<DottedChain>,
    seen: &mut HashSet<DottedChain>,
) {
    for chunk in group.chunks(3).filter(|chunk| chunk.len() >= 2) {
        let chain = DottedChain {
            segments: chunk.iter().map(|run| run.text.to_string()).collect(),
        };
        if seen.insert(chain.clone()) {
            chains.push(chain);
        }
    }
    group.clear();
}
