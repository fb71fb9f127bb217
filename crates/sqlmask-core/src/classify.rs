//! Positional role classification
//!
//! Roles come from where a spelling shows up, not from a grammar:
//! - the word after `FROM <name>` / `JOIN <name>` is a table alias
//! - `A.B.C` is schema, table, column
//! - `A.B` is alias, column when `A` is a known alias, otherwise schema, table
//! - everything else falls through to column
//!
//! A spelling seen in several roles resolves as alias > schema > table > column.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::Extraction;
use crate::keywords::is_keyword;
use crate::lexer::is_word_char;

lazy_static! {
    static ref FROM_OR_JOIN: Regex = Regex::new(r"(?i)\b(?:FROM|JOIN)\b").unwrap();
    static ref ALIAS_AFTER_NAME: Regex =
        Regex::new(r"^\s+\S+\s+([A-Za-z][A-Za-z0-9_#$]*)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    TableAlias,
    Schema,
    Table,
    Column,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::TableAlias, Role::Schema, Role::Table, Role::Column];

    /// Alias prefix for this role.
    pub fn prefix(self) -> &'static str {
        match self {
            Role::TableAlias => "ALS",
            Role::Schema => "SCH",
            Role::Table => "TBL",
            Role::Column => "COL",
        }
    }

    /// Recover the role from an alias such as `TBL_004`.
    pub fn from_alias(alias: &str) -> Option<Role> {
        let (prefix, number) = alias.split_once('_')?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Role::ALL.into_iter().find(|role| role.prefix() == prefix)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::TableAlias => "table alias",
            Role::Schema => "schema",
            Role::Table => "table",
            Role::Column => "column",
        };
        f.write_str(name)
    }
}

/// Every role a spelling was seen in.
#[derive(Debug, Clone, Default)]
pub struct RoleSets {
    pub table_aliases: HashSet<String>,
    pub schemas: HashSet<String>,
    pub tables: HashSet<String>,
    pub columns: HashSet<String>,
}

impl RoleSets {
    /// Final role under alias > schema > table > column.
    pub fn resolve(&self, spelling: &str) -> Role {
        if self.table_aliases.contains(spelling) {
            Role::TableAlias
        } else if self.schemas.contains(spelling) {
            Role::Schema
        } else if self.tables.contains(spelling) {
            Role::Table
        } else {
            Role::Column
        }
    }

    fn insert(&mut self, role: Role, spelling: &str) {
        if is_keyword(spelling) {
            return;
        }
        let set = match role {
            Role::TableAlias => &mut self.table_aliases,
            Role::Schema => &mut self.schemas,
            Role::Table => &mut self.tables,
            Role::Column => &mut self.columns,
        };
        set.insert(spelling.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub roles: RoleSets,
    /// Distinct spellings to alias, longest first, ties in discovery order.
    pub spellings: Vec<String>,
}

impl Classification {
    pub fn role_of(&self, spelling: &str) -> Role {
        self.roles.resolve(spelling)
    }
}

/// Classify every extracted spelling of the protected `text`.
pub fn classify(text: &str, extraction: &Extraction) -> Classification {
    let mut roles = RoleSets {
        table_aliases: detect_table_aliases(text),
        ..RoleSets::default()
    };

    for chain in &extraction.chains {
        match chain.segments.as_slice() {
            [schema, table, column] => {
                roles.insert(Role::Schema, schema);
                roles.insert(Role::Table, table);
                roles.insert(Role::Column, column);
            }
            [left, right] if roles.table_aliases.contains(left) => {
                roles.insert(Role::Column, right);
            }
            [left, right] => {
                roles.insert(Role::Schema, left);
                roles.insert(Role::Table, right);
            }
            _ => {}
        }
    }

    for word in &extraction.words {
        if roles.resolve(word) == Role::Column {
            roles.insert(Role::Column, word);
        }
    }

    let mut spellings = extraction.words.clone();
    spellings.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));

    Classification { roles, spellings }
}

/// Identifiers following `FROM <name>` or `JOIN <name>`.
///
/// Every `FROM`/`JOIN` starts its own probe, so consecutive joins are all
/// seen even when one probe would swallow the next keyword.
fn detect_table_aliases(text: &str) -> HashSet<String> {
    let mut aliases = HashSet::new();

    for keyword in FROM_OR_JOIN.find_iter(text) {
        let rest = &text[keyword.end()..];
        let Some(caps) = ALIAS_AFTER_NAME.captures(rest) else {
            continue;
        };
        let Some(candidate) = caps.get(1) else {
            continue;
        };
        let whole_run = !rest[candidate.end()..]
            .chars()
            .next()
            .is_some_and(is_word_char);
        if whole_run && !is_keyword(candidate.as_str()) {
            aliases.insert(candidate.as_str().to_string());
        }
    }

    aliases
}
