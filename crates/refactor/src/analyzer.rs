//! Declaration analyzer
//!
//! Harvests the generic and port names every entity of a file declares. The
//! result maps each name to itself, in order of first appearance. The merge
//! workflow later pairs an old library's lists with a new library's lists to
//! produce the rename table, so the order is what matters here.
//!
//! Only one declaration per physical line is seen: the first `name :` on a
//! line inside the entity. Declarations spread over several lines, or several
//! names sharing one line (`a, b : in bit`), are not reassembled.

use crate::markers::{MarkerAction, MarkerTable, ScopeCursor};
use crate::rewriters::declaration::{ENTITY_END, ENTITY_START};
use crate::text::{lines, read_source, split_comment, HDL_COMMENT};
use hdlrefactor_core::error::Result;
use hdlrefactor_core::{RenameTable, ScopeTables};
use regex::Regex;
use std::path::Path;
use tracing::trace;

/// Component name -> declared names, each mapped to itself
pub type DeclarationSets = ScopeTables;

#[derive(Debug)]
pub struct DeclarationAnalyzer {
    markers: MarkerTable,
    declaration: Regex,
}

impl DeclarationAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markers: MarkerTable::new()
                .with(ENTITY_START, MarkerAction::EnterAndOpen(1))?
                .with(ENTITY_END, MarkerAction::Close)?,
            declaration: Regex::new(r"(\w+)\s*:")?,
        })
    }

    /// Collect the declarations of every entity in `text`
    ///
    /// An entity declared twice keeps the names of its last declaration.
    pub fn analyze_text(&self, text: &str) -> DeclarationSets {
        let mut sets = DeclarationSets::new();
        let mut cursor = ScopeCursor::default();

        for line in lines(text) {
            let (code, _comment) = split_comment(line, HDL_COMMENT);

            if let Some(MarkerAction::EnterAndOpen(_)) = self.markers.apply(code, &mut cursor) {
                sets.insert(cursor.component.clone(), RenameTable::new());
            }
            if !cursor.inside {
                continue;
            }

            if let Some(name) = self.declaration.captures(code).and_then(|c| c.get(1)) {
                let name = name.as_str();
                trace!("{}: declares {}", cursor.component, name);
                if let Some(set) = sets.get_mut(&cursor.component) {
                    set.entry(name.to_string())
                        .or_insert_with(|| name.to_string());
                }
            }
        }

        sets
    }

    /// Collect the declarations of every entity in a file
    pub fn analyze_file(&self, path: &Path) -> Result<DeclarationSets> {
        Ok(self.analyze_text(&read_source(path)?))
    }
}
