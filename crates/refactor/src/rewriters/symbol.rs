//! Free symbol rewrite
//!
//! The last and coarsest pass: every identifier token of a line goes through
//! a case-folded lookup with `#ALL#` fallback. There is no syntactic
//! awareness, a keyword or literal listed in the database is renamed like
//! anything else, so the database must not contain reserved words.

use super::LineRewriter;
use crate::markers::{MarkerAction, MarkerTable, ScopeCursor};
use hdlrefactor_core::error::Result;
use hdlrefactor_core::{LookupOptions, RenameDatabase};
use regex::{Captures, Regex};
use std::borrow::Cow;

#[derive(Debug)]
pub struct SymbolRewriter {
    markers: MarkerTable,
    token: Regex,
}

impl SymbolRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markers: MarkerTable::new().with(
                r"(?i)^\s*(entity|package)\s+(\w+)\s+is",
                MarkerAction::Enter(2),
            )?,
            token: Regex::new(r"\w+")?,
        })
    }
}

impl LineRewriter for SymbolRewriter {
    fn name(&self) -> &'static str {
        "symbols"
    }

    fn rewrite_code<'a>(
        &self,
        code: &'a str,
        cursor: &mut ScopeCursor,
        db: &RenameDatabase,
    ) -> Cow<'a, str> {
        self.markers.apply(code, cursor);

        let component = cursor.component.as_str();
        self.token.replace_all(code, |caps: &Captures<'_>| {
            db.lookup(component, &caps[0], LookupOptions::FOLDED_WITH_FALLBACK)
                .to_string()
        })
    }
}
