//! Instantiation map rewrite
//!
//! Renames the formal side of associations in generic and port maps. The
//! component is taken from the last `label : entity lib.component` header
//! seen, so maps must come after their header. A malformed header leaves the
//! previous component in place.

use super::LineRewriter;
use crate::markers::{MarkerAction, MarkerTable, ScopeCursor};
use hdlrefactor_core::error::Result;
use hdlrefactor_core::{LookupOptions, RenameDatabase};
use regex::Regex;
use std::borrow::Cow;

#[derive(Debug)]
pub struct InstantiationRewriter {
    headers: MarkerTable,
    lists: MarkerTable,
    association: Regex,
}

impl InstantiationRewriter {
    /// Rewriter following every instantiated entity
    pub fn new() -> Result<Self> {
        Self::with_prefix("")
    }

    /// Rewriter following only entities whose name starts with `prefix`
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        let header = format!(
            r"(?i)^\s*\w+\s*:\s*entity\s*\w+\.({}\w+)",
            regex::escape(prefix)
        );
        Ok(Self {
            headers: MarkerTable::new().with(&header, MarkerAction::Enter(1))?,
            lists: MarkerTable::new()
                .with(r"(?i)^\s*(?:generic|port)\s+map", MarkerAction::Open)?
                .with(r"^\s*\)\s*;", MarkerAction::Close)?,
            association: Regex::new(
                r"(?is)^(\s*|\s*port\s+map\s*\(\s*|\s*generic\s+map\s*\(\s*)(\w+)(\s*\(.*\))?(\s*=>.*)",
            )?,
        })
    }
}

impl LineRewriter for InstantiationRewriter {
    fn name(&self) -> &'static str {
        "instantiations"
    }

    fn rewrite_code<'a>(
        &self,
        code: &'a str,
        cursor: &mut ScopeCursor,
        db: &RenameDatabase,
    ) -> Cow<'a, str> {
        self.headers.apply(code, cursor);
        self.lists.apply(code, cursor);
        if !cursor.inside {
            return Cow::Borrowed(code);
        }

        let Some(captures) = self.association.captures(code) else {
            return Cow::Borrowed(code);
        };
        let formal = &captures[2];
        let renamed = db.lookup(&cursor.component, formal, LookupOptions::EXACT);
        if renamed == formal {
            return Cow::Borrowed(code);
        }

        let lead = &captures[1];
        let index = captures.get(3).map_or("", |m| m.as_str());
        let actual = &captures[4];
        Cow::Owned(format!("{lead}{renamed}{index}{actual}"))
    }
}
