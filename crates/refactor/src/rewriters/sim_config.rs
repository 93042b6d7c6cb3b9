//! Simulator configuration rewrite
//!
//! Renames generic overrides passed as `-g<name>=<value>` in the simulation
//! script. The component is taken from the preceding
//! `create_tb_run "<name>"` line.

use super::LineRewriter;
use crate::markers::{MarkerAction, MarkerTable, ScopeCursor};
use crate::text::SCRIPT_COMMENT;
use hdlrefactor_core::error::Result;
use hdlrefactor_core::{LookupOptions, RenameDatabase};
use regex::{Captures, Regex};
use std::borrow::Cow;

#[derive(Debug)]
pub struct ConfigRewriter {
    markers: MarkerTable,
    generic: Regex,
}

impl ConfigRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markers: MarkerTable::new()
                .with(r#"(?i)^\s*create_tb_run\s*"(\w+)""#, MarkerAction::Enter(1))?,
            generic: Regex::new(r"(?i)(-g)(\w+)")?,
        })
    }
}

impl LineRewriter for ConfigRewriter {
    fn name(&self) -> &'static str {
        "sim-config"
    }

    fn comment_marker(&self) -> &'static str {
        SCRIPT_COMMENT
    }

    fn rewrite_code<'a>(
        &self,
        code: &'a str,
        cursor: &mut ScopeCursor,
        db: &RenameDatabase,
    ) -> Cow<'a, str> {
        self.markers.apply(code, cursor);

        let component = cursor.component.as_str();
        self.generic.replace_all(code, |caps: &Captures<'_>| {
            let renamed = db.lookup(component, &caps[2], LookupOptions::FOLDED_WITH_FALLBACK);
            format!("{}{renamed}", &caps[1])
        })
    }
}
