//! Line-oriented rewriters
//!
//! Each rewriter walks a file once, line by line. The comment part of every
//! line is split off first and reattached untouched, only the code part is
//! matched. A [`ScopeCursor`] carries the current component from one line to
//! the next. Lines that match nothing come out exactly as they went in.

pub(crate) mod declaration;
mod instantiation;
mod sim_config;
mod symbol;

pub use declaration::DeclarationRewriter;
pub use instantiation::InstantiationRewriter;
pub use sim_config::ConfigRewriter;
pub use symbol::SymbolRewriter;

use crate::markers::ScopeCursor;
use crate::text::{lines, read_source, split_comment, write_source, HDL_COMMENT};
use hdlrefactor_core::config::RefactorConfig;
use hdlrefactor_core::error::{Error, Result};
use hdlrefactor_core::RenameDatabase;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single-pass, line-oriented rename
pub trait LineRewriter {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// End-of-line comment marker of the rewritten format
    fn comment_marker(&self) -> &'static str {
        HDL_COMMENT
    }

    /// Rewrite the code part of one line, updating the cursor
    fn rewrite_code<'a>(
        &self,
        code: &'a str,
        cursor: &mut ScopeCursor,
        db: &RenameDatabase,
    ) -> Cow<'a, str>;

    /// Rewrite a whole text
    fn rewrite_text(&self, text: &str, db: &RenameDatabase) -> Result<String> {
        db.ensure_initialized()?;

        let mut cursor = ScopeCursor::default();
        let mut output = String::with_capacity(text.len());
        for line in lines(text) {
            let (code, comment) = split_comment(line, self.comment_marker());
            output.push_str(&self.rewrite_code(code, &mut cursor, db));
            output.push_str(comment);
        }
        Ok(output)
    }

    /// Rewrite `input` into `output`, which may be the same path
    ///
    /// Returns whether the content changed.
    fn rewrite_file(&self, input: &Path, output: &Path, db: &RenameDatabase) -> Result<bool> {
        let original = read_source(input)?;
        let rewritten = self.rewrite_text(&original, db)?;
        write_source(output, &rewritten)?;
        Ok(rewritten != original)
    }
}

/// The rename passes the toolchain knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Generic and port names in entity declarations
    Declarations,
    /// Formal names in generic and port maps
    Instantiations,
    /// Every identifier, with `#ALL#` fallback
    Symbols,
    /// `-g<name>` flags in simulator scripts
    SimConfig,
}

impl Pass {
    /// Passes applied to every HDL source, in order
    pub const SOURCE_PASSES: [Pass; 3] = [Pass::Declarations, Pass::Instantiations, Pass::Symbols];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::Declarations => "declarations",
            Pass::Instantiations => "instantiations",
            Pass::Symbols => "symbols",
            Pass::SimConfig => "sim-config",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "declarations" => Ok(Pass::Declarations),
            "instantiations" => Ok(Pass::Instantiations),
            "symbols" => Ok(Pass::Symbols),
            "sim-config" => Ok(Pass::SimConfig),
            other => Err(Error::invalid_input(format!("Unknown pass '{other}'"))),
        }
    }
}

/// All rewriters, compiled once
#[derive(Debug)]
pub struct Rewriters {
    declarations: DeclarationRewriter,
    instantiations: InstantiationRewriter,
    symbols: SymbolRewriter,
    sim_config: ConfigRewriter,
}

impl Rewriters {
    pub fn new(config: &RefactorConfig) -> Result<Self> {
        Ok(Self {
            declarations: DeclarationRewriter::new()?,
            instantiations: InstantiationRewriter::with_prefix(&config.component_prefix)?,
            symbols: SymbolRewriter::new()?,
            sim_config: ConfigRewriter::new()?,
        })
    }

    pub fn get(&self, pass: Pass) -> &dyn LineRewriter {
        match pass {
            Pass::Declarations => &self.declarations,
            Pass::Instantiations => &self.instantiations,
            Pass::Symbols => &self.symbols,
            Pass::SimConfig => &self.sim_config,
        }
    }

    /// Run several passes over a text, each pass seeing the previous output
    pub fn rewrite_text(&self, passes: &[Pass], text: &str, db: &RenameDatabase) -> Result<String> {
        let mut current = text.to_string();
        for pass in passes {
            current = self.get(*pass).rewrite_text(&current, db)?;
        }
        Ok(current)
    }
}
