//! Scope markers
//!
//! Every rewriter recognises a few line shapes that move its cursor: an
//! entity header, an `end entity`, a `port map`, a test-bench run. They are
//! kept as small ordered tables of `(pattern, action)` pairs where the first
//! matching pattern wins.

use hdlrefactor_core::error::Result;
use regex::{Captures, Regex};
use tracing::debug;

/// Cursor carried from one line to the next while a file is rewritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeCursor {
    /// Scope used for lookups, empty before the first marker
    pub component: String,
    /// Inside an entity body or an association list
    pub inside: bool,
}

impl ScopeCursor {
    pub fn new(component: impl Into<String>, inside: bool) -> Self {
        Self {
            component: component.into(),
            inside,
        }
    }
}

/// What a matching marker does to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAction {
    /// Switch the component to the given capture group
    Enter(usize),
    /// Switch the component to the given capture group and open its body
    EnterAndOpen(usize),
    /// Open a body or list without touching the component
    Open,
    /// Close the current body or list
    Close,
}

#[derive(Debug)]
struct Marker {
    pattern: Regex,
    action: MarkerAction,
}

/// Ordered marker table
#[derive(Debug, Default)]
pub struct MarkerTable {
    markers: Vec<Marker>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker; patterns are matched against the code part of a line
    pub fn with(mut self, pattern: &str, action: MarkerAction) -> Result<Self> {
        self.markers.push(Marker {
            pattern: Regex::new(pattern)?,
            action,
        });
        Ok(self)
    }

    /// Apply the first marker matching `code` and report which action ran
    pub fn apply(&self, code: &str, cursor: &mut ScopeCursor) -> Option<MarkerAction> {
        for marker in &self.markers {
            let Some(captures) = marker.pattern.captures(code) else {
                continue;
            };

            match marker.action {
                MarkerAction::Enter(group) => enter(&captures, group, cursor),
                MarkerAction::EnterAndOpen(group) => {
                    enter(&captures, group, cursor);
                    cursor.inside = true;
                }
                MarkerAction::Open => cursor.inside = true,
                MarkerAction::Close => cursor.inside = false,
            }
            return Some(marker.action);
        }
        None
    }
}

fn enter(captures: &Captures<'_>, group: usize, cursor: &mut ScopeCursor) {
    if let Some(name) = captures.get(group) {
        cursor.component = name.as_str().to_string();
        debug!("Entering scope '{}'", cursor.component);
    }
}
