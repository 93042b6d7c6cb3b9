//! Entity declaration rewrite
//!
//! Renames the generics and ports declared in entity headers:
//!
//! ```text
//! entity Foo is                          entity Foo is
//!   port (                                 port (
//!     MyOldPort   : in std_logic;   ->       my_new_port   : in std_logic;
//! ```
//!
//! Only lines that start with the declared name and have the colon on the
//! same line are touched. `port (aa : ...` with the first declaration on the
//! clause line stays as it is.

use super::LineRewriter;
use crate::markers::{MarkerAction, MarkerTable, ScopeCursor};
use hdlrefactor_core::error::Result;
use hdlrefactor_core::{LookupOptions, RenameDatabase};
use regex::Regex;
use std::borrow::Cow;

pub(crate) const ENTITY_START: &str = r"(?i)^\s*entity\s+(\w+)\s+is";
pub(crate) const ENTITY_END: &str = r"(?i)^\s*end\s+entity";

#[derive(Debug)]
pub struct DeclarationRewriter {
    markers: MarkerTable,
    declaration: Regex,
}

impl DeclarationRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markers: MarkerTable::new()
                .with(ENTITY_START, MarkerAction::EnterAndOpen(1))?
                .with(ENTITY_END, MarkerAction::Close)?,
            declaration: Regex::new(r"(?s)^(\s*)(\w+)(\s*:.*)")?,
        })
    }
}

impl LineRewriter for DeclarationRewriter {
    fn name(&self) -> &'static str {
        "declarations"
    }

    fn rewrite_code<'a>(
        &self,
        code: &'a str,
        cursor: &mut ScopeCursor,
        db: &RenameDatabase,
    ) -> Cow<'a, str> {
        self.markers.apply(code, cursor);
        if !cursor.inside {
            return Cow::Borrowed(code);
        }

        let Some(captures) = self.declaration.captures(code) else {
            return Cow::Borrowed(code);
        };
        let (indent, symbol, rest) = (&captures[1], &captures[2], &captures[3]);
        let renamed = db.lookup(&cursor.component, symbol, LookupOptions::EXACT);
        if renamed == symbol {
            return Cow::Borrowed(code);
        }
        Cow::Owned(format!("{indent}{renamed}{rest}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlrefactor_core::database::tables_from_json_str;
    use pretty_assertions::assert_eq;

    fn database() -> RenameDatabase {
        RenameDatabase::from_tables(
            tables_from_json_str(
                r#"{"Foo": {"MyOldPort": "my_new_port", "Width_g": "width_g"},
                    "Bar": {"MyOldPort": "bar_port"}}"#,
            )
            .unwrap(),
        )
    }

    fn rewrite(text: &str) -> String {
        DeclarationRewriter::new()
            .unwrap()
            .rewrite_text(text, &database())
            .unwrap()
    }

    #[test]
    fn test_port_declaration() {
        let text = "entity Foo is\n  port (\n  MyOldPort   : in std_logic;\n  );\nend entity;\n";
        assert_eq!(
            rewrite(text),
            "entity Foo is\n  port (\n  my_new_port   : in std_logic;\n  );\nend entity;\n"
        );
    }

    #[test]
    fn test_single_line_with_cursor() {
        let rewriter = DeclarationRewriter::new().unwrap();
        let mut cursor = ScopeCursor::new("Foo", true);

        let result = rewriter.rewrite_code("  MyOldPort   : in std_logic;", &mut cursor, &database());
        assert_eq!(result, "  my_new_port   : in std_logic;");
    }

    #[test]
    fn test_comment_is_not_renamed() {
        let text = "entity Foo is\n  Width_g : natural := 8; -- Width_g MyOldPort\nend entity;\n";
        assert_eq!(
            rewrite(text),
            "entity Foo is\n  width_g : natural := 8; -- Width_g MyOldPort\nend entity;\n"
        );
    }

    #[test]
    fn test_scope_follows_entity() {
        let text = "entity Foo is\n  MyOldPort : in bit;\nend entity;\n\
                    entity Bar is\n  MyOldPort : in bit;\nend entity;\n";
        assert_eq!(
            rewrite(text),
            "entity Foo is\n  my_new_port : in bit;\nend entity;\n\
             entity Bar is\n  bar_port : in bit;\nend entity;\n"
        );
    }

    #[test]
    fn test_outside_entity_unchanged() {
        let text = "architecture rtl of Foo is\n  signal MyOldPort : std_logic;\nbegin\nend architecture;\n";
        assert_eq!(rewrite(text), text);

        let after_end = "entity Foo is\nend entity;\n  MyOldPort : in bit;\n";
        assert_eq!(rewrite(after_end), after_end);
    }

    #[test]
    fn test_declaration_on_clause_line_unchanged() {
        let text = "entity Foo is\n  port(MyOldPort : in bit);\nend entity;\n";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_crlf_preserved() {
        let text = "entity Foo is\r\n  MyOldPort : in bit; -- c\r\nend entity;\r\n";
        assert_eq!(
            rewrite(text),
            "entity Foo is\r\n  my_new_port : in bit; -- c\r\nend entity;\r\n"
        );
    }
}
