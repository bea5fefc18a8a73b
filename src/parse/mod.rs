mod error;
mod grammar;
mod lexer;
mod parser;

pub use error::ParseError;
pub(crate) use parser::{
    ParsedRules, PolicyAssignment, PriorityDeclaration, RawStage, SpannedLetter, SpannedStage,
    Statement, StatementKind,
};

/// Parse a rules document into a flat statement list with exact indentation
/// levels.
///
/// # Errors
///
/// Returns [`ParseError`] with the offending token's 1-based line and column
/// when the input is not valid rules syntax.
pub(crate) fn parse(input: &str) -> Result<ParsedRules, ParseError> {
    let mut statements = Vec::new();
    let mut seen_rule = false;
    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let indent = indentation(line, raw)?;
        let tokens = lexer::lex_line(line, raw)?;
        let Some(first) = tokens.first() else {
            continue;
        };
        let column = first.column;
        let kind = grammar::statement(line, &tokens, raw.chars().count() + 1)?;
        match &kind {
            StatementKind::Rule { .. } => seen_rule = true,
            StatementKind::Priority(_) if seen_rule => {
                return Err(ParseError::new(
                    "priority declarations must precede rules",
                    line,
                    column,
                ));
            }
            _ => {}
        }
        statements.push(Statement {
            line,
            column,
            indent,
            kind,
        });
    }
    Ok(ParsedRules { statements })
}

/// Count leading spaces. Tabs in indentation are rejected: nesting depends on
/// exact numeric levels and tab width is ambiguous.
fn indentation(line: usize, raw: &str) -> Result<usize, ParseError> {
    let mut indent = 0;
    for c in raw.chars() {
        match c {
            ' ' => indent += 1,
            '\t' => {
                return Err(ParseError::new(
                    "tab in indentation; use spaces",
                    line,
                    indent + 1,
                ))
            }
            _ => break,
        }
    }
    Ok(indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_records_indentation() {
        let parsed = parse("m book\n    g staff: l: x r: x n: x o: x i: x\n").unwrap();
        assert_eq!(parsed.statements.len(), 2);
        assert_eq!(parsed.statements[0].indent, 0);
        assert_eq!(parsed.statements[1].indent, 4);
        assert_eq!(parsed.statements[1].line, 2);
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        let parsed = parse("# header\n\nm book: l: x\n   # indented comment\n").unwrap();
        assert_eq!(parsed.statements.len(), 1);
        assert_eq!(parsed.statements[0].line, 3);
    }

    #[test]
    fn tab_indentation_rejected() {
        let err = parse("m book: l: x\n\tg staff: l: x\n").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 1);
        assert!(err.message().contains("tab in indentation"));
    }

    #[test]
    fn priority_must_precede_rules() {
        let err = parse("m book: l: x\npriority: number-of-criteria, last-line\n").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(err.message().contains("must precede rules"));
    }

    #[test]
    fn priority_before_rules_accepted() {
        let parsed = parse(
            "priority: number-of-criteria, last-line\nfallback-policy: l: a r: b n: c o: d i: e\nm book: l: x\n",
        )
        .unwrap();
        assert_eq!(parsed.statements.len(), 3);
    }

    #[test]
    fn syntax_error_carries_position() {
        let err = parse("m book: l: x\nm ?\n").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 3);
    }
}
