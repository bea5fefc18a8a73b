//! Line lexer: winnow token parsers over a locating slice, so every token
//! carries the byte span its 1-based column is derived from.

use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, rest, take_while};

use super::error::ParseError;

type Input<'i> = LocatingSlice<&'i str>;

/// One lexed token with its 1-based column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Bare word: a keyword, a category/policy letter, or a name.
    Ident(String),
    /// Quoted name with escapes resolved.
    Quoted(String),
    Colon,
    Comma,
    Bang,
    Star,
    LParen,
    RParen,
}

fn space0(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

fn ident<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
    })
    .parse_next(input)
}

fn string_literal(input: &mut Input<'_>) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any).parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = cut_err(any).parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        ':'.value(TokenKind::Colon),
        ','.value(TokenKind::Comma),
        '!'.value(TokenKind::Bang),
        '*'.value(TokenKind::Star),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
        string_literal.map(TokenKind::Quoted),
        ident.map(|s: &str| TokenKind::Ident(s.to_owned())),
    ))
    .parse_next(input)
}

fn line_tokens(input: &mut Input<'_>) -> ModalResult<Vec<(TokenKind, usize)>> {
    let tokens: Vec<(TokenKind, std::ops::Range<usize>)> =
        repeat(0.., preceded(space0, token.with_span())).parse_next(input)?;
    space0.parse_next(input)?;
    let _ = opt(('#', rest)).parse_next(input)?;
    Ok(tokens
        .into_iter()
        .map(|(kind, span)| (kind, span.start))
        .collect())
}

/// Lex one raw source line into tokens with 1-based columns. Blank and
/// comment-only lines yield an empty list.
pub(crate) fn lex_line(line: usize, text: &str) -> Result<Vec<Token>, ParseError> {
    match line_tokens.parse(LocatingSlice::new(text)) {
        Ok(tokens) => Ok(tokens
            .into_iter()
            .map(|(kind, offset)| Token {
                kind,
                column: column_at(text, offset),
            })
            .collect()),
        Err(err) => {
            let offset = err.offset();
            Err(ParseError::new(
                unrecognized_message(text, offset),
                line,
                column_at(text, offset),
            ))
        }
    }
}

/// Convert a byte offset into a 1-based character column.
fn column_at(text: &str, offset: usize) -> usize {
    text.get(..offset).map_or(offset, |s| s.chars().count()) + 1
}

fn unrecognized_message(text: &str, offset: usize) -> String {
    match text.get(offset..).and_then(|s| s.chars().next()) {
        Some(c) => format!("unrecognized token starting with '{c}'"),
        None => "unexpected end of line".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex_line(1, text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_rule_line() {
        assert_eq!(
            kinds("m book cd: x"),
            vec![
                TokenKind::Ident("m".into()),
                TokenKind::Ident("book".into()),
                TokenKind::Ident("cd".into()),
                TokenKind::Colon,
                TokenKind::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn lex_uuid_names() {
        assert_eq!(
            kinds("m 2b94c631-fca9-4892-a730-03ee529ffe27"),
            vec![
                TokenKind::Ident("m".into()),
                TokenKind::Ident("2b94c631-fca9-4892-a730-03ee529ffe27".into()),
            ]
        );
    }

    #[test]
    fn lex_punctuation() {
        assert_eq!(
            kinds("criterium(t, s) ! *"),
            vec![
                TokenKind::Ident("criterium".into()),
                TokenKind::LParen,
                TokenKind::Ident("t".into()),
                TokenKind::Comma,
                TokenKind::Ident("s".into()),
                TokenKind::RParen,
                TokenKind::Bang,
                TokenKind::Star,
            ]
        );
    }

    #[test]
    fn lex_quoted_with_escapes() {
        assert_eq!(
            kinds(r#"m "a\"b\\c""#),
            vec![
                TokenKind::Ident("m".into()),
                TokenKind::Quoted("a\"b\\c".into()),
            ]
        );
    }

    #[test]
    fn columns_are_one_based() {
        let tokens = lex_line(1, "  m book").unwrap();
        assert_eq!(tokens[0].column, 3);
        assert_eq!(tokens[1].column, 5);
    }

    #[test]
    fn comment_only_line_is_empty() {
        assert!(lex_line(1, "# a comment").unwrap().is_empty());
        assert!(lex_line(1, "   ").unwrap().is_empty());
        assert!(lex_line(1, "").unwrap().is_empty());
    }

    #[test]
    fn trailing_comment_ignored() {
        assert_eq!(kinds("m book # the usual"), kinds("m book"));
    }

    #[test]
    fn unrecognized_character_reports_column() {
        let err = lex_line(7, "m book %").unwrap_err();
        assert_eq!(err.line(), 7);
        assert_eq!(err.column(), 8);
        assert!(err.message().contains('%'));
    }

    #[test]
    fn unterminated_string_reports_end_of_line() {
        let err = lex_line(2, "m \"book").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.message(), "unexpected end of line");
    }
}
