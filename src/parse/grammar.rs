//! Statement grammar over lexed tokens. One statement per line: a priority
//! declaration, the fallback-policy statement, or a rule statement (criteria
//! plus optional policy assignments).

use crate::types::{Category, Criterion, MatchMode, PolicyType};

use super::error::ParseError;
use super::lexer::{Token, TokenKind};
use super::parser::{
    PolicyAssignment, PriorityDeclaration, RawStage, SpannedLetter, SpannedStage, StatementKind,
};

pub(crate) fn statement(
    line: usize,
    tokens: &[Token],
    end_column: usize,
) -> Result<StatementKind, ParseError> {
    let mut cursor = Cursor {
        tokens,
        pos: 0,
        line,
        end_column,
    };
    if let Some(word) = cursor.leading_keyword() {
        match word {
            "priority" => {
                let column = cursor.consume_keyword();
                return priority_declaration(&mut cursor, column);
            }
            "fallback-policy" => {
                cursor.consume_keyword();
                let assignments = policy_assignments(&mut cursor)?;
                finish(&cursor)?;
                return Ok(StatementKind::Fallback(assignments));
            }
            _ => {}
        }
    }
    rule_statement(&mut cursor)
}

struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    line: usize,
    end_column: usize,
}

impl<'t> Cursor<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Column of the current token, or one past the line's last character.
    fn column(&self) -> usize {
        self.peek().map_or(self.end_column, |t| t.column)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.line, self.column())
    }

    /// A keyword statement is an identifier immediately followed by `:`.
    fn leading_keyword(&self) -> Option<&'t str> {
        match (&self.tokens.first()?.kind, &self.tokens.get(1)?.kind) {
            (TokenKind::Ident(word), TokenKind::Colon) => Some(word.as_str()),
            _ => None,
        }
    }

    /// Consume the keyword and its colon, returning the keyword's column.
    fn consume_keyword(&mut self) -> usize {
        let column = self.column();
        self.pos += 2;
        column
    }
}

// -- Rule statements --------------------------------------------------------

fn rule_statement(cursor: &mut Cursor<'_>) -> Result<StatementKind, ParseError> {
    let mut criteria = Vec::new();
    while let Some(category) = peek_category_letter(cursor) {
        criteria.push(criterium(cursor, category)?);
    }
    if criteria.is_empty() {
        return Err(cursor.error("expected a criterium letter (one of t, a, b, c, s, m, g)"));
    }
    // Optional separator between the criteria and the policies clause.
    if matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Colon)) {
        cursor.bump();
    }
    let policies = policy_assignments(cursor)?;
    finish(cursor)?;
    Ok(StatementKind::Rule { criteria, policies })
}

fn peek_category_letter(cursor: &Cursor<'_>) -> Option<Category> {
    match &cursor.peek()?.kind {
        TokenKind::Ident(word) => single_char(word).and_then(Category::from_letter),
        _ => None,
    }
}

fn criterium(cursor: &mut Cursor<'_>, category: Category) -> Result<Criterion, ParseError> {
    cursor.bump();
    if matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Star)) {
        cursor.bump();
        return Ok(Criterion {
            category,
            mode: MatchMode::All,
        });
    }
    let negated = if matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Bang)) {
        cursor.bump();
        true
    } else {
        false
    };
    let mut names = Vec::new();
    while let Some(name) = peek_name(cursor) {
        cursor.bump();
        names.push(name);
    }
    let mode = match names.len() {
        0 => {
            return Err(cursor.error(format!(
                "expected a name, a quoted name, or * after criterium letter '{}'",
                category.letter()
            )))
        }
        1 => MatchMode::One {
            name: names.swap_remove(0),
            negated,
        },
        _ => MatchMode::Set { names, negated },
    };
    Ok(Criterion { category, mode })
}

/// A name is a quoted string or a bare identifier of at least two characters.
/// Single-character bare words are always category or policy letters.
fn peek_name(cursor: &Cursor<'_>) -> Option<String> {
    match &cursor.peek()?.kind {
        TokenKind::Quoted(name) => Some(name.clone()),
        TokenKind::Ident(word) if single_char(word).is_none() => Some(word.clone()),
        _ => None,
    }
}

fn single_char(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// -- Policy assignments -----------------------------------------------------

fn policy_assignments(cursor: &mut Cursor<'_>) -> Result<Vec<PolicyAssignment>, ParseError> {
    let mut assignments = Vec::new();
    while let Some((policy_type, column)) = peek_policy_letter(cursor) {
        cursor.bump();
        if !matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Colon)) {
            return Err(cursor.error(format!(
                "expected ':' after policy letter '{}'",
                policy_type.letter()
            )));
        }
        cursor.bump();
        let policy_id = match cursor.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => name.clone(),
            Some(TokenKind::Quoted(name)) => name.clone(),
            _ => return Err(cursor.error("expected a policy name")),
        };
        cursor.bump();
        assignments.push(PolicyAssignment {
            policy_type,
            policy_id,
            line: cursor.line,
            column,
        });
    }
    Ok(assignments)
}

fn peek_policy_letter(cursor: &Cursor<'_>) -> Option<(PolicyType, usize)> {
    let token = cursor.peek()?;
    match &token.kind {
        TokenKind::Ident(word) => single_char(word)
            .and_then(PolicyType::from_letter)
            .map(|policy_type| (policy_type, token.column)),
        _ => None,
    }
}

/// Error out when unparsed tokens remain on the line.
fn finish(cursor: &Cursor<'_>) -> Result<(), ParseError> {
    let Some(token) = cursor.peek() else {
        return Ok(());
    };
    let message = match &token.kind {
        TokenKind::Ident(word) => match single_char(word) {
            Some(c) if Category::from_letter(c).is_some() => {
                "criteria must precede policy assignments".to_owned()
            }
            Some(c) => {
                format!("unknown criterium or policy letter '{c}' (single-character names must be quoted)")
            }
            None => format!("unexpected name '{word}'"),
        },
        _ => "unexpected token".to_owned(),
    };
    Err(cursor.error(message))
}

// -- Priority declarations --------------------------------------------------

fn priority_declaration(
    cursor: &mut Cursor<'_>,
    column: usize,
) -> Result<StatementKind, ParseError> {
    let mut stages = vec![priority_stage(cursor)?];
    while matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
        cursor.bump();
        stages.push(priority_stage(cursor)?);
    }
    if cursor.peek().is_some() {
        return Err(cursor.error("expected ',' or end of line after priority stage"));
    }
    Ok(StatementKind::Priority(PriorityDeclaration {
        line: cursor.line,
        column,
        stages,
    }))
}

fn priority_stage(cursor: &mut Cursor<'_>) -> Result<SpannedStage, ParseError> {
    let column = cursor.column();
    let stage = match cursor.peek().map(|t| &t.kind) {
        Some(TokenKind::Ident(word)) => match word.as_str() {
            "criterium" => {
                cursor.bump();
                RawStage::CriteriumOrder(criterium_letters(cursor)?)
            }
            "number-of-criteria" => {
                cursor.bump();
                RawStage::NumberOfCriteria
            }
            "first-line" => {
                cursor.bump();
                RawStage::FirstLine
            }
            "last-line" => {
                cursor.bump();
                RawStage::LastLine
            }
            _ => {
                return Err(cursor.error(
                    "expected a priority stage: criterium(...), number-of-criteria, first-line, or last-line",
                ))
            }
        },
        _ => {
            return Err(cursor.error(
                "expected a priority stage: criterium(...), number-of-criteria, first-line, or last-line",
            ))
        }
    };
    Ok(SpannedStage { stage, column })
}

fn criterium_letters(cursor: &mut Cursor<'_>) -> Result<Vec<SpannedLetter>, ParseError> {
    if !matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
        return Err(cursor.error("expected '(' after criterium"));
    }
    cursor.bump();
    let mut letters = vec![criterium_letter(cursor)?];
    while matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
        cursor.bump();
        letters.push(criterium_letter(cursor)?);
    }
    if !matches!(cursor.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
        return Err(cursor.error("expected ',' or ')' in criterium ordering"));
    }
    cursor.bump();
    Ok(letters)
}

fn criterium_letter(cursor: &mut Cursor<'_>) -> Result<SpannedLetter, ParseError> {
    let column = cursor.column();
    let category = match cursor.peek().map(|t| &t.kind) {
        Some(TokenKind::Ident(word)) => single_char(word).and_then(Category::from_letter),
        _ => None,
    };
    let Some(category) = category else {
        return Err(cursor.error("expected a criterium letter (one of t, a, b, c, s, m, g)"));
    };
    cursor.bump();
    Ok(SpannedLetter { category, column })
}
