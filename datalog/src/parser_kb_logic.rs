/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::KbError;
use crate::items::{Fact, Item, Rule};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult,
};
use shared::dictionary::Dictionary;
use shared::terms::{Statement, Term};

/// A term before its symbol is interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedTerm {
    Var(String),
    Symbol(String),
}

/// `(predicate term ...)` with the predicate as plain text.
pub type UnresolvedStatement = (String, Vec<UnresolvedTerm>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedItem {
    Fact(UnresolvedStatement),
    Rule(Vec<UnresolvedStatement>, UnresolvedStatement),
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '\'')
}

/// Parse a bare symbol such as `cube` or `ex:block`
pub fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(is_symbol_char)(input)
}

/// Parse something like "cube" or "?x"
pub fn parse_unresolved_term(input: &str) -> IResult<&str, UnresolvedTerm> {
    alt((
        map(preceded(char('?'), symbol), |var: &str| {
            UnresolvedTerm::Var(var.to_string())
        }),
        map(symbol, |s: &str| UnresolvedTerm::Symbol(s.to_string())),
    ))(input)
}

/// Parse "(isa ?x block)"
pub fn parse_unresolved_statement(input: &str) -> IResult<&str, UnresolvedStatement> {
    let (input, _) = pair(char('('), multispace0)(input)?;
    let (input, predicate) = symbol(input)?;
    let (input, terms) = many0(preceded(multispace1, parse_unresolved_term))(input)?;
    let (input, _) = pair(multispace0, char(')'))(input)?;
    Ok((input, (predicate.to_string(), terms)))
}

/// Parse "((isa ?x block) (size ?x small)) -> (isa ?x small_block)"
pub fn parse_unresolved_rule(
    input: &str,
) -> IResult<&str, (Vec<UnresolvedStatement>, UnresolvedStatement)> {
    separated_pair(
        delimited(
            char('('),
            many1(preceded(multispace0, parse_unresolved_statement)),
            preceded(multispace0, char(')')),
        ),
        delimited(multispace0, tag("->"), multispace0),
        parse_unresolved_statement,
    )(input)
}

/// Parse one non-empty line: "fact: ..." or "rule: ..."
pub fn parse_unresolved_item(input: &str) -> IResult<&str, UnresolvedItem> {
    alt((
        map(
            preceded(pair(tag("fact:"), multispace0), parse_unresolved_statement),
            UnresolvedItem::Fact,
        ),
        map(
            preceded(pair(tag("rule:"), multispace0), parse_unresolved_rule),
            |(lhs, rhs)| UnresolvedItem::Rule(lhs, rhs),
        ),
    ))(input)
}

/// Helper to convert UnresolvedTerm to Term
fn to_term(ut: UnresolvedTerm, dictionary: &mut Dictionary) -> Term {
    match ut {
        UnresolvedTerm::Var(v) => Term::Variable(v),
        UnresolvedTerm::Symbol(s) => Term::Constant(dictionary.encode(&s)),
    }
}

fn to_statement(us: UnresolvedStatement, dictionary: &mut Dictionary) -> Statement {
    let (predicate, terms) = us;
    let predicate = dictionary.encode(&predicate);
    let terms = terms.into_iter().map(|t| to_term(t, dictionary)).collect();
    Statement::new(predicate, terms)
}

fn to_item(ui: UnresolvedItem, dictionary: &mut Dictionary) -> Item {
    match ui {
        UnresolvedItem::Fact(statement) => Item::Fact(Fact::new(to_statement(statement, dictionary))),
        UnresolvedItem::Rule(lhs, rhs) => {
            let lhs = lhs.into_iter().map(|s| to_statement(s, dictionary)).collect();
            Item::Rule(Rule::new(lhs, to_statement(rhs, dictionary)))
        }
    }
}

fn parse_line(line: &str, number: usize, dictionary: &mut Dictionary) -> Result<Item, KbError> {
    match all_consuming(terminated(parse_unresolved_item, multispace0))(line) {
        Ok((_, item)) => Ok(to_item(item, dictionary)),
        Err(_) => Err(KbError::Parse {
            line: number,
            message: format!("expected `fact: (...)` or `rule: ((...) ...) -> (...)`, found `{}`", line),
        }),
    }
}

/// Parse a whole knowledge base file, one item per line.
///
/// Blank lines and lines starting with `#` are skipped. Symbols are interned
/// into `dictionary` as they are read.
pub fn parse_kb(source: &str, dictionary: &mut Dictionary) -> Result<Vec<Item>, KbError> {
    let mut items = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        items.push(parse_line(line, i + 1, dictionary)?);
    }
    Ok(items)
}

/// Parse a single query or retraction argument.
///
/// Accepts a bare statement `(isa ?x block)` as well as the `fact:`/`rule:`
/// line forms, so a rule can be handed to `ask` and be rejected there.
pub fn parse_query(text: &str, dictionary: &mut Dictionary) -> Result<Item, KbError> {
    let text = text.trim();
    let bare = all_consuming(terminated(parse_unresolved_statement, multispace0))(text);
    match bare {
        Ok((_, statement)) => Ok(Item::Fact(Fact::new(to_statement(statement, dictionary)))),
        Err(_) => parse_line(text, 1, dictionary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_parsing() {
        assert_eq!(
            parse_unresolved_term("?x)"),
            Ok((")", UnresolvedTerm::Var("x".to_string())))
        );
        assert_eq!(
            parse_unresolved_term("small_block"),
            Ok(("", UnresolvedTerm::Symbol("small_block".to_string())))
        );
        assert!(parse_unresolved_term("(").is_err());
    }

    #[test]
    fn test_statement_parsing() {
        let (rest, (predicate, terms)) = parse_unresolved_statement("( isa  ?x block ) tail").unwrap();
        assert_eq!(rest, " tail");
        assert_eq!(predicate, "isa");
        assert_eq!(terms.len(), 2);

        let (_, (predicate, terms)) = parse_unresolved_statement("(raining)").unwrap();
        assert_eq!(predicate, "raining");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_rule_parsing_without_separating_spaces() {
        let (rest, (lhs, rhs)) =
            parse_unresolved_rule("((on ?x ?y)(color ?y red))->(above-red ?x)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(lhs.len(), 2);
        assert_eq!(rhs.0, "above-red");
    }
}
