/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::bindings::Bindings;
use crate::terms::{Statement, Term};

/// Match `pattern` against `target`, starting from no bindings.
///
/// Matching is one-directional: variables in the pattern may bind to any term
/// of the target, constants must be equal, and a variable seen twice must bind
/// to the same term both times. Predicate and arity have to agree.
pub fn match_statement(pattern: &Statement, target: &Statement) -> Option<Bindings> {
    match_statement_with(pattern, target, &Bindings::new())
}

/// Like [`match_statement`] but extends a partial set of bindings.
/// The input bindings are left untouched when the match fails.
pub fn match_statement_with(
    pattern: &Statement,
    target: &Statement,
    bindings: &Bindings,
) -> Option<Bindings> {
    if pattern.predicate != target.predicate || pattern.arity() != target.arity() {
        return None;
    }

    // Work on a copy so a failed match never leaks partial bindings
    let mut temp_bindings = bindings.clone();
    for (p, t) in pattern.terms.iter().zip(&target.terms) {
        let ok = match p {
            Term::Variable(v) => temp_bindings.test_and_bind(v, t),
            Term::Constant(c) => matches!(t, Term::Constant(tc) if tc == c),
        };
        if !ok {
            return None;
        }
    }
    Some(temp_bindings)
}

fn substitute_term(term: &Term, bindings: &Bindings) -> Term {
    match term {
        Term::Variable(var_name) => match bindings.get(var_name) {
            Some(bound_term) => bound_term.clone(),
            None => Term::Variable(var_name.clone()),
        },
        Term::Constant(value) => Term::Constant(*value),
    }
}

/// Replace every bound variable of `statement`; unbound variables pass through.
pub fn instantiate(statement: &Statement, bindings: &Bindings) -> Statement {
    Statement {
        predicate: statement.predicate,
        terms: statement
            .terms
            .iter()
            .map(|t| substitute_term(t, bindings))
            .collect(),
    }
}
