/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};

/// A single argument of a statement.
///
/// Constants are interned through the [`Dictionary`](crate::dictionary::Dictionary),
/// variables keep their name without the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Constant(u32),
}

impl Term {
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn var(name: &str) -> Self {
        Term::Variable(name.trim_start_matches('?').to_string())
    }
}

/// A predicate applied to an ordered list of terms, e.g. `(isa ?x block)`.
///
/// Equality is structural: two statements are equal only when predicate and
/// every term (variables included) are identical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub predicate: u32,
    pub terms: Vec<Term>,
}

impl Statement {
    pub fn new(predicate: u32, terms: Vec<Term>) -> Self {
        Statement { predicate, terms }
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// True when no term is a variable.
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(|t| !t.is_var())
    }
}
