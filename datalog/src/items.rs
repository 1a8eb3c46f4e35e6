/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::bindings::Bindings;
use shared::terms::Statement;

/// Stable handle of a fact inside a [`KnowledgeBase`](crate::KnowledgeBase).
/// Handles are never reused, even after the fact is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(pub(crate) usize);

/// Stable handle of a rule inside a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) usize);

impl FactId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemId {
    Fact(FactId),
    Rule(RuleId),
}

/// One rule application: `rule` fired on `fact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Justification {
    pub fact: FactId,
    pub rule: RuleId,
}

impl Justification {
    pub fn new(fact: FactId, rule: RuleId) -> Self {
        Justification { fact, rule }
    }

    /// True when `source` is one of the two operands of this application.
    pub fn names(&self, source: ItemId) -> bool {
        match source {
            ItemId::Fact(id) => self.fact == id,
            ItemId::Rule(id) => self.rule == id,
        }
    }

    /// The operand that is not `source`.
    pub fn partner_of(&self, source: ItemId) -> ItemId {
        match source {
            ItemId::Fact(_) => ItemId::Rule(self.rule),
            ItemId::Rule(_) => ItemId::Fact(self.fact),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fact {
    pub statement: Statement,
    pub asserted: bool,
    pub supported_by: Vec<Justification>,
    pub supports_facts: Vec<FactId>,
    pub supports_rules: Vec<RuleId>,
    pub(crate) chained: bool,
}

impl Fact {
    /// A top-level assertion.
    pub fn new(statement: Statement) -> Self {
        Self::derived(statement, Vec::new())
    }

    /// A fact carrying justifications; it counts as asserted only when `supported_by` is empty.
    pub fn derived(statement: Statement, supported_by: Vec<Justification>) -> Self {
        Fact {
            statement,
            asserted: supported_by.is_empty(),
            supported_by,
            supports_facts: Vec::new(),
            supports_rules: Vec::new(),
            chained: false,
        }
    }
}

/// An implication `lhs[0] & lhs[1] & ... => rhs`.
#[derive(Debug, Clone)]
pub struct Rule {
    pub lhs: Vec<Statement>,
    pub rhs: Statement,
    pub asserted: bool,
    pub supported_by: Vec<Justification>,
    pub supports_facts: Vec<FactId>,
    pub supports_rules: Vec<RuleId>,
    pub(crate) chained: bool,
}

impl Rule {
    pub fn new(lhs: Vec<Statement>, rhs: Statement) -> Self {
        Self::derived(lhs, rhs, Vec::new())
    }

    pub fn derived(lhs: Vec<Statement>, rhs: Statement, supported_by: Vec<Justification>) -> Self {
        Rule {
            lhs,
            rhs,
            asserted: supported_by.is_empty(),
            supported_by,
            supports_facts: Vec::new(),
            supports_rules: Vec::new(),
            chained: false,
        }
    }
}

/// Argument of `assert`, `ask` and `retract`.
#[derive(Debug, Clone)]
pub enum Item {
    Fact(Fact),
    Rule(Rule),
}

impl Item {
    /// Whether this item can be used as an `ask` pattern.
    pub fn is_fact_query(&self) -> bool {
        matches!(self, Item::Fact(_))
    }

    /// Strip any justifications so the item enters the store as a top-level assertion.
    pub(crate) fn into_assertion(self) -> Self {
        match self {
            Item::Fact(f) => Item::Fact(Fact::new(f.statement)),
            Item::Rule(r) => Item::Rule(Rule::new(r.lhs, r.rhs)),
        }
    }
}

impl From<Fact> for Item {
    fn from(fact: Fact) -> Self {
        Item::Fact(fact)
    }
}

impl From<Rule> for Item {
    fn from(rule: Rule) -> Self {
        Item::Rule(rule)
    }
}

impl From<Statement> for Item {
    fn from(statement: Statement) -> Self {
        Item::Fact(Fact::new(statement))
    }
}

/// Answers of an `ask`: each binding together with the facts that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfBindings {
    pub list_of_bindings: Vec<(Bindings, Vec<FactId>)>,
}

impl ListOfBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bindings(&mut self, bindings: Bindings, facts: Vec<FactId>) {
        self.list_of_bindings.push((bindings, facts));
    }

    pub fn len(&self) -> usize {
        self.list_of_bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list_of_bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Bindings, Vec<FactId>)> {
        self.list_of_bindings.iter()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Bindings> {
        self.list_of_bindings.iter().map(|(b, _)| b)
    }
}

impl IntoIterator for ListOfBindings {
    type Item = (Bindings, Vec<FactId>);
    type IntoIter = std::vec::IntoIter<(Bindings, Vec<FactId>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.list_of_bindings.into_iter()
    }
}
