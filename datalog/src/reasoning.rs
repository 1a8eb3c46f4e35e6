/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod inference;
pub mod invariants;
pub mod retraction;
pub mod to_dot;

use log::{debug, info, warn};
use shared::dictionary::Dictionary;
use shared::terms::Statement;
use shared::unification::match_statement;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;
use crate::config::ReasonerConfig;
use crate::error::KbError;
use crate::items::{Fact, FactId, Item, ItemId, ListOfBindings, Rule, RuleId};
use crate::parser_kb_logic::parse_kb;
use crate::reasoning::inference::InferenceEngine;

type RuleKey = (Vec<Statement>, Statement);

/// Facts and rules closed under forward chaining, with the justification
/// graph needed to undo derivations on retraction.
///
/// Items live in two arenas addressed by [`FactId`] / [`RuleId`]; the
/// support lists on every item store handles, never the items themselves.
/// A slot becomes `None` once its item is removed and is not reused.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub dictionary: Dictionary,
    facts: Vec<Option<Fact>>,
    rules: Vec<Option<Rule>>,
    fact_index: HashMap<Statement, FactId>,
    rule_index: HashMap<RuleKey, RuleId>,
    // Items inserted but not yet paired against their counterparts
    pending: VecDeque<ItemId>,
    ie: InferenceEngine,
    config: ReasonerConfig,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(ReasonerConfig::default())
    }
}

impl KnowledgeBase {
    pub fn new(config: ReasonerConfig) -> Self {
        Self {
            dictionary: Dictionary::new(),
            facts: Vec::new(),
            rules: Vec::new(),
            fact_index: HashMap::new(),
            rule_index: HashMap::new(),
            pending: VecDeque::new(),
            ie: InferenceEngine,
            config,
        }
    }

    /// Build a knowledge base from given facts and rules.
    ///
    /// Every given item is a top-level assertion: justifications it carries
    /// are dropped. The result is closed under forward chaining.
    pub fn with_items(
        dictionary: Dictionary,
        facts: Vec<Fact>,
        rules: Vec<Rule>,
        config: ReasonerConfig,
    ) -> Self {
        let mut kb = Self::new(config);
        kb.dictionary = dictionary;
        for fact in facts {
            kb.add(Item::Fact(fact).into_assertion());
        }
        for rule in rules {
            kb.add(Item::Rule(rule).into_assertion());
        }
        kb.run_to_closure();
        kb
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id.0).and_then(Option::as_ref)
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn fact_mut(&mut self, id: FactId) -> Option<&mut Fact> {
        self.facts.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn rule_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        match item {
            ItemId::Fact(id) => self.fact(id).is_some(),
            ItemId::Rule(id) => self.rule(id).is_some(),
        }
    }

    /// Handle of the stored fact structurally equal to `statement`.
    pub fn fact_id(&self, statement: &Statement) -> Option<FactId> {
        self.fact_index.get(statement).copied()
    }

    pub fn rule_id(&self, lhs: &[Statement], rhs: &Statement) -> Option<RuleId> {
        self.rule_index.get(&(lhs.to_vec(), rhs.clone())).copied()
    }

    /// Stored facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = (FactId, &Fact)> {
        self.facts
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.as_ref().map(|f| (FactId(i), f)))
    }

    /// Stored rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (RuleId(i), r)))
    }

    pub fn fact_count(&self) -> usize {
        self.fact_index.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rule_index.len()
    }

    /// Items still waiting to be chained, non-zero only after a chaining budget ran out.
    pub fn pending_derivations(&self) -> usize {
        self.pending.len()
    }

    /// Assert a fact or rule and chain it to closure.
    ///
    /// Justifications carried by `item` are dropped: an asserted item is
    /// always top-level, support is only ever recorded by chaining.
    /// Re-asserting a stored item marks it asserted and keeps whatever
    /// derivation support it already has.
    pub fn assert(&mut self, item: impl Into<Item>) {
        self.assert_item(item.into());
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    fn assert_item(&mut self, item: Item) {
        let item = item.into_assertion();
        if self.config.traces_assertions() {
            info!("Asserting {}", self.render_item(&item));
        }
        self.add(item);
        self.run_to_closure();
    }

    /// Insert-or-merge primitive shared by assertions and derivations.
    pub(crate) fn add(&mut self, item: Item) -> ItemId {
        match item {
            Item::Fact(fact) => ItemId::Fact(self.add_fact(fact)),
            Item::Rule(rule) => ItemId::Rule(self.add_rule(rule)),
        }
    }

    pub(crate) fn add_fact(&mut self, fact: Fact) -> FactId {
        if self.config.traces_derivations() {
            debug!("Adding {}", self.render_fact(&fact));
        }
        if let Some(id) = self.fact_id(&fact.statement) {
            if let Some(existing) = self.fact_mut(id) {
                if fact.supported_by.is_empty() {
                    existing.asserted = true;
                } else {
                    existing.supported_by.extend(fact.supported_by);
                }
            }
            return id;
        }

        let id = FactId(self.facts.len());
        self.fact_index.insert(fact.statement.clone(), id);
        self.facts.push(Some(Fact {
            supports_facts: Vec::new(),
            supports_rules: Vec::new(),
            chained: false,
            ..fact
        }));
        self.pending.push_back(ItemId::Fact(id));
        id
    }

    pub(crate) fn add_rule(&mut self, rule: Rule) -> RuleId {
        if self.config.traces_derivations() {
            debug!("Adding {}", self.render_rule(&rule));
        }
        if let Some(id) = self.rule_id(&rule.lhs, &rule.rhs) {
            if let Some(existing) = self.rule_mut(id) {
                if rule.supported_by.is_empty() {
                    existing.asserted = true;
                } else {
                    existing.supported_by.extend(rule.supported_by);
                }
            }
            return id;
        }

        let id = RuleId(self.rules.len());
        self.rule_index.insert((rule.lhs.clone(), rule.rhs.clone()), id);
        self.rules.push(Some(Rule {
            supports_facts: Vec::new(),
            supports_rules: Vec::new(),
            chained: false,
            ..rule
        }));
        self.pending.push_back(ItemId::Rule(id));
        id
    }

    /// Record `derived` as a dependent of both operands of one rule application.
    pub(crate) fn link_support(&mut self, fact: FactId, rule: RuleId, derived: ItemId) {
        if let Some(f) = self.fact_mut(fact) {
            match derived {
                ItemId::Fact(id) => f.supports_facts.push(id),
                ItemId::Rule(id) => f.supports_rules.push(id),
            }
        }
        if let Some(r) = self.rule_mut(rule) {
            match derived {
                ItemId::Fact(id) => r.supports_facts.push(id),
                ItemId::Rule(id) => r.supports_rules.push(id),
            }
        }
    }

    /// Drain the worklist. A popped item is paired with every already chained
    /// item of the other kind, so each (fact, rule) pair fires exactly once.
    pub(crate) fn run_to_closure(&mut self) {
        let mut steps = 0usize;
        while let Some(next) = self.pending.pop_front() {
            if let Some(limit) = self.config.max_chain_steps {
                if steps >= limit {
                    self.pending.push_front(next);
                    warn!(
                        "Chaining budget of {} steps exhausted, {} items left pending",
                        limit,
                        self.pending.len()
                    );
                    return;
                }
            }
            steps += 1;
            self.chain(next);
        }
    }

    fn chain(&mut self, item: ItemId) {
        let ie = self.ie;
        match item {
            ItemId::Fact(fact_id) => {
                match self.fact_mut(fact_id) {
                    Some(fact) => fact.chained = true,
                    None => return,
                }
                let partners: Vec<RuleId> = self
                    .rules()
                    .filter(|(_, r)| r.chained)
                    .map(|(id, _)| id)
                    .collect();
                for rule_id in partners {
                    ie.fc_infer(fact_id, rule_id, self);
                }
            }
            ItemId::Rule(rule_id) => {
                match self.rule_mut(rule_id) {
                    Some(rule) => rule.chained = true,
                    None => return,
                }
                let partners: Vec<FactId> = self
                    .facts()
                    .filter(|(_, f)| f.chained)
                    .map(|(id, _)| id)
                    .collect();
                for fact_id in partners {
                    ie.fc_infer(fact_id, rule_id, self);
                }
            }
        }
    }

    /// Match `query` against every stored fact.
    ///
    /// Returns one entry per matching fact. Anything other than a fact
    /// pattern is reported and answered with an empty list.
    pub fn ask(&self, query: &Item) -> ListOfBindings {
        let mut answers = ListOfBindings::new();
        if !query.is_fact_query() {
            warn!("Invalid ask: {}", self.render_item(query));
            return answers;
        }
        let Item::Fact(query) = query else {
            return answers;
        };
        if self.config.traces_assertions() {
            info!("Asking {}", self.render_statement(&query.statement));
        }

        for (id, fact) in self.facts() {
            if let Some(bindings) = match_statement(&query.statement, &fact.statement) {
                answers.add_bindings(bindings, vec![id]);
            }
        }
        answers
    }

    /// Parse the text format and assert every item in order.
    /// Returns the number of items read.
    pub fn load_str(&mut self, source: &str) -> Result<usize, KbError> {
        let items = parse_kb(source, &mut self.dictionary)?;
        let count = items.len();
        for item in items {
            self.assert_item(item);
        }
        debug_assert_eq!(self.check_invariants(), Ok(()));
        Ok(count)
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, KbError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| KbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&source)
    }

    pub fn render_statement(&self, statement: &Statement) -> String {
        self.dictionary.decode_statement(statement)
    }

    pub fn render_fact(&self, fact: &Fact) -> String {
        format!("fact: {}", self.render_statement(&fact.statement))
    }

    pub fn render_rule(&self, rule: &Rule) -> String {
        let lhs = rule
            .lhs
            .iter()
            .map(|s| self.render_statement(s))
            .collect::<Vec<_>>()
            .join(" ");
        format!("rule: ({}) -> {}", lhs, self.render_statement(&rule.rhs))
    }

    pub fn render_item(&self, item: &Item) -> String {
        match item {
            Item::Fact(f) => self.render_fact(f),
            Item::Rule(r) => self.render_rule(r),
        }
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Base:")?;
        for (_, fact) in self.facts() {
            writeln!(f, "{}", self.render_fact(fact))?;
        }
        for (_, rule) in self.rules() {
            writeln!(f, "{}", self.render_rule(rule))?;
        }
        Ok(())
    }
}
