/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, info, warn};
use crate::items::{FactId, Item, ItemId, RuleId};
use crate::reasoning::KnowledgeBase;

fn remove_one<T: PartialEq>(list: &mut Vec<T>, value: &T) -> bool {
    match list.iter().position(|v| v == value) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

impl KnowledgeBase {
    /// Withdraw a fact asserted earlier.
    ///
    /// The stored fact loses its asserted status; if nothing else supports
    /// it, it is removed together with every derivation that depended on it
    /// alone. Unknown facts are ignored and rules cannot be retracted.
    pub fn retract(&mut self, item: &Item) {
        let fact = match item {
            Item::Fact(fact) => fact,
            Item::Rule(rule) => {
                warn!("Only facts can be retracted, ignoring {}", self.render_rule(rule));
                return;
            }
        };
        if self.config().traces_assertions() {
            info!("Retracting {}", self.render_fact(fact));
        }

        let id = match self.fact_id(&fact.statement) {
            Some(id) => id,
            None => return,
        };
        if let Some(kb_fact) = self.fact_mut(id) {
            kb_fact.asserted = false;
        }
        self.retract_unsupported(ItemId::Fact(id));
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    /// Remove `item` if it is neither asserted nor supported, then cascade
    /// into everything it helped derive.
    fn retract_unsupported(&mut self, item: ItemId) {
        let keep = match item {
            ItemId::Fact(id) => self.fact(id).map(|f| f.asserted || !f.supported_by.is_empty()),
            ItemId::Rule(id) => self.rule(id).map(|r| r.asserted || !r.supported_by.is_empty()),
        };
        match keep {
            Some(false) => {}
            Some(true) => return,
            None => {
                debug_assert!(false, "cascade reached removed item {:?}", item);
                return;
            }
        }

        // Dependents are consumed from the live lists: unlinking a shared
        // partner may shrink them while the cascade runs
        while let Some(dependent) = self.pop_dependent(item) {
            self.drop_justification(dependent, item);
            self.retract_unsupported(dependent);
        }

        if self.config().traces_derivations() {
            debug!("Removing unsupported {:?}", item);
        }
        self.remove_item(item);
    }

    fn pop_dependent(&mut self, item: ItemId) -> Option<ItemId> {
        let (facts, rules) = match item {
            ItemId::Fact(id) => {
                let f = self.fact_mut(id)?;
                (&mut f.supports_facts, &mut f.supports_rules)
            }
            ItemId::Rule(id) => {
                let r = self.rule_mut(id)?;
                (&mut r.supports_facts, &mut r.supports_rules)
            }
        };
        if !facts.is_empty() {
            return Some(ItemId::Fact(facts.remove(0)));
        }
        if !rules.is_empty() {
            return Some(ItemId::Rule(rules.remove(0)));
        }
        None
    }

    /// Remove exactly one justification of `dependent` naming `source`, and
    /// the matching back-reference held by the other operand of that pair.
    fn drop_justification(&mut self, dependent: ItemId, source: ItemId) {
        let supported_by = match dependent {
            ItemId::Fact(id) => self.fact_mut(id).map(|f| &mut f.supported_by),
            ItemId::Rule(id) => self.rule_mut(id).map(|r| &mut r.supported_by),
        };
        let removed = supported_by.and_then(|list| {
            let pos = list.iter().position(|j| j.names(source))?;
            Some(list.remove(pos))
        });
        match removed {
            Some(justification) => {
                let partner = justification.partner_of(source);
                let unlinked = self.unlink_dependent(partner, dependent);
                debug_assert!(unlinked, "{:?} did not list {:?}", partner, dependent);
            }
            None => debug_assert!(false, "{:?} has no justification from {:?}", dependent, source),
        }
    }

    fn unlink_dependent(&mut self, supporter: ItemId, dependent: ItemId) -> bool {
        let lists = match supporter {
            ItemId::Fact(id) => self
                .fact_mut(id)
                .map(|f| (&mut f.supports_facts, &mut f.supports_rules)),
            ItemId::Rule(id) => self
                .rule_mut(id)
                .map(|r| (&mut r.supports_facts, &mut r.supports_rules)),
        };
        match (lists, dependent) {
            (Some((facts, _)), ItemId::Fact(id)) => remove_one(facts, &id),
            (Some((_, rules)), ItemId::Rule(id)) => remove_one(rules, &id),
            (None, _) => false,
        }
    }

    fn remove_item(&mut self, item: ItemId) {
        match item {
            ItemId::Fact(id) => self.remove_fact(id),
            ItemId::Rule(id) => self.remove_rule(id),
        }
        self.pending.retain(|p| *p != item);
    }

    fn remove_fact(&mut self, id: FactId) {
        if let Some(fact) = self.facts.get_mut(id.0).and_then(Option::take) {
            self.fact_index.remove(&fact.statement);
        }
    }

    fn remove_rule(&mut self, id: RuleId) {
        if let Some(rule) = self.rules.get_mut(id.0).and_then(Option::take) {
            self.rule_index.remove(&(rule.lhs, rule.rhs));
        }
    }
}
