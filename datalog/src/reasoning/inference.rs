/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, trace};
use shared::unification::{instantiate, match_statement};
use crate::items::{Fact, FactId, ItemId, Justification, Rule, RuleId};
use crate::reasoning::KnowledgeBase;

/// Performs single forward-chaining steps; the knowledge base decides which
/// pairs to feed it.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferenceEngine;

impl InferenceEngine {
    /// Try to fire `rule` on `fact`.
    ///
    /// The fact is matched against the first antecedent only. On success the
    /// remaining antecedents and the consequent are instantiated: with
    /// antecedents left over the result is a new, shorter rule, otherwise it
    /// is a new fact. Either way it is justified by `(fact, rule)`, linked
    /// back from both operands and handed to the knowledge base.
    pub fn fc_infer(&self, fact_id: FactId, rule_id: RuleId, kb: &mut KnowledgeBase) {
        let (fact, rule) = match (kb.fact(fact_id), kb.rule(rule_id)) {
            (Some(fact), Some(rule)) => (fact, rule),
            _ => return,
        };
        if kb.config().traces_derivations() {
            trace!(
                "Attempting to infer from {} and {}",
                kb.render_statement(&fact.statement),
                kb.render_rule(rule)
            );
        }

        let (first, rest) = match rule.lhs.split_first() {
            Some(split) => split,
            None => return,
        };
        let bindings = match match_statement(first, &fact.statement) {
            Some(bindings) => bindings,
            None => return,
        };

        let rhs = instantiate(&rule.rhs, &bindings);
        let support = vec![Justification::new(fact_id, rule_id)];

        let derived = if rest.is_empty() {
            let derived = Fact::derived(rhs, support);
            if kb.config().traces_derivations() {
                debug!("Derived {}", kb.render_fact(&derived));
            }
            ItemId::Fact(kb.add_fact(derived))
        } else {
            let lhs = rest.iter().map(|s| instantiate(s, &bindings)).collect();
            let derived = Rule::derived(lhs, rhs, support);
            if kb.config().traces_derivations() {
                debug!("Derived {}", kb.render_rule(&derived));
            }
            ItemId::Rule(kb.add_rule(derived))
        };
        kb.link_support(fact_id, rule_id, derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReasonerConfig;
    use crate::items::Item;

    fn kb_with(source: &str) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new(ReasonerConfig::default());
        kb.load_str(source).unwrap();
        kb
    }

    #[test]
    fn test_single_antecedent_yields_fact() {
        let kb = kb_with("fact: (isa cube block)\nrule: ((isa ?x block)) -> (movable ?x)");
        let mut dict = kb.dictionary.clone();
        let derived = dict.encode_statement("movable", &["cube"]);

        let id = kb.fact_id(&derived).unwrap();
        let fact = kb.fact(id).unwrap();
        assert!(!fact.asserted);
        assert_eq!(fact.supported_by.len(), 1);

        let source = kb.fact_id(&dict.encode_statement("isa", &["cube", "block"])).unwrap();
        assert_eq!(fact.supported_by[0].fact, source);
        assert_eq!(kb.fact(source).unwrap().supports_facts, vec![id]);
    }

    #[test]
    fn test_multiple_antecedents_yield_partial_rule() {
        let kb = kb_with(
            "fact: (on a b)\nrule: ((on ?x ?y) (color ?y red)) -> (above-red ?x)",
        );
        let mut dict = kb.dictionary.clone();
        let lhs = vec![dict.encode_statement("color", &["b", "red"])];
        let rhs = dict.encode_statement("above-red", &["a"]);

        let rule_id = kb.rule_id(&lhs, &rhs).expect("partial rule derived");
        let rule = kb.rule(rule_id).unwrap();
        assert!(!rule.asserted);
        assert_eq!(rule.supported_by.len(), 1);

        let on_ab = kb.fact_id(&dict.encode_statement("on", &["a", "b"])).unwrap();
        assert_eq!(kb.fact(on_ab).unwrap().supports_rules, vec![rule_id]);
        let original = rule.supported_by[0].rule;
        assert_eq!(kb.rule(original).unwrap().supports_rules, vec![rule_id]);
    }

    #[test]
    fn test_non_matching_pair_has_no_effect() {
        let mut kb = kb_with("fact: (isa cube block)\nrule: ((isa ?x pyramid)) -> (pointy ?x)");
        let before = (kb.fact_count(), kb.rule_count());

        let fact = kb.facts().next().map(|(id, _)| id).unwrap();
        let rule = kb.rules().next().map(|(id, _)| id).unwrap();
        InferenceEngine.fc_infer(fact, rule, &mut kb);

        assert_eq!((kb.fact_count(), kb.rule_count()), before);
        assert!(kb.fact(fact).unwrap().supports_facts.is_empty());
    }

    #[test]
    fn test_ground_rule_fires_on_equal_fact() {
        let kb = kb_with("fact: (raining)\nrule: ((raining)) -> (wet grass)");
        let mut dict = kb.dictionary.clone();
        let query = Item::from(dict.encode_statement("wet", &["grass"]));
        assert_eq!(kb.ask(&query).len(), 1);
    }
}
