/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::InvariantViolation;
use crate::items::{FactId, ItemId, Justification, RuleId};
use crate::reasoning::KnowledgeBase;

impl KnowledgeBase {
    /// Verify the support graph.
    ///
    /// Checks that every stored item is reachable through the structural
    /// index, that unasserted items are supported, that no justification or
    /// back-reference names a removed item, and that every justification is
    /// mirrored by exactly one back-reference on each operand.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (id, fact) in self.facts() {
            if self.fact_id(&fact.statement) != Some(id) {
                return Err(InvariantViolation::IndexMismatch(ItemId::Fact(id)));
            }
        }
        for (id, rule) in self.rules() {
            if self.rule_id(&rule.lhs, &rule.rhs) != Some(id) {
                return Err(InvariantViolation::IndexMismatch(ItemId::Rule(id)));
            }
        }

        let items = self
            .facts()
            .map(|(id, f)| (ItemId::Fact(id), f.asserted, &f.supported_by))
            .chain(
                self.rules()
                    .map(|(id, r)| (ItemId::Rule(id), r.asserted, &r.supported_by)),
            );
        for (item, asserted, supported_by) in items {
            if !asserted && supported_by.is_empty() {
                return Err(InvariantViolation::Unsupported(item));
            }
            for justification in supported_by {
                self.check_justification(item, *justification, supported_by)?;
            }
        }

        for (id, fact) in self.facts() {
            self.check_back_references(ItemId::Fact(id), &fact.supports_facts, &fact.supports_rules)?;
        }
        for (id, rule) in self.rules() {
            self.check_back_references(ItemId::Rule(id), &rule.supports_facts, &rule.supports_rules)?;
        }
        Ok(())
    }

    fn check_justification(
        &self,
        item: ItemId,
        justification: Justification,
        supported_by: &[Justification],
    ) -> Result<(), InvariantViolation> {
        for source in [ItemId::Fact(justification.fact), ItemId::Rule(justification.rule)] {
            if !self.contains(source) {
                return Err(InvariantViolation::DanglingJustification { item, justification });
            }
            let justifications = supported_by.iter().filter(|j| j.names(source)).count();
            let back_references = self.back_reference_count(source, item);
            if justifications != back_references {
                return Err(InvariantViolation::UnmirroredEdge {
                    supporter: source,
                    dependent: item,
                    justifications,
                    back_references,
                });
            }
        }
        Ok(())
    }

    fn check_back_references(
        &self,
        supporter: ItemId,
        facts: &[FactId],
        rules: &[RuleId],
    ) -> Result<(), InvariantViolation> {
        let dependents = facts
            .iter()
            .map(|id| ItemId::Fact(*id))
            .chain(rules.iter().map(|id| ItemId::Rule(*id)));
        for dependent in dependents {
            let supported_by = match dependent {
                ItemId::Fact(id) => self.fact(id).map(|f| &f.supported_by),
                ItemId::Rule(id) => self.rule(id).map(|r| &r.supported_by),
            };
            let supported_by = match supported_by {
                Some(list) => list,
                None => {
                    return Err(InvariantViolation::DanglingBackReference { supporter, dependent })
                }
            };
            let justifications = supported_by.iter().filter(|j| j.names(supporter)).count();
            let back_references = self.back_reference_count(supporter, dependent);
            if justifications != back_references {
                return Err(InvariantViolation::UnmirroredEdge {
                    supporter,
                    dependent,
                    justifications,
                    back_references,
                });
            }
        }
        Ok(())
    }

    fn back_reference_count(&self, supporter: ItemId, dependent: ItemId) -> usize {
        let (facts, rules) = match supporter {
            ItemId::Fact(id) => match self.fact(id) {
                Some(f) => (&f.supports_facts, &f.supports_rules),
                None => return 0,
            },
            ItemId::Rule(id) => match self.rule(id) {
                Some(r) => (&r.supports_facts, &r.supports_rules),
                None => return 0,
            },
        };
        match dependent {
            ItemId::Fact(id) => facts.iter().filter(|f| **f == id).count(),
            ItemId::Rule(id) => rules.iter().filter(|r| **r == id).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ReasonerConfig;
    use crate::error::InvariantViolation;
    use crate::items::ItemId;
    use crate::reasoning::KnowledgeBase;

    #[test]
    fn test_detects_unmirrored_edge() {
        let mut kb = KnowledgeBase::new(ReasonerConfig::default());
        kb.load_str("fact: (p a)\nrule: ((p ?x)) -> (q ?x)").unwrap();
        assert_eq!(kb.check_invariants(), Ok(()));

        let source = kb.facts().next().map(|(id, _)| id).unwrap();
        kb.fact_mut(source).unwrap().supports_facts.clear();
        assert!(matches!(
            kb.check_invariants(),
            Err(InvariantViolation::UnmirroredEdge { supporter: ItemId::Fact(id), .. }) if id == source
        ));
    }

    #[test]
    fn test_detects_unsupported_item() {
        let mut kb = KnowledgeBase::new(ReasonerConfig::default());
        kb.load_str("fact: (p a)").unwrap();
        let id = kb.facts().next().map(|(id, _)| id).unwrap();
        kb.fact_mut(id).unwrap().asserted = false;
        assert_eq!(
            kb.check_invariants(),
            Err(InvariantViolation::Unsupported(ItemId::Fact(id)))
        );
    }
}
