/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::items::ItemId;
use crate::reasoning::KnowledgeBase;

/// Contains a method to convert a specific data structure into a representation in the DOT language
/// For better visualisation
pub trait ToDot {
    fn to_dot(&self) -> String;
}

fn node_name(item: ItemId) -> String {
    match item {
        ItemId::Fact(id) => format!("Fact{}", id.index()),
        ItemId::Rule(id) => format!("Rule{}", id.index()),
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn create_nodes(kb: &KnowledgeBase, out: &mut String) {
    for (id, fact) in kb.facts() {
        let style = if fact.asserted { ", style=bold" } else { "" };
        out.push_str(&format!(
            "{} [label=\"{}\"{}]\n",
            node_name(ItemId::Fact(id)),
            escape_label(&kb.render_statement(&fact.statement)),
            style
        ));
    }

    for (id, rule) in kb.rules() {
        let style = if rule.asserted { ", style=bold" } else { "" };
        out.push_str(&format!(
            "{} [label=\"{}\", shape=box{}]\n",
            node_name(ItemId::Rule(id)),
            escape_label(&kb.render_rule(rule)),
            style
        ));
    }
}

// One point node per justification, fed by both operands
fn create_edges(kb: &KnowledgeBase, out: &mut String) {
    let derived = kb
        .facts()
        .map(|(id, f)| (ItemId::Fact(id), &f.supported_by))
        .chain(kb.rules().map(|(id, r)| (ItemId::Rule(id), &r.supported_by)));

    for (item, supported_by) in derived {
        for (n, justification) in supported_by.iter().enumerate() {
            let target = node_name(item);
            let junction = format!("{}_j{}", target, n);
            out.push_str(&format!("{} [shape=point]\n", junction));
            out.push_str(&format!(
                "{} -> {}\n",
                node_name(ItemId::Fact(justification.fact)),
                junction
            ));
            out.push_str(&format!(
                "{} -> {}\n",
                node_name(ItemId::Rule(justification.rule)),
                junction
            ));
            out.push_str(&format!("{} -> {}\n", junction, target));
        }
    }
}

/// Outputs the justification graph of the knowledge base.
impl ToDot for KnowledgeBase {
    fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph {\n");

        create_nodes(self, &mut out);

        out.push('\n'); // Whitespace between nodes and justifications

        create_edges(self, &mut out);

        out.push('}');

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReasonerConfig;

    #[test]
    fn test_dot_contains_justification() {
        let mut kb = KnowledgeBase::new(ReasonerConfig::default());
        kb.load_str("fact: (p a)\nrule: ((p ?x)) -> (q ?x)").unwrap();
        let dot = kb.to_dot();

        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("Fact0 [label=\"(p a)\", style=bold]"));
        assert!(dot.contains("Rule0 [label=\"rule: ((p ?x)) -> (q ?x)\", shape=box, style=bold]"));
        assert!(dot.contains("Fact1 [label=\"(q a)\"]"));
        assert!(dot.contains("Fact0 -> Fact1_j0"));
        assert!(dot.contains("Rule0 -> Fact1_j0"));
        assert!(dot.contains("Fact1_j0 -> Fact1"));
    }
}
