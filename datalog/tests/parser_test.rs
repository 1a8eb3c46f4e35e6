/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

#[cfg(test)]
mod tests {
    use datalog::parser_kb_logic::*;
    use datalog::{Item, KbError};
    use shared::dictionary::Dictionary;
    use shared::terms::Term;

    const BLOCKS: &str = r#"
        # blocks world
        fact: (isa cube block)
        fact: (size cube small)

        rule: ((isa ?x block) (size ?x small)) -> (isa ?x small_block)
    "#;

    #[test]
    fn test_parse_kb_skips_comments_and_blank_lines() {
        let mut dict = Dictionary::new();
        let items = parse_kb(BLOCKS, &mut dict).unwrap();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], Item::Fact(_)));
        assert!(matches!(items[2], Item::Rule(_)));

        match &items[2] {
            Item::Rule(rule) => {
                assert_eq!(rule.lhs.len(), 2);
                assert!(rule.asserted);
                assert_eq!(dict.decode_statement(&rule.rhs), "(isa ?x small_block)");
                assert_eq!(rule.lhs[0].terms[0], Term::Variable("x".to_string()));
            }
            Item::Fact(_) => unreachable!(),
        }
    }

    #[test]
    fn test_parse_kb_shares_symbols_with_dictionary() {
        let mut dict = Dictionary::new();
        let items = parse_kb(BLOCKS, &mut dict).unwrap();
        let cube = dict.lookup("cube").unwrap();
        match &items[1] {
            Item::Fact(fact) => assert_eq!(fact.statement.terms[0], Term::Constant(cube)),
            Item::Rule(_) => unreachable!(),
        }
    }

    #[test]
    fn test_parse_kb_reports_line_of_error() {
        let mut dict = Dictionary::new();
        let source = "fact: (isa cube block)\n\nfact: isa pyramid block\n";
        match parse_kb(source, &mut dict) {
            Err(KbError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("isa pyramid block"));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_without_antecedents_is_rejected() {
        let mut dict = Dictionary::new();
        assert!(parse_kb("rule: () -> (q a)", &mut dict).is_err());
        assert!(parse_kb("rule: ((p ?x))", &mut dict).is_err());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let mut dict = Dictionary::new();
        assert!(parse_kb("fact: (p a) extra", &mut dict).is_err());
        assert!(parse_kb("fact: (p a", &mut dict).is_err());
    }

    #[test]
    fn test_parse_query_forms() {
        let mut dict = Dictionary::new();
        let bare = parse_query("(isa ?x block)", &mut dict).unwrap();
        assert!(bare.is_fact_query());

        let prefixed = parse_query("  fact: (isa ?x block) ", &mut dict).unwrap();
        assert!(prefixed.is_fact_query());

        let rule = parse_query("rule: ((p ?x)) -> (q ?x)", &mut dict).unwrap();
        assert!(!rule.is_fact_query());

        assert!(parse_query("isa ?x block", &mut dict).is_err());
    }

    #[test]
    fn test_predicate_cannot_be_variable() {
        assert!(parse_unresolved_statement("(?p a b)").is_err());
    }

    #[test]
    fn test_unresolved_item() {
        let (rest, item) = parse_unresolved_item("fact: (on a b)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            item,
            UnresolvedItem::Fact((
                "on".to_string(),
                vec![
                    UnresolvedTerm::Symbol("a".to_string()),
                    UnresolvedTerm::Symbol("b".to_string())
                ]
            ))
        );
    }
}
