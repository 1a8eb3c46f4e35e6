/*
 * Copyright © 2024 ladroid
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::HashMap;
use crate::terms::{Statement, Term};

// Dictionary for encoding and decoding predicate and constant symbols
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictionary {
    string_to_id: HashMap<String, u32>,
    id_to_string: HashMap<u32, String>,
    next_id: u32,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            string_to_id: HashMap::new(),
            id_to_string: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn encode(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(value) {
            id
        } else {
            let id = self.next_id;
            self.string_to_id.insert(value.to_string(), id);
            self.id_to_string.insert(id, value.to_string());
            self.next_id += 1;
            id
        }
    }

    /// Look up an id without interning a new symbol.
    pub fn lookup(&self, value: &str) -> Option<u32> {
        self.string_to_id.get(value).copied()
    }

    pub fn decode(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(&id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }

    /// Build a statement from symbols, `?name` arguments become variables.
    pub fn encode_statement(&mut self, predicate: &str, args: &[&str]) -> Statement {
        let predicate = self.encode(predicate);
        let terms = args
            .iter()
            .map(|arg| {
                if arg.starts_with('?') {
                    Term::var(arg)
                } else {
                    Term::Constant(self.encode(arg))
                }
            })
            .collect();
        Statement::new(predicate, terms)
    }

    pub fn decode_term(&self, term: &Term) -> String {
        match term {
            Term::Variable(v) => format!("?{}", v),
            Term::Constant(c) => self.decode(*c).unwrap_or("unknown").to_string(),
        }
    }

    /// Render a statement as `(predicate arg ...)`.
    pub fn decode_statement(&self, statement: &Statement) -> String {
        let mut out = String::from("(");
        out.push_str(self.decode(statement.predicate).unwrap_or("unknown"));
        for term in &statement.terms {
            out.push(' ');
            out.push_str(&self.decode_term(term));
        }
        out.push(')');
        out
    }
}
