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
use std::collections::BTreeMap;
use crate::dictionary::Dictionary;
use crate::terms::Term;

/// Solution mapping produced by a successful match: variable name -> term.
///
/// Bindings are never mutated once handed out; extending them produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    map: BTreeMap<String, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.map.iter()
    }

    /// Bind `var` to `value`, or check the existing binding agrees.
    /// Returns `false` on a conflicting binding and leaves `self` untouched.
    pub(crate) fn test_and_bind(&mut self, var: &str, value: &Term) -> bool {
        match self.map.get(var) {
            Some(bound) => bound == value,
            None => {
                self.map.insert(var.to_string(), value.clone());
                true
            }
        }
    }

    /// Human readable form, e.g. `?x: cube, ?y: table`.
    pub fn render(&self, dictionary: &Dictionary) -> String {
        self.map
            .iter()
            .map(|(var, term)| format!("?{}: {}", var, dictionary.decode_term(term)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Same as [`render`](Self::render) but keyed by plain strings, handy for JSON output.
    pub fn readable(&self, dictionary: &Dictionary) -> BTreeMap<String, String> {
        self.map
            .iter()
            .map(|(var, term)| (format!("?{}", var), dictionary.decode_term(term)))
            .collect()
    }
}
