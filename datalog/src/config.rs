/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// How much the knowledge base reports through the `log` facade.
///
/// Levels are cumulative: `Derivations` also reports everything `Assertions` does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No tracing, warnings are still emitted.
    #[default]
    Quiet,
    /// Asserts, retracts and asks.
    Assertions,
    /// Every internal add and every inference attempt.
    Derivations,
}

impl Verbosity {
    /// Map a `-v` count to a level, saturating at `Derivations`.
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Assertions,
            _ => Verbosity::Derivations,
        }
    }
}

/// Per knowledge base settings, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonerConfig {
    pub verbosity: Verbosity,
    /// Upper bound on chaining steps per public call, `None` runs to closure.
    pub max_chain_steps: Option<usize>,
}

impl ReasonerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_max_chain_steps(mut self, steps: usize) -> Self {
        self.max_chain_steps = Some(steps);
        self
    }

    pub(crate) fn traces_assertions(&self) -> bool {
        self.verbosity >= Verbosity::Assertions
    }

    pub(crate) fn traces_derivations(&self) -> bool {
        self.verbosity >= Verbosity::Derivations
    }
}
