/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod config;
pub mod error;
pub mod items;
pub mod parser_kb_logic;
pub mod reasoning;

pub use config::{ReasonerConfig, Verbosity};
pub use error::{InvariantViolation, KbError};
pub use items::{Fact, FactId, Item, ItemId, Justification, ListOfBindings, Rule, RuleId};
pub use reasoning::KnowledgeBase;
