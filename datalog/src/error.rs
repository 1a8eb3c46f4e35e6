/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::path::PathBuf;
use thiserror::Error;
use crate::items::{ItemId, Justification};

/// Failures while loading facts and rules from text.
#[derive(Debug, Error)]
pub enum KbError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A broken support-graph invariant. These indicate a bug in the engine,
/// not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{0:?} is stored but not reachable through the structural index")]
    IndexMismatch(ItemId),

    #[error("{0:?} is neither asserted nor supported")]
    Unsupported(ItemId),

    #[error("{item:?} is justified by {justification:?} which names a removed item")]
    DanglingJustification {
        item: ItemId,
        justification: Justification,
    },

    #[error("{supporter:?} lists {dependent:?} as a dependent but it was removed")]
    DanglingBackReference { supporter: ItemId, dependent: ItemId },

    #[error(
        "{supporter:?} appears in {justifications} justifications of {dependent:?} but is linked back {back_references} times"
    )]
    UnmirroredEdge {
        supporter: ItemId,
        dependent: ItemId,
        justifications: usize,
        back_references: usize,
    },
}
