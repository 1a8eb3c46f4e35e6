/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use datalog::Verbosity;
use tracing_subscriber::filter::LevelFilter;

pub fn level_for(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::Quiet => LevelFilter::WARN,
        Verbosity::Assertions => LevelFilter::INFO,
        Verbosity::Derivations => LevelFilter::TRACE,
    }
}

/// Install a stderr subscriber so query results on stdout stay clean.
/// `log` records from the engine are forwarded through the `tracing-log` bridge.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
