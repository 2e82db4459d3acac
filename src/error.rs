// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors surfaced by this crate. The authorization protocol itself never
/// errors: verification failures degrade to "not authorized" booleans and
/// unresolvable names to the unknown-identity sentinel. Only the genuinely
/// fallible edges of the host environment land here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
}
