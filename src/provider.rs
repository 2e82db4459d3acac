// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::identity::Identity;

const LIST_DELIMITER: char = ',';

/// Resolves names to identity instances.
///
/// A provider is the owner of record for the identities it mints: as long
/// as a principal is known, every resolution of its name returns the same
/// instance, and dropping the provider's entry retires the principal even
/// if stale handles keep the allocation alive.
pub trait IdentityProvider {
    /// The canonical instance for the name, or the
    /// [`unknown`](Identity::unknown) sentinel when the provider does not
    /// know the principal.
    fn get_identity(&self, name: &str) -> Identity;

    /// Mints a fresh identity instance for implementations to store.
    /// Callers that merely look identities up want
    /// [`get_identity`](Self::get_identity) instead.
    fn create_identity(&self, name: &str) -> Identity {
        Identity::new(name)
    }

    /// Resolves a delimited list of names. Items are trimmed of
    /// surrounding whitespace and empty items are skipped; order and
    /// duplicates are preserved, and unresolvable names come back as the
    /// unknown sentinel.
    fn parse_identities(&self, list: &str) -> Vec<Identity> {
        list.split(LIST_DELIMITER)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| self.get_identity(name))
            .collect()
    }

    /// Formats identities back into a delimited list of names, the
    /// inverse of [`parse_identities`](Self::parse_identities) for names
    /// that do not themselves contain the delimiter.
    fn map_identities(&self, identities: &[Identity]) -> String {
        identities
            .iter()
            .map(Identity::name)
            .collect::<Vec<_>>()
            .join(&LIST_DELIMITER.to_string())
    }
}

/// A provider that resolves nothing: every lookup yields the unknown
/// sentinel. Useful where identity resolution is intentionally disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyIdentityProvider;

impl IdentityProvider for DummyIdentityProvider {
    fn get_identity(&self, _name: &str) -> Identity {
        Identity::unknown()
    }
}
