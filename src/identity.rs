// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

use once_cell::sync::Lazy;

static UNKNOWN: Lazy<Identity> = Lazy::new(|| Identity::new("<unknown>"));
static ANONYMOUS: Lazy<Identity> = Lazy::new(|| Identity::new("<anonymous>"));

/// A named principal, unique within its provider's universe.
///
/// Identities compare by instance, not by name: two identities carrying
/// equal name strings are still distinct principals unless one is a clone
/// of the other. Cloning shares the instance and is cheap; it never mints
/// a new principal. New instances come only from an identity provider (see
/// [`IdentityProvider::create_identity`](crate::IdentityProvider::create_identity)).
#[derive(Debug, Clone)]
pub struct Identity {
    name: Arc<str>,
}

impl Identity {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// The process-wide resolution-failure marker, returned by identity
    /// providers when a name does not resolve. Check with
    /// [`is_unknown`](Self::is_unknown), never by name.
    pub fn unknown() -> Self {
        UNKNOWN.clone()
    }

    /// The process-wide unauthenticated default principal.
    pub fn anonymous() -> Self {
        ANONYMOUS.clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unknown(&self) -> bool {
        *self == *UNKNOWN
    }

    pub fn is_anonymous(&self) -> bool {
        *self == *ANONYMOUS
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Identity {}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_instances_with_equal_names() {
        let a = Identity::new("alice");
        let b = Identity::new("alice");
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn clones_share_the_instance() {
        let a = Identity::new("alice");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn sentinels_are_process_wide() {
        assert_eq!(Identity::unknown(), Identity::unknown());
        assert_eq!(Identity::anonymous(), Identity::anonymous());
        assert_ne!(Identity::unknown(), Identity::anonymous());
        assert!(Identity::unknown().is_unknown());
        assert!(Identity::anonymous().is_anonymous());
        assert!(!Identity::anonymous().is_unknown());
    }

    #[test]
    fn displays_the_raw_name() {
        assert_eq!(Identity::new("alice").to_string(), "alice");
        assert_eq!(Identity::unknown().to_string(), "<unknown>");
    }
}
