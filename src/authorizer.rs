// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::{credential::Credential, identity::Identity};

/// Verifies presented credentials and grants identities access.
///
/// Only [`authenticate`](Self::authenticate) is required. The provided
/// [`authorize`](Self::authorize) derives authorization from it, which is
/// the policy most authorities want; an implementation with a richer
/// notion of access (roles, scopes) overrides `authorize` as well.
pub trait Authorizer {
    /// Checks that the credential's secret is valid for the identity the
    /// credential itself claims, independent of any target. The secret is
    /// disposed before this returns, whatever the outcome.
    fn authenticate(&self, credential: &mut Credential) -> bool;

    /// Checks that the credential authenticates and that it claims the
    /// given identity (the same instance, not merely the same name).
    /// Authentication runs first, so the secret is disposed even when the
    /// instance check fails.
    fn authorize(&self, identity: &Identity, credential: &mut Credential) -> bool {
        self.authenticate(credential) && credential.identity() == identity
    }
}

/// An authorizer with a fixed verdict, for wiring up surfaces that do not
/// perform real verification. The default verdict denies.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyAuthorizer {
    state: bool,
}

impl DummyAuthorizer {
    pub const fn new(state: bool) -> Self {
        Self { state }
    }
}

impl Authorizer for DummyAuthorizer {
    fn authenticate(&self, credential: &mut Credential) -> bool {
        credential.dispose_secret();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use crate::credential::SecretKind;

    use super::*;

    #[test]
    fn authorize_requires_the_claimed_instance_to_match() {
        let authorizer = DummyAuthorizer::new(true);
        let alice = Identity::new("alice");
        let other_alice = Identity::new("alice");

        let mut matching = Credential::bare(alice.clone());
        assert!(authorizer.authorize(&alice, &mut matching));

        let mut mismatched = Credential::bare(alice);
        assert!(!authorizer.authorize(&other_alice, &mut mismatched));
    }

    #[test]
    fn authorize_disposes_the_secret_even_on_instance_mismatch() {
        let authorizer = DummyAuthorizer::new(true);
        let mut credential = Credential::new(
            Identity::new("alice"),
            SecretKind::Plaintext,
            SecretString::new("hunter2".to_owned()),
        );

        assert!(!authorizer.authorize(&Identity::new("bob"), &mut credential));
        assert_eq!(credential.kind(), SecretKind::None);
        assert!(credential.secret().is_none());
    }

    #[test]
    fn default_verdict_denies() {
        let mut credential = Credential::bare(Identity::new("alice"));
        assert!(!DummyAuthorizer::default().authenticate(&mut credential));
    }
}
