// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;

use crate::{
    authorizer::{Authorizer, DummyAuthorizer},
    credential::{Credential, SecretKind},
    provider::{DummyIdentityProvider, IdentityProvider},
    session::Session,
};

/// The front door for minting sessions: an identity provider to resolve
/// names paired with an authorizer to verify credentials.
///
/// This is a borrowed handle and is freely copyable. Sessions it mints
/// borrow the underlying provider and authorizer, not the handle, so the
/// handle can be discarded while its sessions live on.
#[derive(Clone, Copy)]
pub struct SessionAuthority<'authority> {
    provider: &'authority dyn IdentityProvider,
    authorizer: &'authority dyn Authorizer,
}

impl<'authority> SessionAuthority<'authority> {
    pub const fn new(
        provider: &'authority dyn IdentityProvider,
        authorizer: &'authority dyn Authorizer,
    ) -> Self {
        Self {
            provider,
            authorizer,
        }
    }

    pub const fn provider(&self) -> &'authority dyn IdentityProvider {
        self.provider
    }

    pub const fn authorizer(&self) -> &'authority dyn Authorizer {
        self.authorizer
    }

    /// A pending session for the named identity. Unresolvable names bind
    /// the session to the unknown sentinel, which no credential claims,
    /// so such a session can never authorize.
    pub fn get_session(&self, name: &str) -> Session<'authority> {
        Session::new(self.provider.get_identity(name), self.authorizer)
    }

    /// Resolves the name and presents the secret in one step. The
    /// returned session is already authorized if the secret verifies for
    /// the resolved identity.
    pub fn get_session_with_secret(
        &self,
        name: &str,
        kind: SecretKind,
        secret: SecretString,
    ) -> Session<'authority> {
        let identity = self.provider.get_identity(name);
        self.get_session_with_credential(Credential::new(identity, kind, secret))
    }

    /// Like [`get_session_with_secret`](Self::get_session_with_secret),
    /// but from a caller-built credential. The session binds to the
    /// credential's claimed identity.
    pub fn get_session_with_credential(&self, credential: Credential) -> Session<'authority> {
        Session::from_credential(credential, self.authorizer)
    }
}

/// An authority whose provider resolves nothing and whose authorizer has
/// a fixed verdict. Handy for surfaces that want the session plumbing
/// without real accounts, like a captive setup portal that accepts
/// everyone.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummySessionAuthority {
    provider: DummyIdentityProvider,
    authorizer: DummyAuthorizer,
}

impl DummySessionAuthority {
    pub const fn new(state: bool) -> Self {
        Self {
            provider: DummyIdentityProvider,
            authorizer: DummyAuthorizer::new(state),
        }
    }

    /// Borrows this pair as a [`SessionAuthority`].
    pub fn authority(&self) -> SessionAuthority<'_> {
        SessionAuthority::new(&self.provider, &self.authorizer)
    }
}
