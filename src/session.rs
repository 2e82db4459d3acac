// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Debug, Display, Formatter};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{
    authorizer::Authorizer,
    credential::{Credential, SecretKind},
    identity::Identity,
};

#[derive(Clone, Copy)]
enum Access<'authorizer> {
    Pending(&'authorizer dyn Authorizer),
    Authorized,
}

/// String attributes the embedding application carries with a session,
/// like a nonce or a display preference. Insertion order is preserved;
/// setting an existing key overwrites its value in place.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct SessionData(Vec<(String, String)>);

impl SessionData {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self
            .0
            .iter_mut()
            .find(|(candidate, _)| candidate.as_str() == key)
        {
            Some((_, existing)) => value.clone_into(existing),
            None => self.0.push((key.to_owned(), value.to_owned())),
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.0.iter().position(|(candidate, _)| candidate == key) {
            Some(index) => {
                let _ = self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One client's progress from unauthenticated to authorized against a
/// fixed target identity.
///
/// A session starts pending unless it is constructed from a credential
/// that already verifies. Once authorized it stays authorized: there is no
/// transition back, and further authorization attempts succeed without
/// consulting the authorizer. A failed attempt leaves the session pending
/// so the client can retry with another credential.
pub struct Session<'authorizer> {
    identity: Identity,
    access: Access<'authorizer>,
    data: SessionData,
}

impl<'authorizer> Session<'authorizer> {
    /// A pending session for the identity, to be driven by later
    /// credential presentations.
    pub fn new(identity: Identity, authorizer: &'authorizer dyn Authorizer) -> Self {
        Self {
            identity,
            access: Access::Pending(authorizer),
            data: SessionData::new(),
        }
    }

    /// Authenticates the credential up front: the session is bound to the
    /// credential's claimed identity and starts authorized if the secret
    /// verifies, pending otherwise.
    pub fn from_credential(
        mut credential: Credential,
        authorizer: &'authorizer dyn Authorizer,
    ) -> Self {
        let access = if authorizer.authenticate(&mut credential) {
            Access::Authorized
        } else {
            Access::Pending(authorizer)
        };

        Self {
            identity: credential.identity().clone(),
            access,
            data: SessionData::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.access, Access::Authorized)
    }

    /// Attempts to authorize this session with the presented credential
    /// and returns whether the session is authorized afterwards. The
    /// credential must claim this session's identity (the same instance)
    /// and verify against the authorizer; its secret is disposed either
    /// way.
    pub fn authorize(&mut self, credential: &mut Credential) -> bool {
        if let Access::Pending(authorizer) = self.access {
            if authorizer.authorize(&self.identity, credential) {
                self.access = Access::Authorized;
            }
        }

        self.is_authorized()
    }

    /// Attempts to authorize with a transient credential claiming this
    /// session's own identity. The usual way to drive a pending session
    /// from a password prompt.
    pub fn authorize_secret(&mut self, kind: SecretKind, secret: SecretString) -> bool {
        let mut credential = Credential::new(self.identity.clone(), kind, secret);
        self.authorize(&mut credential)
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SessionData {
        &mut self.data
    }
}

impl Debug for Session<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("authorized", &self.is_authorized())
            .field("data", &self.data)
            .finish()
    }
}

impl Display for Session<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}({})}}",
            self.identity,
            if self.is_authorized() {
                "Authorized"
            } else {
                "Unauthorized"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::authorizer::DummyAuthorizer;

    use super::*;

    struct ScriptedAuthorizer {
        verdict: Cell<bool>,
        calls: Cell<usize>,
    }

    impl ScriptedAuthorizer {
        fn new(verdict: bool) -> Self {
            Self {
                verdict: Cell::new(verdict),
                calls: Cell::new(0),
            }
        }
    }

    impl Authorizer for ScriptedAuthorizer {
        fn authenticate(&self, credential: &mut Credential) -> bool {
            credential.dispose_secret();
            self.calls.set(self.calls.get() + 1);
            self.verdict.get()
        }
    }

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_owned())
    }

    #[test]
    fn pending_until_a_credential_verifies() {
        let authorizer = ScriptedAuthorizer::new(false);
        let mut session = Session::new(Identity::new("alice"), &authorizer);
        assert!(!session.is_authorized());

        assert!(!session.authorize_secret(SecretKind::Plaintext, secret("nope")));
        assert!(!session.is_authorized());
        assert_eq!(authorizer.calls.get(), 1);

        authorizer.verdict.set(true);
        assert!(session.authorize_secret(SecretKind::Plaintext, secret("yep")));
        assert!(session.is_authorized());
        assert_eq!(authorizer.calls.get(), 2);
    }

    #[test]
    fn authorized_sessions_skip_the_authorizer() {
        let authorizer = ScriptedAuthorizer::new(true);
        let mut session = Session::new(Identity::new("alice"), &authorizer);

        assert!(session.authorize_secret(SecretKind::Plaintext, secret("password")));
        assert_eq!(authorizer.calls.get(), 1);

        authorizer.verdict.set(false);
        assert!(session.authorize_secret(SecretKind::Plaintext, secret("password")));
        assert!(session.is_authorized());
        assert_eq!(authorizer.calls.get(), 1);
    }

    #[test]
    fn construction_from_a_verifying_credential_starts_authorized() {
        let authorizer = DummyAuthorizer::new(true);
        let session = Session::from_credential(
            Credential::new(Identity::new("alice"), SecretKind::Plaintext, secret("ok")),
            &authorizer,
        );

        assert!(session.is_authorized());
        assert_eq!(session.identity().name(), "alice");
    }

    #[test]
    fn construction_from_a_failing_credential_starts_pending() {
        let authorizer = DummyAuthorizer::new(false);
        let session = Session::from_credential(
            Credential::new(Identity::new("alice"), SecretKind::Plaintext, secret("no")),
            &authorizer,
        );

        assert!(!session.is_authorized());
        assert_eq!(session.identity().name(), "alice");
    }

    #[test]
    fn credentials_for_another_instance_do_not_authorize() {
        let authorizer = DummyAuthorizer::new(true);
        let mut session = Session::new(Identity::new("alice"), &authorizer);

        let mut credential = Credential::bare(Identity::new("alice"));
        assert!(!session.authorize(&mut credential));
        assert!(!session.is_authorized());
    }

    #[test]
    fn renders_the_identity_and_state() {
        let authorizer = DummyAuthorizer::new(true);
        let mut session = Session::new(Identity::new("alice"), &authorizer);
        assert_eq!(session.to_string(), "{alice(Unauthorized)}");

        assert!(session.authorize_secret(SecretKind::None, secret("")));
        assert_eq!(session.to_string(), "{alice(Authorized)}");
    }

    #[test]
    fn carries_application_data() {
        let authorizer = DummyAuthorizer::new(true);
        let mut session = Session::new(Identity::new("alice"), &authorizer);
        assert!(session.data().is_empty());

        session.data_mut().set("nonce", "1f3a");
        assert_eq!(session.data().get("nonce"), Some("1f3a"));
    }

    #[test]
    fn data_preserves_insertion_order() {
        let mut data = SessionData::new();
        data.set("theme", "dark");
        data.set("locale", "en-US");
        data.set("theme", "light");

        assert_eq!(data.get("theme"), Some("light"));
        assert_eq!(data.len(), 2);
        assert_eq!(
            data.iter().collect::<Vec<_>>(),
            vec![("theme", "light"), ("locale", "en-US")]
        );

        assert!(data.remove("theme"));
        assert!(!data.remove("theme"));
        assert_eq!(data.get("theme"), None);
        assert_eq!(data.len(), 1);
    }
}
