// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Tags how a credential's secret payload is to be interpreted. The digest
/// kinds name the RFC 2617 response families; computing or verifying a
/// digest is a collaborator's job, and this crate only threads the tag and
/// the opaque value through to an authorizer that understands the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecretKind {
    None,
    Plaintext,
    HttpDigestMd5,
    HttpDigestMd5Session,
}

impl Display for SecretKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Plaintext => "plaintext",
            Self::HttpDigestMd5 => "http-digest-md5",
            Self::HttpDigestMd5Session => "http-digest-md5-session",
        })
    }
}

/// A claimed identity plus a secret of a declared kind, presented for
/// verification. The claimed identity is fixed at construction.
///
/// The secret payload's backing memory is wiped when the secret is
/// disposed or replaced, and when the credential itself drops.
#[derive(Debug)]
pub struct Credential {
    identity: Identity,
    kind: SecretKind,
    secret: Option<SecretString>,
}

impl Credential {
    /// A credential with no secret attached yet.
    pub const fn bare(identity: Identity) -> Self {
        Self {
            identity,
            kind: SecretKind::None,
            secret: None,
        }
    }

    pub fn new(identity: Identity, kind: SecretKind, secret: SecretString) -> Self {
        let mut credential = Self::bare(identity);
        credential.set_secret(kind, secret);
        credential
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub const fn kind(&self) -> SecretKind {
        self.kind
    }

    /// The secret payload, if one is attached. Reading the underlying
    /// bytes requires [`secrecy::ExposeSecret`] at the call site.
    pub fn secret(&self) -> Option<&SecretString> {
        self.secret.as_ref()
    }

    /// Installs a new secret, disposing of the previous one before the new
    /// one lands. Passing [`SecretKind::None`] is equivalent to
    /// [`dispose_secret`](Self::dispose_secret): the provided payload is
    /// wiped immediately.
    pub fn set_secret(&mut self, kind: SecretKind, secret: SecretString) {
        self.dispose_secret();
        if kind != SecretKind::None {
            self.kind = kind;
            self.secret = Some(secret);
        }
    }

    /// Clears the kind to [`SecretKind::None`] and wipes the payload.
    /// Idempotent.
    pub fn dispose_secret(&mut self) {
        self.kind = SecretKind::None;
        self.secret = None;
    }
}
