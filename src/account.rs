// SPDX-FileCopyrightText: 2025 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use log::{debug, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{
    authorizer::Authorizer,
    credential::{Credential, SecretKind},
    error::Result,
    identity::Identity,
    provider::IdentityProvider,
};

const RECORD_SEPARATOR: char = ':';

/// Policy knobs for a [`SimpleAccountAuthority`], deserializable from the
/// embedding application's configuration.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AccountOptions {
    /// Whether an account with an empty stored password can authenticate
    /// with any secret, or none at all. When disabled, passwordless
    /// accounts never authenticate.
    pub allow_no_password: bool,
}

impl Default for AccountOptions {
    fn default() -> Self {
        Self {
            allow_no_password: true,
        }
    }
}

#[derive(Debug)]
struct Account {
    identity: Identity,
    password: SecretString,
}

/// An in-memory account store that doubles as both sides of a
/// [`SessionAuthority`](crate::SessionAuthority): it resolves names to the
/// identities it owns and verifies plaintext passwords against them.
///
/// Accounts keep their insertion order, and adding an existing name again
/// mints a distinct principal rather than replacing the old one; callers
/// that want unique names remove the old account first.
#[derive(Debug, Default)]
pub struct SimpleAccountAuthority {
    accounts: Vec<Account>,
    options: AccountOptions,
}

impl SimpleAccountAuthority {
    pub fn new() -> Self {
        Self::with_options(AccountOptions::default())
    }

    pub const fn with_options(options: AccountOptions) -> Self {
        Self {
            accounts: Vec::new(),
            options,
        }
    }

    pub const fn options(&self) -> AccountOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Appends an account with a freshly minted identity and returns the
    /// account count after insertion.
    pub fn add_account(&mut self, name: &str, password: &str) -> usize {
        let identity = self.create_identity(name);
        self.accounts.push(Account {
            identity,
            password: SecretString::new(password.to_owned()),
        });
        self.accounts.len()
    }

    /// Removes the first account matching the name, retiring its
    /// identity. Returns whether a match was found.
    pub fn remove_account(&mut self, name: &str) -> bool {
        match self
            .accounts
            .iter()
            .position(|account| account.identity.name() == name)
        {
            Some(index) => {
                let _ = self.accounts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Loads accounts from a line stream of `name:password` records,
    /// splitting each on the first separator; the password may be empty,
    /// the name may not. Records that cannot be parsed are skipped with a
    /// warning and blank lines are skipped silently. Returns the number of
    /// accounts loaded by this call.
    pub fn load_accounts<Source: BufRead>(&mut self, source: Source) -> Result<usize> {
        let mut loaded: usize = 0;
        for (position, line) in source.lines().enumerate() {
            let raw = line?;
            let record = raw.trim();
            if record.is_empty() {
                continue;
            }

            match record.split_once(RECORD_SEPARATOR) {
                Some((name, password)) if !name.is_empty() => {
                    let _ = self.add_account(name, password);
                    loaded += 1;
                }
                Some(_) | None => {
                    warn!("We can't parse the account record at line {}", position + 1);
                }
            }
        }

        Ok(loaded)
    }

    fn verify(&self, account: &Account, credential: &Credential) -> bool {
        if account.password.expose_secret().is_empty() {
            return self.options.allow_no_password;
        }

        match credential.kind() {
            SecretKind::Plaintext => credential.secret().map_or(false, |secret| {
                account
                    .password
                    .expose_secret()
                    .as_bytes()
                    .ct_eq(secret.expose_secret().as_bytes())
                    .unwrap_u8()
                    == 1
            }),
            SecretKind::None | SecretKind::HttpDigestMd5 | SecretKind::HttpDigestMd5Session => {
                debug!(
                    "We can't verify a {} secret against a stored password",
                    credential.kind()
                );
                false
            }
        }
    }
}

impl IdentityProvider for SimpleAccountAuthority {
    fn get_identity(&self, name: &str) -> Identity {
        self.accounts
            .iter()
            .find(|account| account.identity.name() == name)
            .map_or_else(Identity::unknown, |account| account.identity.clone())
    }
}

impl Authorizer for SimpleAccountAuthority {
    fn authenticate(&self, credential: &mut Credential) -> bool {
        let verified = match self
            .accounts
            .iter()
            .find(|account| &account.identity == credential.identity())
        {
            Some(account) => self.verify(account, credential),
            None => {
                debug!(
                    "We don't have an account for the identity {}",
                    credential.identity()
                );
                false
            }
        };

        credential.dispose_secret();
        verified
    }
}
