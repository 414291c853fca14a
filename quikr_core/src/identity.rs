//! Client identifiers persisted across page sessions.
//!
//! Two independent identifiers are kept: one for the chat session and one
//! for the device. Both are created lazily and reused verbatim afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::KeyValueStore;

/// Storage slot holding the session identifier.
pub const SESSION_ID_KEY: &str = "chat_session_id";

/// Storage slot holding the device identifier.
pub const DEVICE_ID_KEY: &str = "chat_device_mac_id";

/// Opaque UUID-v4-style token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generate a fresh `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx` token.
    ///
    /// The version nibble is always `4` and the variant nibble is one of
    /// `8`, `9`, `a`, `b`.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether `value` follows the generated layout.
    ///
    /// Stored values are reused even when this returns `false`.
    #[must_use]
    pub fn is_well_formed(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.len() != 36 {
            return false;
        }
        bytes.iter().enumerate().all(|(i, &b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            14 => b == b'4',
            19 => matches!(b, b'8' | b'9' | b'a' | b'b'),
            _ => b.is_ascii_digit() || (b'a'..=b'f').contains(&b),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The pair of identifiers sent with every webhook request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub session_id: Identifier,
    pub device_id: Identifier,
}

/// Reads identifiers from a [`KeyValueStore`], creating them on first use.
pub struct IdentityManager<S> {
    store: S,
}

impl<S: KeyValueStore> IdentityManager<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Return the identifier in `key`, generating and storing one if the
    /// slot is missing or empty.
    ///
    /// Storage failures never surface: the caller gets an identifier that
    /// lives only as long as this process.
    pub async fn get_or_create(&self, key: &str) -> Identifier {
        match self.store.get(key).await {
            Ok(Some(value)) if !value.is_empty() => {
                if !Identifier::is_well_formed(&value) {
                    debug!("Reusing non-standard identifier in slot {key}");
                }
                return Identifier(value);
            }
            Ok(_) => {}
            Err(e) => {
                // A failed read must not overwrite a slot that may hold a value.
                warn!("Identity storage unavailable for {key}: {e}. Using unpersisted identifier");
                return Identifier::generate();
            }
        }

        let identifier = Identifier::generate();
        match self.store.set(key, identifier.as_str()).await {
            Ok(()) => info!("Created identifier for slot {key}"),
            Err(e) => warn!("Failed to persist identifier for {key}: {e}"),
        }
        identifier
    }

    /// Load (or create) both the session and the device identifier.
    pub async fn client_identity(&self) -> ClientIdentity {
        let session_id = self.get_or_create(SESSION_ID_KEY).await;
        let device_id = self.get_or_create(DEVICE_ID_KEY).await;
        debug!("Client identity: session={session_id} device={device_id}");
        ClientIdentity {
            session_id,
            device_id,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
