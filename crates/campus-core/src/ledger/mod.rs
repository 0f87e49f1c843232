//! Mock certificate ledger.
//!
//! Each certificate id maps to a fingerprint: the SHA-256 of the id and a
//! transaction-style reference derived from its prefix. There is no chain, no
//! signing and no consensus; verification is a lookup into an index computed
//! once from the [`RecordStore`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::records::RecordStore;

/// Hex characters of the digest kept in the reference.
pub const REFERENCE_PREFIX_LEN: usize = 16;

/// Lowercase hex SHA-256 of the certificate id's UTF-8 bytes (64 chars).
pub fn certificate_digest(cert_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(cert_id.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fingerprint stored for one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub cert_id: String,
    pub hash: String,
    /// `"0x"` followed by the first [`REFERENCE_PREFIX_LEN`] characters of `hash`.
    pub reference: String,
}

impl LedgerEntry {
    pub fn for_certificate(cert_id: &str) -> Self {
        let hash = certificate_digest(cert_id);
        let reference = format!("0x{}", &hash[..REFERENCE_PREFIX_LEN]);
        Self {
            cert_id: cert_id.to_string(),
            hash,
            reference,
        }
    }
}

/// Immutable cert_id -> [`LedgerEntry`] index.
#[derive(Debug, Clone, Default)]
pub struct LedgerIndex {
    entries: HashMap<String, LedgerEntry>,
}

impl LedgerIndex {
    /// Fingerprints every certificate in the store, once, in listed order.
    pub fn build(store: &RecordStore) -> Self {
        let mut entries = HashMap::with_capacity(store.certificate_count());
        for (student_id, cert) in store.certificates() {
            let entry = LedgerEntry::for_certificate(&cert.cert_id);
            tracing::debug!(
                target: "campus::ledger",
                cert_id = %cert.cert_id,
                owner = %student_id,
                reference = %entry.reference,
                "Certificate recorded"
            );
            entries.insert(cert.cert_id.clone(), entry);
        }
        tracing::info!(target: "campus::ledger", entries = entries.len(), "Ledger index built");
        Self { entries }
    }

    pub fn verify(&self, cert_id: &str) -> Option<&LedgerEntry> {
        self.entries.get(cert_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
