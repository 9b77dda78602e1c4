//! Domain expiration results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A root domain whose registration ran out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExpiredDomain {
    /// Registrable root domain, e.g. `example.co.uk`.
    pub domain: String,
    /// Expiration date reported by the registry.
    pub expiration_date: DateTime<Utc>,
}
