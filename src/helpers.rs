use chrono::{NaiveDateTime, Utc};

/// Current UTC time without offset, matching the `timestamp` columns
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub mod base58 {
    use uuid::Uuid;

    pub fn to_string(id: Uuid) -> String {
        bs58::encode(id.as_bytes()).into_string()
    }

    /// Decode a base58 token back into its UUID, `None` when malformed
    pub fn decode(token: &str) -> Option<Uuid> {
        let bytes = bs58::decode(token.trim()).into_vec().ok()?;

        Uuid::from_slice(&bytes).ok()
    }
}
