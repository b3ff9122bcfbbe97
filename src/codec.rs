//! Entity codec: JSON encoding of stored records.
//!
//! Records are stored as compact field-tagged JSON with the field names
//! pinned in [`crate::state`], so this crate stays byte-compatible with
//! records written by earlier deployments. Codec failures carry the store
//! key so a corrupt record is identifiable.

use crate::error::{LedgerError, Result};
use crate::store::StateStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize an entity to its stored byte representation.
///
/// # Errors
///
/// Returns [`LedgerError::Codec`] naming `key` if serialization fails.
pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| LedgerError::Codec {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

/// Deserialize an entity from its stored byte representation.
///
/// # Errors
///
/// Returns [`LedgerError::Codec`] naming `key` if the bytes do not decode
/// into the expected entity shape.
pub fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::Codec {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

/// Read and decode the record under `key`, if present.
pub(crate) async fn read_record<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: StateStore,
{
    match store.get(key).await? {
        Some(bytes) => Ok(Some(decode(key, &bytes)?)),
        None => Ok(None),
    }
}

/// Encode `value` and write the full record under `key`.
pub(crate) async fn write_record<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: StateStore,
{
    store.put(key, encode(key, value)?).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::state::{EventId, Ticket, TicketId};
    use crate::store::MemoryStore;

    #[test]
    fn test_decode_failure_names_the_key() {
        let err = decode::<Ticket>("T1", b"not json").unwrap_err();
        assert!(matches!(err, LedgerError::Codec { ref key, .. } if key == "T1"));
    }

    #[test]
    fn test_decode_wrong_shape_is_a_codec_error() {
        // Valid JSON, wrong entity shape.
        let err = decode::<Ticket>("T1", br#"{"ID":"T1"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Codec { .. }));
    }

    #[tokio::test]
    async fn test_record_round_trip_through_store() {
        let store = MemoryStore::new();
        let ticket = Ticket::available(TicketId::new("T1"), EventId::new("E1"));

        write_record(&store, "T1", &ticket).await.unwrap();
        let read: Option<Ticket> = read_record(&store, "T1").await.unwrap();
        assert_eq!(read, Some(ticket));

        let absent: Option<Ticket> = read_record(&store, "T2").await.unwrap();
        assert_eq!(absent, None);
    }
}
