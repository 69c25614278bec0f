//! Persisted records
//!
//! Settings and choices are stored as postcard payloads wrapped in a small
//! envelope that identifies and checks them:
//!
//! ```text
//! MAGIC (4, "ROTA") | VERSION (1) | KIND (1) | LEN (4, LE) | PAYLOAD | CRC32 (4, LE)
//! ```
//!
//! The CRC covers `KIND | LEN | PAYLOAD`. Anything that fails a check is
//! treated as absent, so a bad record can never reach the wheel.

use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::choices::ChoiceList;
use crate::traits::{SessionStore, StorageKey, StoreError};

use super::types::WheelSettings;

/// Magic number identifying a record ("ROTA")
pub const RECORD_MAGIC: u32 = 0x524F5441;

/// Current record format version
pub const RECORD_VERSION: u8 = 1;

/// Bytes before the payload
pub const HEADER_LEN: usize = 4 + 1 + 1 + 4;

/// Bytes after the payload
pub const TRAILER_LEN: usize = 4;

/// Errors while saving or loading a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Storage backend failed
    Store(StoreError),
    /// Value could not be serialized
    Encode,
    /// Payload could not be deserialized
    Decode,
    /// Not a record
    BadMagic,
    /// Record written by another format version
    VersionMismatch,
    /// Record belongs to a different key
    WrongKind,
    /// Record shorter than its header claims
    Truncated,
    /// Checksum mismatch
    CrcMismatch,
}

impl From<StoreError> for PersistError {
    fn from(e: StoreError) -> Self {
        PersistError::Store(e)
    }
}

/// Wrap a value into a record
pub fn encode_record<T: Serialize>(key: StorageKey, value: &T) -> Result<Vec<u8>, PersistError> {
    let payload = postcard::to_allocvec(value).map_err(|_| PersistError::Encode)?;
    let len = u32::try_from(payload.len()).map_err(|_| PersistError::Encode)?;

    let mut record = Vec::with_capacity(HEADER_LEN + payload.len() + TRAILER_LEN);
    record.extend_from_slice(&RECORD_MAGIC.to_be_bytes());
    record.push(RECORD_VERSION);
    record.push(key.as_u8());
    record.extend_from_slice(&len.to_le_bytes());
    record.extend_from_slice(&payload);

    let crc = crc32(&record[5..]);
    record.extend_from_slice(&crc.to_le_bytes());

    Ok(record)
}

/// Check a record and decode its payload
pub fn decode_record<T: DeserializeOwned>(
    key: StorageKey,
    bytes: &[u8],
) -> Result<T, PersistError> {
    if bytes.len() < HEADER_LEN + TRAILER_LEN {
        return Err(PersistError::Truncated);
    }

    let magic = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if magic != RECORD_MAGIC {
        return Err(PersistError::BadMagic);
    }
    if bytes[4] != RECORD_VERSION {
        return Err(PersistError::VersionMismatch);
    }
    if StorageKey::from_u8(bytes[5]) != Some(key) {
        return Err(PersistError::WrongKind);
    }

    let len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    if len > bytes.len() - HEADER_LEN - TRAILER_LEN {
        return Err(PersistError::Truncated);
    }
    let end = HEADER_LEN + len;

    let stored = u32::from_le_bytes([bytes[end], bytes[end + 1], bytes[end + 2], bytes[end + 3]]);
    if stored != crc32(&bytes[5..end]) {
        return Err(PersistError::CrcMismatch);
    }

    postcard::from_bytes(&bytes[HEADER_LEN..end]).map_err(|_| PersistError::Decode)
}

/// Encode a value and write it to the store
pub fn save<S, T>(store: &mut S, key: StorageKey, value: &T) -> Result<(), PersistError>
where
    S: SessionStore + ?Sized,
    T: Serialize,
{
    let record = encode_record(key, value)?;
    store.save(key, &record)?;
    Ok(())
}

/// Read a value from the store and decode it
pub fn load<S, T>(store: &mut S, key: StorageKey) -> Result<T, PersistError>
where
    S: SessionStore + ?Sized,
    T: DeserializeOwned,
{
    let record = store.load(key)?;
    decode_record(key, &record)
}

/// Load settings, falling back to defaults on any error
pub fn load_settings<S: SessionStore + ?Sized>(store: &mut S) -> WheelSettings {
    load(store, StorageKey::Settings).unwrap_or_default()
}

pub fn save_settings<S: SessionStore + ?Sized>(
    store: &mut S,
    settings: &WheelSettings,
) -> Result<(), PersistError> {
    save(store, StorageKey::Settings, settings)
}

/// Load the saved choice list, if there is a valid one
pub fn load_choices<S: SessionStore + ?Sized>(store: &mut S) -> Option<ChoiceList> {
    load(store, StorageKey::Choices).ok()
}

pub fn save_choices<S: SessionStore + ?Sized>(
    store: &mut S,
    choices: &ChoiceList,
) -> Result<(), PersistError> {
    save(store, StorageKey::Choices, choices)
}

/// Load the saved choices, or the examples when none are saved
///
/// A saved empty list counts as none.
pub fn load_choices_or_examples<S: SessionStore + ?Sized>(store: &mut S) -> ChoiceList {
    match load_choices(store) {
        Some(list) if !list.is_empty() => list,
        _ => ChoiceList::examples(),
    }
}

/// CRC32 (IEEE 802.3) of a byte slice
pub fn crc32(data: &[u8]) -> u32 {
    !crc32_update(0xFFFF_FFFF, data)
}

fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory session store
    #[derive(Default)]
    struct MemoryStore {
        entries: BTreeMap<u8, Vec<u8>>,
        unavailable: bool,
    }

    impl SessionStore for MemoryStore {
        fn load(&mut self, key: StorageKey) -> Result<Vec<u8>, StoreError> {
            if self.unavailable {
                return Err(StoreError::Unavailable);
            }
            self.entries
                .get(&key.as_u8())
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        fn save(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StoreError> {
            if self.unavailable {
                return Err(StoreError::Unavailable);
            }
            self.entries.insert(key.as_u8(), data.to_vec());
            Ok(())
        }
    }

    fn custom_settings() -> WheelSettings {
        let mut settings = WheelSettings {
            spin_duration_s: 4.5,
            initial_speed: 7.0,
            text_size_px: 18.0,
            frame_skip: 1,
            ..WheelSettings::default()
        };
        settings.set_colors(["#112233", "tomato"]);
        settings
    }

    #[test]
    fn test_crc32_known_value() {
        // Standard check value for "123456789"
        assert_eq!(crc32(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_record_layout() {
        let record = encode_record(StorageKey::Settings, &custom_settings()).unwrap();

        assert_eq!(&record[0..4], b"ROTA");
        assert_eq!(record[4], RECORD_VERSION);
        assert_eq!(record[5], StorageKey::Settings.as_u8());
        let len_bytes = [record[6], record[7], record[8], record[9]];
        let payload_len = u32::from_le_bytes(len_bytes) as usize;
        assert_eq!(record.len(), HEADER_LEN + payload_len + TRAILER_LEN);
    }

    #[test]
    fn test_settings_survive_store() {
        let mut store = MemoryStore::default();
        save_settings(&mut store, &custom_settings()).unwrap();

        assert_eq!(load_settings(&mut store), custom_settings());
    }

    #[test]
    fn test_choices_survive_store() {
        let mut store = MemoryStore::default();
        let mut list = ChoiceList::parse("tea\ncoffee\nwater");
        list.toggle(1);
        save_choices(&mut store, &list).unwrap();

        assert_eq!(load_choices(&mut store), Some(list));
    }

    #[test]
    fn test_large_choice_list_survives_store() {
        let mut store = MemoryStore::default();
        let labels: Vec<std::string::String> =
            (0..1000).map(|i| std::format!("{} {}", i, "x".repeat(120))).collect();
        let list = ChoiceList::from_labels(&labels);
        save_choices(&mut store, &list).unwrap();

        let loaded = load_choices(&mut store).unwrap();
        assert_eq!(loaded.len(), 1000);
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_missing_loads_defaults() {
        let mut store = MemoryStore::default();
        assert_eq!(load_settings(&mut store), WheelSettings::default());
        assert_eq!(load_choices(&mut store), None);
        assert_eq!(load_choices_or_examples(&mut store), ChoiceList::examples());
    }

    #[test]
    fn test_unavailable_store() {
        let mut store = MemoryStore {
            unavailable: true,
            ..MemoryStore::default()
        };
        assert_eq!(
            save_settings(&mut store, &WheelSettings::default()),
            Err(PersistError::Store(StoreError::Unavailable))
        );
        assert_eq!(load_settings(&mut store), WheelSettings::default());
    }

    #[test]
    fn test_empty_saved_choices_use_examples() {
        let mut store = MemoryStore::default();
        save_choices(&mut store, &ChoiceList::new()).unwrap();
        assert_eq!(load_choices_or_examples(&mut store), ChoiceList::examples());
    }

    #[test]
    fn test_corruption_detected() {
        let record = encode_record(StorageKey::Settings, &custom_settings()).unwrap();

        let mut flipped = record.clone();
        flipped[HEADER_LEN + 2] ^= 0x40;
        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &flipped),
            Err(PersistError::CrcMismatch)
        );

        let mut bad_magic = record.clone();
        bad_magic[0] = b'X';
        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &bad_magic),
            Err(PersistError::BadMagic)
        );

        let mut bad_version = record.clone();
        bad_version[4] = RECORD_VERSION + 1;
        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &bad_version),
            Err(PersistError::VersionMismatch)
        );

        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &record[..record.len() - 1]),
            Err(PersistError::Truncated)
        );
        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &record[..3]),
            Err(PersistError::Truncated)
        );
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut record = encode_record(StorageKey::Settings, &custom_settings()).unwrap();
        record[6..10].copy_from_slice(&u32::MAX.to_le_bytes());

        assert_eq!(
            decode_record::<WheelSettings>(StorageKey::Settings, &record),
            Err(PersistError::Truncated)
        );
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let mut store = MemoryStore::default();
        let record = encode_record(StorageKey::Settings, &custom_settings()).unwrap();
        store.save(StorageKey::Choices, &record).unwrap();

        assert_eq!(
            load::<_, ChoiceList>(&mut store, StorageKey::Choices),
            Err(PersistError::WrongKind)
        );
        assert_eq!(load_choices(&mut store), None);
    }

    #[test]
    fn test_foreign_data_loads_defaults() {
        let mut store = MemoryStore::default();
        store.save(StorageKey::Settings, b"{\"duration\":10}").unwrap();
        assert_eq!(load_settings(&mut store), WheelSettings::default());
    }
}
