//! Bluetooth UUID helpers and FIDO service identification
//!
//! Two FIDO predicates live here and are intentionally kept apart:
//! [`is_known_fido_short_uuid`] is an exact match on the four 16-bit forms,
//! [`is_fido_related_uuid`] also accepts any UUID that merely contains one of
//! them. They disagree on e.g. `1234fffd-...`.

/// Suffix of the Bluetooth SIG base UUID
pub const BLUETOOTH_BASE_UUID_SUFFIX: &str = "-0000-1000-8000-00805f9b34fb";

/// FIDO-related 16-bit service UUIDs
pub const FIDO_SERVICE_UUID: &str = "fffd";
pub const CABLE_SERVICE_UUID: &str = "fff9";
pub const FIDO_TEST_UUID: &str = "fffc";
pub const FIDO_ALTERNATIVE_UUID: &str = "fffe";

pub const FIDO_SHORT_UUIDS: [&str; 4] = [
    FIDO_SERVICE_UUID,
    CABLE_SERVICE_UUID,
    FIDO_TEST_UUID,
    FIDO_ALTERNATIVE_UUID,
];

/// True for a 4-hex-digit UUID such as `fff9`
pub fn is_short_uuid(uuid: &str) -> bool {
    uuid.len() == 4 && uuid.chars().all(|c| c.is_ascii_hexdigit())
}

/// Expand a 16-bit short UUID to the 128-bit Bluetooth base form
///
/// Returns `None` for anything that is not a short UUID.
pub fn expand_short_uuid(short: &str) -> Option<String> {
    if !is_short_uuid(short) {
        return None;
    }
    Some(format!(
        "0000{}{}",
        short.to_ascii_lowercase(),
        BLUETOOTH_BASE_UUID_SUFFIX
    ))
}

/// Collapse a 128-bit Bluetooth base UUID back to its 16-bit short form
pub fn collapse_uuid(uuid: &str) -> Option<String> {
    let lower = uuid.to_ascii_lowercase();
    let short = lower
        .strip_prefix("0000")?
        .strip_suffix(BLUETOOTH_BASE_UUID_SUFFIX)?;
    is_short_uuid(short).then(|| short.to_string())
}

/// Strict check: the short form is exactly one of the four FIDO UUIDs
pub fn is_known_fido_short_uuid(short: &str) -> bool {
    FIDO_SHORT_UUIDS
        .iter()
        .any(|fido| short.eq_ignore_ascii_case(fido))
}

/// Loose check: exact match on a full FIDO UUID, or any UUID containing a FIDO short form
pub fn is_fido_related_uuid(uuid: &str) -> bool {
    let lower = uuid.to_ascii_lowercase();
    let exact = FIDO_SHORT_UUIDS
        .iter()
        .filter_map(|short| expand_short_uuid(short))
        .any(|full| full == lower);

    exact || FIDO_SHORT_UUIDS.iter().any(|short| lower.contains(short))
}
