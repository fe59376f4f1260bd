//! String conversion utilities for Windows API

/// Convert a Rust string to a null-terminated Windows wide string (UTF-16)
pub fn string_to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert an optional system name to a wide string.
///
/// `None` and the empty string both select the local system and map to `None`,
/// which callers pass to the OS as a null pointer.
pub fn system_name_to_wide(system_name: Option<&str>) -> Option<Vec<u16>> {
    match system_name {
        Some(name) if !name.is_empty() => Some(string_to_wide(name)),
        _ => None,
    }
}

/// Convert Windows wide string (UTF-16) to Rust string, stopping at the first null
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}
