//! Human-readable names for hardware identifiers.
//!
//! Lookup is exact-match. Anything not in the table comes back unchanged, so
//! new hardware shows its raw identifier instead of failing.

/// Known identifier → display name pairs.
const KNOWN_PLATFORMS: &[(&str, &str)] = &[
    ("iPhone1,1", "iPhone 1G"),
    ("iPhone1,2", "iPhone 3G"),
    ("iPhone2,1", "iPhone 3GS"),
    ("iPhone3,1", "iPhone 4G"),
    ("iPod1,1", "iPod Touch 1G"),
    ("iPod2,1", "iPod Touch 2G"),
    ("iPad1,1", "iPad"),
];

pub fn display_name(raw: &str) -> String {
    KNOWN_PLATFORMS
        .iter()
        .find(|(token, _)| *token == raw)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Target architecture this binary was compiled for (e.g. `x86_64`), used
/// as the raw platform token. Not a host hardware model.
pub fn platform() -> String {
    std::env::consts::ARCH.to_string()
}

pub fn platform_display_name() -> String {
    display_name(&platform())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_token() {
        assert_eq!(display_name("iPhone1,1"), "iPhone 1G");
        assert_eq!(display_name("iPad1,1"), "iPad");
        assert_eq!(display_name("iPod2,1"), "iPod Touch 2G");
    }

    #[test]
    fn test_unknown_token_passes_through() {
        assert_eq!(display_name("totally-unknown-token"), "totally-unknown-token");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_match_is_exact() {
        assert_eq!(display_name("iPhone1,1 "), "iPhone1,1 ");
        assert_eq!(display_name("iphone1,1"), "iphone1,1");
        assert_eq!(display_name("iPhone1"), "iPhone1");
    }

    #[test]
    fn test_platform_is_target_arch() {
        assert_eq!(platform(), std::env::consts::ARCH);
    }

    #[test]
    fn test_platform_is_never_empty() {
        assert!(!platform().is_empty());
        assert!(!platform_display_name().is_empty());
    }
}
