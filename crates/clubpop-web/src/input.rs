#![forbid(unsafe_code)]

//! Keypress normalization for the global close shortcut.

/// Legacy `keyCode` for Escape, still the only signal on very old engines.
pub const ESCAPE_LEGACY_KEY_CODE: u32 = 27;

/// Whether a keyboard event means "dismiss the popup".
///
/// Modern engines report `key == "Escape"`, IE-era ones `"Esc"`, and the
/// oldest only a numeric `keyCode`.
#[must_use]
pub fn is_escape(key: &str, key_code: u32) -> bool {
    matches!(key, "Escape" | "Esc") || key_code == ESCAPE_LEGACY_KEY_CODE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_escape_spelling() {
        assert!(is_escape("Escape", 0));
        assert!(is_escape("Esc", 0));
        assert!(is_escape("", ESCAPE_LEGACY_KEY_CODE));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_escape("Enter", 13));
        assert!(!is_escape("escape", 0), "key names are case sensitive");
        assert!(!is_escape("Escap", 0));
        assert!(!is_escape("q", 81));
    }
}
