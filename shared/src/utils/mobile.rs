//! Mobile number utilities for the local `09xxxxxxxxx` numbering plan

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern every stored mobile number must match
pub const LOCAL_MOBILE_PATTERN: &str = r"^09[0-9]{9}$";

static LOCAL_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(LOCAL_MOBILE_PATTERN).expect("local mobile pattern is a valid regex")
});

/// Check if a mobile number is in local format (`09` followed by nine digits)
pub fn is_valid_local_mobile(mobile: &str) -> bool {
    LOCAL_MOBILE_REGEX.is_match(mobile)
}

/// Mask a mobile number for logs (e.g., 0912****789)
pub fn mask_mobile(mobile: &str) -> String {
    let chars: Vec<char> = mobile.chars().collect();
    if chars.len() >= 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_local_mobile() {
        assert!(is_valid_local_mobile("09123456789"));
        assert!(is_valid_local_mobile("09901234567"));
        assert!(!is_valid_local_mobile("9123456789")); // missing leading zero
        assert!(!is_valid_local_mobile("0912345678")); // too short
        assert!(!is_valid_local_mobile("091234567890")); // too long
        assert!(!is_valid_local_mobile("08123456789")); // wrong prefix
        assert!(!is_valid_local_mobile("+989123456789")); // international form
        assert!(!is_valid_local_mobile("0912345678a"));
    }

    #[test]
    fn test_mask_mobile() {
        assert_eq!(mask_mobile("09123456789"), "0912****789");
        assert_eq!(mask_mobile("12345"), "****");
    }
}
