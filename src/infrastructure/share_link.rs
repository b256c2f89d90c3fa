// Outbound share link construction
const SHARE_BASE_URL: &str = "https://wa.me/?text=";

/// Build the message-sharing URL for a formatted share text. The caller
/// hands the URL to the host environment; responsibility ends at correct
/// percent-encoding.
pub fn share_url(message: &str) -> String {
    format!("{SHARE_BASE_URL}{}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_percent_encodes_message() {
        let url = share_url("*Customer:* Alice\n- Total Power: 28.8 W");
        assert!(url.starts_with("https://wa.me/?text="));
        assert!(url.contains("%2ACustomer%3A%2A%20Alice%0A"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
    }
}
