use serde::{Deserialize, Serialize};

/// Best-effort identity of the network client that sent a request.
///
/// Derived from proxy forwarding headers and therefore spoofable; it is only
/// suitable as a throttling key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientIdentifier(String);

impl ClientIdentifier {
    /// Sentinel used when no forwarding header identifies the client.
    pub const UNKNOWN: &'static str = "unknown";

    /// Wraps a raw identifier, falling back to the sentinel when blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::unknown();
        }

        Self(trimmed.to_owned())
    }

    /// The shared identifier for clients that could not be identified.
    #[must_use]
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_owned())
    }

    /// Resolves the client from `x-forwarded-for` (first hop) and then
    /// `x-real-ip`.
    #[must_use]
    pub fn from_forwarding_headers(forwarded_for: Option<&str>, real_ip: Option<&str>) -> Self {
        forwarded_for
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or_else(|| real_ip.map(str::trim).filter(|value| !value.is_empty()))
            .map(Self::new)
            .unwrap_or_else(Self::unknown)
    }

    /// Returns true for the fallback identifier.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ClientIdentifier {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientIdentifier;

    #[test]
    fn forwarded_for_uses_first_hop() {
        let client =
            ClientIdentifier::from_forwarding_headers(Some(" 203.0.113.7, 10.0.0.1"), None);
        assert_eq!(client.as_str(), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_used_when_forwarded_for_is_blank() {
        let client = ClientIdentifier::from_forwarding_headers(Some(""), Some("198.51.100.4"));
        assert_eq!(client.as_str(), "198.51.100.4");
    }

    #[test]
    fn missing_headers_fall_back_to_unknown() {
        let client = ClientIdentifier::from_forwarding_headers(None, None);
        assert!(client.is_unknown());
        assert_eq!(client.to_string(), "unknown");
    }

    #[test]
    fn blank_identifier_is_unknown() {
        assert!(ClientIdentifier::new("  ").is_unknown());
    }
}
