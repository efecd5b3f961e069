//! Data captured by the location, PSTN and phone number forms.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_EMAIL_LANGUAGE: &str = "English - American English";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub name: String,
    pub country: String,
    pub address: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub email_language: String,
}

impl Default for LocationData {
    fn default() -> Self {
        Self {
            name: String::new(),
            country: String::new(),
            address: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            timezone: String::new(),
            email_language: DEFAULT_EMAIL_LANGUAGE.to_string(),
        }
    }
}

impl LocationData {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("location name"));
        }
        if self.country.trim().is_empty() {
            return Err(Error::MissingField("country"));
        }
        if self.address.trim().is_empty() {
            return Err(Error::MissingField("address"));
        }
        Ok(())
    }

    /// "123 Main St, Springfield, IL 62701"
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }
}

/// Country codes offered by the location form
pub const COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("CA", "Canada"),
    ("GB", "United Kingdom"),
    ("AU", "Australia"),
    ("IN", "India"),
    ("DE", "Germany"),
    ("FR", "France"),
];

/// Timezones offered by the location form
pub const TIMEZONES: &[(&str, &str)] = &[
    ("America/New_York", "Eastern Time (US & Canada)"),
    ("America/Chicago", "Central Time (US & Canada)"),
    ("America/Denver", "Mountain Time (US & Canada)"),
    ("America/Los_Angeles", "Pacific Time (US & Canada)"),
    ("Europe/London", "London"),
    ("Asia/Kolkata", "India Standard Time"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    Cisco,
    CloudConnected,
    PremisesBased,
}

impl ConnectionType {
    pub fn all() -> Vec<ConnectionType> {
        vec![
            ConnectionType::Cisco,
            ConnectionType::CloudConnected,
            ConnectionType::PremisesBased,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::Cisco => "Cisco Calling Plans",
            ConnectionType::CloudConnected => "Cloud Connected PSTN",
            ConnectionType::PremisesBased => "Premises-based PSTN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConnectionType::Cisco => "Cisco provides the numbers and the PSTN connection",
            ConnectionType::CloudConnected => "Use a certified cloud PSTN provider",
            ConnectionType::PremisesBased => "Connect through a local gateway on site",
        }
    }

    /// Cloud connected needs a second page to pick the provider
    pub fn needs_provider(&self) -> bool {
        matches!(self, ConnectionType::CloudConnected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PstnProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub certified: bool,
}

pub const PSTN_PROVIDERS: &[PstnProvider] = &[
    PstnProvider { id: "averistar", name: "Averistar", certified: true },
    PstnProvider { id: "bandwidth", name: "Bandwidth", certified: true },
    PstnProvider { id: "brcx", name: "BRCX", certified: true },
    PstnProvider { id: "fusion-connect", name: "Fusion Connect", certified: true },
    PstnProvider { id: "intelepeer", name: "Intelepeer", certified: true },
    PstnProvider { id: "nuwave", name: "Nuwave", certified: true },
    PstnProvider { id: "peerless", name: "Peerless", certified: true },
    PstnProvider { id: "pure-ip", name: "Pure IP", certified: true },
    PstnProvider { id: "allstream", name: "AllStream", certified: false },
    PstnProvider { id: "calltower", name: "CallTower", certified: false },
    PstnProvider { id: "convergia", name: "Convergia", certified: false },
    PstnProvider { id: "firstdigital", name: "FirstDigital", certified: false },
    PstnProvider { id: "gtt", name: "GTT", certified: false },
    PstnProvider { id: "ntt", name: "NTT", certified: false },
    PstnProvider { id: "sinch", name: "Sinch", certified: false },
    PstnProvider { id: "tata", name: "Tata", certified: false },
];

pub fn find_provider(id: &str) -> Option<&'static PstnProvider> {
    PSTN_PROVIDERS.iter().find(|p| p.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PstnData {
    pub connection_type: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl PstnData {
    pub fn validate(&self) -> Result<()> {
        if self.connection_type.needs_provider() && self.provider.is_none() {
            return Err(Error::MissingProvider);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumbersData {
    pub numbers: Vec<String>,
    pub activate_later: bool,
}

impl PhoneNumbersData {
    pub fn validate(&self) -> Result<()> {
        if self.numbers.is_empty() {
            return Err(Error::NoPhoneNumbers);
        }
        Ok(())
    }
}

/// Split comma separated input into trimmed, non-empty numbers
pub fn parse_numbers(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_location() -> LocationData {
        LocationData {
            name: "Austin Branch".into(),
            country: "US".into(),
            address: "500 Congress Ave".into(),
            city: "Austin".into(),
            state: "TX".into(),
            zip_code: "78701".into(),
            ..LocationData::default()
        }
    }

    #[test]
    fn test_location_requires_name_country_address() {
        assert!(filled_location().validate().is_ok());

        let mut location = filled_location();
        location.name = "  ".into();
        assert!(matches!(location.validate(), Err(Error::MissingField("location name"))));

        let mut location = filled_location();
        location.country.clear();
        assert!(matches!(location.validate(), Err(Error::MissingField("country"))));

        let mut location = filled_location();
        location.address.clear();
        assert!(matches!(location.validate(), Err(Error::MissingField("address"))));
    }

    #[test]
    fn test_full_address() {
        assert_eq!(
            filled_location().full_address(),
            "500 Congress Ave, Austin, TX 78701"
        );
    }

    #[test]
    fn test_cloud_connected_needs_provider() {
        let pstn = PstnData {
            connection_type: ConnectionType::CloudConnected,
            provider: None,
        };
        assert!(matches!(pstn.validate(), Err(Error::MissingProvider)));

        let pstn = PstnData {
            connection_type: ConnectionType::Cisco,
            provider: None,
        };
        assert!(pstn.validate().is_ok());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(
            parse_numbers(" 4507832223, (450) 783-2223 ,,+1-450-783-2223 "),
            vec!["4507832223", "(450) 783-2223", "+1-450-783-2223"]
        );
        assert!(parse_numbers(" , ").is_empty());
    }

    #[test]
    fn test_provider_lookup() {
        assert_eq!(find_provider("pure-ip").map(|p| p.name), Some("Pure IP"));
        assert!(!find_provider("tata").unwrap().certified);
        assert!(find_provider("acme").is_none());
    }
}
