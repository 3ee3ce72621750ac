use masking::Secret;
use serde::Deserialize;

/// Gateway region. Each region runs its own NetGate endpoint and allows a
/// different set of currencies and card brands.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum Server {
    #[default]
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "UK")]
    Uk,
}

impl Server {
    pub fn base_url(&self) -> &'static str {
        match self {
            Server::NorthAmerica => "https://www.iatspayments.com",
            Server::Uk => "https://www.uk.iatspayments.com",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Server::NorthAmerica => "NA",
            Server::Uk => "UK",
        }
    }

    /// Whether this region's acquirer accepts the given currency and method
    /// of payment combination. Checked client-side before dispatch.
    pub fn supports(&self, currency: &str, mop: &str) -> bool {
        match self {
            Server::NorthAmerica => match currency {
                "USD" => matches!(mop, "VISA" | "MC" | "AMX" | "AMEX" | "DSC"),
                "CAD" => matches!(mop, "VISA" | "MC" | "AMX" | "AMEX"),
                _ => false,
            },
            Server::Uk => match currency {
                "GBP" | "EUR" => matches!(mop, "VISA" | "MC" | "AMX" | "AMEX" | "MAESTR"),
                _ => false,
            },
        }
    }
}

/// Account credentials for one NetGate agent.
///
/// Immutable once constructed; the password is wrapped so it never shows up
/// in `Debug` output or log events. Deserializable so callers can pull it
/// straight from a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    agent_code: String,
    password: Secret<String>,
    server: Server,
}

impl Credentials {
    pub fn new(
        agent_code: impl Into<String>,
        password: impl Into<String>,
        server: Server,
    ) -> Self {
        Self {
            agent_code: agent_code.into(),
            password: Secret::new(password.into()),
            server,
        }
    }

    pub fn agent_code(&self) -> &str {
        &self.agent_code
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }

    pub fn server(&self) -> Server {
        self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("TEST88", "hunter2", Server::NorthAmerica);
        let printed = format!("{credentials:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("TEST88"));
    }

    #[test]
    fn test_deserializes_from_config() {
        let credentials: Credentials = serde_json::from_str(
            r#"{"agent_code":"TEST88","password":"hunter2","server":"UK"}"#,
        )
        .unwrap();
        assert_eq!(credentials.agent_code(), "TEST88");
        assert_eq!(credentials.server(), Server::Uk);
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn test_na_mop_currency_matrix() {
        let na = Server::NorthAmerica;
        assert!(na.supports("USD", "VISA"));
        assert!(na.supports("USD", "DSC"));
        assert!(na.supports("CAD", "MC"));
        // Discover is US-only.
        assert!(!na.supports("CAD", "DSC"));
        assert!(!na.supports("GBP", "VISA"));
    }

    #[test]
    fn test_uk_mop_currency_matrix() {
        let uk = Server::Uk;
        assert!(uk.supports("GBP", "VISA"));
        assert!(uk.supports("EUR", "MAESTR"));
        assert!(!uk.supports("USD", "VISA"));
    }

    #[test]
    fn test_server_endpoints() {
        assert_eq!(Server::NorthAmerica.name(), "NA");
        assert_eq!(Server::Uk.base_url(), "https://www.uk.iatspayments.com");
    }
}
