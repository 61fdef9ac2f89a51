use serde::{Deserialize, Serialize};

use crate::CompanyInfo;

/// The fixed registry of tracked companies, resolved at process start.
///
/// Defaults to the built-in list below; can be replaced by a TOML file:
/// ```toml
/// [[company]]
/// name = "Microsoft"
/// symbol = "MSFT"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Watchlist {
    #[serde(rename = "company")]
    pub companies: Vec<CompanyInfo>,
}

impl Watchlist {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read watchlist at '{path}': {e}"));
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse watchlist at '{path}': {e}"))
    }

    /// Resolve the display name for a symbol, if it is a tracked company.
    pub fn display_name(&self, symbol: &str) -> Option<&str> {
        self.companies
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.display_name.as_str())
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        let companies = [
            ("Microsoft", "MSFT"),
            ("Amazon", "AMZN"),
            ("Google", "GOOGL"),
            ("Facebook / Meta", "META"),
            ("Netflix", "NFLX"),
            ("Nvidia", "NVDA"),
            ("Intel", "INTC"),
            ("Adobe", "ADBE"),
            ("PayPal", "PYPL"),
            ("Salesforce", "CRM"),
            ("Uber", "UBER"),
            ("Lyft", "LYFT"),
            ("Shopify", "SHOP"),
            ("Square / Block", "SQ"),
            ("Spotify", "SPOT"),
            ("Twitter / X", "TWTR"),
            ("Zoom Video", "ZM"),
            ("Pinterest", "PINS"),
            ("Oracle", "ORCL"),
            ("IBM", "IBM"),
            ("Cisco", "CSCO"),
            ("Qualcomm", "QCOM"),
            ("AMD", "AMD"),
            ("American Express", "AXP"),
            ("Visa", "V"),
            ("Mastercard", "MA"),
            ("Bank of America", "BAC"),
        ]
        .into_iter()
        .map(|(name, symbol)| CompanyInfo {
            display_name: name.to_string(),
            symbol: symbol.to_string(),
        })
        .collect();

        Self { companies }
    }
}
