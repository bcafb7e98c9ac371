use super::Identifier;
use serde::{Deserialize, Serialize};

/// Largest `decimal_power` whose unit (`10^power`) fits in an `i64`
pub const MAX_DECIMAL_POWER: u32 = 18;

/// Asset type an account is denominated in
///
/// `decimal_power` is the number of fractional digits a human-entered amount
/// may carry; amounts are always stored in the smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Identifier,
    pub name: String,
    pub symbol: String,
    pub decimal_power: u32,
}

impl Asset {
    pub fn new(id: impl Into<Identifier>, name: impl Into<String>, decimal_power: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: String::new(),
            decimal_power,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn has_supported_precision(&self) -> bool {
        self.decimal_power <= MAX_DECIMAL_POWER
    }

    /// Render a smallest-unit amount with the asset's decimal places
    pub fn format_amount(&self, amount: i64) -> String {
        if self.decimal_power == 0 {
            return amount.to_string();
        }
        let unit = 10_i128.pow(self.decimal_power);
        let value = amount as i128;
        let sign = if value < 0 { "-" } else { "" };
        let abs = value.abs();
        format!(
            "{sign}{}.{:0width$}",
            abs / unit,
            abs % unit,
            width = self.decimal_power as usize
        )
    }
}
