//! Tax estimate result
//!
//! The tax estimation itself happens elsewhere; this is the shape of its
//! answer, which the calculator path reads to seed income amounts and
//! what-if adjustments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;

/// One component of the estimate expressed at the four estimate periods
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxPeriodAmounts {
    #[serde(default)]
    pub weekly: Amount,
    #[serde(default)]
    pub fortnightly: Amount,
    #[serde(default)]
    pub monthly: Amount,
    #[serde(default)]
    pub yearly: Amount,
}

/// Result of a remote tax estimate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxEstimateResult {
    #[serde(default)]
    pub tax_year: String,
    #[serde(default)]
    pub is_estimated: bool,
    #[serde(default)]
    pub salary_annual: Amount,
    #[serde(default)]
    pub gross_annual: Amount,
    #[serde(default)]
    pub taxable_annual: Amount,
    #[serde(default)]
    pub novated_lease_annual: Amount,
    #[serde(default)]
    pub income_tax_annual: Amount,
    #[serde(default)]
    pub medicare_annual: Amount,
    #[serde(default)]
    pub mls_annual: Amount,
    #[serde(default)]
    pub super_annual: Amount,
    #[serde(default)]
    pub net_annual: Amount,

    #[serde(default)]
    pub net: TaxPeriodAmounts,
    #[serde(default)]
    pub gross: TaxPeriodAmounts,
    #[serde(default)]
    pub income_tax: TaxPeriodAmounts,
    #[serde(default)]
    pub medicare: TaxPeriodAmounts,
    #[serde(default)]
    pub mls: TaxPeriodAmounts,
    #[serde(default, rename = "Super")]
    pub superannuation: TaxPeriodAmounts,
}

/// Which component of an estimate to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateField {
    #[default]
    Net,
    Gross,
    IncomeTax,
    Medicare,
    Mls,
    Super,
}

impl EstimateField {
    pub fn periods<'a>(&self, result: &'a TaxEstimateResult) -> &'a TaxPeriodAmounts {
        match self {
            Self::Net => &result.net,
            Self::Gross => &result.gross,
            Self::IncomeTax => &result.income_tax,
            Self::Medicare => &result.medicare,
            Self::Mls => &result.mls,
            Self::Super => &result.superannuation,
        }
    }

    /// The annual figure the daily bucket is derived from
    pub fn annual(&self, result: &TaxEstimateResult) -> Amount {
        match self {
            Self::Net => result.net_annual,
            Self::Gross => result.gross_annual,
            Self::IncomeTax => result.income_tax_annual,
            Self::Medicare => result.medicare_annual,
            Self::Mls => result.mls_annual,
            Self::Super => result.super_annual,
        }
    }
}

impl fmt::Display for EstimateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Net => "Net",
            Self::Gross => "Gross",
            Self::IncomeTax => "IncomeTax",
            Self::Medicare => "Medicare",
            Self::Mls => "Mls",
            Self::Super => "Super",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for EstimateField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "net" => Ok(Self::Net),
            "gross" => Ok(Self::Gross),
            "incometax" => Ok(Self::IncomeTax),
            "medicare" => Ok(Self::Medicare),
            "mls" => Ok(Self::Mls),
            "super" => Ok(Self::Super),
            _ => Err(format!("Unknown estimate field: {}", s)),
        }
    }
}
