use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle of an invoice: `Draft` → `Sent` → `Payed`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Payed,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Payed => "Payed",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Sent" => Ok(Self::Sent),
            "Payed" => Ok(Self::Payed),
            other => Err(format!("unknown invoice status {:?}", other)),
        }
    }
}

/// One priced group of sessions, or the inter-session package line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InvoiceItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(rename = "projectLevel", default)]
    pub project_level: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub student_status: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InvoiceDto {
    /// `OC-` followed by the invoice month
    pub id: String,
    /// Invoice month as `YYYY-MM`
    pub date: String,
    pub status: InvoiceStatus,
    pub total: f64,
    pub item: Vec<InvoiceItem>,
    /// Name of the attached document, if any
    pub filename: Option<String>,
}

/// Month selection for invoice creation
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InvoiceMonthParams {
    /// Four digit year
    pub year: String,
    /// Two digit month
    pub month: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InvoiceYearParams {
    pub year: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InvoiceStatusParams {
    pub status: InvoiceStatus,
}
