use core::str::FromStr;
use serde::{Deserialize, Serialize};

use chemsales_core::{DomainError, ValueObject};

/// Billing contact typed into the cart panel.
///
/// Free text; the only rule (non-empty name, company and email) is checked at
/// receipt time, see [`crate::ensure_ready`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub company: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ValueObject for CustomerInfo {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerField {
    Name,
    Company,
    Email,
    Phone,
}

impl CustomerField {
    pub const REQUIRED: [CustomerField; 3] =
        [CustomerField::Name, CustomerField::Company, CustomerField::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Company => "company",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, CustomerField::Phone)
    }
}

impl core::fmt::Display for CustomerField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(CustomerField::Name),
            "company" => Ok(CustomerField::Company),
            "email" => Ok(CustomerField::Email),
            "phone" => Ok(CustomerField::Phone),
            _ => Err(DomainError::validation(format!(
                "unknown customer field {s:?}; expected one of: name, company, email, phone"
            ))),
        }
    }
}

impl CustomerInfo {
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Company => &self.company,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
        }
    }

    /// Replace one field verbatim (no trimming).
    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CustomerField::Name => self.name = value,
            CustomerField::Company => self.company = value,
            CustomerField::Email => self.email = value,
            CustomerField::Phone => self.phone = value,
        }
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<CustomerField> {
        CustomerField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }
}
