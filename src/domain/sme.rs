use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, require_text, Displayable, Identifiable};
use crate::errors::{LedgerError, LedgerResult};

const ID_WIDTH: usize = 3;

/// Registry key of an SME: a zero-padded decimal sequence number (`001`, `002`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmeId(String);

impl SmeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Formats a sequence number; values past 999 simply grow wider.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{:0width$}", sequence, width = ID_WIDTH))
    }

    /// Numeric value of the id, if it parses as an integer.
    pub fn sequence(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SmeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SmeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Canonical stored form of an SME. Carries source fields only; payment
/// totals and status live on [`crate::ledger::ProjectedSme`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sme {
    pub id: SmeId,
    pub name: String,
    pub phone: String,
    pub tool_given: String,
    pub total_cost: f64,
    pub daily_rate: f64,
}

impl Sme {
    pub(crate) fn from_fields(id: SmeId, fields: SmeFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            tool_given: fields.tool_given,
            total_cost: fields.total_cost,
            daily_rate: fields.daily_rate,
        }
    }

    pub(crate) fn apply(&mut self, fields: SmeFields) {
        self.name = fields.name;
        self.phone = fields.phone;
        self.tool_given = fields.tool_given;
        self.total_cost = fields.total_cost;
        self.daily_rate = fields.daily_rate;
    }
}

impl Identifiable for Sme {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}

impl Displayable for Sme {
    fn display_label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }
}

/// Text form of the SME fields as entered at the boundary (forms, shell arguments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmeDraft {
    pub name: String,
    pub phone: String,
    pub tool_given: String,
    pub total_cost: String,
    pub daily_rate: String,
}

impl SmeDraft {
    pub fn new(name: impl Into<String>, tool_given: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tool_given: tool_given.into(),
            ..Self::default()
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn total_cost(mut self, total_cost: impl ToString) -> Self {
        self.total_cost = total_cost.to_string();
        self
    }

    pub fn daily_rate(mut self, daily_rate: impl ToString) -> Self {
        self.daily_rate = daily_rate.to_string();
        self
    }

    /// Validates the draft into typed fields.
    pub fn validate(&self) -> LedgerResult<SmeFields> {
        let name = require_text("Name", &self.name).map_err(LedgerError::Validation)?;
        let tool_given =
            require_text("Tool given", &self.tool_given).map_err(LedgerError::Validation)?;
        let total_cost = non_negative("Total cost", &self.total_cost)?;
        let daily_rate = non_negative("Daily rate", &self.daily_rate)?;
        Ok(SmeFields {
            name,
            phone: self.phone.trim().to_string(),
            tool_given,
            total_cost,
            daily_rate,
        })
    }
}

fn non_negative(field: &str, raw: &str) -> LedgerResult<f64> {
    let value = parse_amount(field, raw).map_err(LedgerError::Validation)?;
    if value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(value)
}

/// Validated mutable SME fields. Only obtainable through [`SmeDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct SmeFields {
    name: String,
    phone: String,
    tool_given: String,
    total_cost: f64,
    daily_rate: f64,
}

impl SmeFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
