//! Canonical client schema definitions.
//!
//! Every output column belongs to exactly one [`FieldClass`]. The column
//! sets below come from the upstream banking-client dataset; the
//! transform pipeline only coerces columns that appear in a set, so an
//! input frame carrying a subset of them is fine.

/// Semantic class of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldClass {
    /// Textual amounts with optional thousands separators; coerced to f64.
    Currency,
    /// Best-effort numeric; downcast to integer when lossless.
    Integer,
    /// Day-month-year source pattern, coerced to a date column.
    Date,
    /// Trimmed and title-cased free text.
    Text,
}

/// Identity key for deduplication. Rows without it are dropped outright.
pub const CLIENT_ID: &str = "client_id";

/// Fields a row must carry a non-blank value for to survive the filter.
pub const CRITICAL_FIELDS: [&str; 2] = [CLIENT_ID, "name"];

pub const CURRENCY_FIELDS: [&str; 9] = [
    "estimated_income",
    "superannuation_savings",
    "credit_card_balance",
    "bank_loans",
    "bank_deposits",
    "checking_accounts",
    "saving_accounts",
    "foreign_currency_account",
    "business_lending",
];

pub const INTEGER_FIELDS: [&str; 5] = [
    "age",
    "location_id",
    "amount_of_credit_cards",
    "properties_owned",
    "risk_weighting",
];

pub const DATE_FIELDS: [&str; 3] = ["joined_bank", "last_contact", "last_meeting"];

pub const TEXT_FIELDS: [&str; 9] = [
    "name",
    "sex",
    "banking_contact",
    "nationality",
    "occupation",
    "investment_advisor",
    "fee_structure",
    "loyalty_classification",
    "banking_relationship",
];

/// Numeric source of the derived category.
pub const RISK_WEIGHTING: &str = "risk_weighting";

/// Derived categorical column; never present in source input.
pub const RISK_CATEGORY: &str = "risk_category";

/// Sentinel substituted for missing text values.
pub const TEXT_SENTINEL: &str = "Unknown";

/// Look up the class of a canonical (already normalized) column name.
pub fn field_class(name: &str) -> Option<FieldClass> {
    if CURRENCY_FIELDS.contains(&name) {
        Some(FieldClass::Currency)
    } else if INTEGER_FIELDS.contains(&name) {
        Some(FieldClass::Integer)
    } else if DATE_FIELDS.contains(&name) {
        Some(FieldClass::Date)
    } else if TEXT_FIELDS.contains(&name) {
        Some(FieldClass::Text)
    } else {
        None
    }
}
