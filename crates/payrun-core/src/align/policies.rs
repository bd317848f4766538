//! Source-specific filter and tie-break rules.

use payrun_model::SourceRecord;

use crate::context::RunContext;

/// How one auxiliary source is matched to a run.
pub trait SourcePolicy {
    /// Name used in logs and errors.
    fn source_name(&self) -> &str;

    /// Field holding the employee identity.
    fn identity_field(&self) -> &str;

    /// Whether the record belongs to the run's company (and country).
    fn in_context(&self, record: &SourceRecord, ctx: &RunContext) -> bool;

    /// Field whose absence disqualifies a record when an employee has
    /// several. `None` means duplicates cannot be narrowed at all.
    fn distinguishing_field(&self) -> Option<&str> {
        None
    }
}

/// `bankaccounts.json`: one record per account.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankAccounts;

impl SourcePolicy for BankAccounts {
    fn source_name(&self) -> &str {
        "bankaccounts"
    }

    fn identity_field(&self) -> &str {
        "employee"
    }

    // TODO: narrow further by `bankCountry == countryAbbr` and
    // `primaryBankAccount` once the payroll team confirms those rules.
    fn in_context(&self, record: &SourceRecord, ctx: &RunContext) -> bool {
        record
            .value("company")
            .is_some_and(|company| ctx.company_id.matches_json(company))
    }

    fn distinguishing_field(&self) -> Option<&str> {
        Some("iban")
    }
}

/// `ee_data.json`: the master employee directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeDirectory;

impl SourcePolicy for EmployeeDirectory {
    fn source_name(&self) -> &str {
        "ee_data"
    }

    fn identity_field(&self) -> &str {
        "id"
    }

    // Both country name and abbreviation must match; the data has no
    // reliable country code field.
    fn in_context(&self, record: &SourceRecord, ctx: &RunContext) -> bool {
        let in_company = record
            .value("companyRef.id")
            .is_some_and(|id| ctx.company_id.matches_json(id));
        let in_country = record.text("countryRef.name").as_deref() == Some(ctx.country.as_str())
            && record.text("countryRef.abbreviature").as_deref()
                == Some(ctx.country_abbr.as_str());
        in_company && in_country
    }
}
