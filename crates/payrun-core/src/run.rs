//! One reconciliation run over already-loaded inputs.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, info_span};

use payrun_ingest::{PayrunData, SheetTable};
use payrun_model::{LayoutConfig, MappingTable, UnresolvedPolicy};

use crate::align::{BankAccounts, EmployeeDirectory, UnresolvedDuplicate, align};
use crate::context::{RunContext, extract_context};
use crate::error::Result;
use crate::identity::resolve_identities;
use crate::project::{
    OutputRegion, build_employee_form, build_green_region, build_info_region, build_red_region,
    regions,
};

/// Everything a run reads, already parsed.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub payrun: PayrunData,
    /// Where `payrun` was read from; named in context errors.
    pub payrun_source: PathBuf,
    pub primary: SheetTable,
    pub bank_accounts: Vec<Value>,
    pub employees: Vec<Value>,
    pub mapping: MappingTable,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub layout: LayoutConfig,
    pub on_unresolved: UnresolvedPolicy,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub context: RunContext,
    pub employee_count: usize,
    /// Regions in write order: info, green, red, employee form.
    pub regions: Vec<OutputRegion>,
    /// Duplicates left empty under [`UnresolvedPolicy::Report`].
    pub unresolved: Vec<UnresolvedDuplicate>,
}

/// Reconciles one profile's sources into output regions.
///
/// Nothing is written here; the caller decides where regions land.
pub fn reconcile(inputs: RunInputs, options: &RunOptions) -> Result<RunOutput> {
    let RunInputs {
        payrun,
        payrun_source,
        primary,
        bank_accounts,
        employees,
        mapping,
    } = inputs;

    let context = extract_context(&payrun.meta, &payrun_source)?;
    let span = info_span!(
        "reconcile",
        company = %context.company,
        pay_date = %context.pay_date,
    );
    let _guard = span.enter();

    let primary = resolve_identities(primary, &options.layout.primary_id_column)?;
    let canonical = primary.ids();

    let (bank, mut unresolved) = align(bank_accounts, canonical, &context, &BankAccounts)?
        .resolve(options.on_unresolved)?;
    let (directory, directory_unresolved) =
        align(employees, canonical, &context, &EmployeeDirectory)?
            .resolve(options.on_unresolved)?;
    unresolved.extend(directory_unresolved);

    let info_frame = build_info_region(&context)?;
    let green_frame = build_green_region(&primary, &directory, &bank)?;
    let red_frame = build_red_region(&primary, &payrun, &mapping);
    let form_frame = build_employee_form();

    info!(
        employees = primary.len(),
        bank_matched = bank.matched(),
        directory_matched = directory.matched(),
        unresolved = unresolved.len(),
        "reconciled payrun"
    );

    Ok(RunOutput {
        employee_count: primary.len(),
        regions: regions(
            &options.layout,
            info_frame,
            green_frame,
            red_frame,
            form_frame,
        ),
        unresolved,
        context,
    })
}
