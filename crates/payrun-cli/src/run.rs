//! The whole run for one profile: load, reconcile, write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use payrun_core::dates::format_out_date;
use payrun_core::{RegionStatus, RunInputs, RunOptions, RunOutput, reconcile};
use payrun_ingest::{read_payrun_data, read_record_list, read_sheet_table, read_template_columns};
use payrun_map::MappingStore;
use payrun_model::{MappingTable, PayrunConfig, ProfilePaths, UnresolvedPolicy};
use payrun_output::{WorkbookWriter, sheet_path};

use crate::config::load_config;
use crate::logging::redact_value;
use crate::types::{MappingListing, MappingSummary, ProfileRequest, ProfileResult, RegionSummary};

pub fn run_profile(request: &ProfileRequest) -> Result<ProfileResult> {
    let root = &request.root;
    let span = info_span!("profile", root = %root.display());
    let _guard = span.enter();

    let config = load_config(root, request.config.as_deref())?;
    let paths = ProfilePaths::resolve(root, &config.paths);
    let options = run_options(&config, request.allow_unresolved);

    let (mapping, mapping_summary) = load_mapping(&config, &paths)?;

    let payrun = read_payrun_data(&paths.payrun_data)?;
    let primary = read_sheet_table(&paths.payrun_sheet, config.layout.primary_header_row)?;
    let bank_accounts = read_record_list(&paths.bank_accounts)?;
    let employees = read_record_list(&paths.employees)?;
    info!(
        primary_rows = primary.rows.len(),
        bank_accounts = bank_accounts.len(),
        employees = employees.len(),
        line_items = payrun.line_items.len(),
        "loaded sources"
    );

    let output = reconcile(
        RunInputs {
            payrun,
            payrun_source: paths.payrun_data.clone(),
            primary,
            bank_accounts,
            employees,
            mapping,
        },
        &options,
    )
    .with_context(|| format!("reconcile profile {}", root.display()))?;
    for duplicate in &output.unresolved {
        for candidate in &duplicate.candidates {
            let iban = candidate.text("iban").unwrap_or_default();
            trace!(employee = %duplicate.employee, iban = redact_value(&iban), "candidate record");
        }
    }

    let written = if request.dry_run {
        info!("dry run, result workbook not written");
        None
    } else {
        Some(write_workbook(&output, &paths)?)
    };

    Ok(summarize(request, &output, mapping_summary, written))
}

/// Loads (or scaffolds) a profile's mapping without reconciling anything.
pub fn inspect_mapping(request: &ProfileRequest) -> Result<MappingListing> {
    let config = load_config(&request.root, request.config.as_deref())?;
    let paths = ProfilePaths::resolve(&request.root, &config.paths);
    let (mapping, summary) = load_mapping(&config, &paths)?;
    Ok(MappingListing {
        summary,
        entries: mapping.entries().to_vec(),
    })
}

fn run_options(config: &PayrunConfig, allow_unresolved: bool) -> RunOptions {
    RunOptions {
        layout: config.layout.clone(),
        on_unresolved: if allow_unresolved {
            UnresolvedPolicy::Report
        } else {
            config.alignment.on_unresolved
        },
    }
}

fn load_mapping(
    config: &PayrunConfig,
    paths: &ProfilePaths,
) -> Result<(MappingTable, MappingSummary)> {
    let red = &config.layout.red;
    let template_sheet = sheet_path(&paths.template, &red.sheet);
    let columns = read_template_columns(
        &template_sheet,
        config.layout.template_header_row(),
        red.col,
    )
    .with_context(|| format!("read template columns from {}", template_sheet.display()))?;

    let store = MappingStore::new(&paths.mapping);
    let existed = store.exists();
    let mapping = store.load_or_create(&columns)?;
    let summary = MappingSummary {
        path: store.path().to_path_buf(),
        created: !existed && store.exists(),
        columns: mapping.len(),
        mapped: mapping.mapped().count(),
    };
    Ok((mapping, summary))
}

fn write_workbook(output: &RunOutput, paths: &ProfilePaths) -> Result<PathBuf> {
    let mut writer = WorkbookWriter::from_template(&paths.template, &paths.result)?;
    for region in &output.regions {
        if let RegionStatus::Stub { .. } = region.status {
            continue;
        }
        if let Err(err) = writer.write_frame(&region.frame, &region.location) {
            writer.discard()?;
            return Err(err.context(format!("write {} region", region.kind.label())));
        }
    }
    writer.finish()
}

fn summarize(
    request: &ProfileRequest,
    output: &RunOutput,
    mapping: MappingSummary,
    written: Option<PathBuf>,
) -> ProfileResult {
    let regions = output
        .regions
        .iter()
        .map(|region| {
            let stub_reason = match region.status {
                RegionStatus::Built => None,
                RegionStatus::Stub { reason } => Some(reason),
            };
            RegionSummary {
                region: region.kind.label(),
                origin: region.location.to_string(),
                rows: region.frame.height(),
                columns: region.frame.width(),
                stub_reason,
                written: written.is_some() && stub_reason.is_none(),
            }
        })
        .collect();
    ProfileResult {
        root: request.root.clone(),
        company: output.context.company.clone(),
        pay_date: format_out_date(output.context.pay_date),
        employees: output.employee_count,
        mapping,
        regions,
        unresolved: output.unresolved.iter().map(ToString::to_string).collect(),
        output: written,
    }
}
