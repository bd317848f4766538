use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info};

use payrun_cli::run::{inspect_mapping, run_profile};
use payrun_cli::types::{MappingListing, ProfileRequest, ProfileResult};

use crate::cli::{MappingArgs, RunArgs};

/// Results of a multi-profile run.
pub struct RunOutcome {
    pub results: Vec<ProfileResult>,
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

/// Runs every profile in order. A failing profile does not stop the others.
pub fn run_profiles(args: &RunArgs) -> RunOutcome {
    let mut outcome = RunOutcome {
        results: Vec::new(),
        failures: Vec::new(),
    };
    for profile in &args.profiles {
        let request = ProfileRequest {
            root: profile.clone(),
            config: args.config.clone(),
            allow_unresolved: args.allow_unresolved,
            dry_run: args.dry_run,
        };
        match run_profile(&request) {
            Ok(result) => outcome.results.push(result),
            Err(err) => {
                error!(profile = %profile.display(), error = %format!("{err:#}"), "profile failed");
                outcome.failures.push((profile.clone(), err));
            }
        }
    }
    info!(
        succeeded = outcome.results.len(),
        failed = outcome.failures.len(),
        "finished"
    );
    outcome
}

pub fn run_mapping(args: &MappingArgs) -> Result<MappingListing> {
    inspect_mapping(&ProfileRequest {
        root: args.profile.clone(),
        config: args.config.clone(),
        ..ProfileRequest::default()
    })
}
