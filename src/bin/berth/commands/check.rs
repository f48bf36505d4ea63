//! `berth check` command

use anyhow::{bail, Result};

use super::Session;
use crate::cli::CheckArgs;
use berth::ops::{all_satisfied, check_products, Locator};
use berth::util::diagnostic::suggestions;

pub fn execute(args: CheckArgs, verbose: bool) -> Result<()> {
    let session = Session::load(&args.products)?;
    let locator = Locator::new(session.platform).verbose(verbose);

    let report = check_products(&session.products, &locator);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let width = report.iter().map(|s| s.variable.len()).max().unwrap_or(0);
        for status in &report {
            match &status.path {
                Some(path) => println!(
                    "  ok       {:width$}  {}",
                    status.variable,
                    path.display(),
                    width = width
                ),
                None => println!(
                    "  missing  {:width$}  {}",
                    status.variable,
                    status.description,
                    width = width
                ),
            }
        }
    }

    if !all_satisfied(&report) {
        let missing = report.iter().filter(|s| !s.satisfied()).count();
        bail!(
            "{} of {} products unsatisfied for {}\n{}",
            missing,
            report.len(),
            session.platform,
            suggestions::UNSATISFIED
        );
    }

    Ok(())
}
