//! `berth locate` command

use anyhow::{anyhow, bail, Result};

use super::Session;
use crate::cli::LocateArgs;
use berth::ops::Locator;
use berth::util::diagnostic::suggestions;

pub fn execute(args: LocateArgs, verbose: bool) -> Result<()> {
    let session = Session::load(&args.products)?;

    let product = session
        .products
        .iter()
        .find(|p| p.variable_name() == args.name)
        .ok_or_else(|| {
            anyhow!(
                "no product named `{}` is declared\n{}",
                args.name,
                suggestions::UNKNOWN_PRODUCT
            )
        })?;

    let locator = Locator::new(session.platform).verbose(verbose);
    match locator.locate(product) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!(
            "{} is not satisfied for {}\n{}",
            product,
            session.platform,
            suggestions::UNSATISFIED
        ),
    }
}
