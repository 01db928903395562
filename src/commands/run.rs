//! Run command: resolve, expand, then vendorize

use std::path::PathBuf;

use console::Style;

use super::helpers::Session;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::resolver;
use crate::vendor;

/// Run the vendorization.
///
/// All packages are resolved before the output directory is touched, so an
/// unresolvable name leaves a previous vendor tree intact even with
/// `cleanBefore`.
pub fn run(cwd: Option<PathBuf>, args: &RunArgs) -> Result<()> {
    let session = Session::open(cwd, &args.overrides())?;
    let vendor_set = resolver::expand(&session.resolver(), &session.config.requests)?;
    let entries = vendor::run(&session.config, &session.project_root, &vendor_set)?;

    let output = session.config.output_dir(&session.project_root);
    println!(
        "{} Vendored {} package{} into {}",
        Style::new().green().bold().apply_to("✓"),
        entries.len(),
        if entries.len() == 1 { "" } else { "s" },
        output.display()
    );
    for entry in &entries {
        println!(
            "  {} {}",
            Style::new().cyan().apply_to(&entry.relative_target_path),
            Style::new().dim().apply_to(&entry.source_package)
        );
    }

    Ok(())
}
