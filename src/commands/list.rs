//! List command: show the vendor set without copying anything

use std::path::PathBuf;

use console::Style;

use super::helpers::Session;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::resolver;
use crate::vendor::TargetAllocator;

pub fn run(cwd: Option<PathBuf>, args: &ListArgs) -> Result<()> {
    let session = Session::open(cwd, &args.overrides())?;
    let vendor_set = resolver::expand(&session.resolver(), &session.config.requests)?;

    println!(
        "{} ({} package{} into {}/)",
        Style::new().bold().apply_to(&session.config.owner_name),
        vendor_set.len(),
        if vendor_set.len() == 1 { "" } else { "s" },
        session.config.dir_name
    );

    if vendor_set.is_empty() {
        println!("  {}", Style::new().dim().apply_to("(nothing configured)"));
        return Ok(());
    }

    let mut allocator = TargetAllocator::new();
    for package in &vendor_set {
        let target = allocator.allocate(package)?;
        println!(
            "  {} {} {}",
            Style::new().bold().yellow().apply_to(package.locator()),
            Style::new().dim().apply_to("->"),
            Style::new().cyan().apply_to(format!("{}/{target}", session.config.dir_name))
        );
    }

    Ok(())
}
