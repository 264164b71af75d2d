use anyhow::Result;
use colored::Colorize;
use wbi::component::Component;
use wbi::config;
use wbi::os::OperatingSystem;
use wbi::resolve::Resolver;

pub fn execute(component: Component, os: Option<OperatingSystem>) -> Result<()> {
    let config = config::load_config()?;
    let os = super::target_os(os, &config)?;

    println!("Fetching available {} versions for {}...", component, os);

    let resolver = Resolver::new(config.catalog_source()?);
    let versions = resolver.try_list_versions(component, os)?;

    if versions.is_empty() {
        println!("No {} versions available for {}", component, os);
        return Ok(());
    }

    println!("\nAvailable {} versions:", component);

    for (i, version) in versions.iter().enumerate() {
        if i == 0 {
            println!("* {} (latest)", version.green());
        } else {
            println!("  {}", version);
        }
    }

    Ok(())
}
