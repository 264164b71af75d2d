use anyhow::Result;
use colored::Colorize;
use wbi::component::Component;
use wbi::config;
use wbi::os::OperatingSystem;
use wbi::resolve::Resolver;
use wbi::version::VersionRequest;

pub fn execute(component: Component, version: &VersionRequest, os: Option<OperatingSystem>) -> Result<()> {
    let config = config::load_config()?;
    let os = super::target_os(os, &config)?;

    let resolver = Resolver::new(config.catalog_source()?);
    let reference = resolver.try_resolve_installer(component, version, os)?;

    println!("{} {} for {}", component, reference.version().green(), os);
    println!("{}", reference.url);

    Ok(())
}
