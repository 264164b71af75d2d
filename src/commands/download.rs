use anyhow::{Result, anyhow};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use wbi::component::Component;
use wbi::config;
use wbi::os::OperatingSystem;
use wbi::resolve::Resolver;
use wbi::utils::download;
use wbi::version::VersionRequest;

pub fn execute(
    component: Component,
    version: &VersionRequest,
    os: Option<OperatingSystem>,
    dest: Option<PathBuf>,
) -> Result<()> {
    let config = config::load_config()?;
    let os = super::target_os(os, &config)?;

    if *version == VersionRequest::Latest {
        println!("Fetching latest {} version for {}...", component, os);
    }

    let resolver = Resolver::new(config.catalog_source()?);
    let reference = resolver.try_resolve_installer(component, version, os)?;

    println!("Downloading {} {}", component, reference.version().green());

    let dest_dir = match dest.or_else(|| config.download_dir.clone()) {
        Some(dir) => dir,
        None => config::get_dirs()?.downloads_dir,
    };
    fs::create_dir_all(&dest_dir)?;

    let file_name = reference
        .file_name()
        .ok_or_else(|| anyhow!("Cannot derive a file name from {}", reference.url))?;
    let download_path = dest_dir.join(file_name);

    if download_path.exists() {
        println!("{} is already downloaded", download_path.display());
        return Ok(());
    }

    let partial_path = dest_dir.join(format!("{}.part", file_name));
    download::download_file(&reference.url, &partial_path)?;
    fs::rename(&partial_path, &download_path)?;

    println!("Saved installer to {}", download_path.display().to_string().green());

    Ok(())
}
