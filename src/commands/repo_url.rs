use anyhow::Result;
use wbi::config;
use wbi::os::OperatingSystem;
use wbi::repos;

pub fn execute(server: Option<String>, repo: Option<String>, os: Option<OperatingSystem>) -> Result<()> {
    let config = config::load_config()?;
    let os = super::target_os(os, &config)?;

    let server = server
        .or_else(|| config.package_manager_url.clone())
        .unwrap_or_else(|| repos::PUBLIC_PACKAGE_MANAGER.to_string());
    let repo = repo
        .or_else(|| config.package_manager_repo.clone())
        .unwrap_or_else(|| repos::DEFAULT_REPO.to_string());

    let url = repos::binary_repo_url(&server, &repo, os)?;

    println!("{}", url);

    Ok(())
}
