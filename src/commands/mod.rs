pub mod config;
pub mod detect;
pub mod download;
pub mod repo_url;
pub mod url;
pub mod versions;

use anyhow::Result;
use wbi::config::Config;
use wbi::options::verbose;
use wbi::os::OperatingSystem;
use wbi::utils;

/// `--os` first, then the configured default, then detection.
pub fn target_os(explicit: Option<OperatingSystem>, config: &Config) -> Result<OperatingSystem> {
    if let Some(os) = explicit {
        return Ok(os);
    }
    if let Some(os) = config.default_os()? {
        verbose::log(&format!("Using default OS {} from config", os.code()));
        return Ok(os);
    }
    utils::detect_os()
}
