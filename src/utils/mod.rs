pub mod download;

use anyhow::{Result, Context};
use std::fs;
use std::path::Path;
use crate::os::OperatingSystem;
use crate::options::verbose;

const OS_RELEASE: &str = "/etc/os-release";

pub fn detect_os() -> Result<OperatingSystem> {
    detect_os_from(Path::new(OS_RELEASE))
}

pub fn detect_os_from(path: &Path) -> Result<OperatingSystem> {
    verbose::log(&format!("Reading {}", path.display()));
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let os = OperatingSystem::from_os_release(&contents)?;
    verbose::log(&format!("Detected {}", os));
    Ok(os)
}
