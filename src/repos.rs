use thiserror::Error;
use crate::os::OperatingSystem;

pub const PUBLIC_PACKAGE_MANAGER: &str = "https://packagemanager.rstudio.com";
pub const DEFAULT_REPO: &str = "cran";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoUrlError {
    #[error("Package Manager URL must start with http:// or https://: {0}")]
    MissingScheme(String),

    #[error("Package Manager URL has no host: {0}")]
    MissingHost(String),

    #[error("invalid repository name: {0:?}")]
    InvalidRepo(String),
}

/// Trims whitespace and trailing slashes and checks the scheme.
pub fn normalize_server_url(raw: &str) -> Result<String, RepoUrlError> {
    let trimmed = raw.trim();
    let (scheme, rest) = ["https://", "http://"]
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(*scheme).map(|rest| (*scheme, rest)))
        .ok_or_else(|| RepoUrlError::MissingScheme(raw.to_string()))?;
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return Err(RepoUrlError::MissingHost(raw.to_string()));
    }
    Ok(format!("{}{}", scheme, rest))
}

/// Binary CRAN repository URL for `os`, e.g.
/// `https://packagemanager.rstudio.com/cran/__linux__/jammy/latest`.
pub fn binary_repo_url(server: &str, repo: &str, os: OperatingSystem) -> Result<String, RepoUrlError> {
    let server = normalize_server_url(server)?;
    let repo = repo.trim().trim_matches('/');
    if repo.is_empty() || repo.contains('/') || repo.contains(char::is_whitespace) {
        return Err(RepoUrlError::InvalidRepo(repo.to_string()));
    }
    Ok(format!("{}/{}/__linux__/{}/latest", server, repo, os.codename()))
}

pub fn public_repo_url(os: OperatingSystem) -> String {
    format!(
        "{}/{}/__linux__/{}/latest",
        PUBLIC_PACKAGE_MANAGER,
        DEFAULT_REPO,
        os.codename()
    )
}
