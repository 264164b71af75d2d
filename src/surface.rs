//! Text-only adapters for hosts that cannot receive structured errors.
//!
//! Every function takes plain strings and returns plain strings. An empty
//! string means "not found"; the reason is only reported as a warning.

use crate::component::Component;
use crate::options::verbose;
use crate::os::OperatingSystem;
use crate::resolve::{CatalogSource, Resolver};
use crate::version::VersionRequest;

fn parse_os(os_code: &str) -> Option<OperatingSystem> {
    os_code
        .parse()
        .map_err(|e| verbose::warn(&format!("{}", e)))
        .ok()
}

/// Space-separated installable versions, newest first.
pub fn versions<S: CatalogSource>(source: S, component: Component, os_code: &str) -> String {
    let Some(os) = parse_os(os_code) else {
        return String::new();
    };
    Resolver::new(source).list_versions(component, os).join(" ")
}

/// Installer URL for `version` (or `latest`).
pub fn installer_url<S: CatalogSource>(
    source: S,
    component: Component,
    os_code: &str,
    version: &str,
) -> String {
    let Some(os) = parse_os(os_code) else {
        return String::new();
    };
    let request = match version.parse::<VersionRequest>() {
        Ok(request) => request,
        Err(e) => {
            verbose::warn(&format!("{}", e));
            return String::new();
        }
    };
    Resolver::new(source).resolve_installer(component, &request, os).url
}

/// `(version, url)` of the newest installer for the platform.
pub fn latest_installer<S: CatalogSource>(
    source: S,
    component: Component,
    os_code: &str,
) -> (String, String) {
    let Some(os) = parse_os(os_code) else {
        return (String::new(), String::new());
    };
    let reference = Resolver::new(source).resolve_installer(component, &VersionRequest::Latest, os);
    (reference.version().to_string(), reference.url)
}

pub fn r_versions<S: CatalogSource>(source: S, os_code: &str) -> String {
    versions(source, Component::R, os_code)
}

pub fn r_url<S: CatalogSource>(source: S, os_code: &str, version: &str) -> String {
    installer_url(source, Component::R, os_code, version)
}

pub fn python_versions<S: CatalogSource>(source: S, os_code: &str) -> String {
    versions(source, Component::Python, os_code)
}

pub fn python_url<S: CatalogSource>(source: S, os_code: &str, version: &str) -> String {
    installer_url(source, Component::Python, os_code, version)
}

pub fn quarto_versions<S: CatalogSource>(source: S, os_code: &str) -> String {
    versions(source, Component::Quarto, os_code)
}

pub fn quarto_url<S: CatalogSource>(source: S, os_code: &str, version: &str) -> String {
    installer_url(source, Component::Quarto, os_code, version)
}

pub fn workbench_url<S: CatalogSource>(source: S, os_code: &str) -> (String, String) {
    latest_installer(source, Component::Workbench, os_code)
}

pub fn driver_url<S: CatalogSource>(source: S, os_code: &str) -> (String, String) {
    latest_installer(source, Component::ProDrivers, os_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::StaticSource;

    fn source() -> StaticSource {
        StaticSource::new()
            .with(Component::R, r#"{"r_versions": ["3.5.3", "4.2.1", "4.2.0"]}"#)
            .with(
                Component::Quarto,
                r#"[{"tag_name": "v1.3.340"}, {"tag_name": "v1.2.475"}]"#,
            )
    }

    #[test]
    fn version_lists_are_space_joined() {
        assert_eq!(r_versions(&source(), "U20"), "4.2.1 4.2.0 3.5.3");
        assert_eq!(r_versions(&source(), "RH9"), "4.2.1 4.2.0");
        assert_eq!(quarto_versions(&source(), "rh7"), "1.3.340 1.2.475");
    }

    #[test]
    fn bad_os_code_yields_empty_string() {
        assert_eq!(r_versions(&source(), "WIN11"), "");
        assert_eq!(r_url(&source(), "", "4.2.1"), "");
        assert_eq!(workbench_url(&source(), "XX"), (String::new(), String::new()));
    }

    #[test]
    fn urls_follow_the_version_text() {
        assert_eq!(
            r_url(&source(), "RH8", "4.2.0"),
            "https://cdn.rstudio.com/r/centos-8/pkgs/R-4.2.0-1-1.x86_64.rpm"
        );
        assert_eq!(r_url(&source(), "RH8", "latest"), r_url(&source(), "RH8", "4.2.1"));
        assert_eq!(r_url(&source(), "RH8", "not-a-version"), "");
        assert_eq!(r_url(&source(), "RH9", "3.5.3"), "");
    }

    #[test]
    fn missing_catalogs_are_empty_not_errors() {
        assert_eq!(python_versions(&source(), "U22"), "");
        assert_eq!(python_url(&source(), "U22", "3.10.4"), "");
        assert_eq!(driver_url(&source(), "U22"), (String::new(), String::new()));
    }
}
