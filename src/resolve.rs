//! Entry points shared by the CLI and the foreign-call surface.
//!
//! Every call fetches, parses and filters from scratch. A `Resolver` holds
//! nothing mutable, so it can be shared across threads freely.

use std::collections::BTreeMap;
use crate::catalog::{parse_catalog, Catalog};
use crate::component::Component;
use crate::error::{ResolveError, Result};
use crate::matrix::{Available, CompatibilityMatrix};
use crate::options::verbose;
use crate::os::OperatingSystem;
use crate::url::{build_reference, Arch, InstallerReference};
use crate::version::VersionRequest;

/// Supplies raw catalog metadata for a component.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self, component: Component) -> Result<Vec<u8>>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn fetch(&self, component: Component) -> Result<Vec<u8>> {
        (**self).fetch(component)
    }
}

/// Catalog bytes already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    payloads: BTreeMap<Component, Vec<u8>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, component: Component, payload: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(component, payload.into());
        self
    }
}

impl CatalogSource for StaticSource {
    fn fetch(&self, component: Component) -> Result<Vec<u8>> {
        self.payloads
            .get(&component)
            .cloned()
            .ok_or_else(|| ResolveError::FetchFailed {
                component,
                message: "no catalog payload provided".to_string(),
            })
    }
}

pub struct Resolver<S> {
    source: S,
    matrix: CompatibilityMatrix,
    arch: Arch,
}

impl<S: CatalogSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            matrix: CompatibilityMatrix::default(),
            arch: Arch::default(),
        }
    }

    pub fn with_matrix(mut self, matrix: CompatibilityMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }

    pub fn catalog(&self, component: Component) -> Result<Catalog> {
        verbose::log(&format!("Fetching {} catalog", component));
        let raw = self.source.fetch(component)?;
        parse_catalog(component, &raw)
    }

    /// Releases of `component` installable on `os`, newest first.
    pub fn available(&self, component: Component, os: OperatingSystem) -> Result<Available> {
        let catalog = self.catalog(component)?;
        self.matrix.available_for(&catalog, os)
    }

    pub fn try_list_versions(&self, component: Component, os: OperatingSystem) -> Result<Vec<String>> {
        let available = self.available(component, os)?;
        Ok(available.versions().map(|v| v.to_string()).collect())
    }

    /// Like [`Resolver::try_list_versions`], but failures become an empty
    /// list and a warning.
    pub fn list_versions(&self, component: Component, os: OperatingSystem) -> Vec<String> {
        self.try_list_versions(component, os).unwrap_or_else(|e| {
            verbose::warn(&format!("Could not list {} versions for {}: {}", component, os, e));
            Vec::new()
        })
    }

    pub fn try_resolve_installer(
        &self,
        component: Component,
        request: &VersionRequest,
        os: OperatingSystem,
    ) -> Result<InstallerReference> {
        let available = self.available(component, os)?;

        let version = match request {
            VersionRequest::Latest => available
                .latest()
                .map(|entry| entry.version.clone())
                .ok_or_else(|| ResolveError::VersionNotFound {
                    component,
                    version: request.to_string(),
                    os,
                })?,
            VersionRequest::Exact(version) => version.clone(),
        };

        let reference = build_reference(&available, &version, os, self.arch)?;
        verbose::log(&format!("Resolved {}", reference));
        Ok(reference)
    }

    /// Like [`Resolver::try_resolve_installer`], but failures become an
    /// unresolved reference with an empty URL.
    pub fn resolve_installer(
        &self,
        component: Component,
        request: &VersionRequest,
        os: OperatingSystem,
    ) -> InstallerReference {
        self.try_resolve_installer(component, request, os)
            .unwrap_or_else(|e| {
                verbose::warn(&format!("Could not resolve {} {} for {}: {}", component, request, os, e));
                InstallerReference::unresolved(component, os)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ReleaseVersion;

    const R_VERSIONS: &str = r#"{"r_versions": ["4.1.0", "4.2.0", "4.2.1"]}"#;

    fn exact(s: &str) -> VersionRequest {
        VersionRequest::Exact(ReleaseVersion::parse(s).unwrap())
    }

    #[test]
    fn latest_picks_newest_available() {
        let resolver = Resolver::new(StaticSource::new().with(Component::R, R_VERSIONS));
        let reference = resolver
            .try_resolve_installer(Component::R, &VersionRequest::Latest, OperatingSystem::Ubuntu22)
            .unwrap();
        assert_eq!(reference.version(), "4.2.1");
        assert_eq!(
            reference.url,
            "https://cdn.rstudio.com/r/ubuntu-2204/pkgs/r-4.2.1_1_amd64.deb"
        );
    }

    #[test]
    fn missing_payload_is_fetch_failed() {
        let resolver = Resolver::new(StaticSource::new());
        let err = resolver
            .try_resolve_installer(Component::Quarto, &VersionRequest::Latest, OperatingSystem::Redhat8)
            .unwrap_err();
        assert!(matches!(err, ResolveError::FetchFailed { component: Component::Quarto, .. }));
    }

    #[test]
    fn latest_on_empty_catalog_is_not_found() {
        let resolver = Resolver::new(StaticSource::new().with(Component::Python, ""));
        let err = resolver
            .try_resolve_installer(Component::Python, &VersionRequest::Latest, OperatingSystem::Ubuntu20)
            .unwrap_err();
        assert!(matches!(err, ResolveError::VersionNotFound { .. }));
        assert!(resolver.list_versions(Component::Python, OperatingSystem::Ubuntu20).is_empty());
    }

    #[test]
    fn degraded_variants_swallow_errors() {
        let resolver = Resolver::new(StaticSource::new().with(Component::R, "{{{"));
        assert!(resolver.list_versions(Component::R, OperatingSystem::Redhat9).is_empty());

        let reference = resolver.resolve_installer(Component::R, &exact("4.2.1"), OperatingSystem::Redhat9);
        assert!(!reference.is_resolved());
        assert_eq!(reference.url, "");
    }

    #[test]
    fn bare_workbench_release_resolves_to_its_build() {
        let manifest = r#"{"rstudio": {"pro": {"stable": {"server": {"installer": {
            "rhel8": {"version": "2023.03.0+386.pro1", "url": "https://example.com/rhel8.rpm"}
        }}}}}}"#;
        let resolver = Resolver::new(StaticSource::new().with(Component::Workbench, manifest));
        let reference = resolver
            .try_resolve_installer(Component::Workbench, &exact("2023.03.0"), OperatingSystem::Redhat8)
            .unwrap();
        assert_eq!(reference.version(), "2023.03.0+386.pro1");
        assert_eq!(reference.url, "https://example.com/rhel8.rpm");
    }

    #[test]
    fn exact_request_accepts_short_spelling() {
        let resolver = Resolver::new(StaticSource::new().with(Component::R, R_VERSIONS));
        let reference = resolver
            .try_resolve_installer(Component::R, &exact("4.2"), OperatingSystem::Redhat8)
            .unwrap();
        assert_eq!(reference.version(), "4.2.0");
        assert!(reference.url.ends_with("/R-4.2.0-1-1.x86_64.rpm"));
    }
}
