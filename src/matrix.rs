use std::ops::Deref;
use crate::catalog::{Catalog, CatalogEntry};
use crate::component::{CatalogShape, Component};
use crate::error::{ResolveError, Result};
use crate::os::OperatingSystem;

pub type Release = (u64, u64, u64);

/// Installable version range of a templated component on one platform.
/// Both bounds are inclusive and compare on major.minor.patch only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportRule {
    pub component: Component,
    pub os: OperatingSystem,
    pub min: Option<Release>,
    pub max: Option<Release>,
}

const fn rule(
    component: Component,
    os: OperatingSystem,
    min: Release,
    max: Option<Release>,
) -> SupportRule {
    SupportRule {
        component,
        os,
        min: Some(min),
        max,
    }
}

use Component::{Python, Quarto, R};
use OperatingSystem::*;

pub const DEFAULT_RULES: &[SupportRule] = &[
    rule(R, Ubuntu18, (3, 0, 0), Some((4, 3, 1))),
    rule(R, Ubuntu20, (3, 0, 0), None),
    rule(R, Ubuntu22, (3, 4, 0), None),
    rule(R, Redhat7, (3, 0, 0), None),
    rule(R, Redhat8, (3, 0, 0), None),
    rule(R, Redhat9, (3, 6, 0), None),
    rule(Python, Ubuntu18, (2, 7, 0), Some((3, 11, 4))),
    rule(Python, Ubuntu20, (2, 7, 0), None),
    rule(Python, Ubuntu22, (3, 8, 0), None),
    rule(Python, Redhat7, (2, 7, 0), None),
    rule(Python, Redhat8, (2, 7, 0), None),
    rule(Python, Redhat9, (3, 8, 0), None),
    rule(Quarto, Ubuntu18, (1, 0, 0), None),
    rule(Quarto, Ubuntu20, (1, 0, 0), None),
    rule(Quarto, Ubuntu22, (1, 0, 0), None),
    rule(Quarto, Redhat7, (1, 2, 0), None),
    rule(Quarto, Redhat8, (1, 0, 0), None),
    rule(Quarto, Redhat9, (1, 0, 0), None),
];

impl SupportRule {
    pub fn admits(&self, entry: &CatalogEntry) -> bool {
        let v = entry.version.semver();
        let release = (v.major, v.minor, v.patch);
        self.min.map_or(true, |min| release >= min) && self.max.map_or(true, |max| release <= max)
    }
}

/// A catalog narrowed to the releases installable on one platform.
///
/// Only [`CompatibilityMatrix::available_for`] builds one, so holding an
/// `Available` means the rules for `os()` have already been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Available {
    os: OperatingSystem,
    catalog: Catalog,
}

impl Available {
    pub fn os(&self) -> OperatingSystem {
        self.os
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

impl Deref for Available {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        &self.catalog
    }
}

/// Decides which catalog entries can be installed on which platform.
///
/// Holds only immutable rule data, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    rules: Vec<SupportRule>,
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl CompatibilityMatrix {
    pub fn new(rules: Vec<SupportRule>) -> Self {
        Self { rules }
    }

    pub fn rule_for(&self, component: Component, os: OperatingSystem) -> Option<&SupportRule> {
        self.rules
            .iter()
            .find(|rule| rule.component == component && rule.os == os)
    }

    /// The subset of `catalog` installable on `os`, newest first.
    pub fn available_for(&self, catalog: &Catalog, os: OperatingSystem) -> Result<Available> {
        let component = catalog.component();
        let catalog = match component.catalog_shape() {
            CatalogShape::Manifest { .. } => catalog.filtered(|entry| entry.published_for(os)),
            CatalogShape::VersionList { .. } | CatalogShape::GithubReleases => {
                let rule = self
                    .rule_for(component, os)
                    .ok_or(ResolveError::UnsupportedPlatform { component, os })?;
                catalog.filtered(|entry| rule.admits(entry))
            }
        };
        Ok(Available { os, catalog })
    }
}
