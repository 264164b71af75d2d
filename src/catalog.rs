use std::collections::BTreeMap;
use serde_json::Value;
use crate::component::{CatalogShape, Component};
use crate::error::{ResolveError, Result};
use crate::options::verbose;
use crate::os::OperatingSystem;
use crate::version::ReleaseVersion;

/// Which platforms a release is published for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// OS-agnostic at the catalog level; the compatibility rules decide.
    All,
    /// Published per platform, with the upstream download URL for each.
    Only(BTreeMap<OperatingSystem, String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub version: ReleaseVersion,
    pub availability: Availability,
}

impl CatalogEntry {
    pub fn published_for(&self, os: OperatingSystem) -> bool {
        match &self.availability {
            Availability::All => true,
            Availability::Only(urls) => urls.contains_key(&os),
        }
    }

    /// The pre-resolved URL for `os`, if the upstream manifest supplied one.
    pub fn url_for(&self, os: OperatingSystem) -> Option<&str> {
        match &self.availability {
            Availability::All => None,
            Availability::Only(urls) => urls.get(&os).map(String::as_str),
        }
    }
}

/// Releases of one component, newest first, one entry per release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    component: Component,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(component: Component, mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| b.version.cmp(&a.version));
        entries.dedup_by(|later, earlier| later.version.same_release(&earlier.version));
        Self { component, entries }
    }

    pub fn empty(component: Component) -> Self {
        Self {
            component,
            entries: Vec::new(),
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn latest(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    /// The entry for `version`. A request without build metadata falls back
    /// to the newest build of that release.
    pub fn find(&self, version: &ReleaseVersion) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.version.same_release(version))
            .or_else(|| self.entries.iter().find(|entry| entry.version.is_build_of(version)))
    }

    pub fn versions(&self) -> impl Iterator<Item = &ReleaseVersion> {
        self.entries.iter().map(|entry| &entry.version)
    }

    /// Keeps the entries `keep` accepts, preserving order.
    pub fn filtered<F>(&self, keep: F) -> Catalog
    where
        F: Fn(&CatalogEntry) -> bool,
    {
        Catalog {
            component: self.component,
            entries: self.entries.iter().filter(|e| keep(e)).cloned().collect(),
        }
    }
}

/// Parses raw upstream metadata for `component`.
///
/// An empty payload is an empty catalog. A payload that is not in the
/// component's expected shape fails as a whole; individual entries that
/// cannot be interpreted are skipped with a warning.
pub fn parse_catalog(component: Component, raw: &[u8]) -> Result<Catalog> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        verbose::log(&format!("{} catalog payload is empty", component));
        return Ok(Catalog::empty(component));
    }

    let malformed = |message: String| ResolveError::MalformedCatalog { component, message };

    let document: Value = serde_json::from_slice(raw).map_err(|e| malformed(e.to_string()))?;

    let entries = match component.catalog_shape() {
        CatalogShape::VersionList { pointer } => {
            let list = document
                .pointer(pointer)
                .and_then(Value::as_array)
                .ok_or_else(|| malformed(format!("expected a version array at {}", pointer)))?;
            parse_version_list(component, list)
        }
        CatalogShape::GithubReleases => {
            let releases = document
                .as_array()
                .ok_or_else(|| malformed("expected an array of releases".to_string()))?;
            parse_github_releases(component, releases)
        }
        CatalogShape::Manifest { pointer, tags } => {
            let installers = document
                .pointer(pointer)
                .and_then(Value::as_object)
                .ok_or_else(|| malformed(format!("expected an installer object at {}", pointer)))?;
            parse_manifest(component, installers, tags)
        }
    };

    let catalog = Catalog::new(component, entries);
    verbose::log(&format!("Parsed {} {} releases", catalog.len(), component));
    Ok(catalog)
}

fn parse_release(component: Component, raw: &str) -> Option<ReleaseVersion> {
    match ReleaseVersion::parse(raw) {
        Ok(version) => Some(version),
        Err(e) => {
            verbose::warn(&format!("Skipping {} release: {}", component, e));
            None
        }
    }
}

fn parse_version_list(component: Component, list: &[Value]) -> Vec<CatalogEntry> {
    list.iter()
        .filter_map(|item| match item.as_str() {
            Some(raw) => parse_release(component, raw),
            None => {
                verbose::warn(&format!("Skipping non-string {} version: {}", component, item));
                None
            }
        })
        .map(|version| CatalogEntry {
            version,
            availability: Availability::All,
        })
        .collect()
}

fn parse_github_releases(component: Component, releases: &[Value]) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for release in releases {
        let flagged = |key: &str| release.get(key).and_then(Value::as_bool).unwrap_or(false);
        if flagged("draft") || flagged("prerelease") {
            continue;
        }

        let Some(tag) = release.get("tag_name").and_then(Value::as_str) else {
            verbose::warn(&format!("Skipping {} release without a tag_name", component));
            continue;
        };

        if let Some(version) = parse_release(component, tag) {
            entries.push(CatalogEntry {
                version,
                availability: Availability::All,
            });
        }
    }

    entries
}

fn parse_manifest(
    component: Component,
    installers: &serde_json::Map<String, Value>,
    tags: &[(&str, &[OperatingSystem])],
) -> Vec<CatalogEntry> {
    let mut releases: BTreeMap<ReleaseVersion, BTreeMap<OperatingSystem, String>> = BTreeMap::new();

    for (tag, installer) in installers {
        let Some((_, platforms)) = tags.iter().find(|(known, _)| *known == tag.as_str()) else {
            verbose::warn(&format!("Skipping {} installer for unknown platform '{}'", component, tag));
            continue;
        };

        let field = |key: &str| {
            installer
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let (Some(raw_version), Some(url)) = (field("version"), field("url")) else {
            verbose::warn(&format!(
                "Skipping {} installer '{}': missing version or url",
                component, tag
            ));
            continue;
        };

        let Some(version) = parse_release(component, raw_version) else {
            continue;
        };

        let urls = releases.entry(version).or_default();
        for os in platforms.iter() {
            urls.insert(*os, url.to_string());
        }
    }

    releases
        .into_iter()
        .map(|(version, urls)| CatalogEntry {
            version,
            availability: Availability::Only(urls),
        })
        .collect()
}
