use std::fmt;
use crate::component::Component;
use crate::error::{ResolveError, Result};
use crate::matrix::Available;
use crate::os::{OperatingSystem, PackageFormat};
use crate::version::ReleaseVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arch {
    #[default]
    X86_64,
}

impl Arch {
    /// Debian-style name, also used by Quarto tarballs.
    pub fn deb_name(&self) -> &'static str {
        match self {
            Arch::X86_64 => "amd64",
        }
    }

    pub fn rpm_name(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
        }
    }
}

/// Which platforms a template applies to. An `Exact` row wins over a
/// `Format` row for the same component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Format(PackageFormat),
    Exact(OperatingSystem),
}

impl Target {
    fn matches(&self, os: OperatingSystem) -> bool {
        match self {
            Target::Format(format) => os.package_format() == *format,
            Target::Exact(exact) => *exact == os,
        }
    }
}

/// Download URL pattern for a templated component.
///
/// Placeholders: `{base}`, `{version}`, `{family}`, `{major}`, `{platform}` (CDN
/// distribution directory), `{deb_arch}`, `{rpm_arch}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplate {
    pub component: Component,
    pub target: Target,
    pub pattern: &'static str,
}

const R_CDN: &str = "https://cdn.rstudio.com/r";
const PYTHON_CDN: &str = "https://cdn.rstudio.com/python";
const QUARTO_RELEASES: &str = "https://github.com/quarto-dev/quarto-cli/releases/download";

pub const TEMPLATES: &[UrlTemplate] = &[
    UrlTemplate {
        component: Component::R,
        target: Target::Format(PackageFormat::Deb),
        pattern: "{base}/{platform}/pkgs/r-{version}_1_{deb_arch}.deb",
    },
    UrlTemplate {
        component: Component::R,
        target: Target::Format(PackageFormat::Rpm),
        pattern: "{base}/{platform}/pkgs/R-{version}-1-1.{rpm_arch}.rpm",
    },
    UrlTemplate {
        component: Component::Python,
        target: Target::Format(PackageFormat::Deb),
        pattern: "{base}/{platform}/pkgs/python-{version}_1_{deb_arch}.deb",
    },
    UrlTemplate {
        component: Component::Python,
        target: Target::Format(PackageFormat::Rpm),
        pattern: "{base}/{platform}/pkgs/python-{version}-1-1.{rpm_arch}.rpm",
    },
    UrlTemplate {
        component: Component::Quarto,
        target: Target::Format(PackageFormat::Deb),
        pattern: "{base}/v{version}/quarto-{version}-linux-{deb_arch}.deb",
    },
    UrlTemplate {
        component: Component::Quarto,
        target: Target::Format(PackageFormat::Rpm),
        pattern: "{base}/v{version}/quarto-{version}-linux-{deb_arch}.tar.gz",
    },
    UrlTemplate {
        component: Component::Quarto,
        target: Target::Exact(OperatingSystem::Redhat7),
        pattern: "{base}/v{version}/quarto-{version}-linux-rhel7-{deb_arch}.tar.gz",
    },
];

/// Host prefix substituted for `{base}`.
fn base_url(component: Component) -> &'static str {
    match component {
        Component::R => R_CDN,
        Component::Python => PYTHON_CDN,
        Component::Quarto => QUARTO_RELEASES,
        Component::Workbench | Component::ProDrivers => "",
    }
}

impl UrlTemplate {
    pub fn render(&self, version: &str, os: OperatingSystem, arch: Arch) -> String {
        self.fill_platform(os, arch).replace("{version}", version)
    }

    /// Recovers the version token from a URL this template produced.
    pub fn extract_version(&self, url: &str, os: OperatingSystem, arch: Arch) -> Option<String> {
        let filled = self.fill_platform(os, arch);
        let mut pieces = filled.split("{version}");
        let prefix = pieces.next()?;
        let separator = pieces.next()?;

        let rest = url.strip_prefix(prefix)?;
        let candidate = if separator.is_empty() {
            rest
        } else {
            &rest[..rest.find(separator)?]
        };

        if candidate.is_empty() || self.render(candidate, os, arch) != url {
            return None;
        }
        Some(candidate.to_string())
    }

    fn fill_platform(&self, os: OperatingSystem, arch: Arch) -> String {
        self.pattern
            .replace("{base}", base_url(self.component))
            .replace("{platform}", os.cdn_platform())
            .replace("{family}", &os.family().to_string())
            .replace("{major}", os.major())
            .replace("{deb_arch}", arch.deb_name())
            .replace("{rpm_arch}", arch.rpm_name())
    }
}

pub fn template_for(component: Component, os: OperatingSystem) -> Option<&'static UrlTemplate> {
    let mut candidates = TEMPLATES
        .iter()
        .filter(|t| t.component == component && t.target.matches(os));
    let first = candidates.next()?;
    if matches!(first.target, Target::Exact(_)) {
        return Some(first);
    }
    Some(
        candidates
            .find(|t| matches!(t.target, Target::Exact(_)))
            .unwrap_or(first),
    )
}

/// The resolved answer for one component, version and platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerReference {
    pub component: Component,
    pub os: OperatingSystem,
    pub release: Option<ReleaseVersion>,
    pub url: String,
}

impl InstallerReference {
    /// A reference carrying no version and an empty URL, used where errors
    /// cannot be reported.
    pub fn unresolved(component: Component, os: OperatingSystem) -> Self {
        Self {
            component,
            os,
            release: None,
            url: String::new(),
        }
    }

    pub fn version(&self) -> &str {
        self.release.as_ref().map_or("", ReleaseVersion::as_str)
    }

    pub fn is_resolved(&self) -> bool {
        self.release.is_some() && !self.url.is_empty()
    }

    /// Last path segment of the URL, used as the download file name.
    pub fn file_name(&self) -> Option<&str> {
        self.url
            .rsplit('/')
            .next()
            .map(|name| name.split(['?', '#']).next().unwrap_or(name))
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Display for InstallerReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}): {}", self.component, self.version(), self.os, self.url)
    }
}

/// Builds the installer reference for `version` from the releases
/// available on `os`.
///
/// Manifest-backed components return the URL the upstream published for
/// `os`; templated components render their URL template. A version missing
/// from `available`, or a set filtered for another platform, is
/// `VersionNotFound`.
pub fn build_reference(
    available: &Available,
    version: &ReleaseVersion,
    os: OperatingSystem,
    arch: Arch,
) -> Result<InstallerReference> {
    let component = available.component();
    let not_found = || ResolveError::VersionNotFound {
        component,
        version: version.to_string(),
        os,
    };

    if available.os() != os {
        return Err(not_found());
    }
    let entry = available.find(version).ok_or_else(not_found)?;

    let url = if component.is_manifest() {
        entry.url_for(os).ok_or_else(not_found)?.to_string()
    } else {
        if !entry.published_for(os) {
            return Err(not_found());
        }
        template_for(component, os)
            .ok_or(ResolveError::UnsupportedPlatform { component, os })?
            .render(entry.version.as_str(), os, arch)
    };

    Ok(InstallerReference {
        component,
        os,
        release: Some(entry.version.clone()),
        url,
    })
}
