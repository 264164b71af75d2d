use std::fmt;
use std::str::FromStr;
use crate::error::ResolveError;
use crate::os::OperatingSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    R,
    Python,
    Quarto,
    Workbench,
    ProDrivers,
}

/// How a component's upstream metadata is laid out.
#[derive(Debug, Clone, Copy)]
pub enum CatalogShape {
    /// A JSON array of version strings found at `pointer`.
    VersionList { pointer: &'static str },
    /// A GitHub releases listing; versions come from `tag_name`.
    GithubReleases,
    /// A JSON object at `pointer` keyed by OS tag, each value carrying
    /// `version` and `url`.
    Manifest {
        pointer: &'static str,
        tags: &'static [(&'static str, &'static [OperatingSystem])],
    },
}

const UBUNTU: &[OperatingSystem] = &[
    OperatingSystem::Ubuntu18,
    OperatingSystem::Ubuntu20,
    OperatingSystem::Ubuntu22,
];

const WORKBENCH_TAGS: &[(&str, &[OperatingSystem])] = &[
    ("bionic", &[OperatingSystem::Ubuntu18]),
    ("focal", &[OperatingSystem::Ubuntu20]),
    ("jammy", &[OperatingSystem::Ubuntu22]),
    ("redhat7_64", &[OperatingSystem::Redhat7]),
    ("rhel8", &[OperatingSystem::Redhat8]),
    ("rhel9", &[OperatingSystem::Redhat9]),
];

const DRIVER_TAGS: &[(&str, &[OperatingSystem])] = &[
    ("deb", UBUNTU),
    ("rh7", &[OperatingSystem::Redhat7]),
    ("rh8", &[OperatingSystem::Redhat8]),
    ("rh9", &[OperatingSystem::Redhat9]),
];

const DOWNLOADS_JSON: &str = "https://www.rstudio.com/wp-content/downloads.json";

impl Component {
    pub const ALL: [Component; 5] = [
        Component::R,
        Component::Python,
        Component::Quarto,
        Component::Workbench,
        Component::ProDrivers,
    ];

    /// Name used on the command line and as the config key.
    pub fn name(&self) -> &'static str {
        match self {
            Component::R => "r",
            Component::Python => "python",
            Component::Quarto => "quarto",
            Component::Workbench => "workbench",
            Component::ProDrivers => "pro-drivers",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Component::R => "R",
            Component::Python => "Python",
            Component::Quarto => "Quarto",
            Component::Workbench => "Workbench",
            Component::ProDrivers => "Pro Drivers",
        }
    }

    pub fn catalog_url(&self) -> &'static str {
        match self {
            Component::R => "https://cdn.rstudio.com/r/versions.json",
            Component::Python => "https://cdn.rstudio.com/python/versions.json",
            Component::Quarto => "https://api.github.com/repos/quarto-dev/quarto-cli/releases?per_page=100",
            Component::Workbench | Component::ProDrivers => DOWNLOADS_JSON,
        }
    }

    pub fn catalog_shape(&self) -> CatalogShape {
        match self {
            Component::R => CatalogShape::VersionList { pointer: "/r_versions" },
            Component::Python => CatalogShape::VersionList { pointer: "/python_versions" },
            Component::Quarto => CatalogShape::GithubReleases,
            Component::Workbench => CatalogShape::Manifest {
                pointer: "/rstudio/pro/stable/server/installer",
                tags: WORKBENCH_TAGS,
            },
            Component::ProDrivers => CatalogShape::Manifest {
                pointer: "/pro_drivers/installer",
                tags: DRIVER_TAGS,
            },
        }
    }

    /// Whether download URLs come pre-resolved from the upstream manifest
    /// rather than from a local template.
    pub fn is_manifest(&self) -> bool {
        matches!(self.catalog_shape(), CatalogShape::Manifest { .. })
    }
}

impl FromStr for Component {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" => Ok(Component::R),
            "python" | "py" => Ok(Component::Python),
            "quarto" => Ok(Component::Quarto),
            "workbench" | "rstudio" => Ok(Component::Workbench),
            "pro-drivers" | "prodrivers" | "drivers" => Ok(Component::ProDrivers),
            _ => Err(ResolveError::UnknownComponent { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
