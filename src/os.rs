use std::fmt;
use std::str::FromStr;
use crate::error::ResolveError;

/// Target platforms the installer knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatingSystem {
    Ubuntu18,
    Ubuntu20,
    Ubuntu22,
    Redhat7,
    Redhat8,
    Redhat9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Ubuntu,
    Redhat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFormat {
    Deb,
    Rpm,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 6] = [
        OperatingSystem::Ubuntu18,
        OperatingSystem::Ubuntu20,
        OperatingSystem::Ubuntu22,
        OperatingSystem::Redhat7,
        OperatingSystem::Redhat8,
        OperatingSystem::Redhat9,
    ];

    /// Short code used on the text boundary and in the config file.
    pub fn code(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu18 => "U18",
            OperatingSystem::Ubuntu20 => "U20",
            OperatingSystem::Ubuntu22 => "U22",
            OperatingSystem::Redhat7 => "RH7",
            OperatingSystem::Redhat8 => "RH8",
            OperatingSystem::Redhat9 => "RH9",
        }
    }

    pub fn family(&self) -> OsFamily {
        match self {
            OperatingSystem::Ubuntu18 | OperatingSystem::Ubuntu20 | OperatingSystem::Ubuntu22 => {
                OsFamily::Ubuntu
            }
            OperatingSystem::Redhat7 | OperatingSystem::Redhat8 | OperatingSystem::Redhat9 => {
                OsFamily::Redhat
            }
        }
    }

    pub fn major(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu18 => "18",
            OperatingSystem::Ubuntu20 => "20",
            OperatingSystem::Ubuntu22 => "22",
            OperatingSystem::Redhat7 => "7",
            OperatingSystem::Redhat8 => "8",
            OperatingSystem::Redhat9 => "9",
        }
    }

    pub fn package_format(&self) -> PackageFormat {
        match self.family() {
            OsFamily::Ubuntu => PackageFormat::Deb,
            OsFamily::Redhat => PackageFormat::Rpm,
        }
    }

    /// Distribution directory used by the R and Python binary CDN.
    pub fn cdn_platform(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu18 => "ubuntu-1804",
            OperatingSystem::Ubuntu20 => "ubuntu-2004",
            OperatingSystem::Ubuntu22 => "ubuntu-2204",
            OperatingSystem::Redhat7 => "centos-7",
            OperatingSystem::Redhat8 => "centos-8",
            OperatingSystem::Redhat9 => "rhel-9",
        }
    }

    /// Distribution name Package Manager uses in binary repository paths.
    pub fn codename(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu18 => "bionic",
            OperatingSystem::Ubuntu20 => "focal",
            OperatingSystem::Ubuntu22 => "jammy",
            OperatingSystem::Redhat7 => "centos7",
            OperatingSystem::Redhat8 => "centos8",
            OperatingSystem::Redhat9 => "rhel9",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu18 => "Ubuntu 18.04",
            OperatingSystem::Ubuntu20 => "Ubuntu 20.04",
            OperatingSystem::Ubuntu22 => "Ubuntu 22.04",
            OperatingSystem::Redhat7 => "RHEL 7",
            OperatingSystem::Redhat8 => "RHEL 8",
            OperatingSystem::Redhat9 => "RHEL 9",
        }
    }

    /// Classifies a host from the contents of `/etc/os-release`.
    pub fn from_os_release(contents: &str) -> Result<Self, ResolveError> {
        let mut id = String::new();
        let mut id_like = String::new();
        let mut version_id = String::new();

        for line in contents.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').trim_matches('\'').to_lowercase();
            match key.trim() {
                "ID" => id = value,
                "ID_LIKE" => id_like = value,
                "VERSION_ID" => version_id = value,
                _ => {}
            }
        }

        let major = version_id.split('.').next().unwrap_or_default();
        let unrecognized = || ResolveError::UnrecognizedOperatingSystem {
            input: format!("ID={} VERSION_ID={}", id, version_id),
        };

        let redhat_like = ["rhel", "centos", "rocky", "almalinux"].contains(&id.as_str())
            || id_like.split_whitespace().any(|like| like == "rhel");

        if id == "ubuntu" {
            match version_id.as_str() {
                "18.04" => Ok(OperatingSystem::Ubuntu18),
                "20.04" => Ok(OperatingSystem::Ubuntu20),
                "22.04" => Ok(OperatingSystem::Ubuntu22),
                _ => Err(unrecognized()),
            }
        } else if redhat_like {
            match major {
                "7" => Ok(OperatingSystem::Redhat7),
                "8" => Ok(OperatingSystem::Redhat8),
                "9" => Ok(OperatingSystem::Redhat9),
                _ => Err(unrecognized()),
            }
        } else {
            Err(unrecognized())
        }
    }
}

impl FromStr for OperatingSystem {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        OperatingSystem::ALL
            .iter()
            .copied()
            .find(|os| os.code() == code)
            .ok_or_else(|| ResolveError::UnrecognizedOperatingSystem { input: s.to_string() })
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Ubuntu => f.write_str("ubuntu"),
            OsFamily::Redhat => f.write_str("rhel"),
        }
    }
}
