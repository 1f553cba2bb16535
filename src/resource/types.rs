//! Repository and package type enumerations

use std::fmt;
use std::str::FromStr;

/// Kinds of repositories Artifactory hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryType {
    Local,
    Remote,
    Virtual,
    Federated,
    Distribution,
}

impl RepositoryType {
    /// Value used in the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryType::Local => "local",
            RepositoryType::Remote => "remote",
            RepositoryType::Virtual => "virtual",
            RepositoryType::Federated => "federated",
            RepositoryType::Distribution => "distribution",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Case-insensitive; the listing endpoint reports `LOCAL`, `REMOTE`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(RepositoryType::Local),
            "remote" => Ok(RepositoryType::Remote),
            "virtual" => Ok(RepositoryType::Virtual),
            "federated" => Ok(RepositoryType::Federated),
            "distribution" => Ok(RepositoryType::Distribution),
            _ => Err(format!("unknown repository type: {}", s)),
        }
    }
}

/// Package formats a repository can hold
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageType {
    Bower,
    Cargo,
    Chef,
    Cocoapods,
    Composer,
    Conan,
    Cran,
    Debian,
    Docker,
    Gems,
    Gitlfs,
    Go,
    Gradle,
    Helm,
    Ivy,
    Maven,
    Npm,
    NuGet,
    Opkg,
    Pub,
    Puppet,
    Pypi,
    Rpm,
    Sbt,
    Terraform,
    Vagrant,
    Yum,
    Generic,
    /// A package type this crate does not know about yet
    Other(String),
}

const KNOWN_PACKAGE_TYPES: &[(PackageType, &str)] = &[
    (PackageType::Bower, "Bower"),
    (PackageType::Cargo, "Cargo"),
    (PackageType::Chef, "Chef"),
    (PackageType::Cocoapods, "Cocoapods"),
    (PackageType::Composer, "Composer"),
    (PackageType::Conan, "Conan"),
    (PackageType::Cran, "Cran"),
    (PackageType::Debian, "Debian"),
    (PackageType::Docker, "Docker"),
    (PackageType::Gems, "Gems"),
    (PackageType::Gitlfs, "Gitlfs"),
    (PackageType::Go, "Go"),
    (PackageType::Gradle, "Gradle"),
    (PackageType::Helm, "Helm"),
    (PackageType::Ivy, "Ivy"),
    (PackageType::Maven, "Maven"),
    (PackageType::Npm, "Npm"),
    (PackageType::NuGet, "NuGet"),
    (PackageType::Opkg, "Opkg"),
    (PackageType::Pub, "Pub"),
    (PackageType::Puppet, "Puppet"),
    (PackageType::Pypi, "Pypi"),
    (PackageType::Rpm, "Rpm"),
    (PackageType::Sbt, "Sbt"),
    (PackageType::Terraform, "Terraform"),
    (PackageType::Vagrant, "Vagrant"),
    (PackageType::Yum, "YUM"),
    (PackageType::Generic, "Generic"),
];

impl PackageType {
    /// Value used in the `packageType` query parameter
    pub fn as_str(&self) -> &str {
        if let PackageType::Other(name) = self {
            return name;
        }
        KNOWN_PACKAGE_TYPES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Parse a package type, keeping unknown names as [`PackageType::Other`]
    pub fn parse(s: &str) -> Self {
        KNOWN_PACKAGE_TYPES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(kind, _)| kind.clone())
            .unwrap_or_else(|| PackageType::Other(s.to_string()))
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PackageType {
    fn from(s: &str) -> Self {
        PackageType::parse(s)
    }
}
