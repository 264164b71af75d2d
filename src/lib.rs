pub mod catalog;
pub mod component;
pub mod config;
pub mod error;
pub mod ffi;
pub mod matrix;
pub mod options;
pub mod os;
pub mod repos;
pub mod resolve;
pub mod surface;
pub mod url;
pub mod utils;
pub mod version;

pub use catalog::{parse_catalog, Availability, Catalog, CatalogEntry};
pub use component::Component;
pub use error::ResolveError;
pub use matrix::{Available, CompatibilityMatrix};
pub use os::OperatingSystem;
pub use resolve::{CatalogSource, Resolver, StaticSource};
pub use url::{build_reference, Arch, InstallerReference};
pub use version::{ReleaseVersion, VersionRequest};
