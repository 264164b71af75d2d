use thiserror::Error;
use crate::component::Component;
use crate::os::OperatingSystem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("could not read the {component} catalog: {message}")]
    MalformedCatalog {
        component: Component,
        message: String,
    },

    #[error("no compatibility rule for {component} on {os}")]
    UnsupportedPlatform {
        component: Component,
        os: OperatingSystem,
    },

    #[error("{component} {version} is not available for {os}")]
    VersionNotFound {
        component: Component,
        version: String,
        os: OperatingSystem,
    },

    #[error("failed to fetch the {component} catalog: {message}")]
    FetchFailed {
        component: Component,
        message: String,
    },

    #[error("unrecognized operating system: {input}")]
    UnrecognizedOperatingSystem { input: String },

    #[error("unknown component: {input}")]
    UnknownComponent { input: String },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
