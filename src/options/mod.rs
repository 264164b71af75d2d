pub mod verbose;
pub mod version;

use clap::{Parser, Subcommand, ArgAction};
use std::path::PathBuf;
use crate::component::Component;
use crate::os::OperatingSystem;
use crate::version::VersionRequest;

#[derive(Parser, Debug)]
#[command(name = "wbi", author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub version: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List versions installable on the target OS, newest first
    Versions {
        /// r, python, quarto, workbench or pro-drivers
        component: Component,

        /// Target OS code (U18, U20, U22, RH7, RH8, RH9)
        #[arg(long)]
        os: Option<OperatingSystem>,
    },

    /// Print the installer URL for a version
    Url {
        component: Component,

        #[arg(default_value = "latest")]
        version: VersionRequest,

        #[arg(long)]
        os: Option<OperatingSystem>,
    },

    /// Download the installer for a version
    Download {
        component: Component,

        #[arg(default_value = "latest")]
        version: VersionRequest,

        #[arg(long)]
        os: Option<OperatingSystem>,

        /// Directory to save the installer in
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },

    /// Print the OS detected from /etc/os-release
    Detect,

    /// Print the Package Manager binary repository URL
    #[command(name = "repo-url")]
    RepoUrl {
        /// Package Manager server URL; the public server when omitted
        #[arg(long)]
        server: Option<String>,

        #[arg(long)]
        repo: Option<String>,

        #[arg(long)]
        os: Option<OperatingSystem>,
    },

    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Show,

    #[command(name = "set-os")]
    SetOs {
        os: OperatingSystem,
    },

    #[command(name = "set-catalog")]
    SetCatalog {
        component: Component,
        url: String,
    },
}
