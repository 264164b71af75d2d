use colored::Colorize;
use crate::component::Component;
use crate::os::OperatingSystem;

pub fn show() {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");

    println!("{} v{}", name.bright_green(), version.bright_white());

    let components: Vec<&str> = Component::ALL.iter().map(|c| c.name()).collect();
    let platforms: Vec<&str> = OperatingSystem::ALL.iter().map(|os| os.code()).collect();
    println!("Components: {}", components.join(", ").bright_blue());
    println!("Platforms:  {}", platforms.join(", ").bright_blue());
}
