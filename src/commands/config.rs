use anyhow::Result;
use colored::Colorize;
use wbi::config;
use wbi::options::ConfigAction;

pub fn execute(action: ConfigAction) -> Result<()> {
    let mut config = config::load_config()?;

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetOs { os } => {
            config.default_os = Some(os.code().to_string());
            config::save_config(&config)?;
            println!("Default OS set to {} ({})", os.code().green(), os);
        }
        ConfigAction::SetCatalog { component, url } => {
            config.catalog_urls.insert(component.name().to_string(), url.clone());
            config::save_config(&config)?;
            println!("{} catalog now fetched from {}", component, url.green());
        }
    }

    Ok(())
}
