use anyhow::Result;
use colored::Colorize;
use wbi::utils;

pub fn execute() -> Result<()> {
    let os = utils::detect_os()?;
    println!("{} ({})", os.code().green(), os);
    Ok(())
}
