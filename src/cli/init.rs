//! Init command - create the user config file

use crate::config::{UserConfig, API_KEY_ENV};
use anyhow::Result;
use console::style;

/// Run the init command
pub fn run() -> Result<()> {
    let (config_path, created) = UserConfig::init_user_config()?;

    if created {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    let config = UserConfig::load()?;
    if config.has_ai_key() {
        println!("{} AI review is configured", style("✓").green());
    } else {
        println!(
            "{} No API key found. Set {} or edit the config to enable --ai",
            style("!").yellow(),
            style(API_KEY_ENV).bold()
        );
    }

    Ok(())
}
