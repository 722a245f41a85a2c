use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!(
            "✓ Created {}",
            Config::default_config_path().display()
        );
        println!("  Set server.secret_key and weather.api_key before deploying.");
    } else {
        println!(
            "Config already exists at {}",
            Config::default_config_path().display()
        );
    }
    Ok(())
}
