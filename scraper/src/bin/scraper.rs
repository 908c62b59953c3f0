use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use qwantz_scraper::{daily_directory, project_root, scrape_comic, QWANTZ_BASE_URL};

fn main() -> Result<()> {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    let root = project_root();
    let data_dir = daily_directory(&root.join("data"))
        .context("Failed to create today's data directory")?;

    println!("Saving comic to: {}", data_dir.display());

    match scrape_comic(QWANTZ_BASE_URL, &data_dir) {
        Ok(_) => {
            println!("Comic download completed successfully!");
            Ok(())
        }
        Err(e) => {
            println!("Failed to download comic.");
            Err(e.into())
        }
    }
}
