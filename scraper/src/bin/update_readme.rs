use anyhow::Result;
use env_logger::{Builder, Env, Target};
use qwantz_scraper::{project_root, update_readme, ComicError};

fn main() -> Result<()> {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    match update_readme(&project_root()) {
        Ok(_) => Ok(()),
        // Nothing archived yet: leave the existing README alone
        Err(ComicError::NotFound { .. }) => {
            println!("No comic found to update README");
            Ok(())
        }
        Err(e) => {
            println!("Failed to update README.");
            Err(e.into())
        }
    }
}
