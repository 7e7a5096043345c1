//! Open command - print the public URL of the site

use std::path::Path;

use crate::error::Result;

pub fn run(path: &Path) -> Result<()> {
    let (project, _labels) = super::load_project(path)?;
    println!("{}", project.config.site_url());
    Ok(())
}
