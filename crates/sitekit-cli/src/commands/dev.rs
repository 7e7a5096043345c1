//! Dev command - build, sync, and forward in one pass

use std::path::Path;

use console::style;

use crate::error::Result;

pub async fn run(path: &Path, local_port: u16) -> Result<()> {
    println!("{}", style("[1/3] build").bold());
    super::build::run(path).await?;

    println!("\n{}", style("[2/3] sync").bold());
    super::sync::run(path).await?;

    println!("\n{}", style("[3/3] port-forward").bold());
    super::port_forward::run(path, local_port).await
}
