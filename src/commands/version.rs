//! `invariance version`

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct VersionArgs {}

pub fn execute(_args: VersionArgs) -> Result<()> {
    println!("invariance v{}", invariance::VERSION);
    Ok(())
}
