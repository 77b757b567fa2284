//! magify — refresh mission templates with the latest shared scripts.
//!
//! # Usage
//!
//! ```text
//! magify -t <TEMPLATES_PATH> -s <SCRIPTS_PATH> -b <BASE_PATH>
//!        [-v <LABEL>] [-d] [--dry-run] [--json]
//! ```

mod logging;
mod sync;

use anyhow::Result;
use clap::Parser;

use sync::SyncArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "magify",
    version,
    about = "Map template generator that updates each template with the newest scripts",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.sync.run()
}
