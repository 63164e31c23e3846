use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::io::Write as _;
use serde::Serialize;
use std::path::Path;

use pragati_store::{open_store, seed};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Load the demo data set (districts, projects, alerts, feedback,
    /// profiles).
    #[arg(long)]
    pub sample: bool,

    /// Recreate the database even if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    ok: bool,
    db_path: String,
    seeded: bool,
}

/// Execute `pgt init`: create (or recreate) the store database and
/// optionally load the demo fixtures.
pub fn run_init(args: &InitArgs, db_path: &Path, output: OutputMode) -> Result<()> {
    if db_path.exists() {
        if args.force {
            std::fs::remove_file(db_path)
                .with_context(|| format!("remove {}", db_path.display()))?;
            // WAL siblings are stale once the main file is gone.
            for suffix in ["-wal", "-shm"] {
                let mut sibling = db_path.as_os_str().to_owned();
                sibling.push(suffix);
                let _ = std::fs::remove_file(sibling);
            }
        } else {
            bail!(
                "{} already exists. Use `pgt init --force` to recreate it.",
                db_path.display()
            );
        }
    }

    let mut store = open_store(db_path)?;

    let mut seeded = false;
    if args.sample && !store.is_seeded()? {
        seed::load_demo(&mut store)?;
        store.mark_seeded()?;
        seeded = true;
    }

    let out = InitOutput {
        ok: true,
        db_path: db_path.display().to_string(),
        seeded,
    };
    render(output, &out, |out, w| {
        writeln!(w, "Initialized store at {}", out.db_path)?;
        if out.seeded {
            writeln!(w, "Loaded demo data set.")?;
        }
        Ok(())
    })
}
