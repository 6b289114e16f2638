use anyhow::Result;
use clap::Parser;

use issue_activity_report::cli::{normalize, Cli};
use issue_activity_report::{report, tracker, util};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_logging(cli.verbose);

  // Phase 1: normalize CLI (window validated here, before any network)
  let cfg = normalize(cli)?;
  tracing::debug!(?cfg, "effective config");

  // Phase 2: pick the tracker backend
  let tracker = tracker::build_tracker(cfg.transport)?;

  // Phase 3: search, replay, render
  report::process(&cfg, tracker.as_ref())
}
