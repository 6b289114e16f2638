// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for comma-list parsing, logging setup, and man page rendering
// role: utilities/helpers
// inputs: Raw CLI strings; verbosity flag; clap CommandFactory
// outputs: Trimmed non-empty lists, an installed tracing subscriber, man page text
// side_effects: init_logging installs the global tracing subscriber (stderr)
// invariants:
// - csv_list never yields empty or whitespace-only entries
// - Logging never writes to stdout (stdout carries report output)
// errors: Man page rendering surfaces IO errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use clap::CommandFactory;
use tracing_subscriber::{fmt, EnvFilter};

/// Split a comma-separated argument into trimmed, non-empty entries.
pub fn csv_list(s: &str) -> Vec<String> {
  s.split(',')
    .map(str::trim)
    .filter(|x| !x.is_empty())
    .map(str::to_string)
    .collect()
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  let _ = fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
