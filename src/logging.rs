use std::env;

use log::{debug, LevelFilter};

/// Sets up `env_logger` at `info`, or `debug` when `verbose` is set. A
/// `RUST_LOG` filter in the environment takes precedence.
pub fn init_logger(verbose: bool) {
  let level = if verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };

  let mut builder = env_logger::Builder::new();
  builder
    .filter(None, level)
    .format_timestamp(None)
    .format_module_path(false)
    .format_target(false);

  if let Ok(filters) = env::var("RUST_LOG") {
    builder.parse_filters(&filters);
  }

  builder.init();
  debug!("Logger initialized at {level:?} level");
}
