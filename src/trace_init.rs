use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "tridict=info,tridict_core=info,tridict_cli=info";
const VERBOSE_FILTER: &str = "tridict=debug,tridict_core=debug,tridict_cli=debug";

/// Install a stderr log subscriber. `RUST_LOG` takes precedence over the
/// built-in filter; `verbose` only changes that built-in default.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    });
}
