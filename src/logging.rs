use tracing::metadata::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Handle on the installed filter. The verbosity may come from the config
/// file, which is read after the subscriber is up.
#[derive(Clone)]
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    pub fn set_verbose(&self, verbose: bool) {
        if let Err(err) = self.0.reload(filter(verbose)) {
            tracing::warn!(error = %err, "cannot change log level");
        }
    }
}

/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `verbose`.
fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Returns `None` when a subscriber was already installed; that one is kept.
pub fn init(verbose: bool) -> Option<LogHandle> {
    let (filter, handle) = reload::Layer::new(filter(verbose));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init()
        .ok()
        .map(|()| LogHandle(handle))
}
