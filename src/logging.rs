use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Where log lines go. The CLI prints its reports on stdout, so its logs
/// must stay on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
}

/// Install the global subscriber. `default_filter` applies when `RUST_LOG` is unset.
pub fn init_tracing(default_filter: &str, sink: LogSink) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let installed = match sink {
        LogSink::Stdout => builder.with_file(true).try_init(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}
