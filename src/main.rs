use clap::Parser;
use matprint::cli::args::Cli;
use matprint::cli::commands::execute_command;
use matprint::cli::output;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // logs go to stderr so rendered output on stdout stays exact
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matprint::util::testing;
    use tracing::info;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        testing::init_test_setup();
        use clap::CommandFactory;
        Cli::command().debug_assert();
        info!("Debug mode: info");
    }

    #[test]
    fn parses_negative_vector_components() {
        let cli = Cli::try_parse_from(["matprint", "-p", "2", "vector", "-1.5", "2", "-3"]).unwrap();
        assert_eq!(cli.precision, Some(2));
        assert!(matches!(
            cli.command,
            Some(matprint::cli::Commands::Vector { x, z, .. }) if x == -1.5 && z == -3.0
        ));
    }

    #[test]
    fn rejects_negative_width_buffer() {
        assert!(Cli::try_parse_from(["matprint", "--width-buffer", "-1", "vector", "0", "0", "0"]).is_err());
    }

    #[test]
    fn rejects_tunables_above_limit() {
        assert!(Cli::try_parse_from(["matprint", "-p", "70000", "vector", "1", "2", "3"]).is_err());
        assert!(Cli::try_parse_from(["matprint", "-w", "4097", "vector", "1", "2", "3"]).is_err());
        let cli = Cli::try_parse_from(["matprint", "-p", "4096", "vector", "1", "2", "3"]).unwrap();
        assert_eq!(cli.precision, Some(4096));
    }
}
