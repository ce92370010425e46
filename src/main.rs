use anyhow::Context;
use std::io::{ErrorKind, Write};
use sublimate::{
    arguments::{usage, Args},
    logger::{self, LogTag},
    poller,
};

/// Main entry point for sublimate
///
/// Resolves the configuration, waits for the gas price to reach the target,
/// runs the command once and relays its stdout. Exits non-zero when the
/// configuration is incomplete, the first dial fails, or the command fails.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env may provide RPC_URL; already-set variables win
    dotenv::dotenv().ok();

    let args = Args::try_parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());
    logger::init(args.logger_config());

    let config = match args.into_config(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, usage());
            std::process::exit(1);
        }
    };

    logger::debug(
        LogTag::Rpc,
        &format!(
            "Endpoint {} (timeout {}s)",
            config.endpoint,
            config.rpc_timeout.as_secs()
        ),
    );
    logger::debug(
        LogTag::Command,
        &format!("Command `{}` via {}", config.command, config.shell.program),
    );

    match poller::run(&config).await {
        Ok(output) => {
            if let Err(e) = relay_output(&output) {
                logger::error(LogTag::System, &format!("{:#}", e));
                std::process::exit(1);
            }
        }
        Err(e) => {
            if let Some(partial) = e.partial_output() {
                let _ = relay_output(partial);
            }
            logger::error(LogTag::System, &format!("{}", e));
            std::process::exit(1);
        }
    }
}

/// Write the command's captured stdout to our stdout, once
fn relay_output(output: &[u8]) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    let written = stdout.write_all(output).and_then(|_| stdout.flush());
    match written {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        result => result.context("writing command output to stdout"),
    }
}
