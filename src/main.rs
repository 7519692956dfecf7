use anyhow::Result;
use sessionkit::cli;

fn main() -> Result<()> {
    // Subcommands run to completion inside process_cli
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level flag takes precedence, then RUST_LOG, then DEBUG_LEVEL.
    sessionkit::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting sessionkit {}", sessionkit::VERSION);

    cli::commands::list_profiles(&runtime_options)
}
