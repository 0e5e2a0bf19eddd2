use glsetup_engine::logging::{init_logging, LoggingConfig};
use glsetup_engine::{Runtime, WindowConfig, EXIT_SUCCESS};

fn main() {
    init_logging(LoggingConfig::default());

    let code = match Runtime::run(WindowConfig::default()) {
        Ok(summary) => {
            log::debug!("clean shutdown after {} frames", summary.frames);
            EXIT_SUCCESS
        }
        Err(err) => {
            // Printed regardless of the log filter.
            eprintln!("{}", err.message());
            log::debug!("exit cause: {}", err.detail());
            err.exit_code()
        }
    };

    std::process::exit(code);
}
