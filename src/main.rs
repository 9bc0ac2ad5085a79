use cidr_algebra::commands::run;
use cidr_algebra::config::Settings;
use cidr_algebra::logging::init_logging;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let settings = Settings::from_env();
    if let Err(e) = init_logging(&settings.log_config) {
        eprintln!("{e}");
    }
    log::info!("#Start main()");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args, &settings) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::warn!("{e}");
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
