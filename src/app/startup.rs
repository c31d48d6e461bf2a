//! Application startup
//!
//! Resolves configuration (flags over file over defaults), initialises
//! logging and dispatches the subcommand.

use chrono::Utc;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use super::cli::args::{unescape_payload, Args, Command};
use super::cli::config::Config;
use super::cli::display::{format_error, format_record, statistics_table};
use super::cli::session::{run_session, SessionOptions, SessionSummary};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::time::system_clock;
use crate::core::validation::validate_business_id;
use crate::core::version;
use crate::parser::{try_parse, CaptureMethod};
use crate::repository::api::{CachedScanRepository, InMemoryScanRepository, ScanRepository};
use crate::scanner::api::{ScanContext, ScanLifecycleController, PARSE_FAILURE_MESSAGE};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_UNREADABLE: i32 = 2;

/// Entry point of the `diskscan` binary
pub fn startup() {
    let args = Args::parse();
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };
    let code = runtime.block_on(run(args));
    std::process::exit(code);
}

/// Run a parsed command line and return the process exit code
pub async fn run(args: Args) -> i32 {
    let config = match Config::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let use_color = args
        .color_override()
        .or(config.logging.color)
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(use_color);

    let log_level = args.log_level.as_deref().or(config.logging.level.as_deref());
    let log_format = args
        .log_format
        .as_deref()
        .or(config.logging.format.as_deref());
    let log_file = args.log_file.as_deref().or(config.logging.file.as_deref());
    if let Err(e) = init_logging(log_level, log_format, log_file, use_color) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return EXIT_FAILURE;
    }
    log::debug!(
        "diskscan {} (built {}, {})",
        version::version(),
        version::build_time(),
        version::git_hash()
    );

    match args.command {
        Command::Parse { raw, json } => parse_command(&raw, json, use_color),
        Command::Scan {
            business,
            user,
            email,
            yes,
        } => {
            let scan = ScanCommand {
                business: business.or(config.scanner.business_id.clone()),
                user: user.or(config.scanner.scanned_by.clone()),
                email: email.or(config.scanner.scanned_by_email.clone()),
                auto_accept: yes || config.scanner.auto_accept_duplicates,
                cache_ttl: config.cache_ttl(),
                use_color,
            };
            scan.run().await
        }
    }
}

fn parse_command(raw: &str, json: bool, use_color: bool) -> i32 {
    match try_parse(&unescape_payload(raw), Utc::now()) {
        Ok(record) if json => match serde_json::to_string_pretty(&record) {
            Ok(text) => {
                println!("{}", text);
                EXIT_OK
            }
            Err(e) => {
                eprintln!("Error: failed to encode record: {}", e);
                EXIT_FAILURE
            }
        },
        Ok(record) => {
            println!("{}", format_record(&record, use_color));
            EXIT_OK
        }
        Err(reason) => {
            log::debug!("Parse failed: {}", reason);
            eprintln!("{}", format_error(PARSE_FAILURE_MESSAGE, use_color));
            EXIT_UNREADABLE
        }
    }
}

struct ScanCommand {
    business: Option<String>,
    user: Option<String>,
    email: Option<String>,
    auto_accept: bool,
    cache_ttl: Option<Duration>,
    use_color: bool,
}

impl ScanCommand {
    async fn run(self) -> i32 {
        let business_id = match validate_business_id(self.business.as_deref().unwrap_or("")) {
            Ok(id) => id.to_string(),
            Err(e) => {
                log_error_with_context(&e, "Starting scan session");
                eprintln!("Use --business or set scanner.business_id in the configuration file");
                return EXIT_FAILURE;
            }
        };
        let scanned_by = self
            .user
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "operator".to_string());

        let clock = system_clock();
        let memory = InMemoryScanRepository::new(Arc::clone(&clock));
        let repository: Arc<dyn ScanRepository> = match self.cache_ttl {
            Some(ttl) => Arc::new(CachedScanRepository::new(memory, ttl, Arc::clone(&clock))),
            None => Arc::new(memory),
        };

        let mut context = ScanContext::new(&business_id, scanned_by);
        context.scanned_by_email = self.email;
        let controller = ScanLifecycleController::with_clock(repository, context, clock);

        log::info!("Scanning for business {}; one payload per line", business_id);
        let options = SessionOptions {
            capture_method: CaptureMethod::Barcode,
            auto_accept_duplicates: self.auto_accept,
            use_color: self.use_color,
        };
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();

        let summary = match run_session(&controller, stdin, &mut stdout, &options).await {
            Ok(summary) => summary,
            Err(e) => {
                log_error_with_context(&e, "Scan session");
                return EXIT_FAILURE;
            }
        };
        report(&summary);

        match controller.refresh_statistics().await {
            Ok(stats) => {
                println!();
                statistics_table(&business_id, &stats).printstd();
                EXIT_OK
            }
            Err(e) => {
                log_error_with_context(&e, "Loading scan statistics");
                EXIT_FAILURE
            }
        }
    }
}

fn report(summary: &SessionSummary) {
    log::info!(
        "Session finished: {} saved, {} unreadable, {} declined, {} failed, {} ignored",
        summary.saved,
        summary.unreadable,
        summary.declined,
        summary.failed,
        summary.ignored
    );
}
