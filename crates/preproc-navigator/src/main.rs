use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use preproc_navigator::PreprocLanguageServer;

#[derive(Parser, Debug)]
#[command(name = "preproc-navigator", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_messages: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn stderr_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("preproc_navigator=debug,tower_lsp=debug")
    } else {
        EnvFilter::new("preproc_navigator=info,tower_lsp=warn")
    }
}

/// The file log stays at info so the default log is readable after the fact;
/// `--verbose` widens it to the full debug stream.
fn file_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("preproc_navigator=debug,tower_lsp=info")
    } else {
        EnvFilter::new("preproc_navigator=info,tower_lsp=warn")
    }
}

/// `$HOME/.preproc-navigator/preproc-navigator.log`, falling back to the
/// system temp dir when the home directory is unavailable or read-only.
fn default_log_path() -> PathBuf {
    let dir = std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".preproc-navigator"))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(std::env::temp_dir);
    dir.join("preproc-navigator.log")
}

fn init_tracing(args: &Args) -> PathBuf {
    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("."));
    let log_name = log_path.file_name().unwrap_or(OsStr::new("preproc-navigator.log"));

    let file_layer = fmt::layer()
        .with_writer(tracing_appender::rolling::never(log_dir, log_name))
        .with_ansi(false)
        .with_target(false)
        .with_filter(file_filter(args.verbose));

    // stderr is safe for logging: the LSP transport owns stdin/stdout.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter(args.verbose));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    log_path
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let log_path = init_tracing(&args);

    info!("Starting preproc-navigator server v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let (service, socket) = LspService::new(|client| PreprocLanguageServer::new(client, args.log_messages));

    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket).serve(service).await;

    info!("preproc-navigator server stopped");
}
