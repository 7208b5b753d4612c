// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2blog::{
    AppError, CommandLineInput, FileSink, HttpImageFetcher, NotionHttpClient, SyncConfig,
    SyncRun, SyncSources, SyncStatus,
};
use std::path::Path;
use std::sync::Arc;

/// Console output plus an append-only file that keeps every error.
fn setup_logging(verbose: bool, error_log: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)(utc)} [{l}] {M} ({f}:{L}) - {m}{n}",
        )))
        .build(error_log)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Error)))
                .build("errors", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("errors")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Error log: {}", error_log.display());
    Ok(())
}

/// Publishes every document once and reports what was written.
async fn execute_sync(config: &SyncConfig) -> Result<SyncStatus, AppError> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let sink = FileSink;

    let mut run = SyncRun::new(
        &client,
        &sink,
        SyncSources::from(config),
        config.layout(),
        config.max_block_pages,
    );
    if !config.skip_images {
        run = run.with_image_fetcher(Arc::new(HttpImageFetcher::new()));
    }

    run.execute().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose, Path::new(&cli.error_log))?;

    let config = SyncConfig::resolve(cli).inspect_err(|e| log::error!("{}", e))?;

    let status = execute_sync(&config)
        .await
        .inspect_err(|e| log::error!("Run aborted: {}", e))?;

    log::info!("{}", serde_json::to_string(&status)?);
    for document in &status.documents {
        println!("✓ {}", document.rendered_name);
    }

    if !status.success {
        eprintln!("⚠️  Some documents were skipped; see the log for details.");
        std::process::exit(1);
    }

    Ok(())
}
