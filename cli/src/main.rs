use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use clap::Parser;
use quintstore::model::QuintPattern;
use quintstore::web::{LoadOutcome, RdfFormat, SessionContext};
use quintstore::{QuintStore, StoreConfig};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{stdout, BufReader, Write};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_tracing(matches.verbose);
    match matches.command {
        Command::Query {
            document,
            file,
            format,
            subject,
            predicate,
            object,
            graph,
            scope,
            bearer_token,
            timeout,
        } => {
            let mut config = StoreConfig::default();
            config.loader.fetch_timeout = Duration::from_secs(timeout);
            config.http.timeout = Duration::from_secs(timeout);
            let store =
                QuintStore::new_with_config(config).context("Failed to create the HTTP client")?;
            if let Some(token) = bearer_token {
                store.set_session(SessionContext::with_bearer_token(token));
            }

            let format = format.as_deref().map(rdf_format_from_name).transpose()?;
            for (id, path) in file {
                load_file(&store, &id, &path, format)?;
            }
            for id in document {
                if store.load_from_network(&id).await == LoadOutcome::Failed {
                    bail!("Failed to load the document {id}");
                }
            }

            let pattern = QuintPattern::new(
                subject.as_deref(),
                predicate.as_deref(),
                object.as_deref(),
                graph.as_deref(),
                scope.as_deref(),
            );
            let mut quints = store.query_pattern_from_network(&pattern).await.snapshot();
            quints.sort();
            debug!(count = quints.len(), "Query evaluated");

            let mut output = stdout().lock();
            for quint in quints {
                writeln!(output, "{quint}")?;
            }
            output.flush()?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_file(
    store: &QuintStore,
    document: &str,
    path: &Path,
    format: Option<RdfFormat>,
) -> anyhow::Result<()> {
    let format = if let Some(format) = format {
        format
    } else {
        rdf_format_from_path(path)?
    };
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
    );
    store
        .load_from_reader(document, format, reader)
        .with_context(|| format!("Failed to load {} as {document}", path.display()))
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}
