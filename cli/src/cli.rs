use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "quintstore")]
/// Quintstore command line tool to query linked-data documents
pub struct Args {
    /// Print debug logs
    ///
    /// By default only warnings and errors are printed. The `RUST_LOG` environment variable
    /// overrides the default filter.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load documents and print the quints matching a pattern
    ///
    /// Each quint is printed on its own line as tab-separated subject, predicate, object, graph
    /// and document. The graph is empty for the default graph.
    Query {
        /// Document to fetch before querying
        #[arg(short, long, value_hint = ValueHint::Url)]
        document: Vec<String>,
        /// Local file to load as a document, given as `ID=PATH`
        ///
        /// Relative IRIs in the file are resolved against ID.
        #[arg(short, long, value_parser = parse_file_argument)]
        file: Vec<(String, PathBuf)>,
        /// The format of the local files
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default the format is guessed from the file extension.
        #[arg(long)]
        format: Option<String>,
        /// Only return quints with this subject
        #[arg(short, long, value_hint = ValueHint::Url)]
        subject: Option<String>,
        /// Only return quints with this predicate
        #[arg(short, long, value_hint = ValueHint::Url)]
        predicate: Option<String>,
        /// Only return quints with this object
        #[arg(short, long)]
        object: Option<String>,
        /// Only return quints from this graph
        #[arg(short, long, value_hint = ValueHint::Url)]
        graph: Option<String>,
        /// Only return quints read from this document
        ///
        /// The document is fetched if it is not loaded yet. By default all loaded documents are
        /// queried.
        #[arg(long, value_hint = ValueHint::Url)]
        scope: Option<String>,
        /// Access token sent as bearer token with every request
        #[arg(long)]
        bearer_token: Option<String>,
        /// Maximal duration of a single fetch in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
}

fn parse_file_argument(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((document, path)) if !document.is_empty() && !path.is_empty() => {
            Ok((document.to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected ID=PATH, found '{value}'")),
    }
}
