use anyhow::Result;
use clap::{Parser, Subcommand};
use infind::content::{self, Document};
use infind::highlight::Highlighter;
use infind::{output, tui};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "infind")]
#[command(about = "Search rendered rich-text documents in the terminal, with live highlighting")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial search query for the interactive viewer
    query: Option<String>,

    /// Document file (JSON with title and description); built-in sample if omitted
    #[arg(short, long)]
    doc: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a document in the interactive viewer
    View {
        /// Document file
        doc: PathBuf,

        /// Initial search query
        query: Option<String>,
    },
    /// Run one highlight pass and list the matches
    Matches {
        /// Search query
        query: String,

        /// Document file; built-in sample if omitted
        #[arg(short, long)]
        doc: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the document's visible text and exit
    Text {
        /// Document file; built-in sample if omitted
        #[arg(short, long)]
        doc: Option<PathBuf>,
    },
}

fn load(doc: Option<&PathBuf>) -> Result<Document> {
    match doc {
        Some(path) => content::load_document(path),
        None => Ok(content::sample()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::View { doc, query }) => {
            let doc = content::load_document(&doc)?;
            tui::run(doc, query)?;
        }
        Some(Commands::Matches {
            query,
            doc,
            no_color,
        }) => {
            let mut doc = load(doc.as_ref())?;
            let mut highlighter = Highlighter::new();
            highlighter.set_query(&query)?;
            highlighter.run(&mut doc.body, None);
            output::print_matches(&doc, &query, !no_color)?;
        }
        Some(Commands::Text { doc }) => {
            let doc = load(doc.as_ref())?;
            println!("{}", doc.body.visible_text());
        }
        None => {
            let doc = load(cli.doc.as_ref())?;
            tui::run(doc, cli.query)?;
        }
    }

    Ok(())
}
