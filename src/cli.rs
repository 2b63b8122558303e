use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

// All arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log at debug level, including every paginator created
    #[arg(short, long)]
    pub debug: bool,

    /// Directory holding pager.toml
    #[arg(short, long, default_value = ".")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub action: Action,
}

// All available actions
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Run the built-in table of paginator checks
    Check,
    /// Answer a single query about a collection
    Query {
        #[command(flatten)]
        source: Source,

        /// Items per page; falls back to pager.toml
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        per_page: Option<String>,

        #[command(subcommand)]
        query: QueryKind,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Size of the collection
    #[arg(short, long)]
    pub items: Option<usize>,

    /// JSON file whose top-level value is the collection
    #[arg(short, long)]
    pub json: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    PageCount,
    ItemCount,
    PageItemCount {
        #[arg(allow_hyphen_values = true)]
        page: String,
    },
    PageIndex {
        #[arg(allow_hyphen_values = true)]
        item: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn negative_indices_are_not_flags() {
        let args = Args::parse_from(["pager", "query", "--items", "6", "page-index", "-10"]);
        match args.action {
            Action::Query { query, .. } => {
                assert_eq!(query, QueryKind::PageIndex { item: "-10".into() })
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn source_is_required_and_exclusive() {
        assert!(Args::try_parse_from(["pager", "query", "page-count"]).is_err());
        assert!(
            Args::try_parse_from([
                "pager", "query", "--items", "3", "--json", "a.json", "page-count"
            ])
            .is_err()
        );
    }
}
