use crate::commands::bookmarks::{ExportCommand, OpenCommand, PreviewCommand};
use crate::commands::catalog::{CollectionsCommand, QueryCommand, SitesCommand};
use crate::commands::CommandEnum;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Search-query bookmarks and tab groups", long_about = None)]
pub struct Cli {
    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read sites and collections from a YAML/JSON file instead of the API
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List collections with their terms and time range
    Collections {
        /// Output format (json, yaml)
        #[arg(short = 'f', long)]
        format: Option<String>,
    },

    /// List target sites
    Sites {
        /// Output format (json, yaml)
        #[arg(short = 'f', long)]
        format: Option<String>,
    },

    /// Print the search URL of a collection for each site
    Query {
        /// Collection name or id
        collection: String,

        /// Only sites whose host contains this text
        #[arg(long)]
        site: Option<String>,
    },

    /// Write a collection's bookmark file
    Export {
        /// Collection name or id
        collection: String,

        /// Output file or directory (default: bookmarks-<name>.html here)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Show the groups a bookmark file would open
    Preview {
        /// Netscape bookmark file
        file: PathBuf,

        /// Include links of nested folders in their parent's group
        #[arg(long)]
        flatten: bool,
    },

    /// Open every group of a bookmark file as browser tabs
    Open {
        /// Netscape bookmark file
        file: PathBuf,

        /// Print the plan without opening anything
        #[arg(long)]
        dry_run: bool,

        /// Include links of nested folders in their parent's group
        #[arg(long)]
        flatten: bool,

        /// Seed for the group color sequence
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    /// Whether the command reads from the content store
    pub fn needs_catalog(&self) -> bool {
        matches!(
            self,
            Commands::Collections { .. }
                | Commands::Sites { .. }
                | Commands::Query { .. }
                | Commands::Export { .. }
        )
    }

    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::Collections { format } => {
                CommandEnum::Collections(CollectionsCommand { format })
            }
            Commands::Sites { format } => CommandEnum::Sites(SitesCommand { format }),
            Commands::Query { collection, site } => {
                CommandEnum::Query(QueryCommand { collection, site })
            }
            Commands::Export { collection, output } => {
                CommandEnum::Export(ExportCommand { collection, output })
            }
            Commands::Preview { file, flatten } => {
                CommandEnum::Preview(PreviewCommand { file, flatten })
            }
            Commands::Open {
                file,
                dry_run,
                flatten,
                seed,
            } => CommandEnum::Open(OpenCommand {
                file,
                dry_run,
                flatten,
                seed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dogear", "sites", "--nc", "-g", "--store", "s.yml"]).unwrap();
        assert!(cli.nc);
        assert!(cli.debug);
        assert_eq!(cli.store, Some(PathBuf::from("s.yml")));
        assert!(cli.command.needs_catalog());
    }

    #[test]
    fn test_open_flags() {
        let cli = Cli::try_parse_from(["dogear", "open", "b.html", "--dry-run", "--seed", "7"]).unwrap();
        assert!(!cli.command.needs_catalog());
        match cli.command.into_command() {
            CommandEnum::Open(cmd) => {
                assert!(cmd.dry_run);
                assert!(!cmd.flatten);
                assert_eq!(cmd.seed, Some(7));
                assert_eq!(cmd.file, PathBuf::from("b.html"));
            }
            _ => panic!("expected open command"),
        }
    }

    #[test]
    fn test_query_requires_collection() {
        assert!(Cli::try_parse_from(["dogear", "query"]).is_err());
    }
}
