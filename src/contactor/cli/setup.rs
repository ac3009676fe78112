use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contactor", bin_name = "contactor", version)]
#[command(about = "Local-first contacts manager with plain JSON storage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List contacts alphabetically (default)
    #[command(alias = "ls")]
    List {
        /// Only show contacts whose name or phone number contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search contacts by name or phone number
    Search { term: String },

    /// Show full details of contacts
    #[command(alias = "v")]
    View {
        /// Indexes or ids of the contacts
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Add a contact
    #[command(alias = "new")]
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        phone: String,

        /// Image file path or URL
        #[arg(long)]
        photo: Option<String>,
    },

    /// Change fields of a contact
    #[command(alias = "e")]
    Edit {
        /// Index or id of the contact
        selector: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        /// Image file path or URL
        #[arg(long, conflicts_with = "clear_photo")]
        photo: Option<String>,

        /// Remove the photo
        #[arg(long)]
        clear_photo: bool,
    },

    /// Delete contacts
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Import a device address book export (JSON array)
    Import { file: PathBuf },

    /// Delete every contact
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the storage path of contacts
    Path {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Show or change configuration (storage, contacts-dir, blob-file)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}
