// secret: CLI arguments
//
// clap derive definitions. Subcommands: put, get, delete, list.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage an encrypted key/value store kept in a single file.
#[derive(Parser, Debug)]
#[command(name = "secret")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the store file. Created on first use.
    pub store: PathBuf,

    /// Store passphrase. Prompted for (without echo) when omitted.
    /// Passing it on the command line exposes it to shell history.
    #[arg(long, env = "SECRET_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Replace the payload through a temporary file and an atomic rename.
    #[arg(long)]
    pub atomic: bool,

    /// fsync the store after every write.
    #[arg(long)]
    pub sync: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Store a key/value pair. Keys may contain only A-Z, a-z, 0-9, "_" and "-".
    Put {
        /// Key to store the value under.
        key: String,

        /// Value to store. Use "-" to read it from stdin.
        value: String,
    },

    /// Print the value stored under a key.
    Get {
        /// Key to look up.
        key: String,
    },

    /// Remove a key. Removing a missing key is not an error.
    Delete {
        /// Key to remove.
        key: String,
    },

    /// List all keys in the store.
    List {
        /// Print the keys as a JSON array.
        #[arg(long)]
        json: bool,
    },
}
