// secret: Command handlers
//
// Each function handles one subcommand against an open store. The store is
// closed explicitly so close-time I/O errors are reported, not swallowed.

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{Context, Result};
use secret_store::{ErrorKind, Store, StoreError, StoreOptions, WriteStrategy};
use tracing::debug;
use zeroize::Zeroizing;

use crate::args::{Cli, Commands};

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<StoreError>().map(StoreError::kind) {
        Some(ErrorKind::NotFound) => 2,
        Some(ErrorKind::Validation) => 3,
        Some(ErrorKind::Crypto) => 4,
        Some(ErrorKind::Format) => 5,
        Some(ErrorKind::Io) | None => 1,
    }
}

fn options_from(cli: &Cli) -> StoreOptions {
    let strategy = if cli.atomic {
        WriteStrategy::AtomicRename
    } else {
        WriteStrategy::InPlace
    };
    StoreOptions::new(strategy, cli.sync)
}

fn resolve_passphrase(flag: Option<String>) -> Result<Zeroizing<String>> {
    match flag {
        Some(p) => Ok(Zeroizing::new(p)),
        None => {
            let p = rpassword::prompt_password("Passphrase: ").context("cannot read passphrase")?;
            Ok(Zeroizing::new(p))
        }
    }
}

/// Execute the parsed CLI command.
pub fn execute(cli: Cli) -> Result<()> {
    let options = options_from(&cli);
    let passphrase = resolve_passphrase(cli.passphrase)?;

    let store = Store::open_with(&cli.store, &passphrase, options)
        .with_context(|| format!("cannot open secret store {}", cli.store.display()))?;
    debug!(revision = store.revision(), "store ready");

    let outcome = match cli.command {
        Commands::Put { key, value } => cmd_put(&store, &key, &value),
        Commands::Get { key } => cmd_get(&store, &key),
        Commands::Delete { key } => cmd_delete(&store, &key),
        Commands::List { json } => cmd_list(&store, json),
    };

    // Report the command failure first; a close failure only matters on success.
    let closed = store.close().context("cannot close secret store");
    outcome?;
    closed
}

fn cmd_put(store: &Store, key: &str, value: &str) -> Result<()> {
    let bytes = if value == "-" {
        let mut buf = Zeroizing::new(Vec::new());
        io::stdin()
            .read_to_end(&mut buf)
            .context("cannot read value from stdin")?;
        buf
    } else {
        Zeroizing::new(value.as_bytes().to_vec())
    };

    store.put(key, &bytes).context("cannot put value")?;
    println!("Key/value successfully stored.");
    Ok(())
}

fn cmd_get(store: &Store, key: &str) -> Result<()> {
    let value = Zeroizing::new(store.get(key).context("cannot get value")?);

    let mut stdout = io::stdout().lock();
    stdout.write_all(&value)?;
    if stdout.is_terminal() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn cmd_delete(store: &Store, key: &str) -> Result<()> {
    store.delete(key).context("cannot delete key")?;
    println!("Key successfully deleted.");
    Ok(())
}

fn cmd_list(store: &Store, json: bool) -> Result<()> {
    let mut keys = store.keys().context("cannot list keys")?;
    keys.sort_unstable();

    if json {
        println!("{}", serde_json::to_string(&keys)?);
        return Ok(());
    }

    if keys.is_empty() {
        println!("No keys stored.");
    } else {
        println!("Stored keys:");
        for k in &keys {
            println!("\t- {k}");
        }
    }
    Ok(())
}
