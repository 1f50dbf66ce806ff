use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memfile::{Config, ContentEncoding, FileRegistry, Mode, Result};

#[derive(Parser)]
#[command(name = "memfile")]
#[command(about = "Stage file content in memory and persist it on request")]
#[command(version)]
struct Cli {
    /// TOML config file (save_dir, [env] overrides)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Path variable override, KEY=VALUE (repeatable)
    #[arg(long = "env", global = true)]
    env: Vec<String>,

    /// Directory staged files are saved into
    #[arg(long = "save-dir", global = true)]
    save_dir: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long = "json", global = true)]
    json: bool,

    /// Print staged files with their sizes when done
    #[arg(long = "list", global = true)]
    list: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stage DATA at PATH and save it
    Write {
        path: String,
        data: String,
        #[arg(long, value_enum, default_value = "utf8")]
        encoding: ContentEncoding,
        /// Append to the file at PATH instead of replacing it. Without
        /// --save-dir the result is saved next to PATH, so appends accumulate
        /// there; with --save-dir it goes to SAVE_DIR/<name of PATH>
        #[arg(long)]
        append: bool,
        /// Cursor position to write at
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Stage PATH for reading and print its bytes
    Read {
        path: String,
        /// Maximum number of bytes to read
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
        #[arg(long, value_enum, default_value = "hex")]
        encoding: ContentEncoding,
    },
    /// Load SOURCE under the logical path LOGICAL and save it
    Copy { source: PathBuf, logical: String },
    /// Stage PATH and remove it, deleting the on-disk file
    Rm { path: String },
    /// Create a directory and its parents
    Mkdir { path: String },
    /// List a directory
    Ls { path: String },
    /// Remove a directory and everything under it
    Rmdir { path: String },
}

fn main() {
    memfile::logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("memfile: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mut config = config.with_env_overrides(cli.env.iter().map(String::as_str))?;
    if let Some(dir) = &cli.save_dir {
        config.save_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let save_dir = config.save_dir();
    let mut registry = FileRegistry::new(config.registry_options());

    match &cli.command {
        Command::Write { path, data, encoding, append, offset } => {
            let bytes = encoding.decode(data)?;
            let mode = if *append { Mode::Append } else { Mode::Write };
            let status = registry.select(path, mode);
            let file = registry.get_mut(path)?;
            if let Some(offset) = offset {
                file.seek(*offset);
            }
            let written = file.write(&bytes);
            let dir = config.save_dir.clone().unwrap_or_else(|| file.parent_dir());
            let target = file.save(&dir)?;
            if cli.json {
                println!("{}", serde_json::json!({
                    "path": file.path(),
                    "target": target,
                    "written": written,
                    "size": file.size(),
                    "open": status,
                }));
            } else {
                println!("{} -> {} ({} bytes)", file.path(), target.display(), file.size());
            }
        }
        Command::Read { path, max, offset, encoding } => {
            let status = registry.select(path, Mode::Read);
            let file = registry.get_mut(path)?;
            if let Some(offset) = offset {
                file.seek(*offset);
            }
            let bytes = file.read_bytes(max.unwrap_or(usize::MAX));
            let text = encoding.encode(&bytes);
            if cli.json {
                println!("{}", serde_json::json!({
                    "path": file.path(),
                    "bytes": bytes.len(),
                    "content": text,
                    "open": status,
                }));
            } else {
                println!("{}", text);
            }
        }
        Command::Copy { source, logical } => {
            let file = registry.load(source, logical, Mode::Read)?;
            let target = file.save(&save_dir)?;
            if cli.json {
                println!("{}", serde_json::json!({
                    "path": file.path(),
                    "target": target,
                    "size": file.size(),
                }));
            } else {
                println!("File: {} ({} bytes) -> {}", file.path(), file.size(), target.display());
            }
        }
        Command::Rm { path } => {
            registry.select(path, Mode::Write);
            let outcome = registry.remove(path);
            if cli.json {
                println!("{}", serde_json::json!(outcome));
            } else {
                println!("Removed file: {} ({:?})", registry.resolve(path), outcome.disk);
            }
        }
        Command::Mkdir { path } => {
            let created = registry.create_directory(path)?;
            if cli.json {
                println!("{}", serde_json::json!({ "path": registry.resolve(path), "created": created }));
            } else if created {
                println!("Directory created: {}", registry.resolve(path));
            }
        }
        Command::Ls { path } => {
            let entries = registry.list_directory(path)?;
            if cli.json {
                println!("{}", serde_json::json!(entries));
            } else {
                for entry in entries {
                    println!("{}", entry.display());
                }
            }
        }
        Command::Rmdir { path } => {
            registry.remove_directory(path)?;
            if !cli.json {
                println!("Removed directory: {}", registry.resolve(path));
            }
        }
    }

    if cli.list {
        if cli.json {
            println!("{}", serde_json::json!(registry.list()));
        } else {
            for summary in registry.list() {
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
