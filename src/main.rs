use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hill::{
    BlockTrace, CipherOptions, Config, FormatKind, HillCipher, Key, KeyInverse, OddLengthPolicy,
    OutputFormat,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::debug;

#[derive(Parser)]
#[command(name = "hill")]
#[command(about = "2x2 Hill cipher CLI tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML); defaults to $HILL_CONFIG if set
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a key and show its inverse
    Key {
        /// Key as four integers 0-25, row-major (e.g. "3,3,2,5")
        #[arg(short, long)]
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random invertible key
    Generate {
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypt text
    Encrypt {
        /// Key as four integers 0-25, row-major (default: config or 3,3,2,5)
        #[arg(short, long)]
        key: Option<String>,

        #[command(flatten)]
        io: IoArgs,

        /// Show per-block details
        #[arg(short, long)]
        trace: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt text
    Decrypt {
        /// Encryption key; its inverse is derived
        #[arg(short, long, conflicts_with = "inverse")]
        key: Option<String>,

        /// Decryption (inverse) key, used as is
        #[arg(long)]
        inverse: Option<String>,

        #[command(flatten)]
        io: IoArgs,

        /// What to do when the cleaned ciphertext has odd length
        #[arg(long)]
        odd_length: Option<OddLengthArg>,

        /// Show per-block details
        #[arg(short, long)]
        trace: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Direct string data (alternative to --input)
    #[arg(short = 'd', long, conflicts_with = "input")]
    data: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for encryption, input format for decryption
    #[arg(short, long)]
    format: Option<OutputFormatEnum>,

    /// Group width for the groups format
    #[arg(short, long)]
    group_size: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatEnum {
    Letters,
    Groups,
    Numeric,
    Base64,
    HexLowercase,
    HexUppercase,
    Base32,
}

impl From<OutputFormatEnum> for FormatKind {
    fn from(val: OutputFormatEnum) -> Self {
        match val {
            OutputFormatEnum::Letters => FormatKind::Letters,
            OutputFormatEnum::Groups => FormatKind::Groups,
            OutputFormatEnum::Numeric => FormatKind::Numeric,
            OutputFormatEnum::Base64 => FormatKind::Base64,
            OutputFormatEnum::HexLowercase => FormatKind::HexLowercase,
            OutputFormatEnum::HexUppercase => FormatKind::HexUppercase,
            OutputFormatEnum::Base32 => FormatKind::Base32,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OddLengthArg {
    Reject,
    Truncate,
}

impl From<OddLengthArg> for OddLengthPolicy {
    fn from(val: OddLengthArg) -> Self {
        match val {
            OddLengthArg::Reject => OddLengthPolicy::Reject,
            OddLengthArg::Truncate => OddLengthPolicy::Truncate,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&Path>, data: Option<&String>) -> Result<String> {
    if let Some(d) = data {
        return Ok(d.clone());
    }

    let bytes = match input {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
            Ok(())
        }
    }
}

fn resolve_format(io: &IoArgs, config: &Config) -> OutputFormat {
    let kind = io.format.map(FormatKind::from).unwrap_or(config.format);
    kind.with_group_size(io.group_size.unwrap_or(config.group_size))
}

fn resolve_key(key: Option<&str>, config: &Config) -> Result<Key> {
    config.key_or(key).with_context(|| match key {
        Some(k) => format!("Invalid key '{}'", k),
        None => "Invalid key in config".to_string(),
    })
}

fn print_trace(blocks: &[BlockTrace], encrypting: bool) {
    let mut stderr = io::stderr().lock();
    let (from, to) = if encrypting { ("plain", "cipher") } else { ("cipher", "plain") };
    let _ = writeln!(stderr, "{:>5}  {:<6} {:<10} {:<10} {:<6}", "block", from, "nums", "nums", to);
    for b in blocks {
        let (a_block, a_nums, b_nums, b_block) = if encrypting {
            (&b.plain_block, b.plain_nums, b.cipher_nums, &b.cipher_block)
        } else {
            (&b.cipher_block, b.cipher_nums, b.plain_nums, &b.plain_block)
        };
        let _ = writeln!(
            stderr,
            "{:>5}  {:<6} {:<10} {:<10} {:<6}",
            b.index,
            a_block,
            format!("{:?}", a_nums),
            format!("{:?}", b_nums),
            b_block
        );
    }
}

fn show_key(key: &Key, json: bool) {
    let inverse = key.inverse();
    if json {
        println!(
            "{}",
            json!({
                "key": key,
                "determinant": key.determinant(),
                "determinant_inverse": key.determinant_inverse(),
                "inverse": inverse,
            })
        );
    } else {
        println!("Key:                 {}", key);
        println!("Determinant:         {}", key.determinant());
        println!("Determinant inverse: {}", key.determinant_inverse());
        println!("Inverse key:         {}", inverse);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Key { key, json } => {
            let key: Key = key.parse().with_context(|| format!("Invalid key '{}'", key))?;
            show_key(&key, json);
        }
        Commands::Generate { seed, json } => {
            let key = match seed {
                Some(seed) => hill::generate_random_key_with(&mut StdRng::seed_from_u64(seed))?,
                None => hill::generate_random_key()?,
            };
            show_key(&key, json);
        }
        Commands::Encrypt { key, io, trace, json } => {
            let key = resolve_key(key.as_deref(), &config)?;
            let format = resolve_format(&io, &config);
            let plaintext = read_input(io.input.as_deref(), io.data.as_ref())?;

            let options = CipherOptions { trace: trace || json, ..Default::default() };
            let result = HillCipher::new(key).encrypt(&plaintext, options)?;
            let encoded = format.encode(&result.ciphertext);

            if json {
                let doc = json!({
                    "key": key,
                    "format": format.name(),
                    "output": encoded,
                    "result": result,
                });
                return write_output(io.output.as_deref(), &serde_json::to_string_pretty(&doc)?);
            }

            if result.was_modified {
                eprintln!("Note: non-alphabet characters were removed before encryption (spaces, punctuation, digits).");
            }
            if let Some(blocks) = &result.blocks {
                eprintln!("Cleaned: {}", result.cleaned);
                eprintln!("Padded:  {}", result.padded);
                print_trace(blocks, true);
            }
            write_output(io.output.as_deref(), &encoded)?;
        }
        Commands::Decrypt { key, inverse, io, odd_length, trace, json } => {
            let cipher = match inverse {
                Some(inv) => {
                    let inverse: KeyInverse = inv.parse().with_context(|| format!("Invalid inverse key '{}'", inv))?;
                    HillCipher::from_inverse(inverse)
                }
                None => HillCipher::new(resolve_key(key.as_deref(), &config)?),
            };
            let format = resolve_format(&io, &config);
            let raw = read_input(io.input.as_deref(), io.data.as_ref())?;
            let ciphertext = format.decode(&raw)?;

            let options = CipherOptions {
                trace: trace || json,
                odd_length: odd_length.map(OddLengthPolicy::from).unwrap_or(config.odd_length),
            };
            let result = cipher.decrypt(&ciphertext, options)?;

            if json {
                let doc = json!({
                    "inverse": cipher.inverse(),
                    "result": result,
                });
                return write_output(io.output.as_deref(), &serde_json::to_string_pretty(&doc)?);
            }

            if let Some(dropped) = result.dropped {
                eprintln!("Warning: odd-length ciphertext, trailing '{}' was ignored.", dropped);
            }
            if let Some(blocks) = &result.blocks {
                eprintln!("Cleaned: {}", result.cleaned);
                print_trace(blocks, false);
            }
            write_output(io.output.as_deref(), &result.plaintext)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
