//! Command-line interface for `ecbdec`.

#![forbid(unsafe_code)]

mod input;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use aes_core::{count_repeated_blocks, decrypt_ecb_with, encrypt_ecb, PaddingPolicy, BLOCK_SIZE};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

use crate::input::{encode_base64_wrapped, read_base64_file, read_hex_lines};

/// AES-128-ECB decryption of base64 files.
#[derive(Parser)]
#[command(name = "ecbdec", version, author, about = "AES-128-ECB file decryption")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` also applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct KeyArgs {
    /// AES-128 key as 16 ASCII characters.
    #[arg(long, value_name = "TEXT", default_value = "YELLOW SUBMARINE")]
    key: String,
    /// AES-128 key as 32 hex characters, instead of --key.
    #[arg(long, value_name = "HEX", conflicts_with = "key")]
    key_hex: Option<String>,
}

impl KeyArgs {
    fn key_bytes(&self) -> Result<[u8; 16]> {
        match &self.key_hex {
            Some(hex_str) => parse_key_hex(hex_str),
            None => parse_key_text(&self.key),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decrypt a base64 file and print the plaintext.
    Decrypt {
        /// Base64 ciphertext file; line breaks are ignored.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Fail if the plaintext does not end in a valid PKCS#7 pad.
        #[arg(long, default_value_t = false)]
        strict_padding: bool,
        /// Write plaintext here instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Pad and encrypt a file, printing wrapped base64.
    Encrypt {
        /// Plaintext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[command(flatten)]
        key: KeyArgs,
        /// Write base64 here instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Report lines of a hex file whose ciphertext repeats a 16-byte block.
    Detect {
        /// File with one hex-encoded ciphertext per line.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decrypt {
            input,
            key,
            strict_padding,
            output,
        } => {
            let policy = if strict_padding {
                PaddingPolicy::Strict
            } else {
                PaddingPolicy::Lenient
            };
            let plaintext = cmd_decrypt(&input, &key.key_bytes()?, policy)?;
            emit(&plaintext, output.as_deref())
        }
        Commands::Encrypt { input, key, output } => {
            let encoded = cmd_encrypt(&input, &key.key_bytes()?)?;
            emit(encoded.as_bytes(), output.as_deref())
        }
        Commands::Detect { input } => {
            let hits = cmd_detect(&input)?;
            if hits.is_empty() {
                log::warn!("no ECB-encrypted line found in {}", input.display());
            }
            for (line, repeats) in hits {
                println!("{line}: {repeats} repeated blocks");
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn cmd_decrypt(input_path: &Path, key: &[u8; 16], policy: PaddingPolicy) -> Result<Vec<u8>> {
    let ciphertext = read_base64_file(input_path)?;
    log::info!(
        "decrypting {} bytes from {}",
        ciphertext.len(),
        input_path.display()
    );
    decrypt_ecb_with(&ciphertext, key, policy)
        .with_context(|| format!("decrypt {}", input_path.display()))
}

fn cmd_encrypt(input_path: &Path, key: &[u8; 16]) -> Result<String> {
    let plaintext =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = encrypt_ecb(&plaintext, key).context("encrypt")?;
    Ok(encode_base64_wrapped(&ciphertext))
}

/// Returns `(line, repeated_blocks)` for every line that shows repeated blocks.
fn cmd_detect(input_path: &Path) -> Result<Vec<(usize, usize)>> {
    let lines = read_hex_lines(input_path)?;
    log::debug!("scanning {} ciphertexts", lines.len());
    Ok(lines
        .iter()
        .filter_map(|(line, bytes)| {
            let repeats = count_repeated_blocks(bytes, BLOCK_SIZE);
            (repeats > 0).then_some((*line, repeats))
        })
        .collect())
}

fn emit(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, bytes).with_context(|| format!("write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn parse_key_text(text: &str) -> Result<[u8; 16]> {
    let Ok(key) = <[u8; 16]>::try_from(text.as_bytes()) else {
        bail!(
            "AES-128 key must be 16 bytes, got {} ({text:?})",
            text.len()
        );
    };
    Ok(key)
}

fn parse_key_hex(hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.len() != 16 {
        bail!("AES-128 key must be 16 bytes (32 hex characters)");
    }
    let mut key = [0u8; 16];
    key.copy_from_slice(&bytes);
    Ok(key)
}
