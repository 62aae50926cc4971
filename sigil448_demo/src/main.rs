use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use hex::encode as hex_encode;
use log::debug;
use sigil448_core::{
    decrypt_asymmetric, decrypt_symmetric, digest, encrypt_asymmetric, encrypt_symmetric,
    generate_key_pair, parse_public_key, sign, verify, Signature, SymmetricCryptogram,
};

#[derive(Parser)]
#[command(
    name = "sigil448",
    author,
    version,
    about = "KMACXOF256 + Ed448-Goldilocks engine driver"
)]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a key pair from a passphrase and write both halves to disk.
    Keygen {
        #[arg(long)]
        passphrase: String,
        #[arg(long, value_name = "FILE")]
        public_out: PathBuf,
        #[arg(long, value_name = "FILE")]
        private_out: Option<PathBuf>,
    },
    /// Encrypt a file under a stored public key (DHIES).
    Encrypt {
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Decrypt a DHIES cryptogram with a passphrase.
    Decrypt {
        #[arg(long)]
        passphrase: String,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Encrypt a file under a passphrase (symmetric).
    SymEncrypt {
        #[arg(long)]
        passphrase: String,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Decrypt a symmetric cryptogram with a passphrase.
    SymDecrypt {
        #[arg(long)]
        passphrase: String,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Sign a file with a passphrase-derived key.
    Sign {
        #[arg(long)]
        passphrase: String,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Verify a detached signature against a stored public key.
    Verify {
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        signature: PathBuf,
    },
    /// Print the 512-bit digest of a file.
    Digest {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match cli.command {
        Commands::Keygen {
            passphrase,
            public_out,
            private_out,
        } => cmd_keygen(&passphrase, &public_out, private_out.as_deref()),
        Commands::Encrypt { key, input, out } => cmd_encrypt(&key, &input, &out),
        Commands::Decrypt {
            passphrase,
            input,
            out,
        } => cmd_decrypt(&passphrase, &input, &out),
        Commands::SymEncrypt {
            passphrase,
            input,
            out,
        } => cmd_sym_encrypt(&passphrase, &input, &out),
        Commands::SymDecrypt {
            passphrase,
            input,
            out,
        } => cmd_sym_decrypt(&passphrase, &input, &out),
        Commands::Sign {
            passphrase,
            input,
            out,
        } => cmd_sign(&passphrase, &input, &out),
        Commands::Verify {
            key,
            input,
            signature,
        } => cmd_verify(&key, &input, &signature),
        Commands::Digest { input } => cmd_digest(&input),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

fn cmd_keygen(passphrase: &str, public_out: &Path, private_out: Option<&Path>) -> Result<()> {
    let pair = generate_key_pair(passphrase.as_bytes());
    let public_bytes = pair.public_key_bytes();
    write_bytes(public_out, "public key", &public_bytes)?;
    println!("Public key:  {}", hex_encode(public_bytes));
    if let Some(path) = private_out {
        write_bytes(path, "private seed", &pair.private_seed)?;
        println!("Private seed written to {}", path.display());
    }
    Ok(())
}

fn cmd_encrypt(key_path: &Path, input: &Path, out: &Path) -> Result<()> {
    let public_key = load_public_key(key_path)?;
    let message = read_bytes(input, "plaintext")?;
    let cryptogram = encrypt_asymmetric(&message, &public_key);
    debug!(
        "asymmetric cryptogram: {} ciphertext bytes",
        cryptogram.c.len()
    );
    write_bytes(out, "cryptogram", &cryptogram.to_bytes())?;
    println!(
        "Encrypted {} bytes into {}",
        message.len(),
        out.display()
    );
    Ok(())
}

fn cmd_decrypt(passphrase: &str, input: &Path, out: &Path) -> Result<()> {
    let cryptogram = read_bytes(input, "cryptogram")?;
    let message = decrypt_asymmetric(&cryptogram, passphrase.as_bytes())
        .context("cryptogram rejected")?;
    write_bytes(out, "plaintext", &message)?;
    println!("Recovered {} bytes into {}", message.len(), out.display());
    Ok(())
}

fn cmd_sym_encrypt(passphrase: &str, input: &Path, out: &Path) -> Result<()> {
    let message = read_bytes(input, "plaintext")?;
    let cryptogram = encrypt_symmetric(&message, passphrase.as_bytes());
    write_bytes(out, "cryptogram", &cryptogram.to_bytes())?;
    println!(
        "Encrypted {} bytes into {}",
        message.len(),
        out.display()
    );
    Ok(())
}

fn cmd_sym_decrypt(passphrase: &str, input: &Path, out: &Path) -> Result<()> {
    let bytes = read_bytes(input, "cryptogram")?;
    let cryptogram = SymmetricCryptogram::from_bytes(&bytes).context("malformed cryptogram")?;
    let message =
        decrypt_symmetric(&cryptogram, passphrase.as_bytes()).context("cryptogram rejected")?;
    write_bytes(out, "plaintext", &message)?;
    println!("Recovered {} bytes into {}", message.len(), out.display());
    Ok(())
}

fn cmd_sign(passphrase: &str, input: &Path, out: &Path) -> Result<()> {
    let message = read_bytes(input, "message")?;
    let signature = sign(&message, passphrase.as_bytes());
    write_bytes(out, "signature", &signature.to_bytes())?;
    println!("Signature written to {}", out.display());
    Ok(())
}

fn cmd_verify(key_path: &Path, input: &Path, signature_path: &Path) -> Result<()> {
    let public_key = load_public_key(key_path)?;
    let message = read_bytes(input, "message")?;
    let signature_bytes = read_bytes(signature_path, "signature")?;
    let signature = Signature::from_bytes(&signature_bytes).context("malformed signature")?;
    if verify(&signature, &message, &public_key) {
        println!("Valid signature");
        Ok(())
    } else {
        anyhow::bail!("invalid signature")
    }
}

fn cmd_digest(input: &Path) -> Result<()> {
    let data = read_bytes(input, "input")?;
    println!("{}", hex_encode(digest(&data)));
    Ok(())
}

fn load_public_key(path: &Path) -> Result<sigil448_core::CurvePoint> {
    let bytes = read_bytes(path, "public key")?;
    parse_public_key(&bytes).context("invalid public key")
}

fn read_bytes(path: &Path, label: &str) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {} from {}", label, path.display()))
}

fn write_bytes(path: &Path, label: &str, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {} to {}", label, path.display()))
}
