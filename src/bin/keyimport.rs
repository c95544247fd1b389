use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing::error;

use tpm_keyimport::{api::Algorithm, cli::ParentArgs, KeyImportError};

/// Import an external RSA or ECC key under a TPM 2.0 storage key
#[derive(Parser, Debug)]
#[command(name = "keyimport")]
#[command(about = "TPM 2.0 key import: wrap a private key under a storage key", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Path the key blob is written to
    #[arg(default_value = "keyblob.bin")]
    pub output: PathBuf,

    /// Key algorithm: RSA or ECC (anything else falls back to RSA)
    #[arg(default_value = "RSA")]
    pub algorithm: String,

    #[command(flatten)]
    pub parent: ParentArgs,

    /// Print the public and private areas as hex instead of writing OUTPUT
    #[arg(long)]
    pub dump: bool,
}

fn main() {
    let cli = Cli::parse_from(tpm_keyimport::cli::normalize_args(std::env::args_os()));

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        let exit_code = match err.downcast_ref::<KeyImportError>() {
            Some(import_err) => {
                eprintln!("Failure 0x{:x}: {err:#}", import_err.code().value());
                import_err.exit_code()
            }
            None => {
                eprintln!("Failure: {err:#}");
                1
            }
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let algorithm = Algorithm::from_selector(&cli.algorithm);
    let ParentArgs {
        parent_handle,
        parent_auth,
    } = cli.parent;

    let report = if cli.dump {
        tpm_keyimport::import_to_console(algorithm, parent_handle, parent_auth)
            .context("key import failed")?
    } else {
        tpm_keyimport::import_to_file(&cli.output, algorithm, parent_handle, parent_auth)
            .with_context(|| format!("key import into {} failed", cli.output.display()))?
    };

    println!(
        "Imported {} key (pub {}, priv {} bytes)",
        report.algorithm, report.public_size, report.private_size
    );
    if !cli.dump {
        println!(
            "Wrote {} bytes to {}",
            report.bytes_written, report.destination
        );
    }

    Ok(())
}
