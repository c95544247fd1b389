use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing::error;

use tpm_keyimport::{cli::ParentArgs, KeyImportError};

/// Load a key blob written by keyimport under its storage parent
#[derive(Parser, Debug)]
#[command(name = "keyload")]
#[command(about = "TPM 2.0 key load: check a key blob loads under its parent", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Path of the key blob
    #[arg(default_value = "keyblob.bin")]
    pub input: PathBuf,

    #[command(flatten)]
    pub parent: ParentArgs,
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
            Some(load_err) => {
                eprintln!("Failure 0x{:x}: {err:#}", load_err.code().value());
                load_err.exit_code()
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
    let report = tpm_keyimport::load_from_file(
        &cli.input,
        cli.parent.parent_handle,
        cli.parent.parent_auth,
    )
    .with_context(|| format!("loading {} failed", cli.input.display()))?;

    println!(
        "Loaded {} key from {} at handle {}",
        report.description.algorithm(),
        cli.input.display(),
        report.handle
    );
    println!(
        "Public {} bytes, private {} bytes, attributes {:?}",
        report.public_size, report.private_size, report.description.attributes
    );

    Ok(())
}
