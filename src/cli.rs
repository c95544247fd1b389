//! Command line pieces shared by the binaries

use std::ffi::OsString;

use clap::Args;

use crate::model::{AuthSecret, Handle};

/// Storage parent selection
#[derive(Args, Debug, Clone)]
pub struct ParentArgs {
    /// Handle of the parent storage key, in hex
    #[arg(long, env = "TPM_KEYIMPORT_PARENT_HANDLE", default_value = "0x81000200")]
    pub parent_handle: Handle,

    /// Authorization value of the parent storage key
    #[arg(
        long,
        env = "TPM_KEYIMPORT_PARENT_AUTH",
        default_value = "ThisIsMyStorageKeyAuth",
        hide_default_value = true,
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub parent_auth: AuthSecret,
}

/// Options that consume the following argument as their value
const VALUE_FLAGS: [&str; 2] = ["--parent-handle", "--parent-auth"];

/// Treat a standalone `-?` as a request for help
///
/// Only the exact token is rewritten, and never when it is the value of an
/// option or follows `--`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expects_value = false;
    let mut positional_only = false;

    args.into_iter()
        .map(|arg| {
            let text = arg.to_str();
            let rewrite = text == Some("-?") && !expects_value && !positional_only;

            expects_value = text.is_some_and(|text| VALUE_FLAGS.contains(&text));
            positional_only |= text == Some("--");

            if rewrite {
                OsString::from("--help")
            } else {
                arg
            }
        })
        .collect()
}
