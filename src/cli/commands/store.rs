//! Location and size limit of the file-backed credential store.

use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_STORE_DIR: &str = "store-dir";
pub const ARG_STORE_QUOTA: &str = "store-quota";

/// Browser local storage allows roughly 5 MiB per origin.
pub const DEFAULT_STORE_QUOTA: usize = 5 * 1024 * 1024;

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE_DIR)
                .long(ARG_STORE_DIR)
                .help("Directory holding the credential store")
                .env("CARECONNECT_STORE_DIR")
                .default_value(".careconnect")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_STORE_QUOTA)
                .long(ARG_STORE_QUOTA)
                .help("Largest stored value in bytes; bigger writes are dropped")
                .env("CARECONNECT_STORE_QUOTA")
                .default_value("5242880")
                .global(true)
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Build the global store settings from matches.
///
/// # Errors
/// Returns an error if the store directory is missing.
pub fn parse(matches: &ArgMatches) -> Result<GlobalArgs> {
    let store_dir = matches
        .get_one::<PathBuf>(ARG_STORE_DIR)
        .cloned()
        .context("missing required argument: --store-dir")?;
    let store_quota = matches
        .get_one::<usize>(ARG_STORE_QUOTA)
        .copied()
        .unwrap_or(DEFAULT_STORE_QUOTA);

    Ok(GlobalArgs::new(store_dir).with_quota(store_quota))
}
