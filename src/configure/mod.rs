//! Interactive setup of the default AWS credentials profile.
//!
//! This writes `~/.aws/config` and `~/.aws/credentials` in the format read
//! by the AWS credential chain. The directory is wiped before writing, so
//! any other profiles stored there are lost.
use clap::{App, SubCommand};
use dialoguer::{Input, Password};

use std::env;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

use crate::types::UtilResult;

/// Directory (relative to the home directory) holding AWS files.
pub const AWS_DIR: &str = ".aws";

/// Output format always written to the config file.
pub const OUTPUT_FORMAT: &str = "json";

/// Values collected from the operator for the default profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub output: String,
}

/// Generates an appropriate `SubCommand` for this module.
pub fn cmd<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("configure")
        .about("setup aws credentials")
        .alias("c")
}

/// Executes this subcommand and returns a `UtilResult` to indicate success.
pub fn exec() -> UtilResult<()> {
    let profile = prompt()?;
    let home = home_dir()?;

    write_profile(&home, profile)?;

    Ok(())
}

/// Prompts the operator for each value of the default profile.
fn prompt() -> UtilResult<Profile> {
    let access_key = Input::<String>::new()
        .with_prompt("AWS Access Key ID")
        .allow_empty(true)
        .interact_text()?;

    let secret_key = Password::new()
        .with_prompt("AWS Secret Access")
        .allow_empty_password(true)
        .interact()?;

    let region = Input::<String>::new()
        .with_prompt("Default region name")
        .allow_empty(true)
        .interact_text()?;

    let output = Input::<String>::new()
        .with_prompt("Default output format")
        .default(OUTPUT_FORMAT.to_string())
        .interact_text()?;

    Ok(Profile {
        access_key,
        secret_key,
        region,
        output,
    })
}

/// Determines the home directory of the current user.
pub fn home_dir() -> UtilResult<PathBuf> {
    let home = resolve_home(cfg!(windows), |name| env::var(name).unwrap_or_default());

    if home.is_empty() {
        return Err("unable to determine the home directory".into());
    }

    Ok(PathBuf::from(home))
}

/// Resolves a home directory from environment lookups.
///
/// Windows splits the home directory across `HOMEDRIVE` and `HOMEPATH`,
/// with `USERPROFILE` used when those are unset; elsewhere `HOME` is used.
fn resolve_home<F>(windows: bool, var: F) -> String
where
    F: Fn(&str) -> String,
{
    if !windows {
        return var("HOME");
    }

    let home = var("HOMEDRIVE") + &var("HOMEPATH");
    if home.is_empty() {
        return var("USERPROFILE");
    }
    home
}

/// Writes the default profile below the provided home directory.
///
/// The AWS directory is removed and recreated before writing, and the
/// output format is always written as `json` regardless of the input.
/// Returns the path of the recreated directory.
pub fn write_profile(home: &Path, mut profile: Profile) -> UtilResult<PathBuf> {
    profile.output = OUTPUT_FORMAT.to_string();

    let dir = home.join(AWS_DIR);

    // wipe out whatever was there before, directory or not
    if let Ok(metadata) = fs::symlink_metadata(&dir) {
        if metadata.is_dir() {
            fs::remove_dir_all(&dir)?;
        } else {
            fs::remove_file(&dir)?;
        }
    }

    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    builder.mode(0o775);
    builder.create(&dir)?;

    let config = format!(
        "[default]\noutput = {}\nregion = {}\n",
        profile.output, profile.region
    );
    write_private(&dir.join("config"), &config)?;
    info!("config file generated ~/{}/config", AWS_DIR);

    let credentials = format!(
        "[default]\naws_access_key_id = {}\naws_secret_access_key = {}\n",
        profile.access_key, profile.secret_key
    );
    write_private(&dir.join("credentials"), &credentials)?;
    info!("credential file generated ~/{}/credentials", AWS_DIR);

    Ok(dir)
}

/// Writes a file which is only accessible by the owning user.
fn write_private(path: &Path, contents: &str) -> UtilResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;

    Ok(())
}
