//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{RunOptions, MODULE_MANIFEST_FILE};

/// Top-level CLI parser for `housekeep`.
#[derive(Debug, Parser)]
#[command(
    name = "housekeep",
    version,
    about = "Regenerate CMake source lists and umbrella headers from the filesystem"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Regenerate every module under a project root and the module index.
    Generate {
        /// Project root containing one directory per module.
        root: PathBuf,
        #[command(flatten)]
        flags: GenerateFlags,
    },
    /// Regenerate a single module's manifest and umbrella header.
    Module {
        /// Module directory.
        dir: PathBuf,
        #[command(flatten)]
        flags: GenerateFlags,
    },
}

/// Flags shared by the generating subcommands.
#[derive(Debug, Clone, Args)]
pub struct GenerateFlags {
    /// Fail on config keys that have no default instead of ignoring them.
    #[arg(long)]
    pub strict: bool,
    /// Report files that would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// File name of the per-module manifest.
    #[arg(long, default_value = MODULE_MANIFEST_FILE)]
    pub manifest_name: String,
}

impl From<&GenerateFlags> for RunOptions {
    fn from(flags: &GenerateFlags) -> Self {
        Self {
            strict: flags.strict,
            dry_run: flags.dry_run,
            manifest_name: flags.manifest_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::config::RunOptions;
    use clap::Parser;

    #[test]
    fn parses_generate_subcommand() {
        let cli = Cli::parse_from(["housekeep", "generate", "projects/llama/src", "--dry-run"]);
        match cli.command {
            Command::Generate { root, flags } => {
                assert_eq!(root.to_str(), Some("projects/llama/src"));
                let options = RunOptions::from(&flags);
                assert!(options.dry_run);
                assert!(!options.strict);
                assert_eq!(options.manifest_name, "sources.cmake");
            }
            Command::Module { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn parses_module_subcommand_with_flags() {
        let cli = Cli::parse_from([
            "housekeep",
            "-vv",
            "module",
            "core",
            "--strict",
            "--manifest-name",
            "files.cmake",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Module { dir, flags } => {
                assert_eq!(dir.to_str(), Some("core"));
                assert!(flags.strict);
                assert_eq!(flags.manifest_name, "files.cmake");
            }
            Command::Generate { .. } => panic!("expected module"),
        }
    }

    #[test]
    fn generate_requires_root() {
        assert!(Cli::try_parse_from(["housekeep", "generate"]).is_err());
    }
}
