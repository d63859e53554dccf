//! Command-line interface definitions.
//!
//! Describes how users drive passkeep from the terminal. No application
//! logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "passkeep",
    version,
    about = "Generate random passwords and keep them in a local encrypted store",
    long_about = r#"
passkeep generates random passwords and, if asked, saves them under a
label of your choice in a single encrypted file.

Typical usage:
  passkeep gen --length 20 --copy
  passkeep gen --length 20 --save Email
  passkeep save Bank
  passkeep list

The store is encrypted with XChaCha20-Poly1305 under a key derived from
your master password with Argon2id. Set PASSKEEP_MASTER_PASSWORD to skip
the prompt in scripts.
"#
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Encrypted store file
    #[arg(long, global = true, env = "PASSKEEP_STORE")]
    pub store: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new encrypted store
    ///
    /// Prompts for a master password. Every saved password is encrypted
    /// under a key derived from it.
    Init,

    /// Generate a random password
    ///
    /// Prints a password drawn from letters, digits and symbols. A length
    /// that is not a positive number produces an empty password and a
    /// warning.
    Gen(GenArgs),

    /// Save a password under a label
    ///
    /// When PASSWORD is omitted it is read from a hidden prompt.
    Save(SaveArgs),

    /// List saved passwords in the order they were saved
    List {
        /// Print labels only
        #[arg(long)]
        names_only: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenArgs {
    /// Length of the generated password
    #[arg(short, long, default_value = "16", allow_hyphen_values = true)]
    pub length: String,

    /// Copy the password to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Save the password under this label
    #[arg(short, long, value_name = "NAME")]
    pub save: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    /// Label for the entry (e.g. "Email", "Bank")
    pub name: String,

    /// Password to store
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn gen_defaults_to_sixteen() {
        let cli = Cli::try_parse_from(["passkeep", "gen"]).unwrap();
        let Commands::Gen(args) = cli.command else {
            panic!("expected gen");
        };
        assert_eq!(args.length, "16");
        assert!(!args.copy);
        assert_eq!(args.save, None);
    }

    #[test]
    fn gen_keeps_raw_length_text() {
        let cli = Cli::try_parse_from(["passkeep", "gen", "--length", "-3", "-c", "-s", "Email"])
            .unwrap();
        let Commands::Gen(args) = cli.command else {
            panic!("expected gen");
        };
        assert_eq!(args.length, "-3");
        assert!(args.copy);
        assert_eq!(args.save.as_deref(), Some("Email"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["passkeep", "list", "--store", "x.json", "-v"]).unwrap();
        assert_eq!(cli.global.store, Some(PathBuf::from("x.json")));
        assert!(cli.global.verbose);
        assert!(matches!(cli.command, Commands::List { names_only: false }));
    }

    #[test]
    fn save_password_is_optional() {
        let cli = Cli::try_parse_from(["passkeep", "save", "Bank"]).unwrap();
        let Commands::Save(args) = cli.command else {
            panic!("expected save");
        };
        assert_eq!(args.name, "Bank");
        assert_eq!(args.password, None);
    }
}
