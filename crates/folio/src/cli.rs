use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about)]
#[command(long_about = "Preview and maintain a portfolio landing page.\n\n\
    Describe the page in a YAML site file and preview its slideshow,\n\
    fly-in key points and contact form in a native window.\n\n\
    Examples:\n  \
    folio site.yaml                   Launch preview (maximized)\n  \
    folio site.yaml --windowed        Launch in a window\n  \
    folio check site.yaml             Validate a site file\n  \
    folio copyright public/*.html     Bump footer copyright years")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Site file to preview
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of maximized
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Open on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Reload the preview when the site file changes
    #[arg(long, global = false)]
    pub watch: bool,

    /// Color theme, overriding the configured default
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a site file and summarize its contents
    Check {
        /// Site file to check
        file: PathBuf,
    },

    /// Validate a contact message and build its mailto link
    Contact {
        /// Sender name
        #[arg(long)]
        name: Option<String>,

        /// Sender email address
        #[arg(long)]
        email: Option<String>,

        /// Message subject
        #[arg(long)]
        subject: Option<String>,

        /// Message body
        #[arg(long)]
        message: Option<String>,

        /// Address the message is sent to
        #[arg(long)]
        recipient: Option<String>,

        /// Open the link in the default mail client
        #[arg(long)]
        open: bool,
    },

    /// Update copyright years in HTML files
    Copyright {
        /// HTML files to update
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Year to write instead of the current one
        #[arg(long)]
        year: Option<i32>,

        /// Only report stale files; fail if any are found
        #[arg(long)]
        check: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.recipient, defaults.interval_ms, defaults.reveal)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Check { file }) => crate::commands::check::run(&file),
            Some(Commands::Contact {
                name,
                email,
                subject,
                message,
                recipient,
                open,
            }) => crate::commands::contact::run(
                crate::commands::contact::ContactArgs {
                    name,
                    email,
                    subject,
                    message,
                    recipient,
                    open,
                },
                self.quiet,
            ),
            Some(Commands::Copyright { files, year, check }) => {
                crate::commands::copyright::run(&files, year, check, self.quiet)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("folio {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(
                        file,
                        crate::app::PreviewOptions {
                            windowed: self.windowed,
                            watch: self.watch,
                            slide: self.slide,
                            theme: self.theme.map(|t| t.as_str().to_string()),
                        },
                    )
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preview_flags() {
        let cli = Cli::try_parse_from([
            "folio", "site.yaml", "--windowed", "--slide", "3", "--theme", "dark", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("site.yaml")));
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(3));
        assert_eq!(cli.theme.map(ThemeName::as_str), Some("dark"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_copyright_requires_files() {
        assert!(Cli::try_parse_from(["folio", "copyright"]).is_err());
        let cli =
            Cli::try_parse_from(["folio", "copyright", "a.html", "b.html", "--check"]).unwrap();
        match cli.command {
            Some(Commands::Copyright { files, year, check }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(year, None);
                assert!(check);
            }
            _ => panic!("expected copyright command"),
        }
    }

    #[test]
    fn test_parse_contact_fields() {
        let cli = Cli::try_parse_from([
            "folio",
            "contact",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--open",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Contact {
                name, subject, open, ..
            }) => {
                assert_eq!(name.as_deref(), Some("Ada Lovelace"));
                assert_eq!(subject, None);
                assert!(open);
            }
            _ => panic!("expected contact command"),
        }
    }
}
