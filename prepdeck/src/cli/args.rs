//! CLI argument definitions
//!
//! All Clap derive structs for `prepdeck` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Static GMAT lesson pages with KaTeX math.
#[derive(Parser, Debug)]
#[command(name = "prepdeck", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PREPDECK_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(long, default_value = "human", global = true, env = "PREPDECK_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every lesson, the index page, and a build manifest.
    Build(BuildArgs),

    /// Check lessons for authoring mistakes without writing output.
    Check(CheckArgs),

    /// Render a single lesson file.
    Render(RenderArgs),

    /// Render one formula and print the HTML fragment.
    Math(MathArgs),

    /// List lessons in curriculum order.
    List(ListArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Site Commands
// ============================================================================

/// Content tree location shared by the site commands.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Content directory (one subdirectory per topic).
    #[arg(short, long, default_value = "content", env = "PREPDECK_CONTENT")]
    pub content: PathBuf,

    /// Site configuration file [default: <content>/prepdeck.yaml].
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Content location.
    #[command(flatten)]
    pub source: ContentArgs,

    /// Output directory.
    #[arg(short, long, default_value = "site", env = "PREPDECK_OUTPUT")]
    pub output: PathBuf,

    /// Fail instead of skipping lessons with errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Content location.
    #[command(flatten)]
    pub source: ContentArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict checking (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Content location.
    #[command(flatten)]
    pub source: ContentArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Preview Commands
// ============================================================================

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Lesson file to render.
    pub file: PathBuf,

    /// Write the page here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Site configuration file [default: prepdeck.yaml in the content root].
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `math`.
#[derive(Args, Debug)]
pub struct MathArgs {
    /// TeX source of the formula.
    pub expr: String,

    /// Render as a centered display formula.
    #[arg(short, long)]
    pub display: bool,

    /// Accessible name [default: the formula].
    #[arg(short, long)]
    pub label: Option<String>,

    /// Fail on malformed TeX instead of rendering it best-effort.
    #[arg(long)]
    pub check: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Plain text, colored when enabled.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_flag_is_global() {
        let cli = Cli::try_parse_from(["prepdeck", "list", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        let cli = Cli::try_parse_from(["prepdeck", "list"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Human);
        assert!(Cli::try_parse_from(["prepdeck", "--log-format", "xml", "list"]).is_err());
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["prepdeck", "build"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("Expected BuildArgs");
        };
        assert!(!args.strict);
        assert!(args.source.config.is_none());
    }

    #[test]
    fn test_build_with_paths() {
        let cli = Cli::try_parse_from([
            "prepdeck",
            "build",
            "--content",
            "lessons",
            "--output",
            "public",
            "--strict",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("Expected BuildArgs");
        };
        assert_eq!(args.source.content, PathBuf::from("lessons"));
        assert_eq!(args.output, PathBuf::from("public"));
        assert!(args.strict);
    }

    #[test]
    fn test_check_json_format() {
        let cli = Cli::try_parse_from(["prepdeck", "check", "--format", "json"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("Expected CheckArgs");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_render_requires_file() {
        let result = Cli::try_parse_from(["prepdeck", "render"]);
        assert!(result.is_err(), "Expected error for missing file");
    }

    #[test]
    fn test_math_flags() {
        let cli = Cli::try_parse_from([
            "prepdeck",
            "math",
            "\\sqrt{x^2}",
            "--display",
            "--label",
            "root of x squared",
        ])
        .unwrap();
        let Commands::Math(args) = cli.command else {
            panic!("Expected MathArgs");
        };
        assert_eq!(args.expr, "\\sqrt{x^2}");
        assert!(args.display);
        assert_eq!(args.label.as_deref(), Some("root of x squared"));
        assert!(!args.check);
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["prepdeck", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["prepdeck", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["prepdeck", "--color", variant, "list"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["prepdeck", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["prepdeck", "-vvv", "list"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prepdeck", "check", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
