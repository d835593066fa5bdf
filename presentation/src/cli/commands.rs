//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use lore_domain::NodePath;
use std::path::PathBuf;

/// CLI arguments for lore-forge
#[derive(Parser, Debug)]
#[command(name = "lore-forge")]
#[command(author, version, about = "Ice Wall Expedition - a book written by four model archetypes")]
#[command(long_about = r#"
lore-forge fills a fixed book of sections, chapters and pages with text
written by four generative-model archetypes:

1. The Brains plans page titles for every chapter of a section
2. The Serious drafts each page
3. The Clown rewrites each draft as ensemble banter
4. The Dreamer narrates a finished page as speech

Sections are generated concurrently; requests to any one model are spaced
at least 31 seconds apart and rate-limited calls are retried.

Paths address nodes by position: `0-1` is the second chapter of the first
section, `0-1-2` its third page.

Configuration files are loaded from (in priority order):
1. LORE_* environment variables
2. --config <path>     Explicit config file
3. ./lore.toml         Project-level config
4. ~/.config/lore-forge/config.toml   Global config

Example:
  lore-forge show
  lore-forge generate
  lore-forge chapter 1-0
  lore-forge edit 1-0-2 --text "The wall sings at night."
  lore-forge narrate 1-0-2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the book outline, or one page
    Show(ShowArgs),

    /// Generate the whole book (all sections concurrently)
    Generate,

    /// Regenerate one chapter's pages, keeping their titles
    Chapter {
        /// Chapter path (`S-C`); a page path selects its chapter
        path: NodePath,
    },

    /// Replace a page's text
    Edit(EditArgs),

    /// Narrate a page to a WAV file
    Narrate {
        /// Page path (`S-C-P`)
        path: NodePath,
    },

    /// Export the book as a single HTML file
    Export {
        /// Output directory (defaults to `[storage] export_dir`)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Discard the saved book and restore the starter outline
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowArgs {
    /// Page or chapter path; the whole outline when omitted
    pub path: Option<NodePath>,

    /// Print the raw book JSON
    #[arg(long, conflicts_with = "path")]
    pub json: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    /// Page path (`S-C-P`)
    pub path: NodePath,

    /// New page text
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the new page text from a file (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// The subcommand, defaulting to `show`
    pub fn subcommand(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show(ShowArgs {
            path: None,
            json: false,
        }))
    }
}
