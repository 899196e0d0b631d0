// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use color_eyre::Result;

use crate::config::options::{OperatorOptions, RecruitOptions};
use crate::config::{Config, Context};
use crate::core::net::{Fetch, HttpFetcher};
use crate::core::sanitize::title_case;
use crate::operator::{self, Section};
use crate::progress::{ConsoleProgress, Progress};
use crate::store::{self, AddOutcome, StoreError};
use crate::{format, recruit};

#[derive(Debug, Parser)]
#[command(name = "ark", version)]
#[command(about = "Arknights recruitment tag combinations and operator lookup")]
pub struct Cli {
    /// Settings file (default: ./ark.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug detail to the store's debug.log
    #[arg(short, long)]
    pub verbose: bool,

    /// No progress lines on stderr
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find which combinations of recruitment tags give good operators
    #[command(visible_alias = "r", alias = "ro", alias = "recruitop")]
    Recruit {
        /// Tags shown on the recruitment screen (aliases and shortcuts work)
        #[arg(required = true)]
        tags: Vec<String>,

        /// Only list combinations that guarantee 4 stars or better
        #[arg(short, long)]
        beneficial: bool,
    },

    /// Manage your own tag shortcuts
    #[command(visible_alias = "sc")]
    Shortcut {
        #[command(subcommand)]
        action: ShortcutAction,
    },

    /// Look up operator details
    #[command(visible_alias = "s", alias = "scrape", alias = "scraper")]
    Operator(OperatorArgs),
}

#[derive(Debug, Subcommand)]
pub enum ShortcutAction {
    /// Add (or repoint) a shortcut for a tag
    Add {
        shortcut: String,
        /// Any built-in alias of the tag, e.g. top-operator
        tag: String,
    },

    /// Show shortcuts; with -r, show every name each tag answers to
    #[command(visible_alias = "ls")]
    List {
        #[arg(short, long)]
        reverse: bool,

        /// Only these shortcuts (or, with -r, these tags)
        names: Vec<String>,
    },

    /// Delete shortcuts
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(long, conflicts_with = "names")]
        all: bool,

        #[arg(required_unless_present = "all")]
        names: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct OperatorArgs {
    /// Operator names; use '-' for spaces (e.g. blue-poison)
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Stats
    #[arg(short, long)]
    pub info: bool,

    /// Talents
    #[arg(short, long)]
    pub talent: bool,

    /// Base (RIIC) skills
    #[arg(short, long)]
    pub base: bool,

    /// Skills at their top level
    #[arg(short, long, conflicts_with = "vskills")]
    pub skills: bool,

    /// Skills at level 1, 7 and mastery 3
    #[arg(short, long)]
    pub vskills: bool,

    /// Skip the JSON tables and read Gamepress
    #[arg(short, long)]
    pub gamepress: bool,

    /// Everything
    #[arg(short, long)]
    pub all: bool,
}

impl OperatorArgs {
    pub fn options(&self) -> OperatorOptions {
        OperatorOptions {
            names: self.names.clone(),
            sections: Section::from_flags(self.info, self.talent, self.base, self.skills, self.vskills, self.all),
            force_gamepress: self.gamepress,
        }
    }
}

pub fn run() -> Result<()> {
    execute(Cli::parse())
}

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).wrap_err("could not load configuration")?;
    crate::log::init(&config.store.dir, cli.verbose);
    log::info!("ark {} {:?}", env!("CARGO_PKG_VERSION"), cli.command);

    let ctx = Context::load(config).wrap_err("could not read saved shortcuts")?;
    let mut progress = ConsoleProgress::new(cli.quiet);

    match cli.command {
        Command::Recruit { tags, beneficial } => {
            let fetcher = HttpFetcher::new()?;
            let out = recruit_command(&ctx, &fetcher, &RecruitOptions { tags, beneficial }, &mut progress)?;
            print!("{out}");
            Ok(())
        }
        Command::Shortcut { action } => {
            print!("{}", shortcut_command(&ctx, action)?);
            Ok(())
        }
        Command::Operator(args) => {
            let fetcher = HttpFetcher::new()?;
            let (out, failed) = operator_command(&ctx, &fetcher, &args.options(), &mut progress);
            print!("{out}");
            if failed > 0 {
                bail!("{failed} operator(s) could not be looked up");
            }
            Ok(())
        }
    }
}

pub fn recruit_command(
    ctx: &Context,
    fetcher: &dyn Fetch,
    opts: &RecruitOptions,
    progress: &mut dyn Progress,
) -> Result<String> {
    let set = recruit::resolve(ctx, fetcher, &opts.tags, progress)?;
    Ok(format::recruitment(&set, opts.beneficial, ctx.config.recruit.beneficial_threshold))
}

/// Rendered details for every requested operator, and how many failed.
pub fn operator_command(
    ctx: &Context,
    fetcher: &dyn Fetch,
    opts: &OperatorOptions,
    progress: &mut dyn Progress,
) -> (String, usize) {
    let mut out = s!();
    let mut failed = 0usize;

    for (i, name) in opts.names.iter().enumerate() {
        if i > 0 {
            out.push_str(format::OPERATOR_RULE);
            out.push_str("\n\n");
        }
        match operator::lookup(ctx, fetcher, name, opts, progress) {
            Ok(detail) => out.push_str(&format::operator(&detail)),
            Err(e) => {
                log::warn!("{name}: {e}");
                failed += 1;
                out.push_str(&format::operator_failure(&title_case(name), &e.to_string()));
            }
        }
        out.push('\n');
    }
    (out, failed)
}

pub fn shortcut_command(ctx: &Context, action: ShortcutAction) -> Result<String> {
    let store = ctx.shortcut_store();
    let vocab = &ctx.vocab;

    let out = match action {
        ShortcutAction::Add { shortcut, tag } => match store.add(vocab, &shortcut, &tag)? {
            AddOutcome::Added => format!("Successfully added shortcut '{shortcut}' for tag '{tag}'!\n"),
            AddOutcome::Replaced => format!("Shortcut '{shortcut}' now points to tag '{tag}'.\n"),
        },
        ShortcutAction::List { reverse: false, names } => {
            let entries = store::select(vocab.shortcuts(), &names)?;
            format::shortcuts(&entries, vocab)
        }
        ShortcutAction::List { reverse: true, names } => {
            let defs = if names.is_empty() {
                vocab.defs().iter().collect()
            } else {
                names
                    .iter()
                    .map(|n| {
                        vocab
                            .normalize(n)
                            .and_then(|id| vocab.def(&id))
                            .ok_or_else(|| StoreError::UnknownTag(n.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            };
            format::shortcuts_by_tag(&defs, vocab)
        }
        ShortcutAction::Delete { all: true, .. } => {
            let n = store.clear()?;
            format!("Successfully deleted all {n} shortcut(s)!\n")
        }
        ShortcutAction::Delete { all: false, names } => {
            let removed = store.delete(&names)?;
            let names: Vec<&str> = removed.iter().map(|(s, _)| s.as_str()).collect();
            format!("Successfully deleted {}!\n", names.join(", "))
        }
    };
    Ok(out)
}
