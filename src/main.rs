#![deny(missing_debug_implementations)]
//! `SeqRank` - Rank lines of text against a fuzzy filter.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use clap_cargo::style::CLAP_STYLING;
use seqrank::error::{Error, Result};
use seqrank::text::{highlight, FoldedText};
use seqrank::types::Candidate;
use seqrank::{filter_and_rank, fuzzy_score, input, logging, retain_matches};
use tracing::info;

/// CLI arguments for `SeqRank`
#[derive(Parser, Debug)]
#[command(author, version, about, styles = CLAP_STYLING)]
struct Cli {
    /// Increase log verbosity (-v, -vv); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidates, one per line with optional tab-separated alternate text
    Rank {
        /// Filter typed by the user
        filter: String,
        /// Candidate file, stdin when omitted
        file:   Option<PathBuf>,
        /// Show at most this many results
        #[arg(short, long)]
        limit:  Option<usize>,
        /// Also show candidates that did not match
        #[arg(short, long)]
        all:    bool,
        /// Sort candidates alphabetically before ranking
        #[arg(long)]
        alphabetical: bool,
        /// Mark matched characters in the output
        #[arg(long)]
        highlight: bool,
    },
    /// Score a single target against a filter
    Score {
        /// Filter typed by the user
        filter: String,
        /// Text to match against
        target: String,
        /// Require the filter to appear as a contiguous run
        #[arg(long)]
        strict: bool,
    },
}

/// Marker pair used for highlighted output
const HIGHLIGHT: (&str, &str) = ("[", "]");

/// Read candidates from a file, or stdin when no path is given
fn read_candidates(file: Option<&Path>) -> Result<Vec<Candidate>> {
    let candidates = match file {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::input(&format!("Not a file: {}", path.display())));
            }
            input::parse_candidates(BufReader::new(File::open(path)?))?
        },
        None => input::parse_candidates(io::stdin().lock())?,
    };

    if candidates.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(candidates)
}

/// Render one field, highlighting the characters the filter matched
fn render_field(filter: &FoldedText, text: &str, mark: bool) -> String {
    if !mark {
        return text.to_owned();
    }
    let target = FoldedText::new(text);
    fuzzy_score(filter, 0, &target, 0, true).map_or_else(
        || text.to_owned(),
        |found| highlight(text, &found.matches, HIGHLIGHT.0, HIGHLIGHT.1),
    )
}

#[allow(clippy::fn_params_excessive_bools)]
fn rank_candidates(
    filter: &str,
    file: Option<&Path>,
    limit: Option<usize>,
    all: bool,
    alphabetical: bool,
    mark: bool,
) -> Result<()> {
    if limit == Some(0) {
        return Err(Error::input("Limit must be at least 1"));
    }

    let mut candidates = read_candidates(file)?;
    if alphabetical {
        input::sort_alphabetically(&mut candidates);
    }

    let total = candidates.len();
    let mut ranked = filter_and_rank(filter, candidates);
    if !all {
        retain_matches(&mut ranked);
    }
    info!(filter, total, shown = ranked.len(), "Ranking complete");

    let folded = FoldedText::new(filter);
    let mut out = BufWriter::new(io::stdout().lock());
    for candidate in ranked.iter().take(limit.unwrap_or(usize::MAX)) {
        let primary = render_field(&folded, &candidate.primary_text, mark);
        match candidate.secondary_text.as_deref() {
            Some(secondary) => {
                let secondary = render_field(&folded, secondary, mark);
                writeln!(out, "{:>5} | {primary} | {secondary}", candidate.score)?;
            },
            None => writeln!(out, "{:>5} | {primary}", candidate.score)?,
        }
    }
    out.flush()?;

    Ok(())
}

/// Print the raw score of a single target; `Ok(false)` when nothing matched
fn score_target(filter: &str, target: &str, strict: bool) -> Result<bool> {
    let folded_filter = FoldedText::new(filter);
    let folded_target = FoldedText::new(target);

    let Some(found) = fuzzy_score(&folded_filter, 0, &folded_target, 0, !strict) else {
        println!("no match");
        return Ok(false);
    };

    println!("score: {}", found.score);
    println!("match: {}", highlight(target, &found.matches, HIGHLIGHT.0, HIGHLIGHT.1));
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Command::Rank { filter, file, limit, all, alphabetical, highlight: mark } => {
            rank_candidates(&filter, file.as_deref(), limit, all, alphabetical, mark)
                .map(|()| true)
        },
        Command::Score { filter, target, strict } => score_target(&filter, &target, strict),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        },
    }
}
