#[macro_use]
extern crate log;

use std::io::{self, BufRead, BufWriter, Write};
use std::{env, process};

use clap::Parser;
use color_eyre::eyre::Result;
use rayon::prelude::*;

use skim_abbrev::prelude::*;

/// sk-abbrev - abbreviation filter
///
/// Reads candidate lines from stdin and prints, in input order, the ones
/// PATTERN abbreviates: `fbq` matches `FooBarQux`, `foo_bar_qux` and
/// `foo/bar/qux`.
#[derive(Parser, Debug)]
#[command(name = "sk-abbrev", args_override_self = true, verbatim_doc_comment, version, about)]
struct Cli {
    /// Pattern to look for
    pattern: String,

    /// Comma-separated abbreviation options
    ///
    /// * **no-default**: use the fallback matcher unless --algo abbrev is given
    /// * **debug**: append every match to .abbrev.debug
    /// * **file-paths**: split words on path separators, prefer the last one
    /// * **fast**: accept the first alignment found instead of the best one
    #[arg(long, default_value = "", verbatim_doc_comment)]
    abbrev: String,

    /// Matching algorithm
    #[arg(long, value_enum)]
    algo: Option<Algorithm>,

    /// Case sensitivity of the fallback matcher
    #[arg(long, value_enum, default_value = "smart")]
    case: CaseMatching,

    /// Strip accents before falling back to the general matcher
    #[arg(long)]
    normalize: bool,

    /// Prefix every line with its score
    #[arg(long)]
    show_score: bool,

    /// Append the matched character indices to every line
    #[arg(long)]
    show_positions: bool,

    /// Read input delimited by ASCII NUL characters
    #[arg(long)]
    read0: bool,

    /// Print output delimited by ASCII NUL characters
    #[arg(long)]
    print0: bool,
}

enum Engine {
    Abbrev(AbbrevMatcher),
    Fallback(SkimFallback),
}

impl Engine {
    fn new(cli: &Cli) -> Result<Self> {
        let options = AbbrevOptions::parse(&cli.abbrev);
        let engine = match Algorithm::resolve(cli.algo, &options) {
            Algorithm::Abbrev => Engine::Abbrev(
                AbbrevMatcher::builder()
                    .options(options)
                    .case(cli.case)
                    .normalize(cli.normalize)
                    .build()?,
            ),
            Algorithm::Fallback => Engine::Fallback(SkimFallback::new(cli.case, cli.normalize)),
        };
        Ok(engine)
    }

    fn match_line(&self, line: &str, pattern: &str) -> Result<Option<(ScoreType, MatchIndices)>, AbbrevError> {
        match self {
            Engine::Abbrev(matcher) => Ok(matcher
                .run(line, pattern, true)?
                .map(|span| (span.score, span.positions.unwrap_or_default()))),
            Engine::Fallback(matcher) => Ok(matcher.fuzzy_indices(line, pattern)),
        }
    }
}

fn parse_args() -> Cli {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("sk-abbrev")));
    args.extend(
        env::var("ABBREV_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    Cli::parse_from(args)
}

fn read_lines(input: impl BufRead, delimiter: u8) -> io::Result<Vec<String>> {
    input
        .split(delimiter)
        .map(|line| {
            line.map(|mut bytes| {
                if delimiter == b'\n' && bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                String::from_utf8_lossy(&bytes).into_owned()
            })
        })
        .collect()
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(e) = color_eyre::install() {
        warn!("could not install the error report handler: {e}");
    }

    match sk_abbrev_main() {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
            {
                process::exit(0)
            }
            eprintln!("{err:?}");
            process::exit(2)
        }
    }
}

fn sk_abbrev_main() -> Result<i32> {
    let cli = parse_args();
    let engine = Engine::new(&cli)?;
    let output_ending = if cli.print0 { "\0" } else { "\n" };

    let lines = read_lines(io::stdin().lock(), if cli.read0 { b'\0' } else { b'\n' })?;
    debug!("matching {:?} against {} lines", cli.pattern, lines.len());

    let results = lines
        .par_iter()
        .map(|line| engine.match_line(line, &cli.pattern))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut num_matched = 0;
    for (line, (score, indices)) in lines
        .iter()
        .zip(results)
        .filter_map(|(line, result)| result.map(|found| (line, found)))
    {
        num_matched += 1;
        if cli.show_score {
            write!(stdout, "{score}\t")?;
        }
        write!(stdout, "{line}")?;
        if cli.show_positions {
            let positions: Vec<String> = indices.iter().map(ToString::to_string).collect();
            write!(stdout, "\t{}", positions.join(","))?;
        }
        write!(stdout, "{output_ending}")?;
    }
    stdout.flush()?;

    Ok(if num_matched == 0 { 1 } else { 0 })
}
