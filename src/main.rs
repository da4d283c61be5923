mod clipboard;
mod config;
mod errors;
mod generators;
mod password;
mod strength;

use std::path::PathBuf;

use clap::{ Args, Parser, Subcommand };
use log::LevelFilter;

use crate::config::Config;
use crate::errors::{ OktogenError, Result };
use crate::generators::{ CharacterClass, EffectiveAlphabet };
use crate::password::{ MAX_LENGTH, PasswordRequest };
use crate::strength::Assessment;

#[derive(Parser, Debug)]
#[command(name = "oktogen", version, about = "Generate random passwords and estimate how long they take to crack")]
struct Cli {
    /// More log output, repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to read defaults from
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new password
    Generate {
        #[command(flatten)]
        constraints: Constraints,

        /// Password length, clamped to 4..=128
        #[arg(short = 'L', long, value_parser = parse_length)]
        length: Option<usize>,

        /// Copy the password to the clipboard
        #[arg(long)]
        copy: bool,

        /// Print only the password
        #[arg(short, long)]
        quiet: bool,
    },

    /// Estimate the strength of a password
    Estimate {
        #[arg(allow_hyphen_values = true)]
        password: String,

        #[command(flatten)]
        constraints: Constraints,
    },

    /// Drop characters the constraints do not allow
    Filter {
        #[arg(allow_hyphen_values = true)]
        text: String,

        #[command(flatten)]
        constraints: Constraints,

        /// Existing password to paste the filtered text into
        #[arg(long, value_name = "PASSWORD", allow_hyphen_values = true)]
        into: Option<String>,

        /// Character position to paste at, defaults to the end
        #[arg(long, requires = "into")]
        at: Option<usize>,

        /// Cut the result down to this length, clamped to 4..=128
        #[arg(short = 'L', long, value_parser = parse_length)]
        length: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct Constraints {
    /// Character classes to use, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',')]
    classes: Option<Vec<CharacterClass>>,

    /// Characters to leave out
    #[arg(short = 'x', long, value_name = "CHARS")]
    exclude: Option<String>,
}

impl Constraints {
    fn request(self, config: &Config, length: Option<usize>) -> PasswordRequest {
        let mut request = config.request();

        if let Some(classes) = self.classes {
            request.classes = classes;
        }
        if let Some(exclude) = self.exclude {
            request.exclude = exclude;
        }
        if let Some(length) = length {
            request.length = length;
        }

        request
    }
}

fn parse_length(s: &str) -> std::result::Result<usize, String> {
    Ok(password::clamp_length(s))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate { constraints, length, copy, quiet } => {
            let request = constraints.request(&config, length);
            let alphabet = usable_alphabet(&request)?;

            let password = password::generate(&request);
            println!("{}", password);

            if copy || config.copy {
                match clipboard::copy(&password) {
                    Ok(()) if !quiet => eprintln!("Copied to clipboard."),
                    Ok(()) => {}
                    Err(e) => log::warn!("{}", e),
                }
            }

            if !quiet {
                print_assessment(&strength::estimate(&password, alphabet.len()));
            }
        }
        Command::Estimate { password, constraints } => {
            let request = constraints.request(&config, None);
            let alphabet = usable_alphabet(&request)?;

            print_assessment(&strength::estimate(&password, alphabet.len()));
        }
        Command::Filter { text, constraints, into, at, length } => {
            let request = constraints.request(&config, None);
            let allowed = usable_alphabet(&request)?.flat();

            let filtered = filter_text(&text, &allowed, into.as_deref(), at, length);

            println!("{}", filtered);
            print_assessment(&strength::estimate(&filtered, allowed.len()));
        }
    }

    Ok(())
}

/// Sanitizes `text`, or pastes it into `into` at `at` (the end by default).
///
/// `into` is re-checked against `allowed` first. The result is cut to
/// `length` when given, otherwise capped at [`MAX_LENGTH`].
fn filter_text(text: &str, allowed: &[char], into: Option<&str>, at: Option<usize>, length: Option<usize>) -> String {
    let value = match into {
        Some(current) => {
            let current = password::sanitize(current, allowed);
            let position = at.unwrap_or(usize::MAX);
            let (value, cursor) = password::insert_filtered(&current, position..position, text, allowed);
            log::debug!("cursor after paste at {}", cursor);
            value
        }
        None => password::sanitize(text, allowed),
    };

    password::fit_length(&value, length.unwrap_or(MAX_LENGTH))
}

fn usable_alphabet(request: &PasswordRequest) -> Result<EffectiveAlphabet> {
    let alphabet = request.alphabet();

    if alphabet.is_empty() {
        return Err(OktogenError::EmptyAlphabet);
    }

    log::info!(
        "using classes [{}], {} characters",
        alphabet.classes().map(|c| c.name()).collect::<Vec<_>>().join(", "),
        alphabet.len()
    );

    Ok(alphabet)
}

fn print_assessment(assessment: &Assessment) {
    match assessment.tier {
        Some(_) => println!("Strength: {} ({})", assessment.tier_label(), assessment.tag()),
        None => println!("Strength: {}", assessment.tier_label()),
    }
    println!("Time to crack: {}", assessment.time_label());
}
