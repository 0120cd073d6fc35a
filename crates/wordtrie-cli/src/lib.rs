// wordtrie-cli: shared utilities for the command-line tools.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use log::{LevelFilter, info, warn};
use wordtrie_core::enums::has_wildcard;
use wordtrie_core::error::WordError;
use wordtrie_engine::{AutocompleteEngine, EngineOptions, Pattern};

/// Word list file name looked up in the per-user directory.
const WORDS_FILE: &str = "words.txt";

/// Word list file name looked up in the current directory.
const LOCAL_WORDS_FILE: &str = "words_alpha.txt";

/// Environment variable naming a word list file.
pub const DICT_PATH_ENV: &str = "WORDTRIE_DICT_PATH";

/// Error type for dictionary loading.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not find a word list in any of the search paths:\n{}", format_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error(transparent)]
    InvalidWord(#[from] WordError),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read one word per line.
///
/// Lines are trimmed and lowercased; blank lines are skipped. Lines that
/// still contain anything outside `a..=z`, or that are longer than
/// [`MAX_WORD_LEN`](wordtrie_core::alphabet::MAX_WORD_LEN), are skipped with
/// a warning.
pub fn read_word_list<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut words = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let word = word.to_ascii_lowercase();
        if let Err(e) = WordError::check(&word) {
            warn!("line {}: skipping word ({e})", lineno + 1);
            continue;
        }
        words.push(word);
    }
    Ok(words)
}

/// Build the list of files to try, in order.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `WORDTRIE_DICT_PATH` environment variable
/// 3. `~/.wordtrie/words.txt`
/// 4. `/usr/share/dict/words`
/// 5. `words_alpha.txt` in the current directory
pub fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(DICT_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".wordtrie").join(WORDS_FILE));
    }

    paths.push(PathBuf::from("/usr/share/dict/words"));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LOCAL_WORDS_FILE));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// First existing file among the search paths.
pub fn find_dictionary(dict_path: Option<&str>) -> Result<PathBuf, DictionaryError> {
    let searched = build_search_paths(dict_path);
    match searched.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(DictionaryError::NotFound { searched }),
    }
}

/// Read a word list file.
pub fn read_dictionary(path: &Path) -> Result<Vec<String>, DictionaryError> {
    let io_error = |source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    read_word_list(BufReader::new(file)).map_err(io_error)
}

/// Locate a word list and seed an engine with it.
pub fn load_engine(
    dict_path: Option<&str>,
    options: EngineOptions,
) -> Result<AutocompleteEngine, DictionaryError> {
    let path = find_dictionary(dict_path)?;
    let words = read_dictionary(&path)?;
    let mut engine = AutocompleteEngine::with_options(options);
    let added = engine.extend_words(&words)?;
    info!("loaded {added} words from {}", path.display());
    Ok(engine)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let (value, remaining) = take_flag(args, "-d", "--dict-path").unwrap_or_else(|e| fatal(&e));
    (value, remaining)
}

/// Remove a `-x VALUE`, `--long VALUE` or `--long=VALUE` flag from `args`.
///
/// The last occurrence wins. Returns the value and the remaining args.
pub fn take_flag(
    args: &[String],
    short: &str,
    long: &str,
) -> Result<(Option<String>, Vec<String>), String> {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();
    let prefix = format!("{long}=");

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == short || arg == long {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// [`take_flag`] for a non-negative integer value.
pub fn take_usize_flag(
    args: &[String],
    short: &str,
    long: &str,
) -> Result<(Option<usize>, Vec<String>), String> {
    let (value, remaining) = take_flag(args, short, long)?;
    let value = value
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| format!("invalid number for {long}: {v:?}"))
        })
        .transpose()?;
    Ok((value, remaining))
}

/// Remove `-v`/`--verbose` from `args`, returning whether it was present.
pub fn take_verbose(args: &[String]) -> (bool, Vec<String>) {
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let remaining = args
        .iter()
        .filter(|a| *a != "-v" && *a != "--verbose")
        .cloned()
        .collect();
    (verbose, remaining)
}

/// Install the stderr logger.
///
/// `RUST_LOG` overrides the default level, which is `warn`, or `debug` with
/// `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// An engine setting a tool can take from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFlag {
    /// `-c`, `--cache-capacity`
    CacheCapacity,
    /// `-n`, `--limit`
    Limit,
    /// `-k`, `--max-distance`
    MaxDistance,
}

impl EngineFlag {
    pub const ALL: [EngineFlag; 3] = [
        EngineFlag::CacheCapacity,
        EngineFlag::Limit,
        EngineFlag::MaxDistance,
    ];

    fn names(self) -> (&'static str, &'static str) {
        match self {
            EngineFlag::CacheCapacity => ("-c", "--cache-capacity"),
            EngineFlag::Limit => ("-n", "--limit"),
            EngineFlag::MaxDistance => ("-k", "--max-distance"),
        }
    }
}

/// Build engine options from the `accepted` flags, removing them from `args`.
///
/// Any other argument starting with `-` is an error. The remaining args are
/// returned in order.
pub fn take_engine_options(
    args: &[String],
    accepted: &[EngineFlag],
) -> Result<(EngineOptions, Vec<String>), String> {
    let mut options = EngineOptions::default();
    let mut args = args.to_vec();
    for &flag in accepted {
        let (short, long) = flag.names();
        let (value, remaining) = take_usize_flag(&args, short, long)?;
        args = remaining;
        let Some(value) = value else {
            continue;
        };
        match flag {
            EngineFlag::CacheCapacity => options.cache_capacity = value,
            EngineFlag::Limit => options.default_limit = value,
            EngineFlag::MaxDistance => options.default_max_distance = value,
        }
    }
    let args = reject_unknown_flags(args)?;
    Ok((options, args))
}

/// Fail on the first argument that looks like an option.
pub fn reject_unknown_flags(args: Vec<String>) -> Result<Vec<String>, String> {
    match args.iter().find(|a| a.starts_with('-')) {
        Some(flag) => Err(format!("unknown option {flag:?}; see --help")),
        None => Ok(args),
    }
}

/// Describe a malformed wildcard query, marking the offending bracket.
///
/// Returns `None` for plain prefixes and well-formed patterns.
pub fn describe_pattern_error(query: &str) -> Option<String> {
    if !has_wildcard(query) {
        return None;
    }
    let error = Pattern::new(query).validate().err()?;
    Some(format!(
        "{error}\n  {query}\n  {}^",
        " ".repeat(error.position())
    ))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
