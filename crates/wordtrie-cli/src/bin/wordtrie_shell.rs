// wordtrie-shell: Interactive autocomplete session.
//
// Loads a word list, then reads commands from stdin until `quit` or end of
// input. When `suggest` finds nothing, a fuzzy search with the default
// distance is tried instead.
//
// Usage:
//   wordtrie-shell [-d DICT_PATH] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH      Word list file (one word per line)
//   -n, --limit N             Default number of results (default: 10)
//   -k, --max-distance N      Default fuzzy distance (default: 1)
//   -c, --cache-capacity N    Cached queries, 0 to disable (default: 10)
//   -v, --verbose             Log debug output to stderr
//   -h, --help                Print help

use std::io::{self, BufRead, Write};

use wordtrie_cli::EngineFlag;
use wordtrie_engine::AutocompleteEngine;

const COMMANDS: &str = "\
commands:
  suggest QUERY [N]      complete a prefix or pattern
  fuzzy QUERY [K] [N]    words within K edits
  insert WORD...         add words
  remove WORD...         delete words
  contains WORD          check a word
  stats                  index and cache statistics
  help                   show this list
  quit                   leave";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (verbose, args) = wordtrie_cli::take_verbose(&args);
    let (dict_path, args) = wordtrie_cli::parse_dict_path(&args);

    if wordtrie_cli::wants_help(&args) {
        println!("wordtrie-shell: Interactive autocomplete session.");
        println!();
        println!("Usage: wordtrie-shell [-d DICT_PATH] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Word list file (one word per line)");
        println!("  -n, --limit N            Default number of results (default: 10)");
        println!("  -k, --max-distance N     Default fuzzy distance (default: 1)");
        println!("  -c, --cache-capacity N   Cached queries, 0 to disable (default: 10)");
        println!("  -v, --verbose            Log debug output to stderr");
        println!("  -h, --help               Print this help");
        println!();
        println!("{COMMANDS}");
        return;
    }

    wordtrie_cli::init_logging(verbose);

    let (options, rest) = wordtrie_cli::take_engine_options(&args, &EngineFlag::ALL)
        .unwrap_or_else(|e| wordtrie_cli::fatal(&e));
    if let Some(extra) = rest.first() {
        wordtrie_cli::fatal(&format!("unexpected argument {extra:?}; see --help"));
    }
    let mut engine = wordtrie_cli::load_engine(dict_path.as_deref(), options)
        .unwrap_or_else(|e| wordtrie_cli::fatal(&e.to_string()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let _ = writeln!(out, "{} words loaded. Type 'help' for commands.", engine.len());
    loop {
        let _ = write!(out, "> ");
        let _ = out.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        }

        match run_command(&mut engine, line.trim(), &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                eprintln!("error writing output: {e}");
                break;
            }
        }
    }
}

/// Execute one command line. Returns `Ok(false)` when the session should end.
fn run_command(engine: &mut AutocompleteEngine, line: &str, out: &mut impl Write) -> io::Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };
    let rest: Vec<&str> = parts.collect();

    match command {
        "suggest" | "s" => {
            let Some(&query) = rest.first() else {
                writeln!(out, "usage: suggest QUERY [N]")?;
                return Ok(true);
            };
            let limit = match number_arg(&rest, 1, engine.options().default_limit) {
                Ok(n) => n,
                Err(msg) => {
                    writeln!(out, "{msg}")?;
                    return Ok(true);
                }
            };
            if let Some(problem) = wordtrie_cli::describe_pattern_error(query) {
                writeln!(out, "error: {problem}")?;
                return Ok(true);
            }
            let suggestions = engine.suggest(query, limit);
            if !suggestions.is_empty() {
                write_list(out, &suggestions)?;
            } else {
                let options = *engine.options();
                let close = engine.fuzzy_search(query, options.default_max_distance, limit);
                if close.is_empty() {
                    writeln!(out, "(no suggestions)")?;
                } else {
                    writeln!(out, "no completions for {query:?}; did you mean:")?;
                    write_list(out, &close)?;
                }
            }
        }
        "fuzzy" | "f" => {
            let Some(&query) = rest.first() else {
                writeln!(out, "usage: fuzzy QUERY [K] [N]")?;
                return Ok(true);
            };
            let options = *engine.options();
            let parsed = number_arg(&rest, 1, options.default_max_distance)
                .and_then(|k| number_arg(&rest, 2, options.default_limit).map(|n| (k, n)));
            let (max_distance, limit) = match parsed {
                Ok(pair) => pair,
                Err(msg) => {
                    writeln!(out, "{msg}")?;
                    return Ok(true);
                }
            };
            let results = engine.fuzzy_search(query, max_distance, limit);
            if results.is_empty() {
                writeln!(out, "(no matches)")?;
            } else {
                write_list(out, &results)?;
            }
        }
        "insert" | "i" => {
            for word in &rest {
                match engine.insert(word) {
                    Ok(true) => writeln!(out, "inserted {word}")?,
                    Ok(false) => writeln!(out, "{word} already present")?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
        }
        "remove" | "r" => {
            for word in &rest {
                if engine.remove(word) {
                    writeln!(out, "removed {word}")?;
                } else {
                    writeln!(out, "{word} not found")?;
                }
            }
        }
        "contains" | "c" => {
            let Some(&word) = rest.first() else {
                writeln!(out, "usage: contains WORD")?;
                return Ok(true);
            };
            writeln!(out, "{}", if engine.contains(word) { "yes" } else { "no" })?;
        }
        "stats" => {
            writeln!(out, "words: {}", engine.len())?;
            writeln!(out, "nodes: {}", engine.index().node_count())?;
            let cache = engine.cache_snapshot();
            writeln!(out, "cache: {}/{}", cache.len(), cache.capacity())?;
            let mut keys: Vec<(&str, u64)> = cache
                .keys()
                .filter_map(|k| cache.frequency(k).map(|f| (k, f)))
                .collect();
            keys.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            for (key, frequency) in keys {
                writeln!(out, "  {key:?} x{frequency}")?;
            }
        }
        "help" | "?" => writeln!(out, "{COMMANDS}")?,
        "quit" | "exit" | "q" => return Ok(false),
        other => writeln!(out, "unknown command {other:?}; type 'help'")?,
    }
    Ok(true)
}

/// Parse `rest[index]` as a number, or return `default` if absent.
fn number_arg(rest: &[&str], index: usize, default: usize) -> Result<usize, String> {
    match rest.get(index) {
        Some(raw) => raw.parse().map_err(|_| format!("not a number: {raw:?}")),
        None => Ok(default),
    }
}

fn write_list(out: &mut impl Write, words: &[String]) -> io::Result<()> {
    for word in words {
        writeln!(out, "  {word}")?;
    }
    Ok(())
}
