// wordtrie-suggest: Complete prefixes and wildcard patterns.
//
// Completes each query given on the command line, or each line of stdin if
// there are none. Queries containing `.` or `[...]` are matched as whole-word
// patterns. A malformed bracket is reported instead of completing the query.
//
// Usage:
//   wordtrie-suggest [-d DICT_PATH] [OPTIONS] [QUERY...]
//
// Options:
//   -d, --dict-path PATH      Word list file (one word per line)
//   -n, --limit N             Maximum number of suggestions (default: 10)
//   -c, --cache-capacity N    Cached queries, 0 to disable (default: 10)
//   -v, --verbose             Log debug output to stderr
//   -h, --help                Print help

use std::io::{self, BufRead, Write};

use wordtrie_cli::EngineFlag;
use wordtrie_engine::AutocompleteEngine;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (verbose, args) = wordtrie_cli::take_verbose(&args);
    let (dict_path, args) = wordtrie_cli::parse_dict_path(&args);

    if wordtrie_cli::wants_help(&args) {
        println!("wordtrie-suggest: Complete prefixes and wildcard patterns.");
        println!();
        println!("Usage: wordtrie-suggest [-d DICT_PATH] [OPTIONS] [QUERY...]");
        println!();
        println!("If QUERY arguments are given, completes each query.");
        println!("Otherwise reads queries from stdin (one per line).");
        println!("'.' matches any letter, '[abc]' one of the listed letters and");
        println!("'[^abc]' any letter not listed.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Word list file (one word per line)");
        println!("  -n, --limit N            Maximum number of suggestions (default: 10)");
        println!("  -c, --cache-capacity N   Cached queries, 0 to disable (default: 10)");
        println!("  -v, --verbose            Log debug output to stderr");
        println!("  -h, --help               Print this help");
        return;
    }

    wordtrie_cli::init_logging(verbose);

    let (options, queries) =
        wordtrie_cli::take_engine_options(&args, &[EngineFlag::Limit, EngineFlag::CacheCapacity])
            .unwrap_or_else(|e| wordtrie_cli::fatal(&e));

    let engine = wordtrie_cli::load_engine(dict_path.as_deref(), options)
        .unwrap_or_else(|e| wordtrie_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let suggest_query = |query: &str, engine: &AutocompleteEngine, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        if let Some(problem) = wordtrie_cli::describe_pattern_error(query) {
            let _ = writeln!(out, "{query}: {problem}");
            return;
        }
        let suggestions = engine.suggest_default(query);
        if suggestions.is_empty() {
            let _ = writeln!(out, "{query}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{query}:");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }
    };

    if queries.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            suggest_query(query, &engine, &mut out);
        }
    } else {
        for query in &queries {
            suggest_query(query, &engine, &mut out);
        }
    }
}
