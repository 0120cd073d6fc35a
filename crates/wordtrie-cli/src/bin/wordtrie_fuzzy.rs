// wordtrie-fuzzy: Find stored words within a small edit distance.
//
// Prints, for each query, the stored words within the distance bound,
// closest first, with their Levenshtein distance.
//
// Usage:
//   wordtrie-fuzzy [-d DICT_PATH] [OPTIONS] [QUERY...]
//
// Options:
//   -d, --dict-path PATH     Word list file (one word per line)
//   -k, --max-distance N     Maximum edit distance (default: 1)
//   -n, --limit N            Maximum number of results (default: 10)
//   -v, --verbose            Log debug output to stderr
//   -h, --help               Print help

use std::io::{self, BufRead, Write};

use wordtrie_cli::EngineFlag;
use wordtrie_engine::AutocompleteEngine;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (verbose, args) = wordtrie_cli::take_verbose(&args);
    let (dict_path, args) = wordtrie_cli::parse_dict_path(&args);

    if wordtrie_cli::wants_help(&args) {
        println!("wordtrie-fuzzy: Find stored words within a small edit distance.");
        println!();
        println!("Usage: wordtrie-fuzzy [-d DICT_PATH] [OPTIONS] [QUERY...]");
        println!();
        println!("If QUERY arguments are given, searches for each query.");
        println!("Otherwise reads queries from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH    Word list file (one word per line)");
        println!("  -k, --max-distance N    Maximum edit distance (default: 1)");
        println!("  -n, --limit N           Maximum number of results (default: 10)");
        println!("  -v, --verbose           Log debug output to stderr");
        println!("  -h, --help              Print this help");
        return;
    }

    wordtrie_cli::init_logging(verbose);

    // Distances are printed, so results come straight from the matcher and
    // the cache is never consulted.
    let (mut options, queries) =
        wordtrie_cli::take_engine_options(&args, &[EngineFlag::Limit, EngineFlag::MaxDistance])
            .unwrap_or_else(|e| wordtrie_cli::fatal(&e));
    options.cache_capacity = 0;

    let engine = wordtrie_cli::load_engine(dict_path.as_deref(), options)
        .unwrap_or_else(|e| wordtrie_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let search = |query: &str, engine: &AutocompleteEngine, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let options = engine.options();
        let matches =
            engine.fuzzy_matches(query, options.default_max_distance, options.default_limit);
        if matches.is_empty() {
            let _ = writeln!(out, "{query}: (no matches)");
        } else {
            let _ = writeln!(out, "{query}:");
            for m in &matches {
                let _ = writeln!(out, "  {} ({})", m.word, m.distance);
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
            search(query, &engine, &mut out);
        }
    } else {
        for query in &queries {
            search(query, &engine, &mut out);
        }
    }
}
