//! JSON command-line tool for validating, reformatting, and querying
//! JSON documents.
//!
//! Usage: json [OPTIONS] [FILE]
//!
//! Options:
//!       --find <KEY>        Print the value of the first top-level pair named KEY
//!       --indent <UNIT>     Indentation unit for output [default: two spaces]
//!       --max-depth <N>     Maximum container nesting depth [default: 512]
//!       --lenient           Also accept TRUE, FALSE and NULL keyword spellings
//!       --allow-trailing    Ignore content after the top-level value
//!       --check             Check if input is valid (exit 0 if valid, 1 if invalid)
//!   -h, --help              Print help
//!   -V, --version           Print version

use libjson::{parse_with_options, serialize, ParseOptions, Value};
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut find_key: Option<&str> = None;
    let mut indent = "  ";
    let mut check_only = false;
    let mut input_path: Option<&str> = None;
    let mut options = ParseOptions::strict();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("json {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--find" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --find requires a key argument");
                    process::exit(1);
                }
                find_key = Some(&args[i]);
            }
            "--indent" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --indent requires an argument");
                    process::exit(1);
                }
                indent = &args[i];
            }
            "--max-depth" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --max-depth requires a number argument");
                    process::exit(1);
                }
                match args[i].parse::<usize>() {
                    Ok(depth) if depth > 0 => options.max_depth = depth,
                    _ => {
                        eprintln!("Error: Invalid depth: {}", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--lenient" => {
                options.lenient_keywords = true;
            }
            "--allow-trailing" => {
                options.allow_trailing = true;
            }
            "--check" => {
                check_only = true;
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let input: String = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let value: Value = match parse_with_options(&input, options) {
        Ok(v) => v,
        Err(e) => {
            if let Some(path) = input_path {
                eprintln!("{}: {}", path, e);
            } else {
                eprintln!("{}", e);
            }
            process::exit(1);
        }
    };

    if check_only {
        if let Some(path) = input_path {
            println!("{}: ok", path);
        }
        return;
    }

    let selected = match find_key {
        Some(key) => match value.find(key) {
            Some(v) => v,
            None => {
                eprintln!("Error: No such key: {}", key);
                process::exit(1);
            }
        },
        None => &value,
    };

    println!("{}", serialize(selected, indent));
}

fn print_help() {
    println!(
        "json - JSON command-line tool

USAGE:
    json [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided, or when '-')

OPTIONS:
    --find <KEY>        Print the value of the first top-level pair named KEY.
                        Duplicate keys are allowed; the first match wins.

    --indent <UNIT>     Indentation unit repeated per nesting level
                        [default: two spaces]

    --max-depth <N>     Maximum container nesting depth [default: 512]

    --lenient           Also accept the uppercase keyword spellings
                        TRUE, FALSE and NULL

    --allow-trailing    Ignore content after the top-level value instead
                        of failing

    --check             Check if input is valid (exit 0 if valid, 1 if invalid)

    -h, --help          Print help

    -V, --version       Print version

EXAMPLES:
    # Reformat a JSON file
    json config.json

    # Validate a JSON file
    json --check config.json

    # Print a top-level field
    json --find version package.json

    # Reformat from stdin with tab indentation
    cat data.json | json --indent \"$(printf '\\t')\"
"
    );
}
