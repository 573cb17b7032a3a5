use std::io::{self, IsTerminal};
use std::time::Instant;

use env_logger::Env;
use log::info;

use ironlisp::repl::{self, ReplOptions};
use ironlisp::{Machine, MachineConfig};

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or("IRONLISP_LOG", "warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = MachineConfig::default();

    // Process command-line flags
    let mut load_files: Vec<String> = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--load" => {
                load_files.push(flag_value(&args, i).to_string());
                i += 2;
            }
            "--heap" => {
                config.heap_capacity = parse_count(&args, i);
                i += 2;
            }
            "--max-depth" => {
                config.max_depth = parse_count(&args, i);
                i += 2;
            }
            "--help" | "-h" => {
                println!("Usage: ironlisp [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --load <file>      Load a source file before starting the REPL (repeatable)");
                println!("  --heap <cells>     Node arena capacity (default {})", config.heap_capacity);
                println!("  --max-depth <n>    Evaluation depth limit (default {})", config.max_depth);
                println!("  --help, -h         Show this help message");
                println!();
                println!("Environment variables:");
                println!("  IRONLISP_LOG=debug   Log filter (error, warn, info, debug, trace)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Try 'ironlisp --help' for usage information.");
                std::process::exit(1);
            }
        }
    }

    let mut machine = Machine::new(config);

    for path in &load_files {
        load_file(&mut machine, path);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    if interactive {
        if load_files.is_empty() {
            println!("ironlisp");
        } else {
            println!("ironlisp (loaded: {})", load_files.join(", "));
        }
        println!(
            "  Heap: {}/{} entries used, Symbols: {} interned",
            machine.heap.used(),
            machine.heap.capacity(),
            machine.symbols.count()
        );
        println!("Type quit to leave.\n");
    }

    let mut stdout = io::stdout();
    if let Err(e) = repl::run(&mut machine, stdin.lock(), &mut stdout, ReplOptions { interactive }) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn flag_value<'a>(args: &'a [String], i: usize) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("{} requires a value", args[i]);
            std::process::exit(1);
        }
    }
}

fn parse_count(args: &[String], i: usize) -> usize {
    let raw = flag_value(args, i);
    match raw.parse() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("{} expects a positive integer, got '{}'", args[i], raw);
            std::process::exit(1);
        }
    }
}

/// Evaluate a source file, exiting the process if any expression fails.
fn load_file(machine: &mut Machine, path: &str) {
    let start = Instant::now();
    match machine.load_file(path) {
        Ok(count) => info!(
            "loaded {} expressions from {} in {:.2}s ({} symbols interned)",
            count,
            path,
            start.elapsed().as_secs_f64(),
            machine.symbols.count()
        ),
        Err(e) => {
            eprintln!("Error loading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
