//! dclc - reserved-syntax checker CLI.

use dclc::commands::{check_file, explain_kind, parse_options, verify_command, OutputFormat};

fn main() {
    dclc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    match command.as_str() {
        "check" | "markers" => {
            let mut options = parse_options_or_exit(&args[2..]);
            if command == "markers" {
                options.format = OutputFormat::Markers;
            }
            let Some(path) = options.path.clone() else {
                eprintln!("Usage: dclc {command} <file.dcl> [--engine=both|old|new]");
                std::process::exit(1);
            };
            check_file(&path, &options);
        }
        "verify" => {
            let options = parse_options_or_exit(&args[2..]);
            let path = options.path.clone().unwrap_or_else(|| ".".to_string());
            verify_command(&path, &options);
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: dclc explain <KIND>");
                eprintln!("Example: dclc explain UNSAFE_CALL");
                std::process::exit(1);
            }
            explain_kind(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("dclc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_options_or_exit(args: &[String]) -> dclc::commands::CliOptions {
    match parse_options(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("dclc - reserved syntax checker for `::` references");
    println!();
    println!("Usage: dclc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.dcl>     Check a unit and list its diagnostics");
    println!("  markers <file.dcl>   Print the unit with inline <!KIND!> markers");
    println!("  verify [path]        Verify marker files (default: current directory)");
    println!("  explain <KIND>       Explain a diagnostic kind");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --engine=<mode>      Engines to run: both, old, new (default: from directives)");
    println!("  --format=<format>    check output: text (default), json, markers");
    println!("  --no-color           Disable colored output");
    println!("  --no-parallel        verify: check files one at a time");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing, e.g. RUST_LOG=dcl_check=debug");
    println!("  DCL_LOG_TREE=1       Print tracing spans as a tree");
    println!();
    println!("Examples:");
    println!("  dclc check unit.dcl");
    println!("  dclc markers unit.dcl --engine=old");
    println!("  dclc verify tests/testdata/");
    println!("  dclc explain RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS");
}
