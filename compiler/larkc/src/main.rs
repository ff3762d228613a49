//! Lark compiler CLI.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lark_catalog::{BuiltinCatalog, Catalog, FileCatalog};
use lark_diagnostic::ErrorCode;
use lark_ir::FileId;
use larkc::{compile, init_tracing, reporting};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "build" => build_or_check(&args[2..], true),
        "check" => build_or_check(&args[2..], false),
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: lark explain <ERROR_CODE>");
                eprintln!("Example: lark explain E4001");
                return ExitCode::FAILURE;
            }
            explain(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("Lark Compiler {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

struct Options {
    input: Option<String>,
    catalog: Option<String>,
    output: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> Option<Options> {
    let mut options = Options {
        input: None,
        catalog: None,
        output: None,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                if i + 1 >= args.len() {
                    eprintln!("error: `--catalog` needs a path");
                    return None;
                }
                options.catalog = Some(args[i + 1].clone());
                i += 2;
            }
            "-o" => {
                if i + 1 >= args.len() {
                    eprintln!("error: `-o` needs a path");
                    return None;
                }
                options.output = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            arg if arg.starts_with('-') => {
                eprintln!("error: unknown option `{arg}`");
                return None;
            }
            arg => {
                if options.input.is_some() {
                    eprintln!("error: more than one input file");
                    return None;
                }
                options.input = Some(arg.to_owned());
                i += 1;
            }
        }
    }
    options.input.as_ref()?;
    Some(options)
}

fn build_or_check(args: &[String], write_output: bool) -> ExitCode {
    let Some(options) = parse_options(args) else {
        eprintln!(
            "Usage: lark {} <file.lark> [--catalog <path>] [-o <out.lasm>]",
            if write_output { "build" } else { "check" }
        );
        return ExitCode::FAILURE;
    };
    let input = options.input.as_deref().unwrap_or_default();

    let source = match std::fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read `{input}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let catalog: Box<dyn Catalog> = match &options.catalog {
        Some(path) => match FileCatalog::load(Path::new(path)) {
            Ok(catalog) => Box::new(catalog),
            Err(err) => {
                eprintln!("error: cannot load catalog `{path}`: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(BuiltinCatalog::new()),
    };

    let output = compile(&source, FileId(0), catalog.as_ref());
    if !output.diagnostics.is_empty() {
        eprint!(
            "{}",
            reporting::render_all(&output.diagnostics, input, &source)
        );
    }

    let Some(assembly) = output.assembly else {
        let errors = output.diagnostics.iter().filter(|d| d.is_error()).count();
        eprintln!();
        eprintln!(
            "error: could not compile `{input}` ({errors} error{})",
            if errors == 1 { "" } else { "s" }
        );
        return ExitCode::FAILURE;
    };

    if write_output {
        let out_path = options
            .output
            .unwrap_or_else(|| Path::new(input).with_extension("lasm"));
        if let Err(err) = std::fs::write(&out_path, assembly) {
            eprintln!("error: cannot write `{}`: {err}", out_path.display());
            return ExitCode::FAILURE;
        }
        println!("wrote {}", out_path.display());
    }
    ExitCode::SUCCESS
}

fn explain(code: &str) -> ExitCode {
    match ErrorCode::parse(code) {
        Some(code) => {
            println!("{code}");
            println!();
            println!("{}", code.explanation());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("error: `{code}` is not a known error code");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Lark Compiler");
    println!();
    println!("Usage: lark <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file.lark>    Compile to assembly (.lasm)");
    println!("  check <file.lark>    Check a file without writing output");
    println!("  explain <code>       Explain an error code (e.g., E4001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Build options:");
    println!("  --catalog <path>     Load the full operation catalog from a file");
    println!("  -o <path>            Output file path (default: input with .lasm)");
    println!();
    println!("Examples:");
    println!("  lark build player.lark");
    println!("  lark build player.lark --catalog ops.json -o out.lasm");
    println!("  lark check player.lark");
    println!("  lark explain E4001");
}
