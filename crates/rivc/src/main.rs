//! Riv compiler front end
//!
//! Usage: rivc [OPTIONS] <input>

use anyhow::Context;
use clap::Parser as ClapParser;
use riv_compiler::common::{CompileResult, DiagnosticReporter};
use riv_compiler::frontend;
use riv_compiler::frontend::ast::postfix;
use riv_compiler::frontend::lexer::Lexer;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "rivc")]
#[command(version = "0.1.0")]
#[command(about = "Front end for the Riv language", long_about = None)]
struct Args {
    /// Input source file (.riv)
    #[arg(required = true)]
    input: PathBuf,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the syntax tree in canonical postfix form
    #[arg(long)]
    dump_ast: bool,

    /// Stop after parsing, skip semantic analysis
    #[arg(long)]
    no_analyze: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read '{}'", args.input.display()))?;
    let filename = args.input.display().to_string();

    // Set up diagnostic reporter
    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    if args.verbose {
        eprintln!("Checking {}", args.input.display());
    }

    if let Err(error) = compile(args, &source) {
        reporter.report_error(file_id, &error);
        process::exit(1);
    }

    if args.verbose {
        eprintln!("{}: ok", args.input.display());
    }
    Ok(())
}

fn compile(args: &Args, source: &str) -> CompileResult<()> {
    if args.dump_tokens {
        for token in Lexer::new(source).tokenize_all()? {
            println!(
                "{:?} '{}' at {}:{}",
                token.kind,
                token.text,
                token.line + 1,
                token.col + 1
            );
        }
        return Ok(());
    }

    let tree = if args.no_analyze {
        frontend::parse(source)?
    } else {
        frontend::check(source)?
    };

    if args.dump_ast {
        println!("{}", postfix(&tree));
    }
    Ok(())
}
