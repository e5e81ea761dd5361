use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use xd::config::ParseOptions;
use xd::report::Report;

const SUBCOMMANDS: &[&str] = &["check", "convert", "help"];

#[derive(Parser)]
#[command(name = "xd", version, about = "xd crossword parser and linter")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// TOML file overriding the default parse options
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse, validate and lint an xd document
    Check(CheckArgs),

    /// Rewrite an implicit-ordered document with explicit position headers
    Convert(ConvertArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// xd source file to check
    file: String,

    /// Print the parsed model and report as JSON
    #[arg(long)]
    json: bool,

    /// Skip the lint pass
    #[arg(long)]
    no_lint: bool,

    /// Treat lint findings as errors
    #[arg(long)]
    strict: bool,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// xd source file to convert
    file: String,

    /// Write the converted document here instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    // Backwards compatibility: if the first positional arg is not a known
    // subcommand, inject "check" so `xd puzzle.xd` works like
    // `xd check puzzle.xd`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(first_pos) = args.iter().skip(1).find(|a| !a.starts_with('-')) {
        let first_pos = first_pos.clone();
        if !SUBCOMMANDS.contains(&first_pos.as_str()) {
            let pos = args.iter().position(|a| *a == first_pos).unwrap();
            args.insert(pos, "check".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    let options = load_options(cli.config.as_deref());

    match cli.command {
        Command::Check(check_args) => do_check(check_args, cli.no_color, options),
        Command::Convert(convert_args) => do_convert(convert_args, options),
    }
}

fn load_options(path: Option<&str>) -> ParseOptions {
    let Some(path) = path else {
        return ParseOptions::default();
    };
    match xd_cli::load_options(Path::new(path)) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: '{}': {}", path, error);
            process::exit(1);
        }
    }
}

fn do_check(args: CheckArgs, no_color: bool, mut options: ParseOptions) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    if args.no_lint {
        options.lint_enabled = false;
    }
    if args.strict {
        options.strict_linting = true;
    }

    // Read source
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    // Parse. Fatal errors abort here; validation and lint findings come
    // back inside the report instead.
    let parser = xd::parser::Parser::with_options(source, file_id, options);
    let crossword = match parser.parse() {
        Ok(c) => c,
        Err(errors) => {
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            for error in &errors {
                let diagnostic = error.to_diagnostic();
                let _ =
                    term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            }
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&crossword) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize '{}': {}", args.file, e);
                process::exit(1);
            }
        }
    } else {
        let writer = StandardStream::stderr(color_choice);
        let config = term::Config::default();
        emit_report(&writer, &config, &files, file_id, &crossword.report);
        if crossword.report.success {
            eprintln!(
                "ok: {} ({} clues, {} warnings)",
                args.file,
                crossword.clues.len(),
                crossword.report.warnings.len()
            );
        }
    }

    if !crossword.report.success {
        process::exit(1);
    }
}

fn do_convert(args: ConvertArgs, options: ParseOptions) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let converted = match xd::migrate::to_explicit_headers_with(&source, &options) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("error: cannot convert '{}': {}", args.file, error);
            process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, converted) {
                eprintln!("error: cannot write '{}': {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", converted),
    }
}

fn emit_report(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    file_id: usize,
    report: &Report,
) {
    for finding in report.errors.iter().chain(report.warnings.iter()) {
        let severity = match finding.severity {
            xd::report::Severity::Warning => Severity::Warning,
            xd::report::Severity::Error => Severity::Error,
        };
        if let Some(span) = &finding.span {
            let diagnostic = Diagnostic::new(severity)
                .with_message(&finding.message)
                .with_labels(vec![Label::primary(file_id, span.clone())]);
            let _ = term::emit_to_write_style(&mut writer.lock(), config, files, &diagnostic);
        } else {
            let prefix = match finding.severity {
                xd::report::Severity::Warning => "warning",
                xd::report::Severity::Error => "error",
            };
            eprintln!("{}: {}", prefix, finding.message);
        }
    }
}
