//! ROSpec question generator CLI entry point.

use rosqa_questions::GeneratorConfig;
use rosqa_runtime::run_to_file;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    seed: Option<u64>,
    negatives: Option<usize>,
    no_negatives: bool,
    compact: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--compact" => config.compact = true,
            "--no-negatives" => config.no_negatives = true,
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("--output requires a value".into());
                }
                config.output = Some(PathBuf::from(&args[i]));
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--seed requires a value".into());
                }
                config.seed = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {}", args[i]))?,
                );
            }
            "--negatives" => {
                i += 1;
                if i >= args.len() {
                    return Err("--negatives requires a value".into());
                }
                config.negatives = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --negatives value: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.input.is_some() {
                    return Err("only one input file may be given".into());
                }
                config.input = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("rosqa {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(input) = config.input else {
        return Err("no input file given (try --help)".into());
    };

    let mut generator = GeneratorConfig::default();
    if let Some(seed) = config.seed {
        generator = generator.with_seed(seed);
    }
    if let Some(count) = config.negatives {
        generator = generator.with_negatives_per_file(count);
    }
    if config.no_negatives {
        generator = generator.with_negative_entities(false);
    }

    let output = config
        .output
        .unwrap_or_else(|| PathBuf::from("questions.json"));
    let count = run_to_file(&input, &output, &generator, config.compact)?;
    println!("Wrote {count} questions to {}", output.display());

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mrosqa\x1b[0m - ROSpec architecture question generator

\x1b[1mUSAGE:\x1b[0m
    rosqa [OPTIONS] <FILE>

\x1b[1mARGUMENTS:\x1b[0m
    <FILE>    ROSpec source file to generate questions from

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -o, --output PATH    Output JSON file (default: questions.json)
    --seed N             Seed for negative-name sampling (default: 42)
    --negatives N        Negative existence questions per file (default: 5)
    --no-negatives       Skip negative existence questions
    --compact            Write single-line JSON instead of pretty-printed

\x1b[1mEXAMPLES:\x1b[0m
    rosqa patrol.rospec                  Write questions to questions.json
    rosqa -o out.json patrol.rospec      Write questions to out.json
    rosqa --seed 7 patrol.rospec         Sample negative names under seed 7
    rosqa --no-negatives patrol.rospec   Generate positive questions only"
    );
}
