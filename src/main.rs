mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use texmend::{Config, normalize_verbose_with};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    let config = match &cli.config_path {
        Some(path) => match Config::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let res = normalize_verbose_with(&cli.input, &config);
    if cli.trace {
        debug_report::print_run(&res, cli.color);
    } else {
        println!("{}", res.output);
    }
}

/// Diagnostics go to stderr so stdout stays the normalized formula.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

struct CliConfig {
    input: String,
    config_path: Option<PathBuf>,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("texmend {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--trace" => trace = true,
            "--config" => {
                let value = args.next().ok_or_else(|| "error: --config expects a value".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--config=") => {
                config_path = Some(PathBuf::from(arg.trim_start_matches("--config=")));
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, config_path, trace, color })
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    let trimmed = buffer.strip_suffix('\n').unwrap_or(&buffer);
    Ok(trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "texmend {version}

Repair LaTeX-like math markup for word-processor renderers.

Usage:
  texmend [OPTIONS] [--] <formula...>
  texmend [OPTIONS] --input <formula>
  echo '<formula>' | texmend [OPTIONS]

Options:
  -i, --input <formula>      Formula to normalize. If omitted, reads remaining args
                             or stdin when no args are provided.
  --config <file.json>       Load operator/letter/decoration/alias sets from JSON.
                             Missing keys keep the built-in defaults.
  --trace                    Print a per-rule report instead of just the result.
  --color                    Force ANSI color output (with --trace).
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for stderr diagnostics (default: warn),
                             e.g. RUST_LOG=texmend=debug shows every rewrite.

Exit codes:
  0  Success.
  1  Configuration could not be loaded.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
