use std::{
    fs,
    io::{self, BufRead, Read},
    process::ExitCode,
};

use clap::Parser;
use padscript::{
    Execution,
    config::{DeviceConfig, Limits},
    error::RuntimeError,
    hardware::simulated::SimulatedRig,
    ingest::ScriptReceiver,
    interpreter::{parser::core::produce_tree, value::Value},
    run_script,
    session::Session,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// padscript runs pad game scripts against a simulated pad rig.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells padscript to read `contents` as a file path instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the syntax tree as JSON instead of running the script.
    #[arg(long)]
    print_ast: bool,

    /// Reads one submission per line from stdin until `exit`, keeping
    /// declarations between lines.
    #[arg(short, long)]
    interactive: bool,

    /// Device configuration as `key=value;key=value`.
    #[arg(long, default_value = "")]
    preamble: String,

    /// Sleeps for real during sounds, waits and delays.
    #[arg(long)]
    realtime: bool,

    /// Seeds the random source.
    #[arg(long)]
    seed: Option<u64>,

    /// The script, a file path with `--file`, or `-` to read scripts
    /// terminated by `EOF` from stdin.
    contents: Option<String>,
}

fn main() -> ExitCode {
    install_tracing();
    let args = Args::parse();

    let config = DeviceConfig::from_preamble(&args.preamble).unwrap_or_else(|e| {
                                                                 eprintln!("{e}");
                                                                 std::process::exit(2);
                                                             });
    let limits = config.limits(Limits::default());
    let mut rig = SimulatedRig::from_config(&config).realtime(args.realtime)
                                                    .echo(true)
                                                    .auto_arrive(true);
    if let Some(seed) = args.seed {
        rig = rig.with_seed(seed);
    }

    if args.interactive {
        return run_interactive(&mut rig, limits);
    }

    let Some(contents) = args.contents else {
        eprintln!("No script given. Pass a script, a file with --file, or '-' for stdin.");
        return ExitCode::from(2);
    };

    let scripts = if contents == "-" {
        read_stdin_scripts()
    } else if args.file {
        vec![fs::read(&contents).unwrap_or_else(|_| {
                                    eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                    std::process::exit(2);
                                })]
    } else {
        vec![contents.into_bytes()]
    };

    for script in scripts {
        if args.print_ast {
            print_ast(&script, &limits);
            continue;
        }
        if report(run_script(&script, &mut rig, limits)).is_err() {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .try_init();
}

/// Collects every `EOF`-terminated script from stdin. A trailing script
/// without a marker still runs.
fn read_stdin_scripts() -> Vec<Vec<u8>> {
    let mut receiver = ScriptReceiver::default();
    let mut scripts = Vec::new();
    let mut stdin = io::stdin().lock();
    let mut chunk = [0; 256];

    loop {
        let read = match stdin.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) => {
                eprintln!("Failed to read stdin: {e}");
                break;
            },
        };
        match receiver.push(&chunk[..read]) {
            Ok(Some(script)) => scripts.push(script),
            Ok(None) => {},
            Err(e) => eprintln!("{e}"),
        }
    }

    let rest = receiver.take_pending();
    if !rest.trim_ascii().is_empty() {
        warn!(bytes = rest.len(), "stdin closed before the EOF marker");
        scripts.push(rest);
    }
    scripts
}

fn run_interactive(rig: &mut SimulatedRig, limits: Limits) -> ExitCode {
    let mut session = Session::new(limits);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read stdin: {e}");
                return ExitCode::FAILURE;
            },
        };
        if line.trim() == "exit" {
            break;
        }
        if let Ok(execution) = report(session.submit(line.as_bytes(), rig))
           && execution.value != Value::Null
        {
            println!("{}", execution.value);
        }
    }

    ExitCode::SUCCESS
}

fn print_ast(script: &[u8], limits: &Limits) {
    let parsed = produce_tree(script, limits);
    match parsed.program.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to render the syntax tree: {e}"),
    }
}

/// Prints the fatal error, if any, to stderr. Syntax diagnostics are already
/// logged as warnings while the script is parsed.
fn report(result: Result<Execution, RuntimeError>) -> Result<Execution, RuntimeError> {
    if let Err(e) = &result {
        eprintln!("{e}");
    }
    result
}
