use anyhow::{Result, anyhow};
use gesturectl::config::Config;
use gesturectl::replay::{self, ReplayOptions};
use gesturectl::{GestureLabel, map_to_params};
use pico_args::Arguments;
use std::{
    env, fs,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    let config_path: Option<PathBuf> = pargs.opt_value_from_str("--config")?;
    let changes_only = pargs.contains("--changes-only");
    let pretty = pargs.contains("--pretty");

    // First free arg is the subcommand
    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("replay") => {
            let src: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: gesturectl replay <trace.jsonl|->"))?;
            let cfg = Config::load(config_path.as_deref())?;
            let mut opts = ReplayOptions::from(&cfg);
            opts.changes_only |= changes_only;
            opts.pretty |= pretty;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let summary = replay::replay(open_input(&src)?, &mut out, opts)?;
            out.flush()?;
            eprintln!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }

        Some("classify") => {
            let src: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: gesturectl classify <trace.jsonl|->"))?;
            let cfg = Config::load(config_path.as_deref())?;
            let mut opts = ReplayOptions::from(&cfg);
            opts.pretty |= pretty;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            replay::classify_trace(open_input(&src)?, &mut out, opts)?;
            out.flush()?;
            Ok(())
        }

        Some("params") => {
            let name: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: gesturectl params <IDLE|OPEN_PALM|INDEX_POINT>"))?;
            let label = GestureLabel::parse(&name)
                .ok_or_else(|| anyhow!("unknown gesture label: {name}"))?;
            let v = serde_json::json!({
                "gesture": label,
                "params": map_to_params(label),
            });
            print_response(&v);
            Ok(())
        }

        Some("init-config") => {
            let path = Config::install_default()?;
            println!("gesturectl: config at {}", path.display());
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn open_input(src: &str) -> Result<Box<dyn BufRead>> {
    if src == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let f = fs::File::open(src).map_err(|e| anyhow!("failed to open {src}: {e}"))?;
    Ok(Box::new(BufReader::new(f)))
}

fn print_help() {
    println!(
        r#"gesturectl — stabilized hand gestures from per-frame landmarks

USAGE:
  gesturectl help [command]               Show general or command-specific help
  gesturectl replay <trace|->             Stabilize a recorded trace, one JSON line per frame
  gesturectl classify <trace|->           Print raw per-frame labels only
  gesturectl params <label>               Show render parameters for a gesture
  gesturectl init-config                  Install the default config file

OPTIONS:
  --config <path>                         Use this config instead of the installed one
  --changes-only                          (replay) print only gesture transitions
  --pretty                                Pretty-print JSON output

TIPS:
  - Config: ~/.config/gesturectl/config.toml
  - Log level: GESTURECTL_LOG=debug shows every gesture transition
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "replay" => println!(
            "usage: gesturectl replay <trace.jsonl|-> [--config <path>] [--changes-only] [--pretty]\nFeeds each frame through the stabilizer; the summary goes to stderr."
        ),
        "classify" => println!(
            "usage: gesturectl classify <trace.jsonl|-> [--config <path>] [--pretty]\nRuns only the landmark classifier."
        ),
        "params" => println!(
            "usage: gesturectl params <IDLE|OPEN_PALM|INDEX_POINT>\nPrints scale, rotation speed and display flag."
        ),
        "init-config" => println!(
            "usage: gesturectl init-config\nWrites ~/.config/gesturectl/config.toml unless it exists."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}

fn print_response(v: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_default());
}
