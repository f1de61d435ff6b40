use cifra::{Engine, EngineConfig, Instrument};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: cifra [--config <file.yaml>] <command>

Commands:
  transpose <file> <semitones>   Transpose a chord sheet
  key <file> <from> <to>         Transpose a chord sheet between keys
  chord <name> [guitar|ukulele]  Print a chord diagram
  split <file>                   Separate a scraped page into body and credits";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    // Parse flags
    let mut config = EngineConfig::default();
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            usage();
        }
        let path = args[1].clone();
        args.drain(..2);
        let content = read_file(&path);
        config = match EngineConfig::from_yaml(&content) {
            Ok(config) => config,
            Err(e) => fail(&format!("Error in '{}': {}", path, e)),
        };
    }

    let engine = Engine::with_config(config);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["transpose", path, semitones] => {
            let semitones: i32 = match semitones.parse() {
                Ok(n) => n,
                Err(_) => fail(&format!("Invalid semitone count: {}", semitones)),
            };
            print!("{}", engine.transpose_text(&read_file(path), semitones));
        }
        ["key", path, from, to] => match engine.transpose_text_to_key(&read_file(path), from, to) {
            Ok(text) => print!("{}", text),
            Err(e) => fail(&format!("Error: {}", e)),
        },
        ["chord", name] => print_chord(&engine, name, Instrument::Guitar),
        ["chord", name, instrument] => match Instrument::from_str(instrument) {
            Some(instrument) => print_chord(&engine, name, instrument),
            None => fail(&format!("Unknown instrument: {}", instrument)),
        },
        ["split", path] => {
            let doc = engine.split_document(&read_file(path));
            print_yaml(&doc);
        }
        _ => usage(),
    }
}

fn print_chord(engine: &Engine, name: &str, instrument: Instrument) {
    match engine.diagram(name, instrument) {
        Some(diagram) => print_yaml(&diagram),
        None => fail(&format!("No {} diagram for '{}'", instrument.name(), name)),
    }
}

fn print_yaml<T: serde::Serialize>(value: &T) {
    match serde_yaml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => fail(&format!("Error writing YAML: {}", e)),
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", path, e)),
    }
}

fn usage() -> ! {
    fail(USAGE)
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
