use chordgen::engine::interval_pattern;
use chordgen::keymap::KeyTracker;
use chordgen::session::{LoggingBackend, Session};
use chordgen::{classify_chord_type, compute_chord, pitch_names, PitchClass, Settings};
use serde::Serialize;
use std::env;
use std::fs;
use std::process;

const USAGE: &str = "Usage: chordgen [--config <settings.yaml>] [--json] <root>...
       chordgen [--config <settings.yaml>] --keys <script>";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChordOutput {
    root: String,
    pitches: Vec<String>,
    label: String,
    pattern: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<String> = None;
    let mut json = false;
    let mut key_script: Option<String> = None;
    let mut roots: Vec<String> = Vec::new();

    // Parse flags
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = Some(iter.next().unwrap_or_else(|| usage_error())),
            "--keys" => key_script = Some(iter.next().unwrap_or_else(|| usage_error())),
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ => roots.push(arg),
        }
    }

    let settings = match &config_path {
        Some(path) => load_settings(path),
        None => Settings::default(),
    };

    match key_script {
        Some(script) => run_key_script(&script, &settings),
        None if roots.is_empty() => usage_error(),
        None => print_chords(&roots, &settings, json),
    }
}

fn usage_error() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn load_settings(path: &str) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        }
    };
    match Settings::from_yaml(&content) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error in '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn print_chords(roots: &[String], settings: &Settings, json: bool) {
    let mut outputs = Vec::new();

    for name in roots {
        let root = match PitchClass::from_str(name) {
            Some(root) => root,
            None => {
                eprintln!("Unknown note name '{}'", name);
                process::exit(1);
            }
        };
        let pitches = compute_chord(root, settings.octave, &settings.context);
        if pitches.is_empty() {
            tracing::warn!("{} is not in the current scale", root);
        }
        outputs.push(ChordOutput {
            root: root.to_string(),
            label: classify_chord_type(&pitches, settings.context.effective_inversion()),
            pattern: interval_pattern(&pitches),
            pitches: pitch_names(&pitches),
        });
    }

    if json {
        match serde_json::to_string_pretty(&outputs) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error writing JSON: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for output in outputs {
        if output.pitches.is_empty() {
            println!("{}: -", output.root);
        } else {
            println!("{}: {} ({})", output.root, output.pitches.join(" "), output.label);
        }
    }
}

/// Press and release each character of `script` in turn.
fn run_key_script(script: &str, settings: &Settings) {
    let mut session = Session::new(LoggingBackend, settings);
    let mut tracker = KeyTracker::new();

    for key in script.chars().filter(|c| !c.is_whitespace()) {
        if let Some(command) = tracker.press(key) {
            let sounded = session.apply(command);
            if !sounded.is_empty() {
                println!("{}: {}", key, pitch_names(&sounded).join(" "));
            }
        }
        if let Some(command) = tracker.release(key) {
            session.apply(command);
        }
    }

    println!("memory:");
    for (slot, entry) in session.memory().iter().enumerate() {
        if let Some(chord) = entry {
            println!(
                "  {:>2}  {} {}  oct {} - inv {}",
                slot + 1,
                chord.root,
                chord.label(),
                chord.octave,
                chord.inversion
            );
        }
    }
}
