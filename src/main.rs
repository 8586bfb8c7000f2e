//! Nivaran Core - CLI Entry Point

use std::process;

use nivaran_core::constants;
use nivaran_core::logic::alert::AlertComposer;
use nivaran_core::logic::incident::IncidentLog;
use nivaran_core::logic::llm::{GeminiVisionClient, GroqTextClient};
use nivaran_core::logic::monitor::{FrameDirSource, LogSink, MonitorConfig, StreamMonitor};
use nivaran_core::logic::pipeline::Pipeline;
use nivaran_core::logic::protocol::{KnowledgeBase, ProtocolResolver};
use nivaran_core::logic::vision::{HazardClassifier, HazardType, ImageInput};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{} (disaster response pipeline)",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("analyze") => cmd_analyze(&args[1..]),
        Some("monitor") => cmd_monitor(&args[1..]),
        Some("protocol") => cmd_protocol(&args[1..]),
        _ => {
            print_usage();
            process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  nivaran-core analyze <image> [--location NAME]");
    eprintln!("  nivaran-core monitor <frames-dir> [--fps N] [--interval SECS] [--location NAME]");
    eprintln!("  nivaran-core protocol <flood|landslide|fire|infrastructure>");
}

// ============================================================================
// CONFIGURATION (fatal at startup - no valid fallback exists)
// ============================================================================

fn require_google_key() -> String {
    match constants::get_google_api_key() {
        Some(key) => key,
        None => {
            log::error!("GOOGLE_API_KEY not set - cannot classify images");
            process::exit(1);
        }
    }
}

fn require_groq_key() -> String {
    match constants::get_groq_api_key() {
        Some(key) => key,
        None => {
            log::error!("GROQ_API_KEY not set - cannot generate text");
            process::exit(1);
        }
    }
}

fn build_pipeline() -> Pipeline {
    let google_key = require_google_key();
    let groq_key = require_groq_key();

    let classifier = HazardClassifier::new(Box::new(GeminiVisionClient::new(
        google_key,
        constants::get_vision_model(),
    )));
    let resolver = ProtocolResolver::new(
        KnowledgeBase::new(constants::get_kb_dir()),
        Box::new(GroqTextClient::new(groq_key.clone(), constants::get_text_model())),
    );
    let composer = AlertComposer::new(Box::new(GroqTextClient::new(
        groq_key,
        constants::get_text_model(),
    )));

    Pipeline::new(classifier, resolver, composer)
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_analyze(args: &[String]) {
    let Some(image) = args.first() else {
        print_usage();
        process::exit(2);
    };
    let location = flag_value(args, "--location")
        .unwrap_or_else(|| constants::DEFAULT_LOCATION.to_string());

    let pipeline = build_pipeline();
    let assessment = pipeline.assess(&ImageInput::from_path(image));

    log::info!("Assessment for {} at {}", assessment.source_ref, location);
    match serde_json::to_string_pretty(&assessment) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize assessment: {}", e);
            process::exit(1);
        }
    }

    if assessment.verdict.hazard {
        let incidents = IncidentLog::new();
        let id = incidents.record(assessment, &location);
        log::info!("Incident {} is pending operator approval before publishing", id);
    }
}

fn cmd_monitor(args: &[String]) {
    let Some(frames_dir) = args.first() else {
        print_usage();
        process::exit(2);
    };
    let fps: f32 = flag_value(args, "--fps")
        .and_then(|v| v.parse().ok())
        .unwrap_or(constants::DEFAULT_FALLBACK_FPS);
    let interval: u64 = flag_value(args, "--interval")
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(constants::get_sample_interval);
    let location = flag_value(args, "--location")
        .unwrap_or_else(|| constants::DEFAULT_LOCATION.to_string());

    let mut source = match FrameDirSource::open(frames_dir, fps) {
        Ok(source) => source,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    let config = MonitorConfig {
        location,
        sample_interval_secs: interval.max(1),
        ..MonitorConfig::default()
    };

    let monitor = StreamMonitor::new(build_pipeline());
    let report = monitor.run(&mut source, &config, &mut LogSink);

    let incidents = IncidentLog::new();
    for event in &report.alerts {
        incidents.record(event.assessment.clone(), &event.location);
    }
    if !incidents.is_empty() {
        log::info!(
            "{} incident(s) recorded, pending operator approval before publishing",
            incidents.len()
        );
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_protocol(args: &[String]) {
    let Some(raw) = args.first() else {
        print_usage();
        process::exit(2);
    };

    let hazard_type = HazardType::from_model_str(raw);
    if !hazard_type.is_actionable() {
        log::error!("Not a concrete hazard type: {}", raw);
        process::exit(2);
    }

    let resolver = ProtocolResolver::new(
        KnowledgeBase::new(constants::get_kb_dir()),
        Box::new(GroqTextClient::new(require_groq_key(), constants::get_text_model())),
    );

    let protocol = resolver.resolve(hazard_type);
    if protocol.is_degraded() {
        log::warn!("Protocol lookup degraded - verify manually");
    }
    println!("{}", protocol.text);
}

// ============================================================================
// ARG HELPERS
// ============================================================================

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
