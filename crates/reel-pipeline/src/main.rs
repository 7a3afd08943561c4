//! Timeline production binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_pipeline::{PipelineConfig, ProduceError, ProducePipeline, StudioConfig};
use reel_synth::ElevenLabsClient;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("reel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let config = PipelineConfig::from_env();
    let studio = StudioConfig::from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag] if flag == "--list" => {
            let pipeline = ProducePipeline::new(config, studio);
            match pipeline.list_timelines() {
                Ok(slugs) => {
                    for slug in slugs {
                        println!("{slug}");
                    }
                }
                Err(e) => {
                    error!("Failed to list timelines: {}", e);
                    std::process::exit(1);
                }
            }
        }
        [flag] if flag == "--voices" => {
            let Some(api_key) = studio.elevenlabs_api_key else {
                error!("{}", ProduceError::missing_credential("ELEVENLABS_API_KEY"));
                std::process::exit(1);
            };
            let client =
                ElevenLabsClient::new(api_key, studio.elevenlabs_voice_id.unwrap_or_default());
            match client.voices().await {
                Ok(voices) => {
                    for voice in voices {
                        println!("{}  {}", voice.voice_id, voice.name);
                    }
                }
                Err(e) => {
                    error!("Failed to fetch voices: {}", e);
                    std::process::exit(1);
                }
            }
        }
        [flag, slug] if flag == "--check" => {
            let pipeline = ProducePipeline::new(config, studio);
            match pipeline.validate_assets(slug) {
                Ok(statuses) => {
                    let mut missing = false;
                    for status in &statuses {
                        let mark = if status.exists { "ok     " } else { "MISSING" };
                        println!("{mark}  shot {:>3}  {}", status.shot_id, status.filename);
                        missing |= !status.exists;
                    }
                    if missing {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    error!("Failed to check assets: {}", e);
                    std::process::exit(1);
                }
            }
        }
        [slug] if !slug.starts_with('-') => {
            let pipeline = ProducePipeline::new(config, studio);
            match pipeline.produce(slug).await {
                Ok(output) => {
                    info!(output = %output.display(), "Production complete");
                }
                Err(e) => {
                    error!("Production failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Usage: reel-produce <slug> | --list | --check <slug> | --voices");
            std::process::exit(2);
        }
    }
}
