//! Usage: `vlc-probe [--config instance.json] [--discover NAME]...`
//!
//! Loads libvlc (honouring `VLC_LIB_PATH`), then prints the engine version,
//! audio outputs with their devices, and the state of each requested
//! discovery service as JSON.

use std::process::ExitCode;

use serde::Serialize;
use vlc_core::{AudioOutputDevice, Instance, InstanceConfig, MediaDiscoverer, VlcError};
use vlc_native::LibVlc;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    discover: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().ok_or("--config needs a path")?),
            "--discover" => parsed.discover.push(args.next().ok_or("--discover needs a name")?),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

#[derive(Serialize)]
struct OutputReport {
    name: String,
    description: String,
    devices: Vec<AudioOutputDevice>,
}

#[derive(Serialize)]
struct DiscoveryReport {
    name: String,
    localized_name: Option<String>,
    running: bool,
}

#[derive(Serialize)]
struct Report {
    version: String,
    outputs: Vec<OutputReport>,
    discovery: Vec<DiscoveryReport>,
    unavailable: Vec<String>,
}

fn probe(args: &Args) -> Result<Report, VlcError> {
    let config = match args.config {
        Some(ref path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| VlcError::ConfigurationFailed(format!("failed to read {}: {}", path, e)))?;
            InstanceConfig::from_json(&json)?
        }
        None => InstanceConfig::default(),
    };

    let engine = LibVlc::load_default()?;
    let version = vlc_core::Engine::version(engine.as_ref());
    let instance = Instance::new(engine, &config)?;

    let mut outputs = Vec::new();
    for output in instance.audio_outputs() {
        let devices = instance.audio_output_devices(&output.name)?;
        outputs.push(OutputReport {
            name: output.name,
            description: output.description,
            devices,
        });
    }

    let mut discovery = Vec::new();
    let mut unavailable = Vec::new();
    for name in &args.discover {
        match MediaDiscoverer::new(&instance, name) {
            Ok(discoverer) => discovery.push(DiscoveryReport {
                name: name.clone(),
                localized_name: discoverer.localized_name()?,
                running: discoverer.is_running()?,
            }),
            Err(VlcError::ResourceUnavailable(reason)) => {
                log::warn!("{}", reason);
                unavailable.push(name.clone());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Report {
        version,
        outputs,
        discovery,
        unavailable,
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match probe(&args) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("probe failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
