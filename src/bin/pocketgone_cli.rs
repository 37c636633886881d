use std::env;
use std::fs;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pocketgone::api::BackendClient;
use pocketgone::modo_s::{state_for_elapsed, CYCLE_SECS};
use pocketgone::scan::{fallback_bluetooth_devices, fallback_wifi_networks, WifiBand};
use pocketgone::spectrum::{synthesize, RadioConfig, DEFAULT_TRACE_POINTS};

fn main() -> Result<()> {
    pocketgone::logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 1 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let mut trace_out: Option<String> = None;
    let mut config = RadioConfig::default();
    let mut points = DEFAULT_TRACE_POINTS;
    let mut interference = false;
    let mut time_secs = 0.0f64;
    let mut seed: Option<u64> = None;
    let mut bt_scan = false;
    let mut wifi_scan: Option<WifiBand> = None;
    let mut modo_schedule: Option<u64> = None;
    let mut backend = pocketgone::api::DEFAULT_BASE_URL.to_string();
    let mut offline = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                i += 1;
                trace_out = args.get(i).cloned();
            }
            "--center" => {
                i += 1;
                config.center_freq = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing center frequency"))?
                    .parse::<f64>()?;
            }
            "--bandwidth" => {
                i += 1;
                config.bandwidth = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing bandwidth"))?
                    .parse::<f64>()?;
            }
            "--gain" => {
                i += 1;
                config.gain = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing gain"))?
                    .parse::<f64>()?;
            }
            "--sample-rate" => {
                i += 1;
                config.sample_rate = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing sample rate"))?
                    .parse::<f64>()?;
            }
            "--points" => {
                i += 1;
                points = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing point count"))?
                    .parse::<usize>()?;
            }
            "--interference" => {
                interference = true;
            }
            "--time" => {
                i += 1;
                time_secs = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing time"))?
                    .parse::<f64>()?;
            }
            "--seed" => {
                i += 1;
                seed = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing seed"))?
                        .parse::<u64>()?,
                );
            }
            "--bt-scan" => {
                bt_scan = true;
            }
            "--wifi-scan" => {
                i += 1;
                let raw = args.get(i).cloned().ok_or_else(|| anyhow!("missing band"))?;
                wifi_scan = Some(parse_band(&raw)?);
            }
            "--modo-schedule" => {
                i += 1;
                modo_schedule = Some(
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing schedule length"))?
                        .parse::<u64>()?,
                );
            }
            "--backend" => {
                i += 1;
                backend = args
                    .get(i)
                    .cloned()
                    .ok_or_else(|| anyhow!("missing backend url"))?;
            }
            "--offline" => {
                offline = true;
            }
            other => {
                return Err(anyhow!("unknown arg: {}", other));
            }
        }
        i += 1;
    }

    let client = BackendClient::new(backend);

    if let Some(out) = trace_out {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trace = synthesize(&config, points, interference, time_secs, &mut rng);
        let json = serde_json::to_string_pretty(&trace)?;
        write_output(&out, &json)?;
    }

    if bt_scan {
        let devices = if offline {
            fallback_bluetooth_devices()
        } else {
            match client.bluetooth_scan() {
                Ok(devices) => devices,
                Err(err) => {
                    tracing::warn!("backend unreachable, using simulated devices: {err:#}");
                    fallback_bluetooth_devices()
                }
            }
        };
        println!("{}", serde_json::to_string_pretty(&devices)?);
    }

    if let Some(band) = wifi_scan {
        let networks = if offline {
            fallback_wifi_networks(band)
        } else {
            match client.wifi_scan(band) {
                Ok(networks) => networks,
                Err(err) => {
                    tracing::warn!("backend unreachable, using simulated networks: {err:#}");
                    fallback_wifi_networks(band)
                }
            }
        };
        println!("{}", serde_json::to_string_pretty(&networks)?);
    }

    if let Some(secs) = modo_schedule {
        println!("t(s)  state   cycle-pos");
        for t in 0..=secs {
            let elapsed = t as f64;
            println!(
                "{:>4}  {:<7} {:>5.1}",
                t,
                state_for_elapsed(elapsed).to_string(),
                elapsed.rem_euclid(CYCLE_SECS)
            );
        }
    }

    Ok(())
}

fn parse_band(raw: &str) -> Result<WifiBand> {
    match raw {
        "2.4" | "2.4GHz" => Ok(WifiBand::Band2_4),
        "5" | "5GHz" => Ok(WifiBand::Band5),
        "6" | "6GHz" => Ok(WifiBand::Band6),
        other => Err(anyhow!("unknown band: {} (expected 2.4, 5 or 6)", other)),
    }
}

fn write_output(target: &str, json: &str) -> Result<()> {
    if target == "-" {
        println!("{json}");
    } else {
        fs::write(target, json)?;
        println!("wrote {target}");
    }
    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: pocketgone-cli [--trace out.json|-] [--center 98.5] [--bandwidth 2.0] \
         [--gain 25] [--sample-rate 2.048] [--points 128] [--interference] [--time 0.0] \
         [--seed N] [--bt-scan] [--wifi-scan 2.4|5|6] [--modo-schedule SECS] \
         [--backend http://localhost:8000] [--offline]"
    );
}
