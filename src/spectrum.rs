use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DB_MIN: f64 = -100.0;
pub const DB_MAX: f64 = 0.0;
pub const NOISE_FLOOR_DB: f64 = -90.0;

pub const FM_BAND: (f64, f64) = (88.0, 108.0);
pub const ISM_BAND: (f64, f64) = (2400.0, 2483.0);
pub const ISM_CHANNELS_MHZ: [f64; 3] = [2412.0, 2437.0, 2462.0];
pub const DEFAULT_TRACE_POINTS: usize = 128;

/// Simulated receiver tuning. Frequencies in MHz, sample rate in MSps,
/// gain in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadioConfig {
    pub center_freq: f64,
    pub sample_rate: f64,
    pub gain: f64,
    pub bandwidth: f64,
}

impl Default for RadioConfig {
    fn default() -> Self {
        RadioConfig {
            center_freq: 98.5,
            sample_rate: 2.048,
            gain: 25.0,
            bandwidth: 2.0,
        }
    }
}

impl RadioConfig {
    /// Tuning applied when the interference cycle is armed: the 2.4 GHz
    /// ISM band at full width.
    pub fn ism_wideband() -> Self {
        RadioConfig {
            center_freq: 2440.0,
            sample_rate: 2.4,
            gain: 40.0,
            bandwidth: 80.0,
        }
    }

    pub fn span(&self) -> (f64, f64) {
        let half = self.bandwidth / 2.0;
        (self.center_freq - half, self.center_freq + half)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    pub frequency: f64,
    pub db: f64,
}

fn noise<R: Rng>(rng: &mut R, base: f64, variance: f64) -> f64 {
    base + rng.gen_range(-variance..variance)
}

/// Synthesize one spectrum trace for the given tuning.
///
/// Deterministic in shape, randomized in amplitude: a noise floor around
/// −90 dB, elevated peaks in the FM broadcast and 2.4 GHz ISM bands, and an
/// extra hopping pattern when `interference` is set. `time_secs` drives the
/// hop phase so consecutive traces animate. Purely cosmetic; no FFT.
pub fn synthesize<R: Rng>(
    config: &RadioConfig,
    points: usize,
    interference: bool,
    time_secs: f64,
    rng: &mut R,
) -> Vec<SpectrumPoint> {
    let (start, _) = config.span();
    let step = config.bandwidth / points as f64;

    let mut trace = Vec::with_capacity(points);
    for i in 0..points {
        let freq = start + i as f64 * step;
        let mut db = noise(rng, NOISE_FLOOR_DB, 10.0);

        if freq > FM_BAND.0 && freq < FM_BAND.1 {
            if (freq - 98.5).abs() < 0.2 {
                db = db.max(noise(rng, -40.0, 5.0));
            }
            if (freq - 101.1).abs() < 0.2 {
                db = db.max(noise(rng, -50.0, 5.0));
            }
        }

        if freq > ISM_BAND.0 && freq < ISM_BAND.1 {
            for channel in ISM_CHANNELS_MHZ {
                let dist = (freq - channel).abs();
                if dist < 10.0 {
                    db = db.max(-60.0 * (1.0 - dist / 10.0) + noise(rng, -10.0, 5.0));
                }
            }

            // Sporadic traffic bursts.
            if rng.gen::<f64>() > 0.8 {
                db = db.max(-50.0 + rng.gen_range(0.0..15.0));
            }

            if interference {
                let hop = (freq * 10.0 + time_secs * 20.0).sin();
                if hop > 0.8 {
                    db = db.max(noise(rng, -20.0, 5.0));
                }
            }
        }

        trace.push(SpectrumPoint {
            frequency: freq,
            db: db.clamp(DB_MIN, DB_MAX),
        });
    }

    trace
}

/// Strongest sample of a trace, if any.
pub fn peak_point(trace: &[SpectrumPoint]) -> Option<SpectrumPoint> {
    trace
        .iter()
        .copied()
        .max_by(|a, b| a.db.partial_cmp(&b.db).unwrap_or(std::cmp::Ordering::Equal))
}

pub fn format_frequency(mhz: f64) -> String {
    if mhz >= 1000.0 {
        format!("{:.4} GHz", mhz / 1000.0)
    } else {
        format!("{:.3} MHz", mhz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x9060)
    }

    #[test]
    fn trace_spans_configured_window() {
        let config = RadioConfig::default();
        let trace = synthesize(&config, 128, false, 0.0, &mut rng());
        assert_eq!(trace.len(), 128);

        let (start, end) = config.span();
        assert!((trace[0].frequency - start).abs() < 1e-9);
        let last = trace.last().unwrap().frequency;
        assert!(last < end);
        assert!(last > end - 2.0 * config.bandwidth / 128.0);
    }

    #[test]
    fn samples_stay_inside_db_envelope() {
        let configs = [
            RadioConfig::default(),
            RadioConfig::ism_wideband(),
            RadioConfig {
                center_freq: 433.92,
                sample_rate: 2.048,
                gain: 25.0,
                bandwidth: 2.0,
            },
        ];
        for config in configs {
            for tick in 0..50 {
                let trace = synthesize(&config, 256, true, tick as f64 * 0.05, &mut rng());
                for point in trace {
                    assert!(point.db >= DB_MIN && point.db <= DB_MAX, "{:?}", point);
                }
            }
        }
    }

    #[test]
    fn fm_peak_rises_above_noise_floor() {
        let config = RadioConfig::default();
        let trace = synthesize(&config, 256, false, 0.0, &mut rng());
        let peak = trace
            .iter()
            .filter(|p| (p.frequency - 98.5).abs() < 0.2)
            .map(|p| p.db)
            .fold(f64::MIN, f64::max);
        // Noise floor tops out at −80 dB; the 98.5 MHz carrier sits near −40.
        assert!(peak > -50.0, "peak {peak}");
    }

    #[test]
    fn ism_channels_rise_above_noise_floor() {
        let config = RadioConfig::ism_wideband();
        let trace = synthesize(&config, 512, false, 0.0, &mut rng());
        for channel in ISM_CHANNELS_MHZ {
            // The channel shoulder (±10 MHz) carries the elevated energy;
            // the noise floor never exceeds −80 dB.
            let peak = trace
                .iter()
                .filter(|p| (p.frequency - channel).abs() < 10.0)
                .map(|p| p.db)
                .fold(f64::MIN, f64::max);
            assert!(peak > -30.0, "channel {channel} peak {peak}");
        }
    }

    #[test]
    fn interference_injects_hot_samples() {
        let config = RadioConfig::ism_wideband();
        let mut r = rng();
        let quiet = synthesize(&config, 512, false, 1.0, &mut r);
        let jammed = synthesize(&config, 512, true, 1.0, &mut r);

        let hot = |trace: &[SpectrumPoint]| trace.iter().filter(|p| p.db > -26.0).count();
        assert!(hot(&jammed) > hot(&quiet), "no extra interference peaks");
    }

    #[test]
    fn peak_point_finds_strongest_sample() {
        let trace = vec![
            SpectrumPoint { frequency: 1.0, db: -90.0 },
            SpectrumPoint { frequency: 2.0, db: -12.5 },
            SpectrumPoint { frequency: 3.0, db: -70.0 },
        ];
        let peak = peak_point(&trace).unwrap();
        assert_eq!(peak.frequency, 2.0);
        assert!(peak_point(&[]).is_none());
    }

    #[test]
    fn frequency_formatting_switches_units() {
        assert_eq!(format_frequency(98.5), "98.500 MHz");
        assert_eq!(format_frequency(2412.0), "2.4120 GHz");
    }
}
