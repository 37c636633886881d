use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One discovered Bluetooth device, as reported by the backend scan
/// endpoint (or the fallback dataset when the backend is offline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BluetoothDevice {
    pub mac: String,
    pub name: String,
    pub rssi: i32,
    /// Class of Device label.
    pub cod: String,
    pub vendor: String,
    /// Milliseconds since the Unix epoch.
    pub last_seen: i64,
    #[serde(default)]
    pub is_connected: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiBand {
    #[serde(rename = "2.4GHz")]
    Band2_4,
    #[serde(rename = "5GHz")]
    Band5,
    #[serde(rename = "6GHz")]
    Band6,
}

impl WifiBand {
    pub const ALL: [WifiBand; 3] = [WifiBand::Band2_4, WifiBand::Band5, WifiBand::Band6];

    pub fn query_value(&self) -> &'static str {
        match self {
            WifiBand::Band2_4 => "2.4GHz",
            WifiBand::Band5 => "5GHz",
            WifiBand::Band6 => "6GHz",
        }
    }
}

impl fmt::Display for WifiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    pub bssid: String,
    pub channel: u32,
    pub rssi: i32,
    pub security: String,
    pub vendor: String,
    pub band: WifiBand,
    /// Channel width in MHz (20, 40, 80, ...).
    #[serde(default)]
    pub width: Option<u32>,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Canned Bluetooth devices shown when the backend scan is unreachable.
/// Mixed connection states on purpose so every badge renders somewhere.
pub fn fallback_bluetooth_devices() -> Vec<BluetoothDevice> {
    let now = now_ms();
    vec![
        BluetoothDevice {
            mac: "A0:EF:4A:83:86:88".into(),
            name: "JBL Flip 5".into(),
            rssi: -64,
            cod: "Audio/Video".into(),
            vendor: "JBL".into(),
            last_seen: now,
            is_connected: Some(true),
        },
        BluetoothDevice {
            mac: "40:EF:4C:86:86:89".into(),
            name: "AUVIO PBT200".into(),
            rssi: -59,
            cod: "Audio/Video".into(),
            vendor: "Unknown".into(),
            last_seen: now,
            is_connected: Some(false),
        },
        BluetoothDevice {
            mac: "XX:XX:XX:XX:XX:XX".into(),
            name: "Unknown Device".into(),
            rssi: -85,
            cod: "Wearable".into(),
            vendor: "Apple".into(),
            last_seen: now - 5_000,
            is_connected: Some(false),
        },
        BluetoothDevice {
            mac: "12:34:56:78:90:AB".into(),
            name: "Smart TV".into(),
            rssi: -72,
            cod: "Display".into(),
            vendor: "Samsung".into(),
            last_seen: now - 12_000,
            is_connected: None,
        },
    ]
}

/// Canned networks per band when the backend scan is unreachable.
pub fn fallback_wifi_networks(band: WifiBand) -> Vec<WifiNetwork> {
    match band {
        WifiBand::Band2_4 => vec![
            WifiNetwork {
                ssid: "Campus_Guest".into(),
                bssid: "AA:BB:CC:DD:EE:01".into(),
                channel: 1,
                rssi: -55,
                security: "WPA2".into(),
                vendor: "Cisco".into(),
                band,
                width: Some(20),
            },
            WifiNetwork {
                ssid: "Lab_Secure".into(),
                bssid: "AA:BB:CC:DD:EE:02".into(),
                channel: 6,
                rssi: -42,
                security: "WPA3".into(),
                vendor: "Ubiquiti".into(),
                band,
                width: Some(20),
            },
            WifiNetwork {
                ssid: "IoT_Devices".into(),
                bssid: "AA:BB:CC:DD:EE:05".into(),
                channel: 11,
                rssi: -70,
                security: "WPA2".into(),
                vendor: "Espressif".into(),
                band,
                width: Some(20),
            },
            WifiNetwork {
                ssid: "Printer_Direct".into(),
                bssid: "AA:BB:CC:DD:EE:04".into(),
                channel: 1,
                rssi: -80,
                security: "WEP".into(),
                vendor: "HP".into(),
                band,
                width: Some(20),
            },
        ],
        WifiBand::Band5 => vec![
            WifiNetwork {
                ssid: "Campus_Staff_5G".into(),
                bssid: "AA:BB:CC:DD:FF:01".into(),
                channel: 36,
                rssi: -60,
                security: "WPA2/Ent".into(),
                vendor: "Cisco".into(),
                band,
                width: Some(40),
            },
            WifiNetwork {
                ssid: "Research_Lab_HighSpeed".into(),
                bssid: "AA:BB:CC:DD:FF:02".into(),
                channel: 149,
                rssi: -48,
                security: "WPA3".into(),
                vendor: "Aruba".into(),
                band,
                width: Some(80),
            },
        ],
        WifiBand::Band6 => vec![WifiNetwork {
            ssid: "Future_Net_6E".into(),
            bssid: "AA:BB:CC:DD:EE:99".into(),
            channel: 33,
            rssi: -85,
            security: "WPA3/OWE".into(),
            vendor: "Netgear".into(),
            band,
            width: Some(160),
        }],
    }
}

/// Nudge fallback RSSI values so repeated scans look alive.
pub fn jitter_bluetooth<R: Rng>(devices: &mut [BluetoothDevice], rng: &mut R) {
    for device in devices {
        device.rssi += rng.gen_range(-3..=3);
        device.last_seen = now_ms();
    }
}

pub fn jitter_wifi<R: Rng>(networks: &mut [WifiNetwork], rng: &mut R) {
    for network in networks {
        network.rssi += rng.gen_range(-2..=2);
    }
}

/// Case-insensitive name/MAC filter for the Bluetooth device table.
pub fn filter_bluetooth<'a>(
    devices: &'a [BluetoothDevice],
    query: &str,
) -> Vec<&'a BluetoothDevice> {
    let needle = query.trim().to_lowercase();
    devices
        .iter()
        .filter(|d| {
            needle.is_empty()
                || d.name.to_lowercase().contains(&needle)
                || d.mac.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Access-point counts on the three non-overlapping 2.4 GHz channels.
pub fn channel_congestion(networks: &[WifiNetwork]) -> [(u32, usize); 3] {
    let count = |ch: u32| networks.iter().filter(|n| n.channel == ch).count();
    [(1, count(1)), (6, count(6)), (11, count(11))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fallback_datasets_are_nonempty_for_every_band() {
        assert!(!fallback_bluetooth_devices().is_empty());
        for band in WifiBand::ALL {
            let networks = fallback_wifi_networks(band);
            assert!(!networks.is_empty(), "{band}");
            assert!(networks.iter().all(|n| n.band == band));
        }
    }

    #[test]
    fn bluetooth_jitter_stays_within_three_db() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut devices = fallback_bluetooth_devices();
            let baseline: Vec<i32> = devices.iter().map(|d| d.rssi).collect();
            jitter_bluetooth(&mut devices, &mut rng);
            for (device, base) in devices.iter().zip(baseline) {
                assert!((device.rssi - base).abs() <= 3);
            }
        }
    }

    #[test]
    fn wifi_jitter_stays_within_two_db() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut networks = fallback_wifi_networks(WifiBand::Band2_4);
            let baseline: Vec<i32> = networks.iter().map(|n| n.rssi).collect();
            jitter_wifi(&mut networks, &mut rng);
            for (network, base) in networks.iter().zip(baseline) {
                assert!((network.rssi - base).abs() <= 2);
            }
        }
    }

    #[test]
    fn filter_matches_name_and_mac() {
        let devices = fallback_bluetooth_devices();
        assert_eq!(filter_bluetooth(&devices, "").len(), devices.len());
        assert_eq!(filter_bluetooth(&devices, "jbl").len(), 1);
        assert_eq!(filter_bluetooth(&devices, "40:EF").len(), 1);
        assert_eq!(filter_bluetooth(&devices, "86:8").len(), 2);
        assert!(filter_bluetooth(&devices, "zzz").is_empty());
    }

    #[test]
    fn congestion_counts_per_channel() {
        let networks = fallback_wifi_networks(WifiBand::Band2_4);
        let counts = channel_congestion(&networks);
        assert_eq!(counts[0], (1, 2));
        assert_eq!(counts[1], (6, 1));
        assert_eq!(counts[2], (11, 1));
    }

    #[test]
    fn band_serializes_to_wire_labels() {
        let json = serde_json::to_string(&WifiBand::Band2_4).unwrap();
        assert_eq!(json, "\"2.4GHz\"");
        let band: WifiBand = serde_json::from_str("\"6GHz\"").unwrap();
        assert_eq!(band, WifiBand::Band6);
    }

    #[test]
    fn bluetooth_device_parses_backend_shape() {
        let json = r#"{
            "mac": "AA:BB:CC:00:11:22",
            "name": "Beacon",
            "rssi": -61,
            "cod": "Wearable",
            "vendor": "Nordic",
            "lastSeen": 1700000000000,
            "isConnected": true
        }"#;
        let device: BluetoothDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.last_seen, 1_700_000_000_000);
        assert_eq!(device.is_connected, Some(true));
    }
}
