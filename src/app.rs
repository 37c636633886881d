use iced::widget::{button, column, container, pick_list, progress_bar, row, scrollable, slider, text, text_input, Column};
use iced::widget::button as button_widget;
use iced::widget::container as container_widget;
use iced::{Alignment, Background, Command, Element, Length, Theme};
use iced::theme;
use iced::widget::canvas::{Canvas, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{Color, Renderer};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use pocketgone::api::{
    ApCreated, AttackLaunch, BackendClient, CaptivePortalRequest, CommandOutcome, DeauthRequest,
    EvilTwinRequest, HandshakeRequest, KpiStats, PentestStatus, TerminalResult, WpsRequest,
    DEFAULT_BASE_URL,
};
use pocketgone::modo_s::{ModoSState, ModoSTimer, ACTIVE_SECS, CYCLE_SECS};
use pocketgone::scan::{
    channel_congestion, fallback_bluetooth_devices, fallback_wifi_networks, filter_bluetooth,
    jitter_bluetooth, jitter_wifi, BluetoothDevice, WifiBand, WifiNetwork,
};
use pocketgone::session::{self, UserSession};
use pocketgone::signal_log::{export_to_file, SignalLog};
use pocketgone::spectrum::{
    format_frequency, synthesize, RadioConfig, SpectrumPoint, DEFAULT_TRACE_POINTS,
};

const RSSI_HISTORY_SECS: f64 = 60.0;
const TERMINAL_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Dashboard,
    Spectrum,
    Bluetooth,
    Wifi,
    Attacks,
    EvilTwin,
    Terminal,
    Logs,
    System,
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Dashboard => write!(f, "Dashboard"),
            Tab::Spectrum => write!(f, "RF Spectrum"),
            Tab::Bluetooth => write!(f, "Bluetooth Lab"),
            Tab::Wifi => write!(f, "WiFi Monitor"),
            Tab::Attacks => write!(f, "WiFi Attacks"),
            Tab::EvilTwin => write!(f, "Evil Twin"),
            Tab::Terminal => write!(f, "Terminal"),
            Tab::Logs => write!(f, "Signal Logs"),
            Tab::System => write!(f, "System"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PortalType {
    Google,
    Facebook,
    Generic,
}

impl PortalType {
    const ALL: [PortalType; 3] = [PortalType::Google, PortalType::Facebook, PortalType::Generic];

    fn wire_value(&self) -> &'static str {
        match self {
            PortalType::Google => "google",
            PortalType::Facebook => "facebook",
            PortalType::Generic => "generic",
        }
    }
}

impl std::fmt::Display for PortalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortalType::Google => write!(f, "Google portal"),
            PortalType::Facebook => write!(f, "Facebook portal"),
            PortalType::Generic => write!(f, "Generic portal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApKind {
    EvilTwin,
    CaptivePortal,
}

impl std::fmt::Display for ApKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApKind::EvilTwin => write!(f, "evil twin"),
            ApKind::CaptivePortal => write!(f, "captive portal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BandwidthItem {
    mhz: f64,
    label: &'static str,
}

impl Eq for BandwidthItem {}

impl std::fmt::Display for BandwidthItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

fn bandwidth_items() -> Vec<BandwidthItem> {
    vec![
        BandwidthItem { mhz: 1.0, label: "1.0 MHz" },
        BandwidthItem { mhz: 2.0, label: "2.0 MHz" },
        BandwidthItem { mhz: 2.4, label: "2.4 MHz (Max)" },
        BandwidthItem { mhz: 80.0, label: "80 MHz (ISM sweep)" },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Input,
    Output,
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone)]
struct ConsoleLine {
    kind: LineKind,
    stamp: String,
    body: String,
}

impl ConsoleLine {
    fn new(kind: LineKind, body: impl Into<String>) -> Self {
        ConsoleLine {
            kind,
            stamp: Local::now().format("%H:%M:%S").to_string(),
            body: body.into(),
        }
    }

    fn color(&self) -> Color {
        match self.kind {
            LineKind::Input => color_accent(),
            LineKind::Output => color_text(),
            LineKind::Error => color_danger(),
            LineKind::Success => color_live(),
            LineKind::Info => color_muted(),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveAttack {
    session_id: String,
    label: String,
}

#[derive(Debug, Clone)]
struct ActiveAp {
    ap_id: String,
    ssid: String,
    kind: ApKind,
    channel: u32,
}

fn color_bg() -> Color {
    Color::from_rgb8(11, 17, 32)
}

fn color_surface() -> Color {
    Color::from_rgb8(15, 23, 42)
}

fn color_surface_alt() -> Color {
    Color::from_rgb8(30, 41, 59)
}

fn color_border() -> Color {
    Color::from_rgb8(51, 65, 85)
}

fn color_text() -> Color {
    Color::from_rgb8(226, 232, 240)
}

fn color_muted() -> Color {
    Color::from_rgb8(148, 163, 184)
}

fn color_accent() -> Color {
    Color::from_rgb8(34, 211, 238)
}

fn color_warn() -> Color {
    Color::from_rgb8(234, 179, 8)
}

fn color_live() -> Color {
    Color::from_rgb8(16, 185, 129)
}

fn color_danger() -> Color {
    Color::from_rgb8(239, 68, 68)
}

fn color_blue() -> Color {
    Color::from_rgb8(59, 130, 246)
}

#[derive(Debug, Clone)]
pub enum Message {
    AccessCodeChanged(String),
    SubmitLogin,
    Logout,
    TabSelected(Tab),
    SpectrumTick,
    ClockTick,
    WifiTick,
    StatusTick,
    SpectrumFetched(Result<Vec<SpectrumPoint>, String>),
    ToggleScan,
    CenterFreqChanged(String),
    NudgeCenterFreq(f64),
    QuickTune(f64),
    GainChanged(f64),
    BandwidthSelected(BandwidthItem),
    CaptureSignal,
    ModoSToggle,
    BtScanned(Result<Vec<BluetoothDevice>, String>),
    BtFilterChanged(String),
    DeviceSelected(String),
    WifiScanned(Result<Vec<WifiNetwork>, String>),
    BandSelected(WifiBand),
    HealthChecked(bool),
    KpiFetched(Result<KpiStats, String>),
    RefreshTools,
    ToolsLoaded(Result<PentestStatus, String>),
    InterfaceSelected(String),
    SetMonitorMode(bool),
    MonitorModeResult(Result<CommandOutcome, String>),
    TargetBssidChanged(String),
    TargetChannelChanged(String),
    ClientMacChanged(String),
    DeauthCountChanged(String),
    HandshakeDurationChanged(String),
    LaunchDeauth,
    LaunchHandshake,
    LaunchWps,
    AttackLaunched(String, Result<AttackLaunch, String>),
    StopAttackSession(String),
    AttackSessionStopped(String, Result<CommandOutcome, String>),
    ApSsidChanged(String),
    ApChannelChanged(String),
    PortalTypeSelected(PortalType),
    ApTargetMacChanged(String),
    CreateEvilTwin,
    CreateCaptivePortal,
    ApLaunched(ApKind, String, Result<ApCreated, String>),
    ApSelected(String),
    StopAp(String),
    ApStopped(String, Result<(), String>),
    CredentialsLoaded(Result<Vec<String>, String>),
    TermInputChanged(String),
    RunCommand,
    QuickCommand(String),
    CommandFinished(String, Result<TerminalResult, String>),
    ClearTerminal,
    LogNotesChanged(String),
    DeleteLog(Uuid),
    ExportLogs,
    ExportTargetPicked(Option<String>),
    BackendUrlChanged(String),
    ApplyBackendUrl,
}

pub struct App {
    session: Option<UserSession>,
    access_code: String,
    login_error: Option<String>,

    client: BackendClient,
    backend_url_input: String,
    backend_online: bool,
    started_at: Instant,

    tab_selected: Tab,
    status: String,

    config: RadioConfig,
    center_freq_text: String,
    bandwidth_items: Vec<BandwidthItem>,
    spectrum: Vec<SpectrumPoint>,
    scanning: bool,
    spectrum_fetching: bool,
    spectrum_live: bool,
    rng: StdRng,

    modo_s: ModoSTimer,
    modo_s_state: ModoSState,

    bt_devices: Vec<BluetoothDevice>,
    bt_live: bool,
    bt_fetching: bool,
    bt_filter: String,
    selected_mac: Option<String>,
    rssi_history: VecDeque<(f64, i32)>,

    wifi_networks: Vec<WifiNetwork>,
    wifi_band: WifiBand,
    wifi_live: bool,
    wifi_fetching: bool,

    kpi: Option<KpiStats>,
    kpi_live: bool,

    pentest: PentestStatus,
    tools_loading: bool,
    selected_interface: Option<String>,
    target_bssid: String,
    target_channel: String,
    client_mac: String,
    deauth_count: String,
    handshake_duration: String,
    attack_console: Vec<ConsoleLine>,
    active_attacks: Vec<ActiveAttack>,

    ap_ssid: String,
    ap_channel: String,
    portal_type: PortalType,
    ap_target_mac: String,
    active_aps: Vec<ActiveAp>,
    selected_ap: Option<String>,
    credentials: Vec<String>,

    term_input: String,
    term_lines: Vec<ConsoleLine>,
    term_busy: bool,

    logs: Vec<SignalLog>,
    log_notes: String,
}

impl Default for App {
    fn default() -> Self {
        let config = RadioConfig::default();
        App {
            session: None,
            access_code: String::new(),
            login_error: None,

            client: BackendClient::new(DEFAULT_BASE_URL),
            backend_url_input: DEFAULT_BASE_URL.to_string(),
            backend_online: false,
            started_at: Instant::now(),

            tab_selected: Tab::Dashboard,
            status: "Idle".to_string(),

            config,
            center_freq_text: format!("{}", config.center_freq),
            bandwidth_items: bandwidth_items(),
            spectrum: Vec::new(),
            scanning: true,
            spectrum_fetching: false,
            spectrum_live: false,
            rng: StdRng::from_entropy(),

            modo_s: ModoSTimer::new(),
            modo_s_state: ModoSState::Idle,

            bt_devices: Vec::new(),
            bt_live: false,
            bt_fetching: false,
            bt_filter: String::new(),
            selected_mac: None,
            rssi_history: VecDeque::new(),

            wifi_networks: Vec::new(),
            wifi_band: WifiBand::Band2_4,
            wifi_live: false,
            wifi_fetching: false,

            kpi: None,
            kpi_live: false,

            pentest: PentestStatus::default(),
            tools_loading: false,
            selected_interface: None,
            target_bssid: String::new(),
            target_channel: "6".to_string(),
            client_mac: String::new(),
            deauth_count: "10".to_string(),
            handshake_duration: "60".to_string(),
            attack_console: Vec::new(),
            active_attacks: Vec::new(),

            ap_ssid: String::new(),
            ap_channel: "6".to_string(),
            portal_type: PortalType::Google,
            ap_target_mac: String::new(),
            active_aps: Vec::new(),
            selected_ap: None,
            credentials: Vec::new(),

            term_input: String::new(),
            term_lines: Vec::new(),
            term_busy: false,

            logs: Vec::new(),
            log_notes: "Manual capture from dashboard.".to_string(),
        }
    }
}

impl iced::Application for App {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Self::Message>) {
        let mut app = Self::default();
        app.session = session::load_session();
        let probe = app.probe_backend();
        (app, probe)
    }

    fn title(&self) -> String {
        "PocketGone EDU Lab".to_string()
    }

    fn subscription(&self) -> iced::Subscription<Self::Message> {
        if self.session.is_none() {
            return iced::Subscription::none();
        }
        iced::Subscription::batch(vec![
            iced::time::every(Duration::from_millis(50)).map(|_| Message::SpectrumTick),
            iced::time::every(Duration::from_secs(1)).map(|_| Message::ClockTick),
            iced::time::every(Duration::from_secs(3)).map(|_| Message::WifiTick),
            iced::time::every(Duration::from_secs(5)).map(|_| Message::StatusTick),
        ])
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::AccessCodeChanged(v) => {
                self.access_code = v;
                self.login_error = None;
                Command::none()
            }
            Message::SubmitLogin => {
                match session::login(&self.access_code) {
                    Some(user) => {
                        if let Err(e) = session::save_session(&user) {
                            tracing::warn!("session blob not saved: {e:#}");
                        }
                        self.status = format!("Signed in as {}", user.username);
                        self.session = Some(user);
                        self.access_code.clear();
                        self.login_error = None;
                        let tools = self.load_tools();
                        Command::batch(vec![self.probe_backend(), tools])
                    }
                    None => {
                        self.login_error = Some("Invalid access code".to_string());
                        Command::none()
                    }
                }
            }
            Message::Logout => {
                session::clear_session();
                self.session = None;
                self.tab_selected = Tab::Dashboard;
                self.status = "Signed out".to_string();
                Command::none()
            }
            Message::TabSelected(tab) => {
                self.tab_selected = tab;
                Command::none()
            }
            Message::SpectrumTick => {
                if !self.scanning || self.session.is_none() {
                    return Command::none();
                }
                let interference = self.modo_s_state == ModoSState::Active;
                if self.backend_online && !self.spectrum_fetching {
                    self.spectrum_fetching = true;
                    let client = self.client.clone();
                    let config = self.config;
                    return Command::perform(
                        async move {
                            client
                                .live_spectrum(&config, DEFAULT_TRACE_POINTS, interference)
                                .map_err(|e| e.to_string())
                        },
                        Message::SpectrumFetched,
                    );
                }
                if !self.backend_online {
                    let t = self.started_at.elapsed().as_secs_f64();
                    self.spectrum =
                        synthesize(&self.config, DEFAULT_TRACE_POINTS, interference, t, &mut self.rng);
                    self.spectrum_live = false;
                }
                Command::none()
            }
            Message::SpectrumFetched(result) => {
                self.spectrum_fetching = false;
                match result {
                    Ok(points) => {
                        self.spectrum = points;
                        self.spectrum_live = true;
                    }
                    Err(e) => {
                        tracing::debug!("live spectrum fetch failed: {e}");
                        self.backend_online = false;
                        self.spectrum_live = false;
                    }
                }
                Command::none()
            }
            Message::ToggleScan => {
                self.scanning = !self.scanning;
                self.status = if self.scanning {
                    "Scan resumed".to_string()
                } else {
                    "Scan paused".to_string()
                };
                Command::none()
            }
            Message::CenterFreqChanged(v) => {
                if let Ok(freq) = v.trim().parse::<f64>() {
                    if freq > 0.0 {
                        self.config.center_freq = freq;
                    }
                }
                self.center_freq_text = v;
                Command::none()
            }
            Message::NudgeCenterFreq(delta) => {
                self.config.center_freq = (self.config.center_freq + delta).max(0.1);
                self.center_freq_text = format!("{}", self.config.center_freq);
                Command::none()
            }
            Message::QuickTune(freq) => {
                self.config.center_freq = freq;
                self.center_freq_text = format!("{}", freq);
                Command::none()
            }
            Message::GainChanged(v) => {
                self.config.gain = v;
                Command::none()
            }
            Message::BandwidthSelected(item) => {
                self.config.bandwidth = item.mhz;
                Command::none()
            }
            Message::CaptureSignal => {
                match SignalLog::capture(&self.config, &self.spectrum, self.log_notes.trim()) {
                    Some(log) => {
                        self.status = format!(
                            "Captured {} at {:.1} dB",
                            format_frequency(log.frequency),
                            log.peak_db
                        );
                        self.logs.insert(0, log);
                        self.tab_selected = Tab::Logs;
                    }
                    None => {
                        self.status = "Nothing to capture yet".to_string();
                    }
                }
                Command::none()
            }
            Message::ModoSToggle => {
                if self.modo_s.is_running() {
                    self.modo_s.deactivate();
                    self.modo_s_state = ModoSState::Idle;
                    self.status = "Modo S deactivated".to_string();
                    tracing::info!("interference cycle deactivated");
                } else {
                    self.modo_s.activate();
                    self.modo_s_state = ModoSState::Active;
                    // Arm the receiver on the band the cycle jams.
                    self.config = RadioConfig::ism_wideband();
                    self.center_freq_text = format!("{}", self.config.center_freq);
                    self.status = "Modo S active (2.4 GHz)".to_string();
                    tracing::info!("interference cycle activated");
                }
                Command::none()
            }
            Message::ClockTick => {
                self.modo_s_state = self.modo_s.state();
                self.push_rssi_sample();

                if self.bt_fetching {
                    return Command::none();
                }
                if self.backend_online {
                    self.bt_fetching = true;
                    let client = self.client.clone();
                    Command::perform(
                        async move { client.bluetooth_scan().map_err(|e| e.to_string()) },
                        Message::BtScanned,
                    )
                } else {
                    let mut devices = fallback_bluetooth_devices();
                    jitter_bluetooth(&mut devices, &mut self.rng);
                    self.apply_bt_scan(devices, false);
                    Command::none()
                }
            }
            Message::BtScanned(result) => {
                self.bt_fetching = false;
                match result {
                    Ok(devices) => self.apply_bt_scan(devices, true),
                    Err(e) => {
                        tracing::debug!("bluetooth scan failed: {e}");
                        self.backend_online = false;
                        let mut devices = fallback_bluetooth_devices();
                        jitter_bluetooth(&mut devices, &mut self.rng);
                        self.apply_bt_scan(devices, false);
                    }
                }
                Command::none()
            }
            Message::BtFilterChanged(v) => {
                self.bt_filter = v;
                Command::none()
            }
            Message::DeviceSelected(mac) => {
                if self.selected_mac.as_deref() != Some(mac.as_str()) {
                    self.selected_mac = Some(mac);
                    self.rssi_history.clear();
                }
                Command::none()
            }
            Message::WifiTick => {
                let mut commands = Vec::new();
                if !self.wifi_fetching {
                    if self.backend_online {
                        self.wifi_fetching = true;
                        let client = self.client.clone();
                        let band = self.wifi_band;
                        commands.push(Command::perform(
                            async move { client.wifi_scan(band).map_err(|e| e.to_string()) },
                            Message::WifiScanned,
                        ));
                    } else {
                        let mut networks = fallback_wifi_networks(self.wifi_band);
                        jitter_wifi(&mut networks, &mut self.rng);
                        self.wifi_networks = networks;
                        self.wifi_live = false;
                    }
                }
                if self.backend_online {
                    if let Some(ap_id) = self.selected_ap.clone() {
                        let client = self.client.clone();
                        commands.push(Command::perform(
                            async move { client.portal_credentials(&ap_id).map_err(|e| e.to_string()) },
                            Message::CredentialsLoaded,
                        ));
                    }
                }
                Command::batch(commands)
            }
            Message::WifiScanned(result) => {
                self.wifi_fetching = false;
                match result {
                    Ok(networks) => {
                        self.wifi_networks = networks;
                        self.wifi_live = true;
                    }
                    Err(e) => {
                        tracing::debug!("wifi scan failed: {e}");
                        self.backend_online = false;
                        let mut networks = fallback_wifi_networks(self.wifi_band);
                        jitter_wifi(&mut networks, &mut self.rng);
                        self.wifi_networks = networks;
                        self.wifi_live = false;
                    }
                }
                Command::none()
            }
            Message::BandSelected(band) => {
                self.wifi_band = band;
                self.wifi_networks = fallback_wifi_networks(band);
                self.wifi_live = false;
                Command::none()
            }
            Message::StatusTick => {
                if !self.backend_online {
                    self.kpi = Some(KpiStats::simulated(self.started_at.elapsed().as_secs()));
                    self.kpi_live = false;
                }
                let mut commands = vec![self.probe_backend()];
                if self.backend_online {
                    let client = self.client.clone();
                    commands.push(Command::perform(
                        async move { client.kpi_stats().map_err(|e| e.to_string()) },
                        Message::KpiFetched,
                    ));
                }
                Command::batch(commands)
            }
            Message::HealthChecked(online) => {
                let came_online = online && !self.backend_online;
                if online != self.backend_online {
                    if online {
                        tracing::info!("lab backend reachable at {}", self.client.base_url());
                    } else {
                        tracing::info!("lab backend offline, serving simulated data");
                    }
                }
                self.backend_online = online;
                if came_online {
                    return self.load_tools();
                }
                Command::none()
            }
            Message::KpiFetched(result) => {
                match result {
                    Ok(stats) => {
                        self.kpi = Some(stats);
                        self.kpi_live = true;
                    }
                    Err(e) => {
                        tracing::debug!("kpi fetch failed: {e}");
                        self.kpi = Some(KpiStats::simulated(self.started_at.elapsed().as_secs()));
                        self.kpi_live = false;
                    }
                }
                Command::none()
            }
            Message::RefreshTools => self.load_tools(),
            Message::ToolsLoaded(result) => {
                self.tools_loading = false;
                match result {
                    Ok(status) => {
                        if self.selected_interface.is_none() {
                            self.selected_interface =
                                status.interfaces.first().map(|i| i.name.clone());
                        }
                        self.pentest = status;
                    }
                    Err(e) => {
                        self.attack_log(LineKind::Error, format!("Tool discovery failed: {e}"));
                    }
                }
                Command::none()
            }
            Message::InterfaceSelected(name) => {
                self.selected_interface = Some(name);
                Command::none()
            }
            Message::SetMonitorMode(enable) => {
                let Some(interface) = self.selected_interface.clone() else {
                    self.attack_log(LineKind::Error, "Select a wireless interface first");
                    return Command::none();
                };
                self.attack_log(
                    LineKind::Input,
                    format!(
                        "$ airmon-ng {} {}",
                        if enable { "start" } else { "stop" },
                        interface
                    ),
                );
                let client = self.client.clone();
                Command::perform(
                    async move {
                        client
                            .set_monitor_mode(&interface, enable)
                            .map_err(|e| e.to_string())
                    },
                    Message::MonitorModeResult,
                )
            }
            Message::MonitorModeResult(result) => {
                match result {
                    Ok(outcome) if outcome.success => {
                        self.attack_log(LineKind::Success, outcome.message);
                        return self.load_tools();
                    }
                    Ok(outcome) => {
                        self.attack_log(LineKind::Error, outcome.message);
                    }
                    Err(e) => {
                        self.attack_log(LineKind::Error, format!("Monitor mode request failed: {e}"));
                    }
                }
                Command::none()
            }
            Message::TargetBssidChanged(v) => {
                self.target_bssid = v;
                Command::none()
            }
            Message::TargetChannelChanged(v) => {
                self.target_channel = v;
                Command::none()
            }
            Message::ClientMacChanged(v) => {
                self.client_mac = v;
                Command::none()
            }
            Message::DeauthCountChanged(v) => {
                self.deauth_count = v;
                Command::none()
            }
            Message::HandshakeDurationChanged(v) => {
                self.handshake_duration = v;
                Command::none()
            }
            Message::LaunchDeauth => {
                let Some((interface, bssid)) = self.attack_target() else {
                    return Command::none();
                };
                let client_mac = self.client_mac.trim();
                let request = DeauthRequest {
                    interface,
                    target_bssid: bssid.clone(),
                    client_mac: if client_mac.is_empty() {
                        None
                    } else {
                        Some(client_mac.to_string())
                    },
                    count: self.deauth_count.trim().parse().unwrap_or(10),
                };
                self.attack_log(
                    LineKind::Input,
                    format!("Launching deauth against {bssid} ({} frames)", request.count),
                );
                let client = self.client.clone();
                Command::perform(
                    async move { client.deauth_attack(&request).map_err(|e| e.to_string()) },
                    |result| Message::AttackLaunched("Deauth".to_string(), result),
                )
            }
            Message::LaunchHandshake => {
                let Some((interface, bssid)) = self.attack_target() else {
                    return Command::none();
                };
                let request = HandshakeRequest {
                    interface,
                    target_bssid: bssid.clone(),
                    channel: self.target_channel.trim().parse().unwrap_or(6),
                    duration: self.handshake_duration.trim().parse().unwrap_or(60),
                };
                self.attack_log(
                    LineKind::Input,
                    format!(
                        "Capturing handshake from {bssid} on channel {} for {}s",
                        request.channel, request.duration
                    ),
                );
                let client = self.client.clone();
                Command::perform(
                    async move { client.capture_handshake(&request).map_err(|e| e.to_string()) },
                    |result| Message::AttackLaunched("Handshake capture".to_string(), result),
                )
            }
            Message::LaunchWps => {
                let Some((interface, bssid)) = self.attack_target() else {
                    return Command::none();
                };
                let request = WpsRequest {
                    interface,
                    target_bssid: bssid.clone(),
                    channel: self.target_channel.trim().parse().unwrap_or(6),
                };
                self.attack_log(
                    LineKind::Input,
                    format!("Starting WPS attack against {bssid}"),
                );
                let client = self.client.clone();
                Command::perform(
                    async move { client.wps_attack(&request).map_err(|e| e.to_string()) },
                    |result| Message::AttackLaunched("WPS attack".to_string(), result),
                )
            }
            Message::AttackLaunched(label, result) => {
                match result {
                    Ok(launch) => {
                        let kind = if launch.success {
                            LineKind::Success
                        } else {
                            LineKind::Error
                        };
                        let message = if launch.message.is_empty() {
                            format!("{label} request accepted")
                        } else {
                            launch.message.clone()
                        };
                        self.attack_log(kind, message);
                        if let Some(session_id) = launch.session_id {
                            self.attack_log(LineKind::Info, format!("Session {session_id}"));
                            self.active_attacks.push(ActiveAttack { session_id, label });
                        }
                    }
                    Err(e) => {
                        self.attack_log(LineKind::Error, format!("{label} failed: {e}"));
                    }
                }
                Command::none()
            }
            Message::StopAttackSession(session_id) => {
                self.attack_log(LineKind::Input, format!("Stopping session {session_id}"));
                let client = self.client.clone();
                let id = session_id.clone();
                Command::perform(
                    async move { client.stop_session(&id).map_err(|e| e.to_string()) },
                    move |result| Message::AttackSessionStopped(session_id.clone(), result),
                )
            }
            Message::AttackSessionStopped(session_id, result) => {
                match result {
                    Ok(outcome) if outcome.success => {
                        self.active_attacks.retain(|a| a.session_id != session_id);
                        self.attack_log(LineKind::Success, format!("Session {session_id} stopped"));
                    }
                    Ok(outcome) => {
                        self.attack_log(LineKind::Error, outcome.message);
                    }
                    Err(e) => {
                        self.attack_log(LineKind::Error, format!("Stop failed: {e}"));
                    }
                }
                Command::none()
            }
            Message::ApSsidChanged(v) => {
                self.ap_ssid = v;
                Command::none()
            }
            Message::ApChannelChanged(v) => {
                self.ap_channel = v;
                Command::none()
            }
            Message::PortalTypeSelected(v) => {
                self.portal_type = v;
                Command::none()
            }
            Message::ApTargetMacChanged(v) => {
                self.ap_target_mac = v;
                Command::none()
            }
            Message::CreateEvilTwin => {
                let Some(interface) = self.selected_interface.clone() else {
                    self.attack_log(LineKind::Error, "Select a wireless interface first");
                    return Command::none();
                };
                let ssid = self.ap_ssid.trim().to_string();
                if ssid.is_empty() {
                    self.attack_log(LineKind::Error, "SSID is required");
                    return Command::none();
                }
                let target_mac = self.ap_target_mac.trim();
                let request = EvilTwinRequest {
                    interface,
                    ssid: ssid.clone(),
                    channel: self.ap_channel.trim().parse().unwrap_or(6),
                    target_mac: if target_mac.is_empty() {
                        None
                    } else {
                        Some(target_mac.to_string())
                    },
                };
                let client = self.client.clone();
                Command::perform(
                    async move { client.create_evil_twin(&request).map_err(|e| e.to_string()) },
                    move |result| Message::ApLaunched(ApKind::EvilTwin, ssid.clone(), result),
                )
            }
            Message::CreateCaptivePortal => {
                let Some(interface) = self.selected_interface.clone() else {
                    self.attack_log(LineKind::Error, "Select a wireless interface first");
                    return Command::none();
                };
                let ssid = self.ap_ssid.trim().to_string();
                if ssid.is_empty() {
                    self.attack_log(LineKind::Error, "SSID is required");
                    return Command::none();
                }
                let request = CaptivePortalRequest {
                    interface,
                    ssid: ssid.clone(),
                    channel: self.ap_channel.trim().parse().unwrap_or(6),
                    portal_type: self.portal_type.wire_value().to_string(),
                };
                let client = self.client.clone();
                Command::perform(
                    async move {
                        client
                            .create_captive_portal(&request)
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::ApLaunched(ApKind::CaptivePortal, ssid.clone(), result),
                )
            }
            Message::ApLaunched(kind, ssid, result) => {
                match result {
                    Ok(created) => {
                        self.status = format!("Started {kind} \"{ssid}\"");
                        if kind == ApKind::CaptivePortal {
                            self.selected_ap = Some(created.ap_id.clone());
                            self.credentials.clear();
                        }
                        let channel = self.ap_channel.trim().parse().unwrap_or(6);
                        self.active_aps.push(ActiveAp {
                            ap_id: created.ap_id,
                            ssid,
                            kind,
                            channel,
                        });
                    }
                    Err(e) => {
                        self.status = format!("Failed to start {kind}: {e}");
                    }
                }
                Command::none()
            }
            Message::ApSelected(ap_id) => {
                self.selected_ap = Some(ap_id);
                self.credentials.clear();
                Command::none()
            }
            Message::StopAp(ap_id) => {
                let client = self.client.clone();
                let id = ap_id.clone();
                Command::perform(
                    async move { client.stop_access_point(&id).map_err(|e| e.to_string()) },
                    move |result| Message::ApStopped(ap_id.clone(), result),
                )
            }
            Message::ApStopped(ap_id, result) => {
                match result {
                    Ok(()) => {
                        self.active_aps.retain(|ap| ap.ap_id != ap_id);
                        if self.selected_ap.as_deref() == Some(ap_id.as_str()) {
                            self.selected_ap = None;
                            self.credentials.clear();
                        }
                        self.status = "Access point stopped".to_string();
                    }
                    Err(e) => {
                        self.status = format!("Failed to stop AP: {e}");
                    }
                }
                Command::none()
            }
            Message::CredentialsLoaded(result) => {
                match result {
                    Ok(credentials) => self.credentials = credentials,
                    Err(e) => tracing::debug!("credential poll failed: {e}"),
                }
                Command::none()
            }
            Message::TermInputChanged(v) => {
                self.term_input = v;
                Command::none()
            }
            Message::RunCommand => {
                let command = self.term_input.trim().to_string();
                self.term_input.clear();
                self.run_terminal_command(command)
            }
            Message::QuickCommand(command) => self.run_terminal_command(command),
            Message::CommandFinished(command, result) => {
                self.term_busy = false;
                match result {
                    Ok(output) => {
                        if !output.stdout.trim().is_empty() {
                            self.term_lines
                                .push(ConsoleLine::new(LineKind::Output, output.stdout.trim()));
                        }
                        if !output.stderr.trim().is_empty() {
                            self.term_lines
                                .push(ConsoleLine::new(LineKind::Error, output.stderr.trim()));
                        }
                        let kind = if output.success {
                            LineKind::Success
                        } else {
                            LineKind::Error
                        };
                        let verdict = if output.success {
                            "Command completed"
                        } else {
                            "Command failed"
                        };
                        self.term_lines.push(ConsoleLine::new(
                            kind,
                            format!("{verdict} (exit code: {})", output.returncode),
                        ));
                    }
                    Err(e) => {
                        self.term_lines.push(ConsoleLine::new(
                            LineKind::Error,
                            format!("{command}: backend unreachable ({e})"),
                        ));
                    }
                }
                Command::none()
            }
            Message::ClearTerminal => {
                self.term_lines.clear();
                self.term_lines
                    .push(ConsoleLine::new(LineKind::Success, "Terminal cleared"));
                Command::none()
            }
            Message::LogNotesChanged(v) => {
                self.log_notes = v;
                Command::none()
            }
            Message::DeleteLog(id) => {
                self.logs.retain(|log| log.id != id);
                Command::none()
            }
            Message::ExportLogs => {
                if self.logs.is_empty() {
                    self.status = "No signal logs to export".to_string();
                    return Command::none();
                }
                Command::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("signal_logs.json")
                            .save_file()
                            .await
                            .map(|f| f.path().display().to_string())
                    },
                    Message::ExportTargetPicked,
                )
            }
            Message::ExportTargetPicked(path) => {
                if let Some(path) = path {
                    match export_to_file(&self.logs, std::path::Path::new(&path)) {
                        Ok(()) => {
                            self.status = format!("Exported {} logs to {path}", self.logs.len());
                        }
                        Err(e) => {
                            self.status = format!("Export failed: {e}");
                        }
                    }
                }
                Command::none()
            }
            Message::BackendUrlChanged(v) => {
                self.backend_url_input = v;
                Command::none()
            }
            Message::ApplyBackendUrl => {
                let url = self.backend_url_input.trim().to_string();
                if url.is_empty() {
                    self.status = "Backend URL is required".to_string();
                    return Command::none();
                }
                self.client = BackendClient::new(url);
                self.backend_online = false;
                self.status = format!("Backend set to {}", self.client.base_url());
                self.probe_backend()
            }
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let Some(session) = &self.session else {
            return self.login_view();
        };

        let tab_button = |label: String, tab: Tab| {
            let selected = self.tab_selected == tab;
            button(text(label).size(14))
                .padding([8, 14])
                .style(theme::Button::Custom(Box::new(TabButton { selected })))
                .on_press(Message::TabSelected(tab))
        };

        let tabs = row![
            tab_button(Tab::Dashboard.to_string(), Tab::Dashboard),
            tab_button(Tab::Spectrum.to_string(), Tab::Spectrum),
            tab_button(Tab::Bluetooth.to_string(), Tab::Bluetooth),
            tab_button(Tab::Wifi.to_string(), Tab::Wifi),
            tab_button(Tab::Attacks.to_string(), Tab::Attacks),
            tab_button(Tab::EvilTwin.to_string(), Tab::EvilTwin),
            tab_button(Tab::Terminal.to_string(), Tab::Terminal),
            tab_button(Tab::Logs.to_string(), Tab::Logs),
            tab_button(Tab::System.to_string(), Tab::System),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let backend_pill = if self.backend_online {
            pill("BACKEND", color_live(), Color::from_rgb8(6, 24, 19))
        } else {
            pill("SIMULATED", color_surface_alt(), color_muted())
        };

        let modo_pill = match self.modo_s_state {
            ModoSState::Idle => pill("MODO S IDLE", color_surface_alt(), color_muted()),
            ModoSState::Active => pill("MODO S ACTIVE", color_danger(), Color::WHITE),
            ModoSState::Window => pill("SAFETY WINDOW", color_warn(), Color::from_rgb8(30, 25, 4)),
        };

        let hero = container(
            row![
                column![
                    text("PocketGone").size(30).style(color_text()),
                    text("EDU Weblab").size(22).style(color_accent()),
                    text("RF spectrum, Bluetooth and WiFi diagnostics for the classroom lab")
                        .size(14)
                        .style(color_muted()),
                ]
                .spacing(4)
                .width(Length::FillPortion(3)),
                column![
                    row![
                        backend_pill,
                        modo_pill,
                        text(&self.status).style(color_muted()),
                    ]
                    .spacing(10)
                    .align_items(Alignment::Center),
                    row![
                        text(format!("User: {}", session.username)).style(color_muted()),
                        text(format!("[{}]", session.role.label())).style(color_accent()),
                        button(text("Sign out").size(13))
                            .style(theme::Button::Custom(Box::new(GhostButton)))
                            .on_press(Message::Logout),
                    ]
                    .spacing(10)
                    .align_items(Alignment::Center),
                ]
                .spacing(8)
                .width(Length::FillPortion(2)),
            ]
            .spacing(24)
            .align_items(Alignment::Center),
        )
        .padding(16)
        .width(Length::Fill)
        .style(theme::Container::from(hero_style));

        let warning_banner: Element<'_, Message> = if self.modo_s_state != ModoSState::Idle {
            container(
                text("WARNING: MODO S ACTIVE - INTERFERENCE GENERATION IN PROGRESS (2.4 GHz)")
                    .size(13)
                    .style(color_danger()),
            )
            .padding([6, 12])
            .width(Length::Fill)
            .style(theme::Container::from(warning_style))
            .into()
        } else {
            column![].into()
        };

        let body: Element<'_, Message> = match self.tab_selected {
            Tab::Dashboard => self.dashboard_tab(),
            Tab::Spectrum => self.spectrum_tab(),
            Tab::Bluetooth => self.bluetooth_tab(),
            Tab::Wifi => self.wifi_tab(),
            Tab::Attacks => self.attacks_tab(),
            Tab::EvilTwin => self.evil_twin_tab(),
            Tab::Terminal => self.terminal_tab(),
            Tab::Logs => self.logs_tab(),
            Tab::System => self.system_tab(session),
        };

        let content = column![hero, warning_banner, tabs, body]
            .spacing(18)
            .padding(24)
            .width(Length::Fill)
            .align_items(Alignment::Start);

        let scroll = scrollable(content).width(Length::Fill).height(Length::Fill);

        container(scroll)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .style(theme::Container::from(body_style))
            .into()
    }
}

impl App {
    fn probe_backend(&self) -> Command<Message> {
        let client = self.client.clone();
        Command::perform(
            async move { client.health().is_ok() },
            Message::HealthChecked,
        )
    }

    fn load_tools(&mut self) -> Command<Message> {
        if self.tools_loading {
            return Command::none();
        }
        self.tools_loading = true;
        let client = self.client.clone();
        Command::perform(
            async move { client.pentest_tools().map_err(|e| e.to_string()) },
            Message::ToolsLoaded,
        )
    }

    fn attack_log(&mut self, kind: LineKind, body: impl Into<String>) {
        self.attack_console.push(ConsoleLine::new(kind, body));
        if self.attack_console.len() > 200 {
            self.attack_console.remove(0);
        }
    }

    fn attack_target(&mut self) -> Option<(String, String)> {
        let Some(interface) = self.selected_interface.clone() else {
            self.attack_log(LineKind::Error, "Select a wireless interface first");
            return None;
        };
        let bssid = self.target_bssid.trim().to_string();
        if bssid.is_empty() {
            self.attack_log(LineKind::Error, "Target BSSID is required");
            return None;
        }
        Some((interface, bssid))
    }

    fn run_terminal_command(&mut self, command: String) -> Command<Message> {
        if command.is_empty() || self.term_busy {
            return Command::none();
        }
        self.term_lines
            .push(ConsoleLine::new(LineKind::Input, format!("$ {command}")));
        self.term_busy = true;
        let client = self.client.clone();
        let sent = command.clone();
        Command::perform(
            async move {
                client
                    .execute_command(&sent, TERMINAL_TIMEOUT_SECS)
                    .map_err(|e| e.to_string())
            },
            move |result| Message::CommandFinished(command.clone(), result),
        )
    }

    fn apply_bt_scan(&mut self, devices: Vec<BluetoothDevice>, live: bool) {
        self.bt_devices = devices;
        self.bt_live = live;
        if self.selected_mac.is_none() {
            self.selected_mac = self.bt_devices.first().map(|d| d.mac.clone());
        }
    }

    fn push_rssi_sample(&mut self) {
        let Some(mac) = self.selected_mac.as_deref() else {
            return;
        };
        let Some(device) = self.bt_devices.iter().find(|d| d.mac == mac) else {
            return;
        };
        let rssi = device.rssi;
        let t = self.started_at.elapsed().as_secs_f64();
        self.rssi_history.push_back((t, rssi));
        while let Some((age, _)) = self.rssi_history.front() {
            if t - age > RSSI_HISTORY_SECS {
                self.rssi_history.pop_front();
            } else {
                break;
            }
        }
    }

    fn login_view(&self) -> Element<'_, Message> {
        let error: Element<'_, Message> = match &self.login_error {
            Some(message) => text(message).style(color_danger()).into(),
            None => text("Enter your lab access code").style(color_muted()).into(),
        };

        let card = container(
            column![
                text("PocketGone").size(34).style(color_text()),
                text("EDU Weblab v1.0").size(14).style(color_accent()),
                error,
                text_input("access code", &self.access_code)
                    .on_input(Message::AccessCodeChanged)
                    .on_submit(Message::SubmitLogin)
                    .password()
                    .padding(10),
                button(text("Sign in"))
                    .padding([10, 24])
                    .style(theme::Button::Custom(Box::new(PrimaryButton)))
                    .on_press(Message::SubmitLogin),
                text("Ask your instructor for the classroom access code.")
                    .size(12)
                    .style(color_muted()),
            ]
            .spacing(14)
            .align_items(Alignment::Center),
        )
        .padding(32)
        .width(360)
        .style(theme::Container::from(card_style));

        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .style(theme::Container::from(body_style))
            .into()
    }

    fn dashboard_tab(&self) -> Element<'_, Message> {
        let stats = self
            .kpi
            .unwrap_or_else(|| KpiStats::simulated(self.started_at.elapsed().as_secs()));

        let uptime = format!(
            "{}h {}m",
            stats.uptime_seconds / 3600,
            (stats.uptime_seconds % 3600) / 60
        );

        let stat_card = |label: &str, value: String, detail: String| {
            card(
                label,
                column![
                    text(value).size(26).style(color_text()),
                    text(detail).size(12).style(color_muted()),
                ],
            )
        };

        let source = if self.kpi_live {
            "Telemetry source: lab backend"
        } else {
            "Telemetry source: simulated (backend offline)"
        };

        let top = row![
            stat_card("System Uptime", uptime, "since session start".to_string()),
            stat_card(
                "Packets Analyzed",
                format!("{:.1}k", stats.packets_captured as f64 / 1000.0),
                "+124/sec".to_string(),
            ),
            stat_card(
                "Threats Mitigated",
                stats.threats_blocked.to_string(),
                "Last: Deauth attack".to_string(),
            ),
            stat_card(
                "Active Targets",
                stats.active_devices.to_string(),
                "2.4G / 5G".to_string(),
            ),
        ]
        .spacing(16);

        let hardware = card(
            "Hardware Status",
            column![
                row![
                    text("CPU (RPi 4)").style(color_muted()),
                    text(format!("{} C", stats.cpu_temp)).style(if stats.cpu_temp > 60 {
                        color_warn()
                    } else {
                        color_live()
                    }),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Storage (/data)").style(color_muted()),
                    progress_bar(0.0..=100.0, stats.storage_usage_percent as f32),
                    text(format!("{}%", stats.storage_usage_percent)).style(color_muted()),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let alerts = card(
            "Recent Alerts",
            column![
                text("Deauthentication frames detected on channel 6").style(color_text()),
                text("New unknown device: MAC 44:22:11:XX").style(color_muted()),
            ]
            .spacing(8),
        );

        column![
            text(source).size(13).style(color_muted()),
            top,
            row![hardware, alerts].spacing(16),
        ]
        .spacing(16)
        .into()
    }

    fn spectrum_tab(&self) -> Element<'_, Message> {
        let source_note = if self.spectrum_live {
            text("Live FFT from lab backend").size(13).style(color_live())
        } else {
            text("Simulated trace (backend offline)")
                .size(13)
                .style(color_warn())
        };

        let scan_button = if self.scanning {
            button(text("Stop Scan"))
                .style(theme::Button::Custom(Box::new(DangerButton)))
                .on_press(Message::ToggleScan)
        } else {
            button(text("Resume Scan"))
                .style(theme::Button::Custom(Box::new(PrimaryButton)))
                .on_press(Message::ToggleScan)
        };

        let trace_card = card_accent(
            "Spectrum Analyzer",
            column![
                row![
                    text(format!(
                        "Center {} | Span {} MHz | Gain {} dB",
                        format_frequency(self.config.center_freq),
                        self.config.bandwidth,
                        self.config.gain
                    ))
                    .style(color_muted()),
                    source_note,
                    scan_button,
                ]
                .spacing(14)
                .align_items(Alignment::Center),
                Canvas::new(SpectrumTrace {
                    points: self.spectrum.clone(),
                    span: self.config.span(),
                })
                .width(Length::Fill)
                .height(260),
            ],
        );

        let quick_tune = row![
            text("Quick tune:").style(color_muted()),
            button(text("98.5M").size(12))
                .style(theme::Button::Custom(Box::new(GhostButton)))
                .on_press(Message::QuickTune(98.5)),
            button(text("433.92M").size(12))
                .style(theme::Button::Custom(Box::new(GhostButton)))
                .on_press(Message::QuickTune(433.92)),
            button(text("915M").size(12))
                .style(theme::Button::Custom(Box::new(GhostButton)))
                .on_press(Message::QuickTune(915.0)),
            button(text("2412M").size(12))
                .style(theme::Button::Custom(Box::new(GhostButton)))
                .on_press(Message::QuickTune(2412.0)),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let selected_bandwidth = self
            .bandwidth_items
            .iter()
            .find(|item| item.mhz == self.config.bandwidth)
            .cloned();

        let control_card = card(
            "Radio Control",
            column![
                row![
                    text("Center frequency (MHz):"),
                    text_input("98.5", &self.center_freq_text).on_input(Message::CenterFreqChanged),
                    button(text("+1"))
                        .style(theme::Button::Custom(Box::new(GhostButton)))
                        .on_press(Message::NudgeCenterFreq(1.0)),
                    button(text("-1"))
                        .style(theme::Button::Custom(Box::new(GhostButton)))
                        .on_press(Message::NudgeCenterFreq(-1.0)),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                quick_tune,
                row![
                    text(format!("RF gain {} dB", self.config.gain)),
                    slider(0.0..=50.0, self.config.gain, Message::GainChanged),
                    text("Sample rate / BW:"),
                    pick_list(
                        self.bandwidth_items.clone(),
                        selected_bandwidth,
                        Message::BandwidthSelected
                    ),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Capture notes:"),
                    text_input("Manual capture from dashboard.", &self.log_notes)
                        .on_input(Message::LogNotesChanged),
                    button(text("CAPTURE SIGNAL"))
                        .padding([8, 18])
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::CaptureSignal),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        column![trace_card, control_card].spacing(16).into()
    }

    fn bluetooth_tab(&self) -> Element<'_, Message> {
        let filtered = filter_bluetooth(&self.bt_devices, &self.bt_filter);

        let mut device_rows = Column::new().spacing(4);
        if filtered.is_empty() {
            device_rows = device_rows.push(
                text(if self.bt_filter.trim().is_empty() {
                    "Scanning for devices...".to_string()
                } else {
                    format!("No devices match \"{}\"", self.bt_filter.trim())
                })
                .style(color_muted()),
            );
        }
        for device in &filtered {
            let selected = self.selected_mac.as_deref() == Some(device.mac.as_str());
            let link = match device.is_connected {
                Some(true) => text("LINKED").size(11).style(color_live()),
                Some(false) => text("UNLINKED").size(11).style(color_muted()),
                None => text("STATUS UNKNOWN").size(11).style(color_warn()),
            };
            let rssi_color = if device.rssi > -60 {
                color_live()
            } else {
                color_warn()
            };
            let label = row![
                text(format!("{:>4}", device.rssi)).style(rssi_color),
                column![
                    row![
                        text(&device.name)
                            .style(if selected { color_accent() } else { color_text() }),
                        link,
                        if selected {
                            text("TRACKING").size(11).style(color_accent())
                        } else {
                            text("")
                        },
                    ]
                    .spacing(8)
                    .align_items(Alignment::Center),
                    text(format!("{} | {} | {}", device.mac, device.cod, device.vendor))
                        .size(12)
                        .style(color_muted()),
                ]
                .spacing(2),
            ]
            .spacing(14)
            .align_items(Alignment::Center);

            device_rows = device_rows.push(
                button(label)
                    .width(Length::Fill)
                    .style(theme::Button::Custom(Box::new(RowButton { selected })))
                    .on_press(Message::DeviceSelected(device.mac.clone())),
            );
        }

        let list_card = card(
            "Discovered Devices",
            column![
                row![
                    text(format!("{} visible", filtered.len())).style(color_muted()),
                    if self.bt_live {
                        text("live backend scan").size(12).style(color_live())
                    } else {
                        text("simulated scan").size(12).style(color_warn())
                    },
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                text_input("Filter by name or MAC address...", &self.bt_filter)
                    .on_input(Message::BtFilterChanged),
                device_rows,
            ],
        );

        let tracked_name = self
            .selected_mac
            .as_deref()
            .and_then(|mac| self.bt_devices.iter().find(|d| d.mac == mac))
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "-".to_string());

        let now_t = self.started_at.elapsed().as_secs_f64();
        let samples: Vec<(f32, f32)> = self
            .rssi_history
            .iter()
            .map(|(t, rssi)| ((now_t - t) as f32, *rssi as f32))
            .collect();

        let graph_card = card(
            "Live Signal Tracker",
            column![
                row![
                    text(format!("Tracking: {tracked_name}")).style(color_text()),
                    text("rolling 60 s window").size(12).style(color_muted()),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                Canvas::new(RssiGraph { samples })
                    .width(Length::Fill)
                    .height(160),
            ],
        );

        let modo_card = self.modo_s_card();

        row![
            column![list_card, graph_card]
                .spacing(16)
                .width(Length::FillPortion(2)),
            column![modo_card].spacing(16).width(Length::FillPortion(1)),
        ]
        .spacing(16)
        .into()
    }

    fn modo_s_card(&self) -> Element<'_, Message> {
        let cycle_pos = self.modo_s.cycle_position().unwrap_or(0.0);

        let state_line = match self.modo_s_state {
            ModoSState::Idle => text("IDLE").size(26).style(color_muted()),
            ModoSState::Active => text("ACTIVE").size(26).style(color_danger()),
            ModoSState::Window => text("WINDOW").size(26).style(color_warn()),
        };

        let detail: Element<'_, Message> = match self.modo_s_state {
            ModoSState::Idle => column![
                text("Exploits AFH (Adaptive Frequency Hopping) to assess streaming resilience.")
                    .size(13)
                    .style(color_muted()),
                text("Requires jumper on GPIO25.").size(11).style(color_muted()),
            ]
            .spacing(4)
            .into(),
            ModoSState::Active => column![
                text("INJECTING HOPPING SEQUENCE").size(13).style(color_danger()),
                text(format!("CYCLE: {:.0}/{:.0}s", cycle_pos, ACTIVE_SECS))
                    .size(13)
                    .style(color_danger()),
                progress_bar(0.0..=ACTIVE_SECS as f32, cycle_pos as f32),
            ]
            .spacing(6)
            .into(),
            ModoSState::Window => column![
                text("SAFETY WINDOW OPEN").size(13).style(color_warn()),
                text(format!("PAUSED FOR: {:.0}s", CYCLE_SECS - cycle_pos))
                    .size(13)
                    .style(color_warn()),
                progress_bar(
                    0.0..=(CYCLE_SECS - ACTIVE_SECS) as f32,
                    (cycle_pos - ACTIVE_SECS).max(0.0) as f32
                ),
            ]
            .spacing(6)
            .into(),
        };

        let toggle = if self.modo_s.is_running() {
            button(text("DEACTIVATE"))
                .padding([12, 20])
                .width(Length::Fill)
                .style(theme::Button::Custom(Box::new(DangerButton)))
                .on_press(Message::ModoSToggle)
        } else {
            button(text("INIT MODO S"))
                .padding([12, 20])
                .width(Length::Fill)
                .style(theme::Button::Custom(Box::new(PrimaryButton)))
                .on_press(Message::ModoSToggle)
        };

        card_accent(
            "Modo S Controller",
            column![
                state_line,
                detail,
                toggle,
                text(
                    "WARNING: for educational and diagnostic use in controlled private \
                     environments only. Do not affect third-party devices. Adhere to local \
                     RF regulations."
                )
                .size(11)
                .style(color_muted()),
            ]
            .spacing(14),
        )
    }

    fn wifi_tab(&self) -> Element<'_, Message> {
        let mut network_rows = Column::new().spacing(4);
        network_rows = network_rows.push(
            row![
                text("CH").size(12).width(40).style(color_muted()),
                text("SSID / BSSID")
                    .size(12)
                    .width(Length::FillPortion(4))
                    .style(color_muted()),
                text("VENDOR")
                    .size(12)
                    .width(Length::FillPortion(2))
                    .style(color_muted()),
                text("SECURITY")
                    .size(12)
                    .width(Length::FillPortion(2))
                    .style(color_muted()),
                text("PWR").size(12).width(60).style(color_muted()),
            ]
            .spacing(8),
        );
        for network in &self.wifi_networks {
            let security_color = if network.security == "OPEN" || network.security == "WEP" {
                color_danger()
            } else {
                color_live()
            };
            network_rows = network_rows.push(
                row![
                    text(network.channel.to_string()).width(40).style(color_accent()),
                    column![
                        text(&network.ssid).style(color_text()),
                        text(&network.bssid).size(11).style(color_muted()),
                    ]
                    .spacing(2)
                    .width(Length::FillPortion(4)),
                    text(&network.vendor)
                        .size(13)
                        .width(Length::FillPortion(2))
                        .style(color_muted()),
                    text(&network.security)
                        .size(13)
                        .width(Length::FillPortion(2))
                        .style(security_color),
                    text(format!("{} dBm", network.rssi)).width(60).style(color_text()),
                ]
                .spacing(8)
                .align_items(Alignment::Center),
            );
        }

        let list_card = card(
            "802.11 Networks",
            column![
                row![
                    text("Band:"),
                    pick_list(
                        WifiBand::ALL.to_vec(),
                        Some(self.wifi_band),
                        Message::BandSelected
                    ),
                    if self.wifi_live {
                        text("live backend scan").size(12).style(color_live())
                    } else {
                        text("simulated scan").size(12).style(color_warn())
                    },
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                network_rows,
            ],
        );

        let congestion = channel_congestion(&self.wifi_networks);
        let mut congestion_col = Column::new().spacing(10);
        for (channel, count) in congestion {
            let ratio = ((count * 20).min(100)) as f32;
            congestion_col = congestion_col.push(
                column![
                    row![
                        text(format!("Channel {channel}")).size(13).style(color_muted()),
                        text(format!("{count} APs")).size(13).style(color_muted()),
                    ]
                    .spacing(10),
                    progress_bar(0.0..=100.0, ratio),
                ]
                .spacing(4),
            );
        }

        let congestion_card = card("2.4 GHz Congestion", congestion_col);

        let interface_card = card(
            "Interface Info",
            column![
                text("IFACE: wlan1mon").size(13).style(color_text()),
                text("CHIPSET: RTL8812AU").size(13).style(color_text()),
                text("MODE: MONITOR").size(13).style(color_accent()),
                text("TX POWER: 30 dBm").size(13).style(color_text()),
            ]
            .spacing(6),
        );

        let notice = text(
            "Hardware notice: WiFi scanning relies on the lab backend (Alfa AC-M). \
             When the backend is offline this table shows simulated demonstration data.",
        )
        .size(12)
        .style(color_muted());

        column![
            notice,
            row![
                column![list_card].spacing(16).width(Length::FillPortion(2)),
                column![congestion_card, interface_card]
                    .spacing(16)
                    .width(Length::FillPortion(1)),
            ]
            .spacing(16),
        ]
        .spacing(12)
        .into()
    }

    fn attacks_tab(&self) -> Element<'_, Message> {
        let mut tools_col = Column::new().spacing(4);
        if self.pentest.tools.is_empty() {
            tools_col = tools_col.push(
                text("No tool inventory (backend offline?)").size(13).style(color_muted()),
            );
        }
        for (tool, available) in &self.pentest.tools {
            tools_col = tools_col.push(
                row![
                    text(tool).width(Length::FillPortion(2)).style(color_text()),
                    if *available {
                        text("installed").size(12).style(color_live())
                    } else {
                        text("missing").size(12).style(color_danger())
                    },
                ]
                .spacing(10),
            );
        }

        let mut iface_col = Column::new().spacing(4);
        for iface in &self.pentest.interfaces {
            iface_col = iface_col.push(
                text(format!(
                    "{} [{}] {} {}",
                    iface.name,
                    iface.mac,
                    if iface.monitor_mode { "monitor" } else { "managed" },
                    iface.status
                ))
                .size(12)
                .style(color_muted()),
            );
        }

        let interface_names: Vec<String> =
            self.pentest.interfaces.iter().map(|i| i.name.clone()).collect();

        let tools_card = card(
            "Toolchain & Interfaces",
            column![
                tools_col,
                iface_col,
                row![
                    text("Interface:"),
                    pick_list(
                        interface_names,
                        self.selected_interface.clone(),
                        Message::InterfaceSelected
                    ),
                    button(text("Refresh"))
                        .style(theme::Button::Custom(Box::new(GhostButton)))
                        .on_press(Message::RefreshTools),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    button(text("Enable monitor mode"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::SetMonitorMode(true)),
                    button(text("Disable"))
                        .style(theme::Button::Custom(Box::new(GhostButton)))
                        .on_press(Message::SetMonitorMode(false)),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let target_card = card(
            "Target",
            column![
                row![
                    text("BSSID:"),
                    text_input("AA:BB:CC:DD:EE:01", &self.target_bssid)
                        .on_input(Message::TargetBssidChanged),
                    text("Channel:"),
                    text_input("6", &self.target_channel).on_input(Message::TargetChannelChanged),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Client MAC (optional):"),
                    text_input("", &self.client_mac).on_input(Message::ClientMacChanged),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Deauth frames:"),
                    text_input("10", &self.deauth_count).on_input(Message::DeauthCountChanged),
                    text("Handshake window (s):"),
                    text_input("60", &self.handshake_duration)
                        .on_input(Message::HandshakeDurationChanged),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    button(text("Deauth"))
                        .style(theme::Button::Custom(Box::new(DangerButton)))
                        .on_press(Message::LaunchDeauth),
                    button(text("Capture handshake"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::LaunchHandshake),
                    button(text("WPS attack"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::LaunchWps),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let mut sessions_col = Column::new().spacing(4);
        if self.active_attacks.is_empty() {
            sessions_col =
                sessions_col.push(text("No active sessions").size(13).style(color_muted()));
        }
        for attack in &self.active_attacks {
            sessions_col = sessions_col.push(
                row![
                    text(format!("{} ({})", attack.label, attack.session_id))
                        .size(13)
                        .style(color_text()),
                    button(text("Stop").size(12))
                        .style(theme::Button::Custom(Box::new(DangerButton)))
                        .on_press(Message::StopAttackSession(attack.session_id.clone())),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            );
        }
        let sessions_card = card("Active Sessions", sessions_col);

        let console_card = card("Attack Console", console_view(&self.attack_console, 220));

        column![
            text(
                "Authorized lab use only: these actions drive the classroom backend against \
                 training access points.",
            )
            .size(12)
            .style(color_warn()),
            row![
                column![tools_card, sessions_card]
                    .spacing(16)
                    .width(Length::FillPortion(1)),
                column![target_card, console_card]
                    .spacing(16)
                    .width(Length::FillPortion(2)),
            ]
            .spacing(16),
        ]
        .spacing(12)
        .into()
    }

    fn evil_twin_tab(&self) -> Element<'_, Message> {
        let form_card = card(
            "Rogue Access Point",
            column![
                row![
                    text("SSID:"),
                    text_input("Campus_Guest", &self.ap_ssid).on_input(Message::ApSsidChanged),
                    text("Channel:"),
                    text_input("6", &self.ap_channel).on_input(Message::ApChannelChanged),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Portal:"),
                    pick_list(
                        PortalType::ALL.to_vec(),
                        Some(self.portal_type),
                        Message::PortalTypeSelected
                    ),
                    text("Target MAC (optional):"),
                    text_input("", &self.ap_target_mac).on_input(Message::ApTargetMacChanged),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    button(text("Create Evil Twin"))
                        .style(theme::Button::Custom(Box::new(DangerButton)))
                        .on_press(Message::CreateEvilTwin),
                    button(text("Create Captive Portal"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::CreateCaptivePortal),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let mut aps_col = Column::new().spacing(4);
        if self.active_aps.is_empty() {
            aps_col = aps_col.push(text("No active access points").size(13).style(color_muted()));
        }
        for ap in &self.active_aps {
            let selected = self.selected_ap.as_deref() == Some(ap.ap_id.as_str());
            aps_col = aps_col.push(
                row![
                    button(text(format!("{} ({}) ch {}", ap.ssid, ap.kind, ap.channel)).size(13))
                        .style(theme::Button::Custom(Box::new(RowButton { selected })))
                        .on_press(Message::ApSelected(ap.ap_id.clone())),
                    button(text("Stop").size(12))
                        .style(theme::Button::Custom(Box::new(DangerButton)))
                        .on_press(Message::StopAp(ap.ap_id.clone())),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            );
        }
        let aps_card = card("Active Access Points", aps_col);

        let mut creds_col = Column::new().spacing(4);
        if self.credentials.is_empty() {
            creds_col = creds_col.push(
                text("No captured credentials yet (polled every 3 s for the selected portal)")
                    .size(13)
                    .style(color_muted()),
            );
        }
        for cred in &self.credentials {
            creds_col = creds_col.push(text(cred).size(13).style(color_warn()));
        }
        let creds_card = card("Captured Credentials", creds_col);

        column![
            text(
                "Authorized lab use only: rogue APs are broadcast by the classroom backend \
                 inside the shielded demo enclosure.",
            )
            .size(12)
            .style(color_warn()),
            row![
                column![form_card].spacing(16).width(Length::FillPortion(2)),
                column![aps_card, creds_card]
                    .spacing(16)
                    .width(Length::FillPortion(1)),
            ]
            .spacing(16),
        ]
        .spacing(12)
        .into()
    }

    fn terminal_tab(&self) -> Element<'_, Message> {
        let quick = |label: &str, command: &str| {
            button(
                column![
                    text(label).size(13).style(color_text()),
                    text(command).size(11).style(color_muted()),
                ]
                .spacing(2),
            )
            .style(theme::Button::Custom(Box::new(GhostButton)))
            .on_press(Message::QuickCommand(command.to_string()))
        };

        let quick_card = card(
            "Quick Commands",
            column![
                row![
                    quick("List WiFi interfaces", "iwconfig"),
                    quick("Network interfaces", "ip addr show"),
                    quick("Check monitor mode", "iwconfig | grep Mode"),
                ]
                .spacing(10),
                row![
                    quick("List processes", "ps aux | grep -E \"airodump|wifite|reaver\""),
                    quick("Disk usage", "df -h"),
                    quick("System info", "uname -a"),
                ]
                .spacing(10),
            ],
        );

        let output: Element<'_, Message> = if self.term_lines.is_empty() {
            column![
                text("Welcome to the PocketGone interactive terminal").style(color_muted()),
                text("Type a command below or use the quick commands above.")
                    .size(12)
                    .style(color_muted()),
            ]
            .spacing(4)
            .into()
        } else {
            console_view(&self.term_lines, 360).into()
        };

        let input_row = row![
            text("root@pocketgone:~$").style(color_accent()),
            text_input("Enter command...", &self.term_input)
                .on_input(Message::TermInputChanged)
                .on_submit(Message::RunCommand),
            if self.term_busy {
                button(text("Executing...")).style(theme::Button::Custom(Box::new(GhostButton)))
            } else {
                button(text("Execute"))
                    .style(theme::Button::Custom(Box::new(PrimaryButton)))
                    .on_press(Message::RunCommand)
            },
            button(text("Clear"))
                .style(theme::Button::Custom(Box::new(GhostButton)))
                .on_press(Message::ClearTerminal),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let terminal_card = card_accent(
            "Root Terminal",
            column![output, input_row].spacing(12),
        );

        column![
            quick_card,
            terminal_card,
            text(
                "Commands execute with root privileges on the lab backend. Be careful with \
                 anything that modifies system configuration.",
            )
            .size(12)
            .style(color_muted()),
        ]
        .spacing(16)
        .into()
    }

    fn logs_tab(&self) -> Element<'_, Message> {
        let mut rows = Column::new().spacing(4);
        rows = rows.push(
            row![
                text("TIMESTAMP")
                    .size(12)
                    .width(Length::FillPortion(2))
                    .style(color_muted()),
                text("FREQUENCY")
                    .size(12)
                    .width(Length::FillPortion(2))
                    .style(color_muted()),
                text("BW").size(12).width(70).style(color_muted()),
                text("PEAK").size(12).width(80).style(color_muted()),
                text("NOTES")
                    .size(12)
                    .width(Length::FillPortion(3))
                    .style(color_muted()),
                text("").width(70),
            ]
            .spacing(8),
        );
        if self.logs.is_empty() {
            rows = rows.push(
                text("No captures yet. Use CAPTURE SIGNAL on the spectrum tab.")
                    .style(color_muted()),
            );
        }
        for log in &self.logs {
            rows = rows.push(
                row![
                    text(log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
                        .size(13)
                        .width(Length::FillPortion(2))
                        .style(color_text()),
                    text(format_frequency(log.frequency))
                        .size(13)
                        .width(Length::FillPortion(2))
                        .style(color_accent()),
                    text(format!("{} MHz", log.bandwidth)).size(13).width(70).style(color_muted()),
                    text(format!("{:.1} dB", log.peak_db)).size(13).width(80).style(color_text()),
                    text(&log.notes)
                        .size(13)
                        .width(Length::FillPortion(3))
                        .style(color_muted()),
                    button(text("Delete").size(12))
                        .style(theme::Button::Custom(Box::new(DangerButton)))
                        .on_press(Message::DeleteLog(log.id)),
                ]
                .spacing(8)
                .align_items(Alignment::Center),
            );
        }

        let logs_card = card(
            "Signal Logs",
            column![
                row![
                    text(format!("{} captures this session", self.logs.len())).style(color_muted()),
                    button(text("Export JSON"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::ExportLogs),
                ]
                .spacing(12)
                .align_items(Alignment::Center),
                rows,
            ],
        );

        column![logs_card].spacing(16).into()
    }

    fn system_tab(&self, session: &UserSession) -> Element<'_, Message> {
        let backend_card = card(
            "Lab Backend",
            column![
                row![
                    text("Base URL:"),
                    text_input(DEFAULT_BASE_URL, &self.backend_url_input)
                        .on_input(Message::BackendUrlChanged)
                        .on_submit(Message::ApplyBackendUrl),
                    button(text("Apply"))
                        .style(theme::Button::Custom(Box::new(PrimaryButton)))
                        .on_press(Message::ApplyBackendUrl),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Status:"),
                    if self.backend_online {
                        text("connected").style(color_live())
                    } else {
                        text("offline - simulated data in use").style(color_warn())
                    },
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let session_card = card(
            "Session",
            column![
                text(format!("User: {}", session.username)).style(color_text()),
                text(format!("Role: {}", session.role.label())).style(color_muted()),
                button(text("Sign out"))
                    .style(theme::Button::Custom(Box::new(DangerButton)))
                    .on_press(Message::Logout),
            ]
            .spacing(8),
        );

        row![
            column![backend_card].spacing(16).width(Length::FillPortion(2)),
            column![session_card].spacing(16).width(Length::FillPortion(1)),
        ]
        .spacing(16)
        .into()
    }
}

fn console_view(lines: &[ConsoleLine], height: u16) -> Column<'_, Message> {
    let mut output = Column::new().spacing(2);
    let start = lines.len().saturating_sub(200);
    for line in &lines[start..] {
        output = output.push(
            row![
                text(&line.stamp).size(11).style(color_muted()),
                text(&line.body).size(13).style(line.color()),
            ]
            .spacing(8),
        );
    }
    column![scrollable(output).height(height)]
}

fn card<'a>(title: &str, content: Column<'a, Message>) -> Element<'a, Message> {
    container(
        column![
            container(text(title).size(15).style(color_text()))
                .padding([6, 10])
                .width(Length::Fill)
                .style(theme::Container::from(header_style)),
            content.spacing(12),
        ]
        .spacing(12),
    )
    .padding(14)
    .width(Length::Fill)
    .style(theme::Container::from(card_style))
    .into()
}

fn card_accent<'a>(title: &str, content: Column<'a, Message>) -> Element<'a, Message> {
    container(
        column![
            container(text(title).size(15).style(color_text()))
                .padding([6, 10])
                .width(Length::Fill)
                .style(theme::Container::from(header_style)),
            content.spacing(12),
        ]
        .spacing(12),
    )
    .padding(14)
    .width(Length::Fill)
    .style(theme::Container::from(card_accent_style))
    .into()
}

fn header_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(color_surface_alt())),
        text_color: Some(color_text()),
        border_radius: 10.0.into(),
        border_width: 1.0,
        border_color: color_border(),
    }
}

fn card_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(color_surface())),
        text_color: Some(color_text()),
        border_radius: 14.0.into(),
        border_width: 1.0,
        border_color: color_border(),
    }
}

fn card_accent_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(color_surface())),
        text_color: Some(color_text()),
        border_radius: 14.0.into(),
        border_width: 2.0,
        border_color: color_accent(),
    }
}

fn hero_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(color_surface())),
        text_color: Some(color_text()),
        border_radius: 16.0.into(),
        border_width: 1.0,
        border_color: color_accent(),
    }
}

fn warning_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(Color::from_rgba8(239, 68, 68, 0.15))),
        text_color: Some(color_danger()),
        border_radius: 8.0.into(),
        border_width: 1.0,
        border_color: color_danger(),
    }
}

fn body_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(color_bg())),
        text_color: Some(color_text()),
        ..Default::default()
    }
}

fn pill<'a>(label: &str, bg: Color, fg: Color) -> Element<'a, Message> {
    container(text(label).size(12))
        .padding([4, 10])
        .style(theme::Container::Custom(Box::new(PillStyle { bg, fg })))
        .into()
}

struct PrimaryButton;

impl button_widget::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        button_widget::Appearance {
            background: Some(Background::Color(color_accent())),
            text_color: Color::from_rgb8(6, 16, 20),
            border_radius: 10.0.into(),
            border_width: 1.0,
            border_color: color_accent(),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(74, 222, 239)));
        active
    }

    fn pressed(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(22, 189, 214)));
        active
    }
}

struct GhostButton;

impl button_widget::StyleSheet for GhostButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        button_widget::Appearance {
            background: Some(Background::Color(color_surface_alt())),
            text_color: color_text(),
            border_radius: 10.0.into(),
            border_width: 1.0,
            border_color: color_border(),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(44, 58, 80)));
        active
    }

    fn pressed(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(36, 48, 66)));
        active
    }
}

struct DangerButton;

impl button_widget::StyleSheet for DangerButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        button_widget::Appearance {
            background: Some(Background::Color(color_danger())),
            text_color: Color::WHITE,
            border_radius: 10.0.into(),
            border_width: 1.0,
            border_color: color_danger(),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(248, 113, 113)));
        active
    }

    fn pressed(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        active.background = Some(Background::Color(Color::from_rgb8(220, 38, 38)));
        active
    }
}

struct TabButton {
    selected: bool,
}

impl button_widget::StyleSheet for TabButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        let (bg, text_color, border_color) = if self.selected {
            (color_accent(), Color::from_rgb8(6, 16, 20), color_accent())
        } else {
            (color_surface_alt(), color_text(), color_border())
        };
        button_widget::Appearance {
            background: Some(Background::Color(bg)),
            text_color,
            border_radius: 10.0.into(),
            border_width: 1.0,
            border_color,
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        if !self.selected {
            active.background = Some(Background::Color(Color::from_rgb8(44, 58, 80)));
        }
        active
    }

    fn pressed(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        if !self.selected {
            active.background = Some(Background::Color(Color::from_rgb8(36, 48, 66)));
        }
        active
    }
}

struct RowButton {
    selected: bool,
}

impl button_widget::StyleSheet for RowButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        let (bg, border_color) = if self.selected {
            (Color::from_rgb8(23, 37, 84), color_blue())
        } else {
            (color_surface(), color_border())
        };
        button_widget::Appearance {
            background: Some(Background::Color(bg)),
            text_color: color_text(),
            border_radius: 8.0.into(),
            border_width: 1.0,
            border_color,
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button_widget::Appearance {
        let mut active = self.active(style);
        if !self.selected {
            active.background = Some(Background::Color(color_surface_alt()));
        }
        active
    }
}

struct PillStyle {
    bg: Color,
    fg: Color,
}

impl container_widget::StyleSheet for PillStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container_widget::Appearance {
        container_widget::Appearance {
            background: Some(Background::Color(self.bg)),
            text_color: Some(self.fg),
            border_radius: 999.0.into(),
            border_width: 1.0,
            border_color: self.bg,
        }
    }
}

struct SpectrumTrace {
    points: Vec<SpectrumPoint>,
    span: (f64, f64),
}

impl<Message> Program<Message, Renderer> for SpectrumTrace {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let bg = Path::rectangle(iced::Point::ORIGIN, frame.size());
        frame.fill(&bg, Color::from_rgb8(8, 12, 22));

        let width = frame.size().width;
        let height = frame.size().height;

        let grid_color = Color::from_rgb8(30, 41, 59);
        for i in 0..=5 {
            let y = height * (i as f32 / 5.0);
            let line = Path::line(iced::Point::new(0.0, y), iced::Point::new(width, y));
            frame.stroke(&line, Stroke::default().with_width(1.0).with_color(grid_color));
        }

        // dB scale: −100 at the bottom, 0 at the top.
        for (i, db) in [-100.0f32, -75.0, -50.0, -25.0, 0.0].iter().enumerate() {
            let y = height - (height * (i as f32 / 4.0));
            frame.fill_text(Text {
                content: format!("{:>4} dB", db),
                position: iced::Point::new(6.0, (y - 12.0).max(2.0)),
                color: Color::from_rgb8(100, 116, 139),
                size: 11.0,
                ..Text::default()
            });
        }

        if self.points.len() >= 2 {
            let step = width / (self.points.len() as f32 - 1.0);
            let path = Path::new(|builder| {
                for (i, point) in self.points.iter().enumerate() {
                    let unit = ((point.db.clamp(-100.0, 0.0) + 100.0) / 100.0) as f32;
                    let x = i as f32 * step;
                    let y = height - unit * height;
                    if i == 0 {
                        builder.move_to(iced::Point::new(x, y));
                    } else {
                        builder.line_to(iced::Point::new(x, y));
                    }
                }
            });
            frame.stroke(
                &path,
                Stroke::default().with_width(1.8).with_color(color_accent()),
            );
        } else {
            frame.fill_text(Text {
                content: "Waiting for data...".to_string(),
                position: iced::Point::new(width / 2.0 - 50.0, height / 2.0),
                color: Color::from_rgb8(71, 85, 105),
                size: 13.0,
                ..Text::default()
            });
        }

        let (start, end) = self.span;
        let markers = [start, (start + end) / 2.0, end];
        for (i, freq) in markers.iter().enumerate() {
            let x = width * (i as f32 / 2.0);
            let line = Path::line(iced::Point::new(x, 0.0), iced::Point::new(x, height));
            frame.stroke(
                &line,
                Stroke::default().with_width(1.0).with_color(Color::from_rgb8(30, 41, 59)),
            );
            let label_x = if i == 2 { x - 72.0 } else { x + 4.0 };
            frame.fill_text(Text {
                content: format_frequency(*freq),
                position: iced::Point::new(label_x, height - 14.0),
                color: Color::from_rgb8(100, 116, 139),
                size: 11.0,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

struct RssiGraph {
    /// (age in seconds, rssi in dBm), newest last.
    samples: Vec<(f32, f32)>,
}

impl<Message> Program<Message, Renderer> for RssiGraph {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let bg = Path::rectangle(iced::Point::ORIGIN, frame.size());
        frame.fill(&bg, Color::from_rgb8(8, 12, 22));

        let width = frame.size().width;
        let height = frame.size().height;

        let grid_color = Color::from_rgb8(30, 41, 59);
        for i in 0..=4 {
            let y = height * (i as f32 / 4.0);
            let line = Path::line(iced::Point::new(0.0, y), iced::Point::new(width, y));
            frame.stroke(&line, Stroke::default().with_width(1.0).with_color(grid_color));
        }
        for (i, label) in ["-20", "-40", "-60", "-80", "-100"].iter().enumerate() {
            let y = height * (i as f32 / 4.0);
            frame.fill_text(Text {
                content: format!("{label} dBm"),
                position: iced::Point::new(4.0, (y + 2.0).min(height - 12.0)),
                color: Color::from_rgb8(100, 116, 139),
                size: 10.0,
                ..Text::default()
            });
        }

        // RSSI scale −100..−20 over the rolling window, newest at the right
        // edge.
        let to_point = |age: f32, rssi: f32| {
            let x = width * (1.0 - (age / RSSI_HISTORY_SECS as f32).clamp(0.0, 1.0));
            let unit = ((rssi.clamp(-100.0, -20.0) + 100.0) / 80.0).clamp(0.0, 1.0);
            iced::Point::new(x, height - unit * height)
        };

        if self.samples.len() >= 2 {
            let path = Path::new(|builder| {
                for (i, (age, rssi)) in self.samples.iter().enumerate() {
                    let p = to_point(*age, *rssi);
                    if i == 0 {
                        builder.move_to(p);
                    } else {
                        builder.line_to(p);
                    }
                }
            });
            frame.stroke(&path, Stroke::default().with_width(2.0).with_color(color_blue()));

            if let Some((age, rssi)) = self.samples.last() {
                let p = to_point(*age, *rssi);
                let dot = Path::circle(p, 3.5);
                frame.fill(&dot, color_blue());
            }
        } else {
            frame.fill_text(Text {
                content: "Waiting for data...".to_string(),
                position: iced::Point::new(width / 2.0 - 50.0, height / 2.0),
                color: Color::from_rgb8(71, 85, 105),
                size: 13.0,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
