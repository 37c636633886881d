mod app;

use app::App;
use iced::Application;

fn main() -> iced::Result {
    pocketgone::logging::init();
    println!("PocketGone EDU Lab");
    println!("------------------");
    println!("RF spectrum, Bluetooth and WiFi views run against the lab backend when it");
    println!("is reachable and fall back to simulated data otherwise.");
    println!("Access codes: admin / student. CLI: cargo run --bin pocketgone-cli -- --help");
    println!();
    App::run(iced::Settings::default())
}
