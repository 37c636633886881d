pub mod api;
pub mod logging;
pub mod modo_s;
pub mod scan;
pub mod session;
pub mod signal_log;
pub mod spectrum;
