use hexagon_ngin::{Settings, app::init_logging};

fn main() {
    init_logging();
    if let Err(e) = hexagon_ngin::run(Settings::from_env()) {
        log::error!("Failed to start: {:#}", e);
        std::process::exit(-1);
    }
}
