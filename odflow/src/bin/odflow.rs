use clap::Parser;
use odflow::app::OdFlowApp;

fn main() {
    env_logger::init();
    log::info!("odflow started at {}", chrono::Local::now().to_rfc3339());
    let args = OdFlowApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
