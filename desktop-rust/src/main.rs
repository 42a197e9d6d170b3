mod app;
mod io;
mod model;

use app::DesktopApp;

fn main() -> eframe::Result<()> {
    let config = match io::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}, using defaults");
            Default::default()
        }
    };
    if let Err(err) = io::start_logging(&config) {
        eprintln!("{err:#}");
    }

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Building Check",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(config))),
    )
}
