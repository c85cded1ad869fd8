mod infra;
mod runtime;
mod ui;

fn main() {
    if let Err(err) = runtime::app::run_from_args() {
        eprintln!("turbine-panel: {err}");
        std::process::exit(1);
    }
}
