use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod host;
mod utils;

/// Options read from the page URL hash, e.g. `#--seed=42&-vv`.
#[derive(Parser, Debug)]
#[command(version, about = "Memento pairs game", long_about = None)]
struct Args {
    /// Console log level, raised with each -v
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Deal every deck from this shuffle seed instead of Math.random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = Args::try_parse_from(location_hash.split(['#', '&']))
        .expect("Could not parse options from the URL hash");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    match args.seed {
        Some(seed) => log::info!("Dealing with fixed shuffle seed {}", seed),
        None => log::debug!("Dealing with a random shuffle seed"),
    }
    let props = game::GameProps { seed: args.seed };
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
