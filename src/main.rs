use arcgauge::chart::{self, ChartState, ClickTarget, InteractionMode, Segment, ZoomLevel};
use arcgauge::config::{self, Config};
use arcgauge::gui::app::AppModel;
use arcgauge::sys::runtime;
use clap::{Parser, Subcommand};
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "arcgauge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the chart markup for the configured breakdown.
    Svg {
        /// Interaction mode (segment-select or zoom-toggle); defaults to the config value
        #[arg(short, long)]
        mode: Option<InteractionMode>,

        /// Size token (big or small); defaults to the config value
        #[arg(short, long)]
        zoom: Option<ZoomLevel>,

        /// Segment to mark active, as if it had been clicked
        #[arg(short, long)]
        active: Option<Segment>,
    },
    /// Write the default config file if missing and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Svg { mode, zoom, active }) => print_svg(mode, zoom, active),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            run_gui();
            Ok(())
        }
    }
}

fn print_svg(
    mode: Option<InteractionMode>,
    zoom: Option<ZoomLevel>,
    active: Option<Segment>,
) -> anyhow::Result<()> {
    let state = svg_state(&config::load_or_default(), mode, zoom, active)?;
    println!("{}", chart::render(&state));
    Ok(())
}

fn svg_state(
    config: &Config,
    mode: Option<InteractionMode>,
    zoom: Option<ZoomLevel>,
    active: Option<Segment>,
) -> anyhow::Result<ChartState> {
    let mode = mode.unwrap_or(config.mode);

    if active.is_some() && mode != InteractionMode::SegmentSelect {
        anyhow::bail!("--active requires the segment-select mode");
    }

    let mut state = ChartState::new(config.breakdown, mode, zoom.unwrap_or(config.zoom));
    if let Some(segment) = active {
        state.click(ClickTarget::Arc(segment));
    }
    Ok(state)
}

fn run_gui() {
    let config = config::load_or_default();
    let state = ChartState::new(config.breakdown, config.mode, config.zoom);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.arcgauge.chart").with_args(Vec::new());

    app.run::<AppModel>((state, config.size, rx));
}
