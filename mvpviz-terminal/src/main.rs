/// MVPviz Terminal - model/view/projection pipeline visualizer
///
/// Top pane: top-down view of the cube proxy and the camera frustum.
/// Bottom pane: the cube after the full transform pipeline.
/// Controls:
///   - W/S: Move the cube away from / toward the camera
///   - A/D: Move the cube left / right
///   - Q/E: Turn the cube
///   - ESC / Ctrl-C: Quit
use clap::{Parser, ValueEnum};
use log::info;
use mvpviz_core::{CommandRecorder, FrameHandler, HeldKeys, Preset, Visualizer, VisualizerConfig};
use mvpviz_terminal::{TerminalApp, TerminalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Cube stays at least one unit in front of the camera
    Standard,
    /// Cube may move past the camera
    CloseUp,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Standard => Preset::Standard,
            PresetArg::CloseUp => Preset::CloseUp,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mvpviz-terminal", version, about = "Model/view/projection pipeline visualizer")]
struct Args {
    /// Translation limits to use
    #[arg(long, value_enum, default_value_t = PresetArg::Standard)]
    preset: PresetArg,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Render one frame headless and print the diagnostics panels
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), TerminalError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = VisualizerConfig::from_preset(args.preset.into());

    if args.dump {
        let mut visualizer = Visualizer::new(config)?;
        let mut recorder = CommandRecorder::new();
        visualizer.on_frame_update(0.0, &HeldKeys::none(), &mut recorder);
        info!("dumped frame with {} draw calls", recorder.commands().len());
        println!("{}", visualizer.diagnostics());
        return Ok(());
    }

    let mut app = TerminalApp::new(config, args.fps)?;
    app.run()?;

    println!(
        "MVPviz stopped after {} frames",
        app.visualizer().frames()
    );
    Ok(())
}
