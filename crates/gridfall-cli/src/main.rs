use clap::Parser;
use gridfall_engine::BagSeed;

use crate::app::App;

mod app;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frames per second for the game loop
    #[clap(long, default_value_t = 100)]
    fps: u64,
    /// 32-digit hex seed for a reproducible piece sequence
    #[clap(long)]
    seed: Option<BagSeed>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut terminal = ratatui::init();
    let result = App::new(args.fps, args.seed).run(&mut terminal);
    ratatui::restore();
    result
}
