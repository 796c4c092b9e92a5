use std::{
    env,
    io::{self, BufRead, Write},
};

use anyhow::{bail, Context};
use config::Config;
use liblife::{grid::Grid, rule::Rule, seed::SeedSet, Game};
use renderer::TextRenderer;

mod cli;
mod config;
mod patterns;
mod renderer;

pub struct State {
    game: Game,
    /// Cells placed by hand, kept so `reset` can rebuild generation 0.
    seeds: SeedSet,
    renderer: TextRenderer,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let config = match args.next().as_deref() {
        Some("--dump-config") => {
            println!("{}", Config::default().to_json()?);
            return Ok(());
        }
        Some(config_path) => {
            log::debug!("loading config from {config_path}");
            Config::load(config_path)?
        }
        None => Config::default(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    writeln!(output, "Welcome, to end the program at any point, type exit or press Ctrl+C")?;

    let mut grid = match config.side {
        Some(side) => Grid::new(side)?,
        None => ask_grid(&mut input, &mut output)?,
    };

    let seeds: SeedSet = config.seed.iter().copied().collect();
    grid.seed(&seeds).context("Config seed doesn't fit the grid")?;
    log::info!(
        "created {0}x{0} grid with {1} live cells",
        grid.side(),
        seeds.len()
    );

    let mut state = State {
        game: Game::new(grid, Rule::conway()),
        seeds,
        renderer: TextRenderer::new(&config),
    };

    writeln!(output, "Type help for the list of commands")?;
    cli::run_cli(&mut state, &mut input, &mut output)
}

fn ask_grid<R, W>(input: &mut R, output: &mut W) -> anyhow::Result<Grid>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "The map is a square, enter the desired size of the side: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No grid size given");
        }

        let grid = line
            .trim()
            .parse::<usize>()
            .context("not a number")
            .and_then(|side| Ok(Grid::new(side)?));

        match grid {
            Ok(grid) => return Ok(grid),
            Err(e) => writeln!(output, "! {e:#}")?,
        }
    }
}
