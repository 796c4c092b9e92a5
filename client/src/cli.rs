use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use liblife::{grid::Grid, pos::Coordinate, seed::SeedSet, GridError};

use crate::{patterns, State};

const HELP: &str = "\
add <row> <col>              make a cell alive (rows and columns start at 0)
remove <row> <col>           kill a cell
preset <name> [<row> <col>]  stamp a pattern, centered unless a corner is given
random <count>               replace the grid with randomly placed live cells
clear                        kill every cell
reset                        go back to generation 0 with the placed cells
show                         draw the grid
step [<times>]               advance and draw
run                          draw, wait for Enter, advance, repeat (q stops)
exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_cli<R, W>(state: &mut State, input: &mut R, output: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, ">> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let args = line.split_whitespace();
        if args.clone().next().is_none() {
            continue;
        }

        match handle_cmd(state, args, input, output) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => {
                log::debug!("command {:?} failed: {e:?}", line.trim());
                writeln!(output, "! {e:#}")?;
            }
        }
    }
}

fn handle_cmd<'a, I, R, W>(
    state: &mut State,
    mut args: I,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str> + Clone,
    R: BufRead,
    W: Write,
{
    match args.next().context("No command")? {
        "add" => {
            let pos = parse_coordinate(&mut args)?;

            state.game.grid.set_alive(pos)?;
            state.seeds.insert(pos);
        }

        "remove" => {
            let pos = parse_coordinate(&mut args)?;

            state.game.grid.set_dead(pos)?;
            state.seeds.remove(pos);
        }

        "preset" => {
            let name = args.next().context("missing pattern name")?;
            let pattern = patterns::find(name)
                .with_context(|| format!("Unknown pattern {name:?}"))?;

            let side = state.game.grid.side();
            let anchor = if args.clone().next().is_some() {
                parse_coordinate(&mut args)?
            } else {
                Coordinate::new(
                    side.saturating_sub(pattern.height()) / 2,
                    side.saturating_sub(pattern.width()) / 2,
                )
            };

            let seeds = pattern.placed_at(anchor).ok_or(GridError::OutOfBounds {
                row: anchor.row,
                col: anchor.col,
                side,
            })?;
            state.game.grid.seed(&seeds)?;
            state.seeds.extend(seeds.iter());
        }

        "random" => {
            let alive_count = args
                .next()
                .context("missing alive count")?
                .parse::<usize>()?;

            let grid = Grid::new_random(state.game.grid.side(), alive_count)?;
            state.seeds = alive_cells(&grid);
            state.game.reset(grid);
        }

        "clear" => {
            state.seeds.clear();
            state.game.reset(Grid::new(state.game.grid.side())?);
        }

        "reset" => {
            let mut grid = Grid::new(state.game.grid.side())?;
            grid.seed(&state.seeds)?;
            state.game.reset(grid);
        }

        "show" => {
            write!(output, "{}", state.renderer.draw(&state.game))?;
            return Ok(Flow::Continue);
        }

        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            state.game.tick_n(times);
            log::debug!("advanced to generation {}", state.game.generation);

            write!(output, "{}", state.renderer.draw(&state.game))?;
            return Ok(Flow::Continue);
        }

        "run" => {
            run_generations(state, input, output)?;
            return Ok(Flow::Continue);
        }

        "help" => {
            writeln!(output, "{HELP}")?;
            return Ok(Flow::Continue);
        }

        "exit" | "quit" => {
            return Ok(Flow::Exit);
        }

        _ => bail!("Unknown command, try help"),
    }

    writeln!(output, "OK")?;
    Ok(Flow::Continue)
}

/// Draws a generation, waits for a line of input, advances, and repeats until `q` or end of input.
fn run_generations<R, W>(state: &mut State, input: &mut R, output: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", state.renderer.draw(&state.game))?;
        write!(output, "[Enter] next generation, q to stop: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim() == "q" {
            writeln!(output)?;
            return Ok(());
        }

        state.game.tick();
        log::debug!("advanced to generation {}", state.game.generation);
    }
}

fn parse_coordinate<'a, I>(args: &mut I) -> anyhow::Result<Coordinate>
where
    I: Iterator<Item = &'a str>,
{
    let row = args
        .next()
        .context("missing row")?
        .parse::<usize>()
        .context("row must be a non-negative number")?;

    let col = args
        .next()
        .context("missing column")?
        .parse::<usize>()
        .context("column must be a non-negative number")?;

    Ok(Coordinate::new(row, col))
}

fn alive_cells(grid: &Grid) -> SeedSet {
    grid.enumerate_cells()
        .filter(|(_, cell)| cell.is_alive())
        .map(|(pos, _)| pos)
        .collect()
}
