use colored::Colorize;
use liblife::{grid::CellState, Game};

use crate::config::Config;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct TextRenderer {
    pub alive_glyph: char,
    pub dead_glyph: char,
    pub clear_screen: bool,
    pub color: bool,
}

impl TextRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            alive_glyph: config.alive_glyph,
            dead_glyph: config.dead_glyph,
            clear_screen: config.clear_screen,
            color: config.color,
        }
    }

    /// One line per row, every cell drawn as its glyph padded by a space on each side.
    pub fn draw_grid(&self, game: &Game) -> String {
        let mut out = String::new();

        if self.clear_screen {
            out.push_str(CLEAR_SCREEN);
        }

        for row in game.grid.rows() {
            for cell in row {
                let glyph = match cell {
                    CellState::Alive => self.alive_glyph,
                    CellState::Dead => self.dead_glyph,
                };
                let glyph = format!(" {glyph} ");

                if self.color && cell.is_alive() {
                    out.push_str(&glyph.as_str().bright_green().to_string());
                } else {
                    out.push_str(&glyph);
                }
            }
            out.push('\n');
        }

        out
    }

    pub fn draw(&self, game: &Game) -> String {
        format!(
            "{}generation {} | {} alive\n",
            self.draw_grid(game),
            game.generation,
            game.grid.alive_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use liblife::{grid::Grid, rule::Rule};

    use super::*;

    fn plain_renderer() -> TextRenderer {
        TextRenderer::new(&Config::default())
    }

    #[test]
    fn draws_rows_with_glyphs() {
        let grid = Grid::from_rows(&[[true, false], [false, true]]).unwrap();
        let game = Game::new(grid, Rule::default());

        assert_eq!(plain_renderer().draw_grid(&game), " #  . \n .  # \n");
    }

    #[test]
    fn custom_glyphs_and_footer() {
        let mut game = Game::new(Grid::new(1).unwrap(), Rule::default());
        game.grid.set_alive((0, 0)).unwrap();

        let renderer = TextRenderer {
            alive_glyph: 'o',
            dead_glyph: ' ',
            ..plain_renderer()
        };

        assert_eq!(renderer.draw(&game), " o \ngeneration 0 | 1 alive\n");
    }
}
