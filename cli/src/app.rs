use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use healthdesk_core::bmi::CategoryScheme;
use healthdesk_core::recipes::RecipeLibrary;
use healthdesk_core::water::WaterLog;
use healthdesk_core::weight::WeightLog;

use crate::commands::{
    INVALID_CHOICE, cmd_bmi, cmd_recipes, cmd_water_menu, cmd_weight_menu, report_action_error,
};
use crate::config::Config;
use crate::console::{Console, InputClosed};
use crate::menu::{MAIN_MENU, Screen};

/// The interactive session: one screen at a time until Exit.
pub(crate) struct App<R, W> {
    console: Console<R, W>,
    recipes: RecipeLibrary,
    water: WaterLog,
    weight: WeightLog,
    scheme: CategoryScheme,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub(crate) fn new(config: &Config, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            recipes: RecipeLibrary::new(&config.recipes_dir),
            water: WaterLog::new(&config.water_log_path, config.water_granularity),
            weight: WeightLog::new(&config.weight_log_path),
            scheme: config.bmi_scheme,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.console.into_output()
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        let mut screen = Screen::MainMenu;
        while screen != Screen::Exit {
            screen = match self.show(screen) {
                Ok(next) => next,
                Err(e) if e.is::<InputClosed>() => {
                    debug!("input closed");
                    Screen::Exit
                }
                Err(e) => {
                    report_action_error(&mut self.console, Err(e))?;
                    Screen::MainMenu
                }
            };
        }
        self.console.say("Goodbye!")
    }

    fn show(&mut self, screen: Screen) -> Result<Screen> {
        debug!(?screen, "showing screen");
        match screen {
            Screen::MainMenu => self.main_menu(),
            Screen::Recipes => {
                cmd_recipes(&mut self.console, &self.recipes)?;
                Ok(Screen::MainMenu)
            }
            Screen::Water => {
                cmd_water_menu(&mut self.console, &self.water)?;
                Ok(Screen::MainMenu)
            }
            Screen::Weight => {
                cmd_weight_menu(&mut self.console, &self.weight)?;
                Ok(Screen::MainMenu)
            }
            Screen::Bmi => {
                cmd_bmi(&mut self.console, self.scheme)?;
                Ok(Screen::MainMenu)
            }
            Screen::Exit => Ok(Screen::Exit),
        }
    }

    fn main_menu(&mut self) -> Result<Screen> {
        let selection = self.console.prompt_menu("MAIN MENU", MAIN_MENU)?;
        if let Some(next) = Screen::from_main_selection(selection) {
            Ok(next)
        } else {
            self.console.say(INVALID_CHOICE)?;
            Ok(Screen::MainMenu)
        }
    }
}
