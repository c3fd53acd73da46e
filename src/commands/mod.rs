use colored::Colorize;

use crate::food::state::Tab;
use crate::food::workflows::FoodScanner;

mod food_cmd;
mod system;
pub mod view;

pub use food_cmd::with_spinner;
pub use view::render_view;

pub struct CommandHandler {
    scanner: FoodScanner,
}

impl CommandHandler {
    pub fn new(scanner: FoodScanner) -> Self {
        Self { scanner }
    }

    pub fn scanner(&self) -> &FoodScanner {
        &self.scanner
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        let output = self.dispatch(input).await?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    /// Routes one line of input and returns the text to print.
    async fn dispatch(&mut self, input: &str) -> Result<String, String> {
        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match (command.to_lowercase().as_str(), arg.is_empty()) {
            ("help" | "exit" | "quit", true) => {
                system::handle_command(command)?;
                Ok(String::new())
            }
            ("show", true) => Ok(render_view(&self.scanner.state())),
            ("categories", true) => food_cmd::categories(&self.scanner),
            ("scan", true) => food_cmd::scan(&self.scanner).await,
            ("search", _) => food_cmd::search(&self.scanner, arg).await,
            ("analyze", _) => food_cmd::analyze(&self.scanner, arg).await,
            ("healthy", _) => food_cmd::healthy(&self.scanner, arg).await,
            ("image", _) => food_cmd::select_image(&self.scanner, arg),
            ("tab", _) => food_cmd::switch_tab(&self.scanner, arg),
            _ => match self.scanner.state().active_tab {
                Tab::Search => food_cmd::search(&self.scanner, input).await,
                Tab::Scan => Err(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    command.yellow()
                )),
            },
        }
    }
}
