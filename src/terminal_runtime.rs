use std::io;
use std::panic;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{THEME, Theme};
use crate::error::AppError;
use crate::game::GameState;
use crate::input::InputHandler;
use crate::renderer;
use crate::runtime::Frontend;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

/// Interactive frontend: draws with ratatui and listens for quit keys.
///
/// All rendering context lives here and is handed to the tick loop explicitly.
pub struct TerminalFrontend {
    session: TerminalSession,
    input: InputHandler,
    theme: &'static Theme,
}

impl TerminalFrontend {
    pub fn new(session: TerminalSession) -> Self {
        Self {
            session,
            input: InputHandler,
            theme: &THEME,
        }
    }
}

impl Frontend for TerminalFrontend {
    fn present(&mut self, state: &GameState) -> Result<(), AppError> {
        let theme = self.theme;
        self.session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, state, theme))?;
        Ok(())
    }

    fn wait_for_quit(&mut self, timeout: Duration) -> Result<bool, AppError> {
        Ok(self.input.wait_for_quit(timeout)?)
    }
}
