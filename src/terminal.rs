//! Raw-mode, alternate-screen terminal setup for the quiz UI.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;
use std::sync::Once;

use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Terminal in raw mode on the alternate screen. Restored on drop, so an
/// early `?` return still hands the user back a usable shell.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        PANIC_HOOK.call_once(setup_panic_hook);
        enable_raw_mode()?;
        if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }
}

impl Deref for TerminalSession {
    type Target = AppTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
