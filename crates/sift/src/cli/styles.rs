//! Terminal styles for the sift CLI.
//!
//! Rendering code asks for styles by meaning (an included clause, a muted key) rather
//! than by color, so the palette can change in one place. `console` drops the escape
//! codes when stdout is not a terminal.

use console::Style;
use siftapp::clause::ClauseAction;

pub fn heading() -> Style {
    Style::new().bold()
}

pub fn muted() -> Style {
    Style::new().color256(246)
}

pub fn include() -> Style {
    Style::new().green()
}

pub fn exclude() -> Style {
    Style::new().red()
}

pub fn action(action: ClauseAction) -> Style {
    match action {
        ClauseAction::Include => include(),
        ClauseAction::Exclude => exclude(),
    }
}
