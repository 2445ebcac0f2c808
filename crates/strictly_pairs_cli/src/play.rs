//! Interactive terminal game loop.

use crate::config::AppConfig;
use crate::feedback::{FeedbackCues, TerminalBell};
use crate::scheduler::TokioScheduler;
use crate::view::TerminalView;
use std::str::FromStr;
use strictly_pairs::{ContentSource, GameSession, Scheduler, SelectOutcome, SessionError, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Flip the card at this zero-based grid position.
    Flip(usize),
    /// Replay the current level.
    TryAgain,
    /// Advance after a win.
    NextLevel,
    /// Start over at level 1.
    Restart,
    /// Switch theme and start over at level 1.
    Theme(Theme),
    /// Show the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Unrecognised player input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Nothing was typed.
    #[display("Type a card number or a command (h for help)")]
    Empty,
    /// Card numbers start at 1.
    #[display("Card numbers start at 1")]
    ZeroCard,
    /// `theme` with an unknown name.
    #[display("Unknown theme '{}'", _0)]
    UnknownTheme(String),
    /// Anything else.
    #[display("Unknown command '{}' (h for help)", _0)]
    Unknown(String),
}

impl std::error::Error for InputError {}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(InputError::Empty);
        };

        if let Ok(number) = command.parse::<usize>() {
            return number.checked_sub(1).map(Input::Flip).ok_or(InputError::ZeroCard);
        }

        match command.to_ascii_lowercase().as_str() {
            "t" | "try" => Ok(Input::TryAgain),
            "n" | "next" => Ok(Input::NextLevel),
            "r" | "restart" => Ok(Input::Restart),
            "h" | "help" | "?" => Ok(Input::Help),
            "q" | "quit" | "exit" => Ok(Input::Quit),
            "theme" => {
                let name = words.next().unwrap_or_default();
                name.parse::<Theme>()
                    .map(Input::Theme)
                    .map_err(|_| InputError::UnknownTheme(name.to_string()))
            }
            _ => Err(InputError::Unknown(line.to_string())),
        }
    }
}

/// Command list shown for `h`.
pub const HELP: &str = "\
  <number>       flip that card
  t              try this level again
  n              next level (after a win)
  r              restart at level 1
  theme <name>   switch theme and restart
  q              quit";

/// Applies one input to the session, returning a message for the player.
///
/// Selections the session ignores are reported, not raised.
///
/// # Errors
///
/// Returns [`SessionError`] if a restart could not fetch content; the
/// previous board stays in play.
#[instrument(skip(session), fields(generation = session.generation()))]
pub async fn apply_input<C, S>(session: &mut GameSession<C, S>, input: Input) -> Result<Option<String>, SessionError>
where
    C: ContentSource,
    S: Scheduler,
{
    match input {
        Input::Flip(index) => match session.select_index(index) {
            SelectOutcome::Ignored(reason) => Ok(Some(reason.to_string())),
            outcome => {
                debug!(?outcome, "Selection accepted");
                Ok(None)
            }
        },
        Input::TryAgain => session.try_again().await.map(|_| None),
        Input::NextLevel => {
            if session.next_level().await? {
                Ok(None)
            } else {
                Ok(Some("Finish this level first".to_string()))
            }
        }
        Input::Restart => session.new_game().await.map(|_| None),
        Input::Theme(theme) => session.set_theme(theme).await.map(|_| None),
        Input::Help => Ok(Some(HELP.to_string())),
        Input::Quit => Ok(None),
    }
}

/// Runs the interactive game until `q` or end of input.
///
/// # Errors
///
/// Fails if the first level cannot be dealt or stdin cannot be read.
#[instrument(skip(config), fields(provider = %config.content().provider()))]
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let source = config.content().build_source()?;
    let (scheduler, mut tickets) = TokioScheduler::new();

    let mut session = GameSession::start(config.game().clone(), source, scheduler).await?;
    info!(level = session.state().level(), theme = %session.theme(), "Game started");
    session.subscribe(TerminalView::stdout());
    session.subscribe(FeedbackCues::new(TerminalBell));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(ticket) = tickets.recv() => {
                if let Err(e) = session.resolve_selection(ticket) {
                    debug!(error = %e, "Dropped stale resolution");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                let input = match line.parse::<Input>() {
                    Ok(input) => input,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if input == Input::Quit {
                    break;
                }
                match apply_input(&mut session, input).await {
                    Ok(Some(message)) => println!("{}", message),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "Could not deal a new board");
                        println!("Could not deal a new board: {}", e);
                    }
                }
            }
        }
    }

    info!(level = session.state().level(), "Game ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_numbers_are_one_based() {
        assert_eq!("1".parse::<Input>(), Ok(Input::Flip(0)));
        assert_eq!(" 16 ".parse::<Input>(), Ok(Input::Flip(15)));
        assert_eq!("0".parse::<Input>(), Err(InputError::ZeroCard));
    }

    #[test]
    fn test_commands() {
        assert_eq!("t".parse::<Input>(), Ok(Input::TryAgain));
        assert_eq!("N".parse::<Input>(), Ok(Input::NextLevel));
        assert_eq!("restart".parse::<Input>(), Ok(Input::Restart));
        assert_eq!("q".parse::<Input>(), Ok(Input::Quit));
        assert_eq!("theme Fantasy".parse::<Input>(), Ok(Input::Theme(Theme::Fantasy)));
    }

    #[test]
    fn test_bad_input() {
        assert_eq!("".parse::<Input>(), Err(InputError::Empty));
        assert_eq!("theme".parse::<Input>(), Err(InputError::UnknownTheme(String::new())));
        assert_eq!("theme noir".parse::<Input>(), Err(InputError::UnknownTheme("noir".to_string())));
        assert!(matches!("flip".parse::<Input>(), Err(InputError::Unknown(_))));
    }
}
