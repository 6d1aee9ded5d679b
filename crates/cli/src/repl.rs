//! Interactive terminal loop.

use std::borrow::Cow;

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::config::{ColorMode, Config};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use crate::action::Action;
use crate::controller::{Controller, Response, Screen};
use crate::notice::Notice;
use crate::render::{InventoryScreen, LoginScreen, help};

/// Echoes `*` instead of the typed characters while `masking` is on.
#[derive(Default)]
struct PasswordMask {
    masking: bool,
}

impl Highlighter for PasswordMask {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.masking
    }
}

impl Completer for PasswordMask {
    type Candidate = String;
}

impl Hinter for PasswordMask {
    type Hint = String;
}

impl Validator for PasswordMask {}

impl Helper for PasswordMask {}

/// Something whose echo can be switched to `*`.
trait Masking {
    fn set_masking(&mut self, on: bool);
}

impl Masking for PasswordMask {
    fn set_masking(&mut self, on: bool) {
        self.masking = on;
    }
}

type Terminal = Editor<PasswordMask, DefaultHistory>;

impl Masking for Terminal {
    fn set_masking(&mut self, on: bool) {
        if let Some(mask) = self.helper_mut() {
            mask.set_masking(on);
        }
    }
}

/// Run `read` with masking on. Masking is off again afterwards whatever
/// `read` returned.
fn read_masked<M: Masking, T>(target: &mut M, read: impl FnOnce(&mut M) -> T) -> T {
    target.set_masking(true);
    let out = read(target);
    target.set_masking(false);
    out
}

/// History is added by hand so password lines never land in it.
fn editor_config() -> Config {
    Config::builder()
        .auto_add_history(false)
        .color_mode(ColorMode::Forced)
        .build()
}

pub fn run(mut controller: Controller) -> Result<()> {
    let mut rl: Terminal = Editor::with_config(editor_config())?;
    rl.set_helper(Some(PasswordMask::default()));

    draw(&controller);

    loop {
        let prompt = match controller.screen() {
            Screen::Login => "login> ",
            Screen::Inventory => "store> ",
        };
        let Some(line) = read_line(&mut rl, prompt)? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line)?;

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match controller.dispatch(action) {
            Response::Quit => break,
            Response::Help => println!("{}", help(controller.screen())),
            Response::PromptLogin => {
                let notices = prompt_login(&mut rl, &mut controller)?;
                show(&notices);
                draw(&controller);
            }
            Response::Notices(notices) => {
                show(&notices);
                draw(&controller);
            }
        }
    }

    tracing::info!(session_id = %controller.session().id_typed(), "exiting");
    Ok(())
}

/// `None` on Ctrl-C / Ctrl-D.
fn read_line(rl: &mut Terminal, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn prompt_login(rl: &mut Terminal, controller: &mut Controller) -> Result<Vec<Notice>> {
    let Some(username) = read_line(rl, "Username: ")? else {
        return Ok(Vec::new());
    };

    let password = read_masked(rl, |rl| read_line(rl, "Password: "));

    match password? {
        Some(password) => Ok(controller.login(&username, &password)),
        None => Ok(Vec::new()),
    }
}

fn show(notices: &[Notice]) {
    for notice in notices {
        println!("{notice}");
    }
}

fn draw(controller: &Controller) {
    println!();
    match controller.screen() {
        Screen::Login => println!("{}", LoginScreen),
        Screen::Inventory => println!(
            "{}",
            InventoryScreen {
                session: controller.session()
            }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_every_character_only_while_on() {
        let on = PasswordMask { masking: true };
        assert_eq!(on.highlight("hunter2", 0), "*******");
        assert!(on.highlight_char("hunter2", 7, CmdKind::Other));

        let off = PasswordMask::default();
        assert_eq!(off.highlight("hunter2", 0), "hunter2");
        assert!(!off.highlight_char("hunter2", 7, CmdKind::Other));
    }

    #[test]
    fn masking_is_switched_off_after_any_read() {
        let mut mask = PasswordMask::default();

        let read: Result<Option<String>> = read_masked(&mut mask, |mask| {
            assert!(mask.masking);
            Ok(Some("hunter2".to_string()))
        });
        assert_eq!(read.unwrap().as_deref(), Some("hunter2"));
        assert!(!mask.masking);

        let cancelled: Result<Option<String>> = read_masked(&mut mask, |mask| {
            assert!(mask.masking);
            Ok(None)
        });
        assert!(cancelled.unwrap().is_none());
        assert!(!mask.masking);

        let failed: Result<Option<String>> =
            read_masked(&mut mask, |_| Err(anyhow::anyhow!("tty gone")));
        assert!(failed.is_err());
        assert!(!mask.masking);
    }

    #[test]
    fn typed_lines_are_not_added_to_history_automatically() {
        assert!(!editor_config().auto_add_history());
    }
}
