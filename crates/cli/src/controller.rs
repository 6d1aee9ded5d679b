//! Application controller: owns the session, maps actions to session operations.

use dioca_auth::CredentialPolicy;
use dioca_core::{DomainResult, ProductId};
use dioca_session::Session;

use crate::action::Action;
use crate::notice::Notice;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Inventory,
}

/// What the terminal should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Show these notices (possibly none), then redraw the screen.
    Notices(Vec<Notice>),
    /// Ask for username and password, then call [`Controller::login`].
    PromptLogin,
    Help,
    Quit,
}

#[derive(Debug)]
pub struct Controller {
    session: Session,
}

impl Controller {
    pub fn new(policy: CredentialPolicy) -> Self {
        Self {
            session: Session::new(policy),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::Inventory
        } else {
            Screen::Login
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Vec<Notice> {
        match self.session.authenticate(username, password) {
            Ok(()) => Vec::new(),
            Err(err) => vec![Notice::from_error(&err, self.session.mode())],
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Response {
        match action {
            Action::Help => return Response::Help,
            Action::Quit => return Response::Quit,
            Action::List => return Response::Notices(Vec::new()),
            Action::Login if self.screen() == Screen::Login => return Response::PromptLogin,
            Action::Login => return Response::Notices(Vec::new()),
            _ => {}
        }

        if self.screen() == Screen::Login {
            return Response::Notices(vec![Notice::new(
                "Login Required",
                "Please log in first (type `login`).",
            )]);
        }

        let mode = self.session.mode();
        match self.perform(action) {
            Ok(notice) => Response::Notices(notice.into_iter().collect()),
            Err(err) => Response::Notices(vec![Notice::from_error(&err, mode)]),
        }
    }

    /// Run one inventory action against the session. `Ok(Some(_))` carries a
    /// success alert; card lookups that miss are reported the same way.
    fn perform(&mut self, action: Action) -> DomainResult<Option<Notice>> {
        match action {
            Action::Set(field, text) => self.session.set_field(field, text),
            Action::Submit => {
                self.session.submit()?;
            }
            Action::Edit(card) => match self.card(card) {
                Ok(id) => self.session.select(id)?,
                Err(notice) => return Ok(Some(notice)),
            },
            Action::Delete(card) => match self.card(card) {
                Ok(id) => {
                    self.session.delete(id);
                }
                Err(notice) => return Ok(Some(notice)),
            },
            Action::Buy(card) => {
                let id = match self.card(card) {
                    Ok(id) => id,
                    Err(notice) => return Ok(Some(notice)),
                };
                self.session.purchase(id)?;
                return Ok(self.session.product(id).map(|p| Notice::purchased(p.name())));
            }
            Action::Reset => self.session.reset_form(),
            Action::Logout => self.session.logout(),
            Action::Help | Action::Quit | Action::List | Action::Login => {}
        }
        Ok(None)
    }

    /// Product shown on card `number` (1-based).
    fn card(&self, number: usize) -> Result<ProductId, Notice> {
        number
            .checked_sub(1)
            .and_then(|index| self.session.products().as_slice().get(index))
            .map(|product| product.id_typed())
            .ok_or_else(|| Notice::new("Error", format!("There is no product card #{number}.")))
    }
}
