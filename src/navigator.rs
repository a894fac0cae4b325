//! The menu state machine: show a menu, interpret the pick, and follow it
//! into sub-menus, confirmations and commands until something terminal
//! happens.

use tracing::{debug, info, warn};

use crate::command::Executor;
use crate::error::NavError;
use crate::menu::{Menu, MenuSet, Selection};
use crate::picker::Picker;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How a menu run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    /// The user dismissed a picker somewhere; the whole session ends quietly.
    Cancelled,
    /// `value` is what the run produced; `last_selection` is the most recent
    /// picked label (or `return` literal) anywhere inside it, which an
    /// enclosing plain item yields after navigating through it.
    Done {
        value: String,
        last_selection: String,
    },
}

impl Finish {
    fn done(value: String, last_selection: String) -> Self {
        Finish::Done {
            value,
            last_selection,
        }
    }

    pub fn into_output(self) -> String {
        match self {
            Finish::Cancelled => String::new(),
            Finish::Done { value, .. } => value,
        }
    }
}

pub struct Navigator<'a, P, E> {
    menus: &'a MenuSet,
    picker: P,
    executor: E,
    max_depth: usize,
}

impl<'a, P: Picker, E: Executor> Navigator<'a, P, E> {
    pub fn new(menus: &'a MenuSet, picker: P, executor: E) -> Self {
        Self {
            menus,
            picker,
            executor,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit on nested sub-menu (and confirmation) recursion. Exceeding it is
    /// reported as `NavError::DepthExceeded` rather than growing the stack
    /// without bound on a cyclic `menu` reference.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Runs the session from the first declared menu. Cancellation yields an
    /// empty string.
    pub fn start(&self) -> Result<String, NavError> {
        let Some(root) = self.menus.root() else {
            warn!("no menus declared, nothing to show");
            return Ok(String::new());
        };
        info!(menu = %root.name, "starting menu session");
        self.run(root).map(Finish::into_output)
    }

    pub fn run(&self, menu: &Menu) -> Result<Finish, NavError> {
        self.run_at(menu, 0)
    }

    /// Shows the Yes/No dialog. Only an explicit "Yes" confirms.
    pub fn confirm(&self, message: &str) -> Result<bool, NavError> {
        self.confirm_at(message, 0)
    }

    fn confirm_at(&self, message: &str, depth: usize) -> Result<bool, NavError> {
        let dialog = Menu::confirmation(message);
        let finish = self
            .run_at(&dialog, depth + 1)
            .map_err(|e| NavError::Confirmation(Box::new(e)))?;
        let confirmed = matches!(finish, Finish::Done { ref value, .. } if value == "Yes");
        debug!(message = %dialog.message, confirmed, "confirmation answered");
        Ok(confirmed)
    }

    fn run_at(&self, menu: &Menu, depth: usize) -> Result<Finish, NavError> {
        if depth > self.max_depth {
            return Err(NavError::DepthExceeded {
                menu: menu.name.clone(),
                depth,
            });
        }

        loop {
            let text = match self.picker.present(menu)? {
                Selection::Cancelled => return Ok(Finish::Cancelled),
                Selection::Text(text) => text,
            };

            let Some(item) = menu.item_by_name(&text) else {
                // Typed a filter that matched nothing and hit enter.
                debug!(menu = %menu.name, input = %text, "no matching item, asking again");
                continue;
            };

            let mut last_selection = text.clone();
            if let Some(target) = item.sub_menu() {
                match self.menus.by_name(target) {
                    // The sub-menu's value is dropped; the item itself is
                    // still evaluated below, but its most recent pick carries
                    // over.
                    Some(sub) => match self.run_at(sub, depth + 1)? {
                        Finish::Cancelled => return Ok(Finish::Cancelled),
                        Finish::Done {
                            last_selection: inner,
                            ..
                        } => last_selection = inner,
                    },
                    None => warn!(
                        menu = %menu.name,
                        item = %item.name,
                        sub_menu = target,
                        "item references an unknown menu"
                    ),
                }
            }

            if let Some(command) = item.command() {
                let confirmed = match item.confirm.message() {
                    Some(message) => self.confirm_at(message, depth)?,
                    None => true,
                };
                if !confirmed {
                    debug!(menu = %menu.name, item = %item.name, "not confirmed, back to menu");
                    continue;
                }
                let stdout = self.executor.execute(&command)?;
                info!(executable = %command.executable, "command finished");
                return Ok(Finish::done(stdout, last_selection));
            }

            if let Some(literal) = item.return_literal() {
                return Ok(Finish::done(literal.to_string(), literal.to_string()));
            }

            return Ok(Finish::done(last_selection.clone(), last_selection));
        }
    }
}
