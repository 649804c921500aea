//! Single-keystroke text menus over a serial console.
//!
//! A [`Menu`] is an ordered list of [`MenuItem`]s, each binding one selector
//! character to a label and a command value. [`Menu::run`] shows the items,
//! reads one character at a time and hands the command of the first matching
//! item to a [`Handler`].
//!
//! Menus form a tree only through the call graph: a handler may call
//! [`Menu::run`] on another menu. There is no push/pop stack; a sub-menu is
//! left when one of its handlers returns [`ControlFlow::Break`].
//!
//! ```text
//! Sleep demo menu----------------------
//! 1: Enter sleep mode
//! 2: Enter stop mode
//! ```

use core::ops::ControlFlow;

use embedded_io::{Read, Write};
use heapless::Vec;

use crate::error::Error;

/// One selectable line of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem<C> {
    /// Character the operator types to pick this item.
    pub selector: char,
    /// Text shown next to the selector.
    pub label: &'static str,
    /// Passed to [`Handler::invoke`] when the item is picked.
    pub command: C,
}

impl<C> MenuItem<C> {
    pub const fn new(selector: char, label: &'static str, command: C) -> Self {
        Self {
            selector,
            label,
            command,
        }
    }
}

/// The application side of a menu.
///
/// One `invoke` entry point for every item; the command value tells the
/// implementation which concrete action was picked.
pub trait Handler<C> {
    type Console: Read + Write;

    /// Transport the menu renders to and reads selections from.
    fn console(&mut self) -> &mut Self::Console;

    /// Performs the action bound to `command`.
    ///
    /// `selector` is the character that picked the item. Returning
    /// [`ControlFlow::Break`] ends the [`Menu::run`] that dispatched it.
    fn invoke(&mut self, command: C, selector: char) -> Result<ControlFlow<()>, Error>;
}

/// A titled list of at most `N` items, built once and never resized.
pub struct Menu<C, const N: usize> {
    title: &'static str,
    items: Vec<MenuItem<C>, N>,
}

impl<C: Copy, const N: usize> Menu<C, N> {
    /// Creates a menu with no items.
    pub const fn new(title: &'static str) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    /// Appends an item below the existing ones.
    ///
    /// Selectors are not checked for uniqueness. With duplicates the item
    /// appended first is the one that gets dispatched.
    pub fn add_item(&mut self, item: MenuItem<C>) -> Result<(), Error> {
        self.items
            .push(item)
            .map_err(|_| Error::MenuFull { capacity: N })
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn items(&self) -> &[MenuItem<C>] {
        &self.items
    }

    /// First item, in insertion order, bound to `selector`.
    pub fn select(&self, selector: char) -> Option<&MenuItem<C>> {
        self.items.iter().find(|item| item.selector == selector)
    }

    pub fn render_title<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        write!(out, "\r\n{}\r\n", self.title)?;
        Ok(())
    }

    pub fn render_items<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        for item in &self.items {
            write!(out, "{}: {}\r\n", item.selector, item.label)?;
        }
        Ok(())
    }

    /// Runs the menu until a handler breaks out of it.
    ///
    /// The title is written once, before the first listing, when
    /// `show_title` is set. The items are listed again before every read.
    /// Characters that match no item are dropped without comment.
    ///
    /// Blocks on the console between keystrokes. Returns `Ok(())` only when
    /// a handler returns [`ControlFlow::Break`]; transport failures, end of
    /// input and handler errors are returned as they occur.
    pub fn run<H: Handler<C>>(&self, show_title: bool, handler: &mut H) -> Result<(), Error> {
        if show_title {
            self.render_title(handler.console())?;
        }

        loop {
            self.render_items(handler.console())?;
            handler.console().flush().map_err(Error::transport)?;

            let selector = read_selector(handler.console())?;
            let Some(item) = self.select(selector) else {
                trace!("menu {=str}: ignoring {=char}", self.title, selector);
                continue;
            };

            debug!("menu {=str}: {=char} -> {=str}", self.title, selector, item.label);
            if handler.invoke(item.command, selector)?.is_break() {
                return Ok(());
            }
        }
    }
}

/// Blocks until one byte arrives and returns it as a selector.
fn read_selector<R: Read>(input: &mut R) -> Result<char, Error> {
    let mut byte = [0u8; 1];
    input.read_exact(&mut byte)?;
    Ok(char::from(byte[0]))
}

#[cfg(test)]
mod tests {
    use std::string::String;
    use std::vec::Vec as StdVec;

    use super::*;
    use crate::testing::ScriptedConsole;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Stay,
        Leave,
    }

    struct Recorder {
        console: ScriptedConsole,
        calls: StdVec<(Cmd, char)>,
    }

    impl Recorder {
        fn new(input: &str) -> Self {
            Self {
                console: ScriptedConsole::new(input),
                calls: StdVec::new(),
            }
        }
    }

    impl Handler<Cmd> for Recorder {
        type Console = ScriptedConsole;

        fn console(&mut self) -> &mut ScriptedConsole {
            &mut self.console
        }

        fn invoke(&mut self, command: Cmd, selector: char) -> Result<ControlFlow<()>, Error> {
            self.calls.push((command, selector));
            write!(self.console, "<{selector}>")?;
            Ok(match command {
                Cmd::Stay => ControlFlow::Continue(()),
                Cmd::Leave => ControlFlow::Break(()),
            })
        }
    }

    fn menu() -> Menu<Cmd, 3> {
        let mut menu = Menu::new("Test menu");
        menu.add_item(MenuItem::new('a', "Stay here", Cmd::Stay)).unwrap();
        menu.add_item(MenuItem::new('q', "Leave", Cmd::Leave)).unwrap();
        menu
    }

    const LISTING: &str = "a: Stay here\r\nq: Leave\r\n";

    #[test]
    fn matching_key_invokes_handler_once_with_selector() {
        let mut handler = Recorder::new("aq");
        assert_eq!(menu().run(false, &mut handler), Ok(()));
        assert_eq!(handler.calls, [(Cmd::Stay, 'a'), (Cmd::Leave, 'q')]);
    }

    #[test]
    fn handler_runs_before_next_read() {
        let mut handler = Recorder::new("aq");
        menu().run(false, &mut handler).unwrap();
        let expected = String::from(LISTING) + "<a>" + LISTING + "<q>";
        assert_eq!(handler.console.output(), expected);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let mut handler = Recorder::new("xz9q");
        assert_eq!(menu().run(false, &mut handler), Ok(()));
        assert_eq!(handler.calls, [(Cmd::Leave, 'q')]);
        assert_eq!(handler.console.output(), LISTING.repeat(4) + "<q>");
    }

    #[test]
    fn items_are_relisted_identically_before_every_read() {
        let mut handler = Recorder::new("aaa");
        assert_eq!(menu().run(false, &mut handler), Err(Error::EndOfInput));
        let output = handler.console.output();
        let listings: StdVec<&str> = output.split("<a>").collect();
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().all(|listing| *listing == LISTING));
    }

    #[test]
    fn title_is_shown_once_when_requested() {
        let mut handler = Recorder::new("aq");
        menu().run(true, &mut handler).unwrap();
        let output = handler.console.output();
        assert!(output.starts_with("\r\nTest menu\r\n"));
        assert_eq!(output.matches("Test menu").count(), 1);

        let mut handler = Recorder::new("q");
        menu().run(false, &mut handler).unwrap();
        assert!(!handler.console.output().contains("Test menu"));
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut handler = Recorder::new("");
        assert_eq!(menu().run(false, &mut handler), Err(Error::EndOfInput));
        assert!(handler.calls.is_empty());
    }

    #[test]
    fn capacity_is_fixed() {
        let mut menu = menu();
        menu.add_item(MenuItem::new('b', "Third", Cmd::Stay)).unwrap();
        assert_eq!(
            menu.add_item(MenuItem::new('c', "Fourth", Cmd::Stay)),
            Err(Error::MenuFull { capacity: 3 })
        );
        assert_eq!(menu.items().len(), 3);
    }

    #[test]
    fn duplicate_selector_dispatches_first_appended() {
        let mut menu: Menu<Cmd, 2> = Menu::new("Dupes");
        menu.add_item(MenuItem::new('d', "First", Cmd::Leave)).unwrap();
        menu.add_item(MenuItem::new('d', "Second", Cmd::Stay)).unwrap();
        assert_eq!(menu.select('d').map(|item| item.label), Some("First"));

        let mut handler = Recorder::new("d");
        assert_eq!(menu.run(false, &mut handler), Ok(()));
        assert_eq!(handler.calls, [(Cmd::Leave, 'd')]);
    }
}
