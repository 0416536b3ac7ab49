//! Root component: routes user gestures to the cart view model and re-renders
//! whenever the store publishes a change.

use core::str::FromStr;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use thiserror::Error;

use shopcart_cart::{CartChanged, CartStore, DispatchError, LineItem};
use shopcart_events::Subscription;
use shopcart_view::{CartDisplay, CartViewModel, CheckoutOutcome};

use crate::catalog::Catalog;
use crate::provider::StoreProvider;
use crate::render::{render_cart, render_products};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ProductList,
    Cart,
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    ShowProducts,
    ShowCart,
    Add(String),
    Increment(String),
    Decrement(String),
    Delete(String),
    Checkout,
    ContinueShopping,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGestureError {
    #[error("empty input")]
    Empty,
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an item name")]
    MissingName(&'static str),
}

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseGestureError::Empty);
        }
        let (verb, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();
        let named = |verb: &'static str, build: fn(String) -> Gesture| {
            if rest.is_empty() {
                Err(ParseGestureError::MissingName(verb))
            } else {
                Ok(build(rest.to_string()))
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "list" | "products" => Ok(Gesture::ShowProducts),
            "cart" => Ok(Gesture::ShowCart),
            "add" => named("add", Gesture::Add),
            "inc" | "+" => named("inc", Gesture::Increment),
            "dec" | "-" => named("dec", Gesture::Decrement),
            "del" | "delete" => named("del", Gesture::Delete),
            "checkout" => Ok(Gesture::Checkout),
            "shop" | "continue" => Ok(Gesture::ContinueShopping),
            "help" | "?" => Ok(Gesture::Help),
            "quit" | "exit" => Ok(Gesture::Quit),
            other => Err(ParseGestureError::Unknown(other.to_string())),
        }
    }
}

/// Output of one gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub exit: bool,
}

pub struct App {
    catalog: Catalog,
    store: Arc<CartStore>,
    view_model: CartViewModel,
    changes: Subscription<CartChanged>,
    routes: Receiver<Screen>,
    screen: Screen,
}

impl App {
    pub fn new(provider: &StoreProvider, catalog: Catalog) -> Self {
        let store = provider.store();
        let (route_tx, routes) = mpsc::channel();
        let view_model = CartViewModel::new(Arc::clone(&store)).with_navigator(Box::new(
            move || {
                let _ = route_tx.send(Screen::ProductList);
            },
        ));

        Self {
            catalog,
            changes: store.subscribe(),
            store,
            view_model,
            routes,
            screen: Screen::ProductList,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn view_model(&self) -> &CartViewModel {
        &self.view_model
    }

    pub fn render(&self) -> Vec<String> {
        match self.screen {
            Screen::ProductList => render_products(&self.catalog, &self.store.snapshot()),
            Screen::Cart => render_cart(&CartDisplay::from_snapshot(&self.store.snapshot())),
        }
    }

    pub fn handle(&mut self, gesture: Gesture) -> Result<Reply, DispatchError> {
        let mut reply = Reply::default();
        let screen_before = self.screen;

        match gesture {
            Gesture::ShowProducts => self.screen = Screen::ProductList,
            Gesture::ShowCart => self.screen = Screen::Cart,
            Gesture::Add(name) => match self.catalog.find(&name) {
                Some(product) => {
                    let outcome = self.store.add_item(product.to_line_item());
                    notice_on_rejection(outcome, &mut reply)?;
                }
                None => reply.lines.push(format!("No product named {name:?}")),
            },
            Gesture::Increment(name) => {
                self.with_cart_item(&name, &mut reply, |vm, item| vm.on_increment(item))?
            }
            Gesture::Decrement(name) => {
                self.with_cart_item(&name, &mut reply, |vm, item| vm.on_decrement(item))?
            }
            Gesture::Delete(name) => {
                self.with_cart_item(&name, &mut reply, |vm, item| vm.on_delete(item))?
            }
            Gesture::Checkout => match self.view_model.on_checkout() {
                CheckoutOutcome::NotImplemented { notice } => reply.lines.push(notice.to_string()),
            },
            Gesture::ContinueShopping => self.view_model.on_continue_shopping(),
            Gesture::Help => reply.lines.extend(help_lines()),
            Gesture::Quit => {
                reply.exit = true;
                return Ok(reply);
            }
        }

        while let Ok(screen) = self.routes.try_recv() {
            self.screen = screen;
        }
        let changed = !self.changes.drain().is_empty();

        if changed || self.screen != screen_before {
            reply.lines.extend(self.render());
        }
        Ok(reply)
    }

    fn with_cart_item(
        &self,
        name: &str,
        reply: &mut Reply,
        gesture: impl FnOnce(&CartViewModel, &LineItem) -> Result<(), DispatchError>,
    ) -> Result<(), DispatchError> {
        let snapshot = self.store.snapshot();
        let item = snapshot
            .items()
            .iter()
            .find(|item| item.name.as_str().eq_ignore_ascii_case(name.trim()));
        match item {
            Some(item) => notice_on_rejection(gesture(&self.view_model, item), reply),
            None => {
                reply.lines.push(format!("{name:?} is not in the cart"));
                Ok(())
            }
        }
    }
}

/// Rejected commands become a user notice; infrastructure failures propagate.
fn notice_on_rejection(
    outcome: Result<(), DispatchError>,
    reply: &mut Reply,
) -> Result<(), DispatchError> {
    match outcome {
        Err(DispatchError::Domain(err)) => {
            reply.lines.push(err.to_string());
            Ok(())
        }
        other => other,
    }
}

fn help_lines() -> Vec<String> {
    [
        "list | cart            switch screen",
        "add <product>          add one unit to the cart",
        "inc|dec|del <item>     change or remove a cart entry",
        "checkout | shop        check out / continue shopping",
        "quit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::Currency;

    fn app() -> App {
        App::new(
            &StoreProvider::new(Currency::Usd),
            Catalog::embedded().unwrap(),
        )
    }

    #[test]
    fn parses_gestures() {
        assert_eq!("add Snake Plant".parse::<Gesture>(), Ok(Gesture::Add("Snake Plant".into())));
        assert_eq!("+ Mint".parse::<Gesture>(), Ok(Gesture::Increment("Mint".into())));
        assert_eq!("CART".parse::<Gesture>(), Ok(Gesture::ShowCart));
        assert_eq!("dec".parse::<Gesture>(), Err(ParseGestureError::MissingName("dec")));
        assert_eq!("  ".parse::<Gesture>(), Err(ParseGestureError::Empty));
        assert!(matches!("fly".parse::<Gesture>(), Err(ParseGestureError::Unknown(_))));
    }

    #[test]
    fn starts_on_product_list() {
        let app = app();
        assert_eq!(app.screen(), Screen::ProductList);
        assert!(app.render()[0].starts_with("Products (cart: 0 items)"));
    }

    #[test]
    fn adding_re_renders_current_screen() {
        let mut app = app();
        let reply = app.handle(Gesture::Add("mint".into())).unwrap();

        assert!(reply.lines.iter().any(|l| l == "- Mint $10  [Added to Cart]"));
    }

    #[test]
    fn unknown_names_produce_notices_without_rendering() {
        let mut app = app();
        let reply = app.handle(Gesture::Add("Cactus".into())).unwrap();
        assert_eq!(reply.lines, vec!["No product named \"Cactus\""]);

        let reply = app.handle(Gesture::Delete("Mint".into())).unwrap();
        assert_eq!(reply.lines, vec!["\"Mint\" is not in the cart"]);
    }

    #[test]
    fn continue_shopping_navigates_back_to_products() {
        let mut app = app();
        app.handle(Gesture::ShowCart).unwrap();
        assert_eq!(app.screen(), Screen::Cart);

        let reply = app.handle(Gesture::ContinueShopping).unwrap();

        assert_eq!(app.screen(), Screen::ProductList);
        assert!(reply.lines[0].starts_with("Products"));
    }

    #[test]
    fn quit_exits_without_output() {
        let mut app = app();
        let reply = app.handle(Gesture::Quit).unwrap();
        assert!(reply.exit);
        assert!(reply.lines.is_empty());
    }
}
