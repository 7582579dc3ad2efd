//! Interactive shopping session over stdin.
//!
//! One task owns the [`Session`]; stdin lines and timer completions are
//! multiplexed with `select!` and applied in arrival order. After every
//! event the session's timer commands are handed to the [`TimerDriver`] and
//! the screen is redrawn when something visible changed.

pub(crate) mod command;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storefront_core::{
    AddOutcome, AppConfig, Catalog, Page, Session, SessionSettings, SubmitOutcome, TimerDriver,
    TimerId,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::render;

use command::{PanelAction, ShopCommand, HELP};

pub(crate) async fn run_shop(catalog: Arc<Catalog>, config: &AppConfig) -> anyhow::Result<()> {
    let mut session = Session::new(catalog, SessionSettings::from_config(config));
    let (mut driver, mut fired) = TimerDriver::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!(
        checkout_delay_ms = config.checkout_delay_ms,
        feedback_ms = config.feedback_ms,
        "shop session started"
    );
    redraw(&mut session);
    println!("Type 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match ShopCommand::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(ShopCommand::Quit)) => break,
                    Ok(Some(ShopCommand::Help)) => println!("{HELP}"),
                    Ok(Some(ShopCommand::Wait(duration))) => {
                        wait(&mut session, &mut driver, &mut fired, duration).await;
                    }
                    Ok(Some(command)) => {
                        if let Some(message) = dispatch(&mut session, command) {
                            println!("{message}");
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
            Some(id) = fired.recv() => on_fired(&mut session, &mut driver, id),
        }
        driver.apply(session.take_timer_commands());
        if session.take_dirty() {
            redraw(&mut session);
        }
    }

    tracing::info!(
        items_in_cart = session.cart().total_item_count(),
        "shop session ended"
    );
    Ok(())
}

/// Lets `duration` pass while still servicing timers.
async fn wait(
    session: &mut Session,
    driver: &mut TimerDriver,
    fired: &mut UnboundedReceiver<TimerId>,
    duration: Duration,
) {
    let deadline = tokio::time::Instant::now() + duration;
    loop {
        tokio::select! {
            () = tokio::time::sleep_until(deadline) => break,
            Some(id) = fired.recv() => on_fired(session, driver, id),
        }
        driver.apply(session.take_timer_commands());
        if session.take_dirty() {
            redraw(session);
        }
    }
}

fn on_fired(session: &mut Session, driver: &mut TimerDriver, id: TimerId) {
    driver.acknowledge(id);
    session.timer_fired(id);
}

fn redraw(session: &mut Session) {
    session.take_dirty();
    println!("\n{}\n> ", render::screen(session));
}

/// Applies one command; returns a note for the user when nothing happened.
fn dispatch(session: &mut Session, command: ShopCommand) -> Option<String> {
    match command {
        ShopCommand::Home => session.go_catalog(),
        ShopCommand::Search(text) => {
            if !matches!(session.page(), Page::Catalog(_)) {
                session.go_catalog();
            }
            if text.is_empty() {
                session.clear_search();
            } else {
                session.set_search(&text);
            }
        }
        ShopCommand::Category(filter) => {
            if !matches!(session.page(), Page::Catalog(_)) {
                session.go_catalog();
            }
            session.set_category(filter);
        }
        ShopCommand::View(id) => session.view_product(&id),
        ShopCommand::Add(id) => return add(session, id),
        ShopCommand::More => {
            if !session.increment_quantity() {
                return ignored("'more' only works on a product page");
            }
        }
        ShopCommand::Less => {
            if !session.decrement_quantity() {
                return ignored("'less' only works on a product page");
            }
        }
        ShopCommand::Cart => session.go_cart(),
        ShopCommand::Panel(PanelAction::Open) => session.open_panel(),
        ShopCommand::Panel(PanelAction::Close) => session.close_panel(),
        ShopCommand::Panel(PanelAction::Toggle) => session.toggle_panel(),
        ShopCommand::Increase(id) => {
            if !session.cart().state().contains(&id) {
                return ignored(&format!("'{id}' is not in your cart"));
            }
            session.increase(&id);
        }
        ShopCommand::Decrease(id) => {
            if !session.cart().state().contains(&id) {
                return ignored(&format!("'{id}' is not in your cart"));
            }
            session.decrease(&id);
        }
        ShopCommand::SetQuantity { id, quantity } => {
            if !session.cart().state().contains(&id) {
                return ignored(&format!("'{id}' is not in your cart"));
            }
            session.set_quantity(&id, quantity);
        }
        ShopCommand::Remove(id) => {
            if !session.cart().state().contains(&id) {
                return ignored(&format!("'{id}' is not in your cart"));
            }
            session.remove(&id);
        }
        ShopCommand::Clear => session.clear_cart(),
        ShopCommand::Checkout => session.go_checkout(),
        ShopCommand::Set { field, value } => {
            if !session.set_field(field, &value) {
                return ignored("the checkout form is not open for editing");
            }
        }
        ShopCommand::Submit => return submit(session),
        // Handled by the event loop.
        ShopCommand::Wait(_) | ShopCommand::Help | ShopCommand::Quit => {}
    }
    None
}

fn add(session: &mut Session, id: Option<String>) -> Option<String> {
    if matches!(session.page(), Page::ProductDetail(_)) {
        if !session.add_selected() {
            return ignored("nothing to add right now");
        }
        return None;
    }
    let Some(id) = id else {
        return ignored("'add' needs a product id on this page");
    };
    match session.add_to_cart(&id) {
        AddOutcome::Added => None,
        AddOutcome::Busy => ignored(&format!("product {id} was just added")),
        AddOutcome::UnknownProduct => ignored(&format!("no product with id '{id}'")),
        AddOutcome::NotOnCatalog => ignored("products are added from the catalog or a product page"),
    }
}

fn submit(session: &mut Session) -> Option<String> {
    match session.submit_order() {
        None => ignored("there is nothing to submit here"),
        Some(SubmitOutcome::Accepted(_)) => Some("Processing...".to_string()),
        Some(SubmitOutcome::Invalid(count)) => {
            Some(format!("{count} field(s) need attention before the order can be placed"))
        }
        Some(SubmitOutcome::Ignored) => ignored("the order is already being placed"),
    }
}

fn ignored(reason: &str) -> Option<String> {
    tracing::warn!(reason, "command ignored");
    Some(reason.to_string())
}

#[cfg(test)]
#[path = "shop_test.rs"]
mod tests;
