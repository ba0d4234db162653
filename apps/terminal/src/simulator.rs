//! # Dev-Mode Simulator
//!
//! The interactive driver behind `--mode dev`: wires in-memory stores, a
//! seeded catalog, and the journal into a [`StoreComposite`], then runs a
//! fixed-interval tick loop next to a line-oriented command reader standing
//! in for the scanner and keypad views.
//!
//! ## Command Language
//! ```text
//! lane <n>           select the active lane (1-based, default 1)
//! start              begin a transaction
//! scan <sku>         scan an item (resolved against the catalog)
//! discount <code>    apply a discount by code
//! pay <amount>       tender a payment, e.g. `pay 12.50`
//! complete           complete the transaction
//! void               void the transaction
//! reset              reset the lane after a completed/voided sale
//! log <message>      record a LOG event for the journal
//! status             show every lane's state
//! help               show this list
//! quit               shut the store down and exit
//! ```
//!
//! Commands resolve against the catalog *before* dispatching, the way the
//! views do: an unknown SKU never becomes a scan request, it becomes an
//! ERROR event for the journal.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use mercury_core::property::keys;
use mercury_core::{Event, EventKind, EventListener, Money};
use mercury_db::{
    Discount, DiscountStore, Item, ItemStore, MemoryDiscountStore, MemoryItemStore,
    MemoryPosRegistry, MemoryTransactionStore, PosRegistry,
};
use mercury_journal::{Journal, RemoteSink};
use mercury_lane::{DispatchOutcome, LaneController, StoreComposite};

use crate::cli::Cli;

// =============================================================================
// Command Language
// =============================================================================

/// One line of operator input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lane(u32),
    Start,
    Scan(String),
    Discount(String),
    Pay(Money),
    Complete,
    Void,
    Reset,
    Log(String),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Empty lines are `None`; anything
    /// unrecognized is `Err` with a usage hint.
    pub fn parse(line: &str) -> Option<Result<Command, String>> {
        let mut words = line.split_whitespace();
        let verb = words.next()?;
        let rest = words.collect::<Vec<_>>().join(" ");

        let command = match verb {
            "lane" => match rest.parse::<u32>() {
                Ok(n) if n >= 1 => Command::Lane(n),
                _ => return Some(Err("usage: lane <number>".to_string())),
            },
            "start" => Command::Start,
            "scan" if !rest.is_empty() => Command::Scan(rest),
            "scan" => return Some(Err("usage: scan <sku>".to_string())),
            "discount" if !rest.is_empty() => Command::Discount(rest),
            "discount" => return Some(Err("usage: discount <code>".to_string())),
            "pay" => match parse_amount(&rest) {
                Some(amount) => Command::Pay(amount),
                None => return Some(Err("usage: pay <amount>, e.g. pay 12.50".to_string())),
            },
            "complete" => Command::Complete,
            "void" => Command::Void,
            "reset" => Command::Reset,
            "log" if !rest.is_empty() => Command::Log(rest),
            "log" => return Some(Err("usage: log <message>".to_string())),
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Some(Err(format!("unknown command '{other}', try 'help'"))),
        };

        Some(Ok(command))
    }
}

/// Parses `12.50` or `12` into cents. Rejects negatives and malformed
/// minor parts (`12.5` is ambiguous on a keypad and refused).
fn parse_amount(text: &str) -> Option<Money> {
    let (major_text, minor_text) = match text.split_once('.') {
        Some((major, minor)) => (major, Some(minor)),
        None => (text, None),
    };

    let major: i64 = major_text.parse().ok()?;
    if major < 0 {
        return None;
    }

    let minor: i64 = match minor_text {
        Some(m) if m.len() == 2 => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };

    Some(Money::from_major_minor(major, minor))
}

// =============================================================================
// Wiring
// =============================================================================

/// Runs the dev simulator until `quit` or ctrl-c.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let transactions = Arc::new(MemoryTransactionStore::new());
    let registry = MemoryPosRegistry::new();
    let items = MemoryItemStore::new();
    let discounts = MemoryDiscountStore::new();

    seed_catalog(&items, &discounts)
        .await
        .context("seeding demo catalog")?;

    // One journal shared by every lane; the line carries the lane identity.
    let remote = match &cli.journal {
        Some(addr) => {
            let sink = Arc::new(RemoteSink::new(addr.clone()));
            if let Err(e) = sink.connect().await {
                warn!(error = %e, "journal collector unreachable, lines will drop");
            }
            Some(sink)
        }
        None => None,
    };
    let journal: Arc<dyn EventListener> = match &remote {
        Some(sink) => Arc::new(Journal::new(sink.clone())),
        None => Arc::new(Journal::console()),
    };

    let mut store = StoreComposite::new();
    for lane_number in 1..=cli.lanes {
        let identity = registry
            .register_lane(&cli.store, lane_number)
            .await
            .with_context(|| format!("registering lane {lane_number}"))?;

        let mut lane = LaneController::builder(transactions.clone())
            .with_identity(identity)
            .build();
        lane.register(journal.clone());
        store.add_lane(lane);
    }

    store.boot_all().context("booting lanes")?;
    info!(store = %cli.store, lanes = cli.lanes, "store open");

    println!("{} open with {} lane(s). Type 'help' for commands.", cli.store, cli.lanes);

    let mut ticker = interval(Duration::from_millis(cli.tick_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut active: usize = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                store.tick_all();
            }

            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break; // EOF: same as quit
                };
                let command = match Command::parse(&line) {
                    None => continue,
                    Some(Err(usage)) => {
                        println!("{usage}");
                        continue;
                    }
                    Some(Ok(command)) => command,
                };

                if matches!(command, Command::Quit) {
                    break;
                }
                handle_command(command, &mut store, &mut active, &items, &discounts).await;
            }

            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    // One more tick flushes the shutdown notifications before the lanes stop.
    store.shutdown_all();
    store.tick_all();

    if let Some(sink) = remote {
        sink.disconnect().await;
    }

    info!(persisted = transactions.len(), "store closed");
    Ok(())
}

/// A small demo catalog so `scan`/`discount` work out of the box.
async fn seed_catalog(
    items: &MemoryItemStore,
    discounts: &MemoryDiscountStore,
) -> mercury_db::DbResult<()> {
    items
        .upsert(Item::new("COKE-330", "Coke 330ml", Money::from_cents(199)))
        .await?;
    items
        .upsert(Item::new("BREAD-W", "White bread", Money::from_cents(249)))
        .await?;
    items
        .upsert(Item::new("MILK-1L", "Milk 1l", Money::from_cents(159)))
        .await?;

    discounts
        .upsert(Discount::percent("SAVE10", "10% off", 1000))
        .await?;
    discounts
        .upsert(Discount::flat("2OFF", "$2 off", Money::from_cents(200)))
        .await?;

    Ok(())
}

// =============================================================================
// Command Handling
// =============================================================================

async fn handle_command(
    command: Command,
    store: &mut StoreComposite,
    active: &mut usize,
    items: &MemoryItemStore,
    discounts: &MemoryDiscountStore,
) {
    match command {
        Command::Lane(n) => {
            let index = (n - 1) as usize;
            if index < store.len() {
                *active = index;
                println!("lane {n} selected");
            } else {
                println!("no such lane: this store has {} lane(s)", store.len());
            }
        }

        Command::Status => {
            for (index, lane) in store.iter().enumerate() {
                let marker = if index == *active { ">" } else { " " };
                println!(
                    "{marker} lane {}: {} ({})",
                    index + 1,
                    lane.state(),
                    if lane.is_running() { "running" } else { "stopped" },
                );
            }
        }

        Command::Help => println!(
            "commands: lane <n> | start | scan <sku> | discount <code> | \
             pay <amount> | complete | void | reset | log <msg> | status | quit"
        ),

        Command::Start => dispatch(store, *active, Event::new(EventKind::RequestStartTransaction)).await,

        Command::Scan(sku) => match items.find_by_sku(&sku).await {
            Ok(Some(item)) if item.active => {
                let event = Event::new(EventKind::RequestScanItem)
                    .with(keys::SKU, item.sku.as_str())
                    .with(keys::AMOUNT, item.price)
                    .with(keys::MESSAGE, format!("{} {}", item.name, item.price));
                dispatch(store, *active, event).await;
            }
            Ok(_) => {
                // Unknown or discontinued SKU never becomes a scan request.
                dispatch(store, *active, Event::error(format!("unknown sku: {sku}"))).await;
            }
            Err(e) => println!("catalog lookup failed: {e}"),
        },

        Command::Discount(code) => match discounts.find_by_code(&code).await {
            Ok(Some(discount)) => {
                let event = Event::new(EventKind::RequestApplyDiscount)
                    .with(keys::DISCOUNT_CODE, discount.code.as_str())
                    .with(keys::MESSAGE, discount.description.as_str());
                dispatch(store, *active, event).await;
            }
            Ok(None) => {
                dispatch(store, *active, Event::error(format!("unknown discount: {code}"))).await;
            }
            Err(e) => println!("discount lookup failed: {e}"),
        },

        Command::Pay(amount) => {
            let event = Event::new(EventKind::RequestEnterPayment)
                .with(keys::AMOUNT, amount)
                .with(keys::MESSAGE, format!("tendered {amount}"));
            dispatch(store, *active, event).await;
        }

        Command::Complete => {
            dispatch(store, *active, Event::new(EventKind::RequestCompleteTransaction)).await
        }

        Command::Void => {
            dispatch(store, *active, Event::new(EventKind::RequestVoidTransaction)).await
        }

        Command::Reset => dispatch(store, *active, Event::new(EventKind::RequestResetPos)).await,

        Command::Log(message) => dispatch(store, *active, Event::log(message)).await,

        // `quit` is handled by the caller before it gets here.
        Command::Quit => {}
    }
}

async fn dispatch(store: &mut StoreComposite, active: usize, event: Event) {
    let Some(lane) = store.lane_mut(active) else {
        println!("no active lane");
        return;
    };

    match lane.dispatch(event).await {
        Ok(DispatchOutcome::Accepted {
            confirmation,
            state,
        }) => println!("ok: {confirmation}, lane is {state}"),
        Ok(DispatchOutcome::Dropped { request, state }) => {
            println!("dropped: {request} not allowed while lane is {state}")
        }
        Ok(DispatchOutcome::Recorded { kind }) => println!("recorded: {kind}"),
        Err(e) => println!("error: {e}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
