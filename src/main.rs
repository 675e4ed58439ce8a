//! CLI driver and entry point.
//!
//! This module provides the thin integration layer between the keja library
//! and the terminal. It reads filter commands from stdin, feeds them through
//! the event handler, executes the resulting actions on a tokio runtime, and
//! renders a plain-text frame after every accepted state change.
//!
//! # Architecture
//!
//! The driver owns the effectful edges the library abstracts over:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │   Driver Event Loop (tokio select)          │
//! │  ┌──────────────┐      ┌─────────────────┐  │
//! │  │ stdin lines  │      │ mpsc event feed │  │
//! │  │ → commands   │      │ ← timers/fetch  │  │
//! │  └──────────────┘      └─────────────────┘  │
//! │          │                      │           │
//! │          ▼                      ▼           │
//! │        handle_event → actions → spawn       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Debounce timers and catalog fetches run as spawned tasks that deliver
//! their completion events back through the channel, so stale responses are
//! discarded by the library's generation checks, never by the driver.
//!
//! # Commands
//!
//! Filter edits (debounced):
//! - `search <text>`: free-text query
//! - `min <n|->` / `max <n|->`: price bounds, `-` clears
//! - `beds <n|=n|any>` / `baths <n|=n|any>`: at-least, exact, or any
//! - `guests <n|->`: minimum guest capacity
//! - `rating <x|->`: minimum average rating
//! - `saletype <buy|rent|->`: buy/rent selection
//! - `category <house,apartment,land,commercial|->`: property categories
//! - `stay <studio,apartment,villa,cottage,loft|->`: BNB stay types
//! - `instant <on|off>` / `featured <on|off>`: boolean toggles
//! - `sort <recommended|price-low|price-high|rating|reviews>`
//!
//! Immediate:
//! - `commit`: recompute now and persist the query to recents
//! - `reset`: restore default criteria
//! - `retry`: reissue the last catalog fetch
//! - `view <split|list|map>`: pane visibility
//! - `hover <id>` / `leave`: list-side hover
//! - `maphover <id>` / `mapleave`: map-side hover
//! - `click <id>`: marker click (pins the selection, scrolls the list)
//! - `clear`: drop the selection
//! - `help`, `quit`

#![allow(clippy::multiple_crate_versions)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use keja::app::criteria::{CountFilter, CriteriaField, SortKey};
use keja::app::selection::SelectionSource;
use keja::catalog::{CatalogSource, FileCatalog, HttpCatalog};
use keja::domain::listing::{ListingId, PropertyCategory, SaleMode, StayType};
use keja::infrastructure::{expand_tilde, get_data_dir};
use keja::map::{MapStatus, MapSurface, Marker};
use keja::storage::{JsonRecentsStore, RecentsStore};
use keja::{handle_event, Action, AppState, Config, Event, KejaError, ViewMode};

/// Map surface for the terminal: the rendered frame is the whole map pane.
///
/// The CLI has no interactive map; marker clicks arrive as `click` commands
/// instead of through [`take_clicked`](MapSurface::take_clicked).
#[derive(Default)]
struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn status(&self) -> MapStatus {
        MapStatus::Ready
    }

    fn show_markers(&mut self, markers: &[Marker]) {
        tracing::debug!(count = markers.len(), "map markers replaced");
    }

    fn take_clicked(&mut self) -> Option<ListingId> {
        None
    }
}

/// One parsed stdin line.
enum Command {
    /// Feed this event through the handler.
    Feed(Event),
    /// Print the command summary.
    Help,
    /// Leave the event loop.
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    keja::observability::init_tracing(&config);

    let source: Arc<dyn CatalogSource> = if let Some(url) = &config.catalog_url {
        Arc::new(HttpCatalog::new(url.clone()))
    } else if let Some(file) = &config.catalog_file {
        Arc::new(FileCatalog::new(expand_tilde(file)))
    } else {
        anyhow::bail!("config must set catalog_url or catalog_file");
    };
    tracing::debug!(source = source.source_name(), "catalog source selected");

    let data_dir = config
        .data_dir
        .as_deref()
        .map_or_else(get_data_dir, |dir| PathBuf::from(expand_tilde(dir)));
    let mut recents = JsonRecentsStore::new(data_dir.join("recent_searches.json"))
        .context("opening recent-searches store")?;

    let mut state = AppState::new();
    let mut surface = ConsoleMap::default();
    let (tx, mut rx) = mpsc::unbounded_channel();

    step(
        &mut state,
        Event::LoadCatalog {
            request: config.catalog_request(),
        },
        &tx,
        &source,
        &mut recents,
        &mut surface,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                step(&mut state, event, &tx, &source, &mut recents, &mut surface);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_command(line) {
                    Some(Command::Feed(event)) => {
                        step(&mut state, event, &tx, &source, &mut recents, &mut surface);
                    }
                    Some(Command::Help) => print_help(),
                    Some(Command::Quit) => break,
                    None => println!("unrecognized command: {line} (help for a summary)"),
                }
            }
        }
    }

    Ok(())
}

/// Loads configuration from the path argument or the default location.
///
/// An explicit path must load cleanly. The default path falls back to
/// [`Config::default`] when the file is absent but still rejects a file that
/// exists and fails to parse.
fn load_config() -> anyhow::Result<Config> {
    if let Some(path) = std::env::args().nth(1) {
        return Config::load(Path::new(&path)).with_context(|| format!("loading config {path}"));
    }

    let default_path = PathBuf::from(expand_tilde("~/.config/keja/config.toml"));
    match Config::load(&default_path) {
        Ok(config) => Ok(config),
        Err(KejaError::Io(_)) => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("loading config {}", default_path.display())),
    }
}

/// Runs one event through the handler, executes its actions, and re-renders.
fn step(
    state: &mut AppState,
    event: Event,
    tx: &mpsc::UnboundedSender<Event>,
    source: &Arc<dyn CatalogSource>,
    recents: &mut JsonRecentsStore,
    surface: &mut ConsoleMap,
) {
    match handle_event(state, &event) {
        Ok((should_render, actions)) => {
            for action in actions {
                execute(action, tx, source, recents, surface);
            }
            if should_render {
                render_frame(state, recents);
            }
        }
        Err(e) => tracing::warn!(error = %e, "event handling failed"),
    }
}

/// Executes one side-effect action from the handler.
fn execute(
    action: Action,
    tx: &mpsc::UnboundedSender<Event>,
    source: &Arc<dyn CatalogSource>,
    recents: &mut JsonRecentsStore,
    surface: &mut ConsoleMap,
) {
    match action {
        Action::ScheduleDebounce(ticket) => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ticket.delay).await;
                let _ = tx.send(Event::DebounceTick {
                    generation: ticket.generation,
                });
            });
        }
        Action::FetchCatalog {
            generation,
            request,
        } => {
            let tx = tx.clone();
            let source = Arc::clone(source);
            tokio::spawn(async move {
                let event = match source.fetch(&request).await {
                    Ok(listings) => Event::CatalogLoaded {
                        generation,
                        listings,
                    },
                    Err(e) => Event::CatalogFailed {
                        generation,
                        message: e.to_string(),
                    },
                };
                let _ = tx.send(event);
            });
        }
        Action::ShowMarkers(markers) => surface.show_markers(&markers),
        Action::ScrollListTo(id) => println!("list scrolled to {id}"),
        Action::PersistRecent { query } => {
            if let Err(e) = recents.record(&query) {
                tracing::warn!(error = %e, "failed to persist recent search");
            }
        }
    }
}

/// Computes the view model, attaches the recents echo, and writes a frame.
fn render_frame(state: &AppState, recents: &JsonRecentsStore) {
    let mut vm = keja::ui::compute_viewmodel(state);
    if let Ok(recent) = recents.recent() {
        vm.recents = recent.into_iter().map(|r| r.query).collect();
    }

    let stdout = std::io::stdout();
    if let Err(e) = keja::ui::render(&vm, &mut stdout.lock()) {
        tracing::warn!(error = %e, "render failed");
    }
}

fn print_help() {
    println!(
        "filter: search/min/max/beds/baths/guests/rating/saletype/category/stay/instant/featured/sort\n\
         actions: commit reset retry view hover leave maphover mapleave click clear quit"
    );
}

/// Parses one stdin line into a command.
///
/// Returns `None` for unrecognized verbs or malformed operands.
fn parse_command(line: &str) -> Option<Command> {
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    let event = match verb {
        "help" | "h" => return Some(Command::Help),
        "quit" | "q" => return Some(Command::Quit),

        "search" => Event::CriteriaChanged(CriteriaField::Query(rest.to_string())),
        "min" => Event::CriteriaChanged(CriteriaField::PriceMin(parse_clearable(rest)?)),
        "max" => Event::CriteriaChanged(CriteriaField::PriceMax(parse_clearable(rest)?)),
        "beds" => Event::CriteriaChanged(CriteriaField::Beds(parse_count(rest)?)),
        "baths" => Event::CriteriaChanged(CriteriaField::Baths(parse_count(rest)?)),
        "guests" => Event::CriteriaChanged(CriteriaField::MinGuests(parse_clearable(rest)?)),
        "rating" => Event::CriteriaChanged(CriteriaField::MinRating(parse_clearable(rest)?)),
        "saletype" => Event::CriteriaChanged(CriteriaField::Mode(parse_sale_mode(rest)?)),
        "category" => Event::CriteriaChanged(CriteriaField::Categories(parse_set(
            rest,
            parse_category,
        )?)),
        "stay" => Event::CriteriaChanged(CriteriaField::Stays(parse_set(rest, parse_stay)?)),
        "instant" => Event::CriteriaChanged(CriteriaField::InstantBook(parse_toggle(rest)?)),
        "featured" => Event::CriteriaChanged(CriteriaField::Featured(parse_toggle(rest)?)),
        "sort" => Event::CriteriaChanged(CriteriaField::Sort(parse_sort(rest)?)),

        "commit" => Event::CommitSearch,
        "reset" => Event::ResetFilters,
        "retry" => Event::RetryLoad,
        "view" => Event::SetViewMode(parse_view_mode(rest)?),
        "hover" => Event::ListingHovered {
            id: ListingId::new(rest),
            source: SelectionSource::List,
        },
        "leave" => Event::HoverEnded {
            source: SelectionSource::List,
        },
        "maphover" => Event::ListingHovered {
            id: ListingId::new(rest),
            source: SelectionSource::Map,
        },
        "mapleave" => Event::HoverEnded {
            source: SelectionSource::Map,
        },
        "click" => Event::MarkerClicked {
            id: ListingId::new(rest),
        },
        "clear" => Event::ClearSelection,
        _ => return None,
    };

    Some(Command::Feed(event))
}

/// Parses a value that `-` clears back to `None`.
fn parse_clearable<T: FromStr>(rest: &str) -> Option<Option<T>> {
    if rest == "-" {
        Some(None)
    } else {
        rest.parse().ok().map(Some)
    }
}

fn parse_count(rest: &str) -> Option<CountFilter> {
    if rest == "any" {
        return Some(CountFilter::Any);
    }
    if let Some(exact) = rest.strip_prefix('=') {
        return exact.parse().ok().map(CountFilter::Exact);
    }
    rest.parse().ok().map(CountFilter::AtLeast)
}

fn parse_sale_mode(rest: &str) -> Option<Option<SaleMode>> {
    match rest {
        "buy" => Some(Some(SaleMode::Buy)),
        "rent" => Some(Some(SaleMode::Rent)),
        "-" => Some(None),
        _ => None,
    }
}

fn parse_category(name: &str) -> Option<PropertyCategory> {
    match name {
        "house" => Some(PropertyCategory::House),
        "apartment" => Some(PropertyCategory::Apartment),
        "land" => Some(PropertyCategory::Land),
        "commercial" => Some(PropertyCategory::Commercial),
        _ => None,
    }
}

fn parse_stay(name: &str) -> Option<StayType> {
    match name {
        "studio" => Some(StayType::Studio),
        "apartment" => Some(StayType::Apartment),
        "villa" => Some(StayType::Villa),
        "cottage" => Some(StayType::Cottage),
        "loft" => Some(StayType::Loft),
        _ => None,
    }
}

/// Parses a comma-separated set; `-` yields the empty pass-all set.
fn parse_set<T: std::hash::Hash + Eq>(
    rest: &str,
    parse_one: fn(&str) -> Option<T>,
) -> Option<HashSet<T>> {
    if rest == "-" {
        return Some(HashSet::new());
    }
    rest.split(',').map(str::trim).map(parse_one).collect()
}

fn parse_toggle(rest: &str) -> Option<bool> {
    match rest {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn parse_sort(rest: &str) -> Option<SortKey> {
    match rest {
        "recommended" => Some(SortKey::Recommended),
        "price-low" => Some(SortKey::PriceLow),
        "price-high" => Some(SortKey::PriceHigh),
        "rating" => Some(SortKey::Rating),
        "reviews" => Some(SortKey::Reviews),
        _ => None,
    }
}

fn parse_view_mode(rest: &str) -> Option<ViewMode> {
    match rest {
        "split" => Some(ViewMode::Split),
        "list" => Some(ViewMode::List),
        "map" => Some(ViewMode::Map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(line: &str) -> Event {
        match parse_command(line) {
            Some(Command::Feed(event)) => event,
            _ => panic!("expected an event for {line:?}"),
        }
    }

    #[test]
    fn filter_commands_map_to_criteria_fields() {
        assert_eq!(
            feed("search sunny loft"),
            Event::CriteriaChanged(CriteriaField::Query("sunny loft".to_string()))
        );
        assert_eq!(
            feed("min 5000"),
            Event::CriteriaChanged(CriteriaField::PriceMin(Some(5000)))
        );
        assert_eq!(
            feed("max -"),
            Event::CriteriaChanged(CriteriaField::PriceMax(None))
        );
        assert_eq!(
            feed("beds 2"),
            Event::CriteriaChanged(CriteriaField::Beds(CountFilter::AtLeast(2)))
        );
        assert_eq!(
            feed("baths =1"),
            Event::CriteriaChanged(CriteriaField::Baths(CountFilter::Exact(1)))
        );
        assert_eq!(
            feed("sort price-low"),
            Event::CriteriaChanged(CriteriaField::Sort(SortKey::PriceLow))
        );
    }

    #[test]
    fn set_commands_parse_lists_and_clear() {
        let Event::CriteriaChanged(CriteriaField::Categories(set)) = feed("category house,land")
        else {
            panic!("expected categories");
        };
        assert_eq!(
            set,
            HashSet::from([PropertyCategory::House, PropertyCategory::Land])
        );

        let Event::CriteriaChanged(CriteriaField::Stays(set)) = feed("stay -") else {
            panic!("expected stays");
        };
        assert!(set.is_empty());
    }

    #[test]
    fn selection_commands_carry_source_and_id() {
        assert_eq!(
            feed("hover L-1"),
            Event::ListingHovered {
                id: ListingId::new("L-1"),
                source: SelectionSource::List,
            }
        );
        assert_eq!(
            feed("maphover L-2"),
            Event::ListingHovered {
                id: ListingId::new("L-2"),
                source: SelectionSource::Map,
            }
        );
        assert_eq!(feed("click L-3"), Event::MarkerClicked { id: ListingId::new("L-3") });
    }

    #[test]
    fn malformed_operands_are_rejected() {
        assert!(parse_command("min five").is_none());
        assert!(parse_command("sort sideways").is_none());
        assert!(parse_command("category castle").is_none());
        assert!(parse_command("dance").is_none());
    }
}
