//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! driver runtime (main.rs) and the domain/catalog/storage layers. It
//! implements the event-driven pipeline that powers the browse screen.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch / Timer Results ───┘
//! ```
//!
//! Criteria mutations never recompute directly; they arm the debounce gate
//! and the recompute happens when the quiet-period tick comes back through
//! the handler. Catalog responses carry the generation of the fetch that
//! produced them, so a stale response can never overwrite a newer one.
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`criteria`]: Filter/sort criteria types and single-field mutation
//! - [`debounce`]: Generation-counted quiet-period gate
//! - [`filter`]: Pure filter/sort engine over the raw listing set
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode state machine
//! - [`selection`]: Hover/click selection shared by the list and map
//! - [`state`]: Central application state container

pub mod actions;
pub mod criteria;
pub mod debounce;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use criteria::{CountFilter, CriteriaField, FilterCriteria, SortKey};
pub use debounce::{DebounceGate, DebounceTicket};
pub use handler::{handle_event, Event};
pub use modes::ViewMode;
pub use selection::{Selection, SelectionSource};
pub use state::{AppState, CatalogPhase};
