//! Interval placement for items laid out on the tracks of a linear timeline.
//!
//! The engine functions (`find_gaps`, `resolve_placement`, `resize_bounds`,
//! `snap`, `default_start`) are pure and total: they never fail and never
//! hold state between calls. Validation and copy-on-write commits live in
//! [`Timeline`], which is the only place that returns [`PlacementError`].

use thiserror::Error;

mod model;
pub use model::*;
mod gaps;
pub use gaps::*;
mod resolve;
pub use resolve::*;
mod resize;
pub use resize::*;
mod snap;
pub use snap::*;
mod insert;
pub use insert::*;
mod config;
pub use config::*;
mod engine;
pub use engine::*;
mod pointer;
pub use pointer::*;
mod session;
pub use session::*;
mod timeline;
pub use timeline::*;

/// Time in milliseconds. Requested positions may be negative.
pub type Millis = i64;

/// Duration floor applied by shrink and resize operations.
pub const MIN_ITEM_DURATION: Millis = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("track not found: {0}")]
    TrackNotFound(TrackId),
    #[error("item already exists: {0}")]
    DuplicateItem(ItemId),
    #[error("item {item} would overlap {other}")]
    Overlap { item: ItemId, other: ItemId },
    #[error("item {item} ends at {end}ms, past the timeline end at {total}ms")]
    OutOfBounds {
        item: ItemId,
        end: Millis,
        total: Millis,
    },
    #[error("item {item} starts before zero at {start}ms")]
    NegativeStart { item: ItemId, start: Millis },
    #[error("item {item} has non-positive duration {duration}ms")]
    InvalidDuration { item: ItemId, duration: Millis },
}
