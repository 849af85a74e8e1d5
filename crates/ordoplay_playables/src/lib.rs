// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playable binding utilities for `OrdoPlay` timelines.
//!
//! This crate lets calling code locate tracks and clips by name and bind
//! runtime values (game objects, animators, audio sources) to them:
//! - Predicate-filtered binding and asset queries over a host graph
//! - Multi-stage filtering (track type and name, then clip membership)
//! - Type-checked generic bindings and exposed reference values
//! - Playback speed control
//!
//! ## Architecture
//!
//! The host engine owns the timeline graph. This crate only reads it through
//! the [`PlayableGraph`] trait and mutates it through the [`Director`] trait.
//! [`Timeline`] and [`TimelineDirector`] are in-memory implementations of both.

pub mod asset;
pub mod binding;
pub mod graph;
pub mod query;
pub mod filter;
pub mod director;
pub mod settings;
pub mod timeline;

pub use asset::{AssetId, AssetKind, AssetRef, Clip, PropertyName};
pub use binding::{BindingSource, BoundValue, EntityId, PlayableBinding, ResolvedBinding, ValueKind};
pub use graph::PlayableGraph;
pub use query::GraphQuery;
pub use filter::{And, BindingPredicate, ClipFilter, MatchAll, NameFilter, TrackFilter};
pub use director::{BindingError, BindingReport, Director, DirectorExt};
pub use settings::{DirectorSettings, RebuildPolicy, SettingsError};
pub use timeline::{Timeline, TimelineDirector};
