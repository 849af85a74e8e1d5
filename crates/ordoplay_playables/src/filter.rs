// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding predicates and the closed type tables they are built on.
//!
//! Name filters treat an empty name as "match everything"; any other name
//! must match exactly (case-sensitive). Type filters compare type tags by
//! equality through the tables below. A tag missing from a table never
//! matches.

use crate::asset::{AssetKind, AssetRef, PropertyName};
use crate::binding::ValueKind;
use crate::graph::PlayableGraph;

/// Value kind a track of the given kind accepts as its generic binding
pub fn generic_binding_kind(kind: AssetKind) -> Option<ValueKind> {
    match kind {
        AssetKind::AnimationTrack => Some(ValueKind::Animator),
        AssetKind::AudioTrack => Some(ValueKind::AudioSource),
        AssetKind::ActivationTrack => Some(ValueKind::GameObject),
        _ => None,
    }
}

/// Value kind a clip asset of the given kind accepts as its exposed reference
pub fn exposed_reference_kind(kind: AssetKind) -> Option<ValueKind> {
    match kind {
        AssetKind::ControlAsset => Some(ValueKind::GameObject),
        _ => None,
    }
}

/// Derive the exposed reference key of a clip asset
pub fn property_name<G: PlayableGraph + ?Sized>(graph: &G, asset: &AssetRef) -> Option<PropertyName> {
    match asset.kind {
        AssetKind::ControlAsset => graph.exposed_name(asset.id),
        _ => None,
    }
}

/// Predicate over an output binding's stream name and endpoint asset.
///
/// Predicates must be pure: the same arguments always give the same answer.
pub trait BindingPredicate {
    /// Whether the binding is kept
    fn matches(&self, stream_name: &str, asset: &AssetRef) -> bool;

    /// Combine with another predicate; both must match
    fn and<P: BindingPredicate>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
    {
        And(self, other)
    }
}

impl<F> BindingPredicate for F
where
    F: Fn(&str, &AssetRef) -> bool,
{
    fn matches(&self, stream_name: &str, asset: &AssetRef) -> bool {
        self(stream_name, asset)
    }
}

/// Predicate that keeps every binding
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl BindingPredicate for MatchAll {
    fn matches(&self, _stream_name: &str, _asset: &AssetRef) -> bool {
        true
    }
}

/// Conjunction of two predicates
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(pub A, pub B);

impl<A: BindingPredicate, B: BindingPredicate> BindingPredicate for And<A, B> {
    fn matches(&self, stream_name: &str, asset: &AssetRef) -> bool {
        self.0.matches(stream_name, asset) && self.1.matches(stream_name, asset)
    }
}

/// Exact name filter; empty matches every name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter(Option<String>);

impl NameFilter {
    /// Create a filter. An empty name matches everything.
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            Self(None)
        } else {
            Self(Some(name.to_string()))
        }
    }

    /// Filter that matches every name
    pub fn any() -> Self {
        Self(None)
    }

    /// Whether this filter matches every name
    pub fn is_any(&self) -> bool {
        self.0.is_none()
    }

    /// Test a name against the filter
    pub fn matches_name(&self, name: &str) -> bool {
        self.0.as_deref().map_or(true, |expected| expected == name)
    }
}

impl BindingPredicate for NameFilter {
    fn matches(&self, stream_name: &str, _asset: &AssetRef) -> bool {
        self.matches_name(stream_name)
    }
}

/// Keeps track bindings by stream name and by the value kind the track accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFilter {
    /// Track (stream) name filter
    pub name: NameFilter,
    /// Value kind that will be bound to the track
    pub value_kind: ValueKind,
}

impl TrackFilter {
    /// Create a track filter
    pub fn new(track_name: &str, value_kind: ValueKind) -> Self {
        Self {
            name: NameFilter::new(track_name),
            value_kind,
        }
    }
}

impl BindingPredicate for TrackFilter {
    fn matches(&self, stream_name: &str, asset: &AssetRef) -> bool {
        asset.kind.is_track()
            && self.name.matches_name(stream_name)
            && generic_binding_kind(asset.kind) == Some(self.value_kind)
    }
}

/// Keeps track bindings whose track contains a clip with a matching display name.
///
/// An empty clip name keeps every binding without reading the clips.
pub struct ClipFilter<'g, G: ?Sized> {
    graph: &'g G,
    name: NameFilter,
}

impl<'g, G: PlayableGraph + ?Sized> ClipFilter<'g, G> {
    /// Create a clip filter reading clips from `graph`
    pub fn new(graph: &'g G, clip_name: &str) -> Self {
        Self {
            graph,
            name: NameFilter::new(clip_name),
        }
    }
}

impl<G: PlayableGraph + ?Sized> BindingPredicate for ClipFilter<'_, G> {
    fn matches(&self, _stream_name: &str, asset: &AssetRef) -> bool {
        if self.name.is_any() {
            return true;
        }
        self.graph
            .clips(asset.id)
            .iter()
            .any(|clip| self.name.matches_name(&clip.display_name))
    }
}
