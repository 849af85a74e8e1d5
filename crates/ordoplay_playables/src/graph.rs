// SPDX-License-Identifier: MIT OR Apache-2.0
//! Read access to the host-owned playable graph.

use crate::asset::{AssetId, AssetKind, Clip, PropertyName};
use crate::binding::PlayableBinding;

/// Read-only view of a playable graph owned by the host engine.
///
/// Every call reflects the live state of the host graph. Implementations
/// return empty collections (or `None`) for assets they do not know.
pub trait PlayableGraph {
    /// Outgoing bindings of an asset, in host enumeration order
    fn outputs(&self, asset: AssetId) -> Vec<PlayableBinding>;

    /// Clips contained by a track
    fn clips(&self, track: AssetId) -> Vec<Clip>;

    /// Type tag of an asset
    fn kind(&self, asset: AssetId) -> Option<AssetKind>;

    /// Exposed name of the source game object referenced by an asset
    fn exposed_name(&self, asset: AssetId) -> Option<PropertyName>;
}

impl<G: PlayableGraph + ?Sized> PlayableGraph for &G {
    fn outputs(&self, asset: AssetId) -> Vec<PlayableBinding> {
        (**self).outputs(asset)
    }

    fn clips(&self, track: AssetId) -> Vec<Clip> {
        (**self).clips(track)
    }

    fn kind(&self, asset: AssetId) -> Option<AssetKind> {
        (**self).kind(asset)
    }

    fn exposed_name(&self, asset: AssetId) -> Option<PropertyName> {
        (**self).exposed_name(asset)
    }
}
