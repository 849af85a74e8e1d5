// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory timeline graph and director.
//!
//! [`Timeline`] stores its assets in insertion order. The root lists every
//! output track, including tracks nested in groups; a group lists its own
//! children as well, so a nested track is reachable from both.

use crate::asset::{AssetId, AssetKind, AssetRef, Clip, PropertyName};
use crate::binding::{BoundValue, PlayableBinding};
use crate::director::Director;
use crate::graph::PlayableGraph;
use crate::settings::DirectorSettings;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An asset stored in a timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssetNode {
    name: String,
    kind: AssetKind,
    outputs: Vec<PlayableBinding>,
    /// Tracks only
    clips: Vec<Clip>,
    /// Nested tracks of a group
    children: Vec<AssetId>,
    exposed_name: Option<PropertyName>,
}

impl AssetNode {
    fn new(name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            outputs: Vec::new(),
            clips: Vec::new(),
            children: Vec::new(),
            exposed_name: None,
        }
    }
}

/// A timeline asset graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    root: AssetId,
    assets: IndexMap<AssetId, AssetNode>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new(name: impl Into<String>) -> Self {
        let root = AssetId::new();
        let mut assets = IndexMap::new();
        assets.insert(root, AssetNode::new(name, AssetKind::Timeline));
        Self { root, assets }
    }

    /// Root asset of the timeline
    pub fn root(&self) -> AssetId {
        self.root
    }

    /// Timeline name
    pub fn name(&self) -> &str {
        self.asset_name(self.root).unwrap_or_default()
    }

    /// Add a top-level track
    pub fn add_track(&mut self, kind: AssetKind, name: impl Into<String>) -> Option<AssetId> {
        if !kind.is_track() {
            return None;
        }

        let name = name.into();
        let id = AssetId::new();
        self.assets.insert(id, AssetNode::new(name.clone(), kind));
        self.push_output(self.root, PlayableBinding::asset(name, AssetRef::new(id, kind)));
        Some(id)
    }

    /// Add a track inside a group track
    pub fn add_track_to_group(
        &mut self,
        group: AssetId,
        kind: AssetKind,
        name: impl Into<String>,
    ) -> Option<AssetId> {
        if !kind.is_track() || self.assets.get(&group)?.kind != AssetKind::GroupTrack {
            return None;
        }

        let name = name.into();
        let id = AssetId::new();
        self.assets.insert(id, AssetNode::new(name.clone(), kind));
        let binding = PlayableBinding::asset(name, AssetRef::new(id, kind));
        self.push_output(self.root, binding.clone());
        if let Some(node) = self.assets.get_mut(&group) {
            node.outputs.push(binding);
            node.children.push(id);
        }
        Some(id)
    }

    /// Add a clip to a track
    pub fn add_clip(
        &mut self,
        track: AssetId,
        display_name: impl Into<String>,
        kind: AssetKind,
    ) -> Option<AssetId> {
        if !self.assets.get(&track)?.kind.is_track() {
            return None;
        }

        let display_name = display_name.into();
        let id = AssetId::new();
        self.assets.insert(id, AssetNode::new(display_name.clone(), kind));
        let node = self.assets.get_mut(&track)?;
        node.clips.push(Clip::new(display_name, AssetRef::new(id, kind)));
        Some(id)
    }

    /// Add a root output whose endpoint is not a timeline asset
    pub fn add_external_output(&mut self, stream_name: impl Into<String>, label: impl Into<String>) {
        self.push_output(self.root, PlayableBinding::external(stream_name, label));
    }

    /// Set the exposed name of the source game object an asset references
    pub fn set_exposed_name(&mut self, asset: AssetId, name: impl Into<String>) -> bool {
        match self.assets.get_mut(&asset) {
            Some(node) => {
                node.exposed_name = Some(PropertyName::new(name));
                true
            }
            None => false,
        }
    }

    /// Remove a track with its clips and nested tracks
    pub fn remove_track(&mut self, track: AssetId) -> bool {
        if !self.assets.get(&track).is_some_and(|node| node.kind.is_track()) {
            return false;
        }

        let mut removed = Vec::new();
        let mut pending = vec![track];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.assets.shift_remove(&id) {
                removed.extend(node.clips.iter().map(|clip| clip.asset.id));
                pending.extend(node.children);
                removed.push(id);
            }
        }
        for id in &removed {
            self.assets.shift_remove(id);
        }

        for node in self.assets.values_mut() {
            node.outputs.retain(|binding| match binding.resolve() {
                Some(resolved) => !removed.contains(&resolved.asset.id),
                None => true,
            });
            node.children.retain(|id| !removed.contains(id));
        }
        true
    }

    /// Name of an asset
    pub fn asset_name(&self, asset: AssetId) -> Option<&str> {
        self.assets.get(&asset).map(|node| node.name.as_str())
    }

    /// Get asset count, including the root
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    fn push_output(&mut self, asset: AssetId, binding: PlayableBinding) {
        if let Some(node) = self.assets.get_mut(&asset) {
            node.outputs.push(binding);
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new("Untitled Timeline")
    }
}

impl PlayableGraph for Timeline {
    fn outputs(&self, asset: AssetId) -> Vec<PlayableBinding> {
        self.assets
            .get(&asset)
            .map(|node| node.outputs.clone())
            .unwrap_or_default()
    }

    fn clips(&self, track: AssetId) -> Vec<Clip> {
        self.assets
            .get(&track)
            .map(|node| node.clips.clone())
            .unwrap_or_default()
    }

    fn kind(&self, asset: AssetId) -> Option<AssetKind> {
        self.assets.get(&asset).map(|node| node.kind)
    }

    fn exposed_name(&self, asset: AssetId) -> Option<PropertyName> {
        self.assets.get(&asset)?.exposed_name.clone()
    }
}

/// In-memory director playing a [`Timeline`]
#[derive(Debug, Clone)]
pub struct TimelineDirector {
    timeline: Timeline,
    attached: bool,
    settings: DirectorSettings,
    generic_bindings: IndexMap<AssetId, BoundValue>,
    references: IndexMap<PropertyName, BoundValue>,
    /// Speed per root playable
    speeds: Vec<f64>,
    rebuild_count: usize,
}

impl TimelineDirector {
    /// Create a director playing `timeline`
    pub fn new(timeline: Timeline) -> Self {
        Self::with_settings(timeline, DirectorSettings::default())
    }

    /// Create a director with explicit settings
    pub fn with_settings(timeline: Timeline, settings: DirectorSettings) -> Self {
        Self {
            timeline,
            attached: true,
            settings,
            generic_bindings: IndexMap::new(),
            references: IndexMap::new(),
            speeds: vec![1.0],
            rebuild_count: 0,
        }
    }

    /// Stop playing the timeline; the director then has no playable asset
    pub fn detach(&mut self) {
        self.attached = false;
        self.speeds.clear();
    }

    /// Get the timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Get the mutable timeline
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Value bound to a track
    pub fn generic_binding(&self, asset: AssetId) -> Option<&BoundValue> {
        self.generic_bindings.get(&asset)
    }

    /// Value set on an exposed reference slot
    pub fn reference_value(&self, key: &PropertyName) -> Option<&BoundValue> {
        self.references.get(key)
    }

    /// Number of tracks with a bound value
    pub fn generic_binding_count(&self) -> usize {
        self.generic_bindings.len()
    }

    /// Number of graph rebuilds so far
    pub fn rebuild_count(&self) -> usize {
        self.rebuild_count
    }

    /// Speed of a root playable
    pub fn speed(&self, root_index: usize) -> Option<f64> {
        self.speeds.get(root_index).copied()
    }
}

impl Director for TimelineDirector {
    type Graph = Timeline;

    fn graph(&self) -> &Timeline {
        &self.timeline
    }

    fn playable_asset(&self) -> Option<AssetId> {
        self.attached.then_some(self.timeline.root())
    }

    fn set_generic_binding(&mut self, asset: AssetId, value: BoundValue) {
        self.generic_bindings.insert(asset, value);
    }

    fn set_reference_value(&mut self, key: PropertyName, value: BoundValue) {
        self.references.insert(key, value);
    }

    fn rebuild_graph(&mut self) {
        self.rebuild_count += 1;
    }

    fn root_playable_count(&self) -> usize {
        self.speeds.len()
    }

    fn set_speed(&mut self, speed: f64, root_index: usize) {
        if let Some(slot) = self.speeds.get_mut(root_index) {
            *slot = speed;
        }
    }

    fn settings(&self) -> DirectorSettings {
        self.settings
    }
}
