// SPDX-License-Identifier: MIT OR Apache-2.0
//! Director commands and name-based binding helpers.
//!
//! A [`Director`] is the host object that plays a timeline. It exposes the
//! graph it plays and a handful of mutating commands. [`DirectorExt`] builds
//! the name-based helpers on top of those commands:
//! - Bind a value to tracks selected by track name and/or clip name
//! - Bind a value to exposed reference slots selected by clip name
//! - Set playback speed
//!
//! Every value is type-checked against the closed tables in
//! [`filter`](crate::filter) before it reaches the host.

use crate::asset::{AssetId, AssetKind, AssetRef, PropertyName};
use crate::binding::{BoundValue, ValueKind};
use crate::filter::{
    exposed_reference_kind, generic_binding_kind, property_name, ClipFilter, NameFilter,
    TrackFilter,
};
use crate::graph::PlayableGraph;
use crate::query::GraphQuery;
use crate::settings::{DirectorSettings, RebuildPolicy};
use indexmap::{IndexMap, IndexSet};

/// Host object playing a timeline
pub trait Director {
    /// Graph type exposed by this director
    type Graph: PlayableGraph + ?Sized;

    /// Read access to the played graph
    fn graph(&self) -> &Self::Graph;

    /// Root asset being played, if any
    fn playable_asset(&self) -> Option<AssetId>;

    /// Bind a runtime value to a track
    fn set_generic_binding(&mut self, asset: AssetId, value: BoundValue);

    /// Set an exposed reference slot
    fn set_reference_value(&mut self, key: PropertyName, value: BoundValue);

    /// Rebuild the runtime graph so binding changes take effect
    fn rebuild_graph(&mut self);

    /// Number of root playables in the runtime graph
    fn root_playable_count(&self) -> usize;

    /// Set the playback speed of a root playable
    fn set_speed(&mut self, speed: f64, root_index: usize);

    /// Settings for the binding helpers
    fn settings(&self) -> DirectorSettings {
        DirectorSettings::default()
    }
}

/// Error from a single binding operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    /// Value type does not match the type recorded for the asset's kind
    #[error("Type mismatch on {kind:?} asset {asset:?}: expected {expected:?}, got {found:?}")]
    TypeMismatch {
        /// Target asset
        asset: AssetId,
        /// Type tag of the target asset
        kind: AssetKind,
        /// Value kind the asset accepts, if any
        expected: Option<ValueKind>,
        /// Value kind supplied
        found: ValueKind,
    },

    /// Asset is not part of the played graph
    #[error("Asset not found: {0:?}")]
    UnknownAsset(AssetId),

    /// No root playable at the given index
    #[error("No root playable at index {0}")]
    NoRootPlayable(usize),

    /// Speed is NaN or infinite
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),
}

/// Outcome of a batch binding operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingReport {
    /// Assets that received the value
    pub bound: Vec<AssetId>,
    /// Assets whose binding was aborted
    pub rejected: Vec<(AssetId, BindingError)>,
}

impl BindingReport {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty() && self.rejected.is_empty()
    }

    /// Number of assets that received the value
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

/// Name-based binding helpers for every [`Director`]
pub trait DirectorExt: Director {
    /// Bind a value to a single track, checking its type
    fn bind_generic(&mut self, asset: AssetId, value: BoundValue) -> Result<(), BindingError> {
        apply_generic(self, asset, value)?;
        if self.settings().rebuild == RebuildPolicy::PerBatch {
            rebuild(self);
        }
        Ok(())
    }

    /// Bind a value to every track named `track_name` that accepts it
    fn set_generic_binding_by_track_name(&mut self, track_name: &str, value: BoundValue) -> BindingReport {
        self.set_generic_binding_by_track_and_playable_asset_name(track_name, "", value)
    }

    /// Bind a value to every accepting track holding a clip named `clip_name`
    fn set_generic_binding_by_playable_asset_name(&mut self, clip_name: &str, value: BoundValue) -> BindingReport {
        self.set_generic_binding_by_track_and_playable_asset_name("", clip_name, value)
    }

    /// Bind a value to every accepting track matching both names.
    ///
    /// An empty name matches every track or clip.
    fn set_generic_binding_by_track_and_playable_asset_name(
        &mut self,
        track_name: &str,
        clip_name: &str,
        value: BoundValue,
    ) -> BindingReport {
        let Some(root) = self.playable_asset() else {
            return BindingReport::default();
        };

        let targets: IndexSet<AssetRef> = {
            let graph = self.graph();
            let query = GraphQuery::new(graph);
            let tracks = query.find_bindings([root], &TrackFilter::new(track_name, value.kind));
            query
                .refine(tracks, &ClipFilter::new(graph, clip_name))
                .into_iter()
                .map(|binding| binding.asset)
                .collect()
        };

        let mut report = BindingReport::default();
        for target in targets {
            match apply_generic(self, target.id, value) {
                Ok(()) => report.bound.push(target.id),
                Err(e) => {
                    tracing::warn!("Generic binding aborted: {}", e);
                    report.rejected.push((target.id, e));
                }
            }
        }
        finish_batch(self, &report);
        report
    }

    /// Set every exposed reference slot of clips named `clip_name` that accept the value.
    ///
    /// An empty name matches every clip.
    fn set_reference_value_by_playable_asset_name(&mut self, clip_name: &str, value: BoundValue) -> BindingReport {
        let Some(root) = self.playable_asset() else {
            return BindingReport::default();
        };

        let targets: IndexMap<AssetId, PropertyName> = {
            let graph = self.graph();
            let name = NameFilter::new(clip_name);
            let tracks = GraphQuery::new(graph)
                .find_assets([root], &|_: &str, asset: &AssetRef| asset.kind.is_track());

            let mut targets = IndexMap::new();
            for track in &tracks {
                for clip in graph.clips(track.id) {
                    if !name.matches_name(&clip.display_name)
                        || exposed_reference_kind(clip.asset.kind) != Some(value.kind)
                    {
                        continue;
                    }
                    if let Some(key) = property_name(graph, &clip.asset) {
                        targets.entry(clip.asset.id).or_insert(key);
                    }
                }
            }
            targets
        };

        let policy = self.settings().rebuild;
        let mut report = BindingReport::default();
        for (asset, key) in targets {
            tracing::debug!("Setting reference {} on {:?}", key, asset);
            self.set_reference_value(key, value);
            if policy == RebuildPolicy::PerBinding {
                rebuild(self);
            }
            report.bound.push(asset);
        }
        finish_batch(self, &report);
        report
    }

    /// Set the playback speed of the default root playable
    fn set_playback_speed(&mut self, speed: f64) -> Result<(), BindingError> {
        let root_index = self.settings().default_root_index;
        self.set_playback_speed_at(speed, root_index)
    }

    /// Set the playback speed of the root playable at `root_index`
    fn set_playback_speed_at(&mut self, speed: f64, root_index: usize) -> Result<(), BindingError> {
        if !speed.is_finite() {
            return Err(BindingError::InvalidSpeed(speed));
        }
        if root_index >= self.root_playable_count() {
            return Err(BindingError::NoRootPlayable(root_index));
        }
        self.set_speed(speed, root_index);
        Ok(())
    }
}

impl<D: Director + ?Sized> DirectorExt for D {}

/// Check a value against the track's kind and forward it to the host
fn apply_generic<D: Director + ?Sized>(
    director: &mut D,
    asset: AssetId,
    value: BoundValue,
) -> Result<(), BindingError> {
    let kind = director
        .graph()
        .kind(asset)
        .ok_or(BindingError::UnknownAsset(asset))?;

    let expected = generic_binding_kind(kind);
    if expected != Some(value.kind) {
        return Err(BindingError::TypeMismatch {
            asset,
            kind,
            expected,
            found: value.kind,
        });
    }

    tracing::debug!("Binding {} to {} {:?}", value.kind.name(), kind.name(), asset);
    director.set_generic_binding(asset, value);
    if director.settings().rebuild == RebuildPolicy::PerBinding {
        rebuild(director);
    }
    Ok(())
}

fn finish_batch<D: Director + ?Sized>(director: &mut D, report: &BindingReport) {
    if director.settings().rebuild == RebuildPolicy::PerBatch && !report.bound.is_empty() {
        rebuild(director);
    }
}

fn rebuild<D: Director + ?Sized>(director: &mut D) {
    tracing::debug!("Rebuilding playable graph");
    director.rebuild_graph();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::EntityId;
    use crate::timeline::{Timeline, TimelineDirector};

    #[test]
    fn test_bind_generic_checks_type() {
        let mut timeline = Timeline::new("Intro");
        let audio = timeline.add_track(AssetKind::AudioTrack, "Music").unwrap();
        let mut director = TimelineDirector::new(timeline);

        let result = director.bind_generic(audio, BoundValue::animator(EntityId::new()));
        assert_eq!(
            result,
            Err(BindingError::TypeMismatch {
                asset: audio,
                kind: AssetKind::AudioTrack,
                expected: Some(ValueKind::AudioSource),
                found: ValueKind::Animator,
            })
        );
        assert!(director.generic_binding(audio).is_none());
        assert_eq!(director.rebuild_count(), 0);

        let source = BoundValue::audio_source(EntityId::new());
        director.bind_generic(audio, source).unwrap();
        assert_eq!(director.generic_binding(audio), Some(&source));
        assert_eq!(director.rebuild_count(), 1);
    }

    #[test]
    fn test_bind_generic_unmapped_kind_is_mismatch() {
        let mut timeline = Timeline::new("Intro");
        let control = timeline.add_track(AssetKind::ControlTrack, "Control").unwrap();
        let mut director = TimelineDirector::new(timeline);

        let err = director
            .bind_generic(control, BoundValue::game_object(EntityId::new()))
            .unwrap_err();
        assert!(matches!(err, BindingError::TypeMismatch { expected: None, .. }));
    }

    #[test]
    fn test_bind_generic_unknown_asset() {
        let mut director = TimelineDirector::new(Timeline::new("Intro"));
        let missing = AssetId::new();
        assert_eq!(
            director.bind_generic(missing, BoundValue::animator(EntityId::new())),
            Err(BindingError::UnknownAsset(missing))
        );
    }

    #[test]
    fn test_playback_speed() {
        let mut director = TimelineDirector::new(Timeline::new("Intro"));
        director.set_playback_speed(2.0).unwrap();
        assert_eq!(director.speed(0), Some(2.0));

        assert_eq!(
            director.set_playback_speed_at(1.0, 3),
            Err(BindingError::NoRootPlayable(3))
        );
        assert!(matches!(
            director.set_playback_speed(f64::NAN),
            Err(BindingError::InvalidSpeed(_))
        ));
        assert_eq!(director.speed(0), Some(2.0));
    }

    #[test]
    fn test_detached_director_binds_nothing() {
        let mut timeline = Timeline::new("Intro");
        timeline.add_track(AssetKind::AnimationTrack, "Move").unwrap();
        let mut director = TimelineDirector::new(timeline);
        director.detach();

        let report = director.set_generic_binding_by_track_name("Move", BoundValue::animator(EntityId::new()));
        assert!(report.is_empty());
        assert_eq!(director.rebuild_count(), 0);
    }
}
