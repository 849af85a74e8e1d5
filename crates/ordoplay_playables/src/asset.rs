// SPDX-License-Identifier: MIT OR Apache-2.0
//! Asset handles, type tags and clips.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an asset in the host graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Uuid);

impl AssetId {
    /// Create a new random asset ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime type tag of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Timeline root
    Timeline,
    /// Generic track
    Track,
    /// Animation track, bound to an animator
    AnimationTrack,
    /// Audio track, bound to an audio source
    AudioTrack,
    /// Activation track, bound to a game object
    ActivationTrack,
    /// Control track
    ControlTrack,
    /// Group track containing other tracks
    GroupTrack,
    /// Generic playable asset
    Playable,
    /// Control clip asset referencing a source game object
    ControlAsset,
}

impl AssetKind {
    /// Get the type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timeline => "TimelineAsset",
            Self::Track => "TrackAsset",
            Self::AnimationTrack => "AnimationTrack",
            Self::AudioTrack => "AudioTrack",
            Self::ActivationTrack => "ActivationTrack",
            Self::ControlTrack => "ControlTrack",
            Self::GroupTrack => "GroupTrack",
            Self::Playable => "PlayableAsset",
            Self::ControlAsset => "ControlPlayableAsset",
        }
    }

    /// Whether assets of this kind are tracks
    pub fn is_track(&self) -> bool {
        matches!(
            self,
            Self::Track
                | Self::AnimationTrack
                | Self::AudioTrack
                | Self::ActivationTrack
                | Self::ControlTrack
                | Self::GroupTrack
        )
    }
}

/// Read-only handle to an asset: identity plus type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset identity
    pub id: AssetId,
    /// Asset type tag
    pub kind: AssetKind,
}

impl AssetRef {
    /// Create a handle
    pub fn new(id: AssetId, kind: AssetKind) -> Self {
        Self { id, kind }
    }
}

impl From<AssetRef> for AssetId {
    fn from(asset: AssetRef) -> Self {
        asset.id
    }
}

impl From<&AssetRef> for AssetId {
    fn from(asset: &AssetRef) -> Self {
        asset.id
    }
}

impl From<&AssetId> for AssetId {
    fn from(id: &AssetId) -> Self {
        *id
    }
}

/// A named, typed item contained by a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    /// Name shown on the timeline
    pub display_name: String,
    /// The playable asset driving this clip
    pub asset: AssetRef,
}

impl Clip {
    /// Create a clip
    pub fn new(display_name: impl Into<String>, asset: AssetRef) -> Self {
        Self {
            display_name: display_name.into(),
            asset,
        }
    }
}

/// Key of an exposed reference slot on a director
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyName(pub String);

impl PropertyName {
    /// Create a property name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_kinds() {
        assert!(AssetKind::AnimationTrack.is_track());
        assert!(AssetKind::GroupTrack.is_track());
        assert!(!AssetKind::ControlAsset.is_track());
        assert!(!AssetKind::Timeline.is_track());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AssetKind::AnimationTrack.name(), "AnimationTrack");
        assert_eq!(AssetKind::ControlAsset.name(), "ControlPlayableAsset");
        assert_eq!(AssetKind::Track.name(), "TrackAsset");
    }

    #[test]
    fn test_property_name() {
        let key = PropertyName::new("spawn_point");
        assert_eq!(key.as_str(), "spawn_point");
        assert_eq!(key.to_string(), "spawn_point");
    }

    #[test]
    fn test_asset_ref_converts_to_id() {
        let asset = AssetRef::new(AssetId::new(), AssetKind::AudioTrack);
        let id: AssetId = (&asset).into();
        assert_eq!(id, asset.id);
    }
}
