// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output bindings and the runtime values bound to them.

use crate::asset::AssetRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity ID of a runtime object owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of a value that can be bound to an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Scene game object
    GameObject,
    /// Animator component
    Animator,
    /// Audio source component
    AudioSource,
}

impl ValueKind {
    /// Get the type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::GameObject => "GameObject",
            Self::Animator => "Animator",
            Self::AudioSource => "AudioSource",
        }
    }
}

/// A typed runtime value to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundValue {
    /// Target entity
    pub entity: EntityId,
    /// Declared type of the value
    pub kind: ValueKind,
}

impl BoundValue {
    /// Bind a game object
    pub fn game_object(entity: EntityId) -> Self {
        Self {
            entity,
            kind: ValueKind::GameObject,
        }
    }

    /// Bind the animator of an entity
    pub fn animator(entity: EntityId) -> Self {
        Self {
            entity,
            kind: ValueKind::Animator,
        }
    }

    /// Bind the audio source of an entity
    pub fn audio_source(entity: EntityId) -> Self {
        Self {
            entity,
            kind: ValueKind::AudioSource,
        }
    }
}

/// Endpoint of an output binding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingSource {
    /// An asset of the graph
    Asset(AssetRef),
    /// A host value that is not a graph asset
    External(String),
}

/// A named output stream of an asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayableBinding {
    /// Output stream name
    pub stream_name: String,
    /// Endpoint of the stream
    pub source: BindingSource,
}

impl PlayableBinding {
    /// Create a binding whose endpoint is a graph asset
    pub fn asset(stream_name: impl Into<String>, asset: AssetRef) -> Self {
        Self {
            stream_name: stream_name.into(),
            source: BindingSource::Asset(asset),
        }
    }

    /// Create a binding whose endpoint is a non-asset host value
    pub fn external(stream_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
            source: BindingSource::External(label.into()),
        }
    }

    /// Resolve to an asset binding, if the endpoint is a graph asset
    pub fn resolve(&self) -> Option<ResolvedBinding> {
        match &self.source {
            BindingSource::Asset(asset) => Some(ResolvedBinding {
                stream_name: self.stream_name.clone(),
                asset: *asset,
            }),
            BindingSource::External(_) => None,
        }
    }
}

/// An output binding whose endpoint is known to be a graph asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedBinding {
    /// Output stream name
    pub stream_name: String,
    /// Endpoint asset
    pub asset: AssetRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetId, AssetKind};

    #[test]
    fn test_external_binding_does_not_resolve() {
        let binding = PlayableBinding::external("Markers", "SignalReceiver");
        assert!(binding.resolve().is_none());
    }

    #[test]
    fn test_asset_binding_resolves() {
        let asset = AssetRef::new(AssetId::new(), AssetKind::AnimationTrack);
        let resolved = PlayableBinding::asset("Move", asset).resolve().unwrap();
        assert_eq!(resolved.stream_name, "Move");
        assert_eq!(resolved.asset, asset);
    }
}
