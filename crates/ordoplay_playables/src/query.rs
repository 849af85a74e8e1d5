// SPDX-License-Identifier: MIT OR Apache-2.0
//! Predicate-filtered binding and asset queries.
//!
//! Queries read the live host graph on every call and return fully
//! materialized, deduplicated sets in host enumeration order. Results of
//! [`GraphQuery::find_assets`] can be fed back in as roots, so filters can be
//! chained stage by stage.

use crate::asset::{AssetId, AssetRef};
use crate::binding::{PlayableBinding, ResolvedBinding};
use crate::filter::{BindingPredicate, MatchAll};
use crate::graph::PlayableGraph;
use indexmap::IndexSet;

/// Query engine over a borrowed host graph
pub struct GraphQuery<'g, G: ?Sized> {
    graph: &'g G,
}

impl<'g, G: PlayableGraph + ?Sized> GraphQuery<'g, G> {
    /// Create a query engine reading from `graph`
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Bindings of `roots` whose endpoint is a graph asset and which satisfy `predicate`.
    ///
    /// Bindings reached from several roots appear once. An empty root set
    /// returns an empty set without reading the graph.
    pub fn find_bindings<I, P>(&self, roots: I, predicate: &P) -> IndexSet<ResolvedBinding>
    where
        I: IntoIterator,
        I::Item: Into<AssetId>,
        P: BindingPredicate + ?Sized,
    {
        let mut found = IndexSet::new();
        for root in roots {
            let outputs = self.graph.outputs(root.into());
            found.extend(
                outputs
                    .iter()
                    .filter_map(PlayableBinding::resolve)
                    .filter(|binding| predicate.matches(&binding.stream_name, &binding.asset)),
            );
        }
        found
    }

    /// Bindings of `roots` whose endpoint is a graph asset, unfiltered
    pub fn find_all_bindings<I>(&self, roots: I) -> IndexSet<ResolvedBinding>
    where
        I: IntoIterator,
        I::Item: Into<AssetId>,
    {
        self.find_bindings(roots, &MatchAll)
    }

    /// Endpoint assets of [`find_bindings`](Self::find_bindings), deduplicated by identity
    pub fn find_assets<I, P>(&self, roots: I, predicate: &P) -> IndexSet<AssetRef>
    where
        I: IntoIterator,
        I::Item: Into<AssetId>,
        P: BindingPredicate + ?Sized,
    {
        self.find_bindings(roots, predicate)
            .into_iter()
            .map(|binding| binding.asset)
            .collect()
    }

    /// Endpoint assets of every asset binding of `roots`
    pub fn find_all_assets<I>(&self, roots: I) -> IndexSet<AssetRef>
    where
        I: IntoIterator,
        I::Item: Into<AssetId>,
    {
        self.find_assets(roots, &MatchAll)
    }

    /// Narrow an existing result set with a further predicate
    pub fn refine<I, P>(&self, bindings: I, predicate: &P) -> IndexSet<ResolvedBinding>
    where
        I: IntoIterator<Item = ResolvedBinding>,
        P: BindingPredicate + ?Sized,
    {
        bindings
            .into_iter()
            .filter(|binding| predicate.matches(&binding.stream_name, &binding.asset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;
    use crate::filter::NameFilter;
    use crate::timeline::Timeline;

    #[test]
    fn test_external_outputs_are_skipped() {
        let mut timeline = Timeline::new("Intro");
        timeline.add_track(AssetKind::AnimationTrack, "Move").unwrap();
        timeline.add_external_output("Signals", "SignalReceiver");

        let query = GraphQuery::new(&timeline);
        let bindings = query.find_all_bindings([timeline.root()]);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].stream_name, "Move");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let mut timeline = Timeline::new("Intro");
        timeline.add_track(AssetKind::AnimationTrack, "Move").unwrap();

        let query = GraphQuery::new(&timeline);
        assert!(query.find_all_assets(None::<AssetId>).is_empty());
        assert!(query.find_all_assets(Some(AssetId::new())).is_empty());
    }

    #[test]
    fn test_name_filter_is_exact() {
        let mut timeline = Timeline::new("Intro");
        let track1 = timeline.add_track(AssetKind::AudioTrack, "Track1").unwrap();
        timeline.add_track(AssetKind::AudioTrack, "Track10").unwrap();
        timeline.add_track(AssetKind::AudioTrack, "track1").unwrap();

        let query = GraphQuery::new(&timeline);
        let assets = query.find_assets([timeline.root()], &NameFilter::new("Track1"));
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, track1);

        let all = query.find_assets([timeline.root()], &NameFilter::new(""));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_refine_narrows_results() {
        let mut timeline = Timeline::new("Intro");
        timeline.add_track(AssetKind::AnimationTrack, "Move").unwrap();
        timeline.add_track(AssetKind::AudioTrack, "Move").unwrap();

        let query = GraphQuery::new(&timeline);
        let named = query.find_bindings([timeline.root()], &NameFilter::new("Move"));
        let animation = |_: &str, asset: &AssetRef| asset.kind == AssetKind::AnimationTrack;
        let refined = query.refine(named, &animation);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].asset.kind, AssetKind::AnimationTrack);
    }
}
