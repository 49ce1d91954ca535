//! Graph view orchestration.
//!
//! `GraphView` wires the pure pipeline, the logo cache, the dataset
//! synchronizer, the selection tracker and the tooltip presenter into one
//! single-threaded component. Hosts drive it with snapshots, filter changes,
//! interaction events and logo resolutions.

use crate::engine::{ContainerHandle, EngineFactory, EngineOptions};
use crate::interaction::{InteractionEvent, InteractionTracker, Selection, SelectionEffect, SelectionKind};
use crate::sync::{DatasetSynchronizer, SyncOutcome, SyncState};
use crate::tooltip::{CopyFeedback, Tooltip, TooltipContext, TooltipSize, ViewportBounds, present};
use chrono::{DateTime, Utc};
use dexscan_data::logos::{LogoCache, LogoResolution};
use dexscan_domain::chain::Chain;
use dexscan_domain::snapshot::PoolSnapshot;
use dexscan_graph::filter::{FilterSelection, MIN_GRAPH_TOKENS};
use dexscan_graph::model::EnrichedGraph;
use dexscan_graph::pipeline::{GraphFrame, GraphPipeline};
use dexscan_graph::style::{StyleConfig, StyleEnricher};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

/// Configuration for a [`GraphView`].
#[derive(Debug, Clone, Default)]
pub struct GraphViewConfig {
    /// Chain used for explorer and pool links.
    pub chain: Chain,
    pub style: StyleConfig,
    pub engine: EngineOptions,
    pub tooltip_size: TooltipSize,
}

/// Shown instead of an empty canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphPrompt {
    /// Too few tokens are selected.
    SelectTokens { min_tokens: usize },
    /// The selection matches no pools.
    NoMatchingPools,
}

impl fmt::Display for GraphPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphPrompt::SelectTokens { min_tokens } => {
                write!(f, "Select at least {min_tokens} tokens to display the graph")
            }
            GraphPrompt::NoMatchingPools => {
                write!(f, "No pools match the selected tokens and protocols")
            }
        }
    }
}

/// Result of feeding the view new inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// A prompt replaces the graph; any engine was torn down.
    Prompt(GraphPrompt),
    /// The frame was handed to the synchronizer.
    Synced(SyncOutcome),
    /// The frame is the one already on screen.
    Unchanged,
    /// The view has been unmounted and ignores input.
    Unmounted,
}

/// The graph view component.
pub struct GraphView<F: EngineFactory> {
    chain: Chain,
    tooltip_size: TooltipSize,
    pipeline: GraphPipeline,
    synchronizer: DatasetSynchronizer<F>,
    tracker: InteractionTracker,
    logos: LogoCache,
    container: Option<ContainerHandle>,
    snapshot: PoolSnapshot,
    selection: FilterSelection,
    frame: Option<Arc<GraphFrame>>,
    prompt: Option<GraphPrompt>,
    copy: CopyFeedback,
    mounted: bool,
}

impl<F: EngineFactory> GraphView<F> {
    /// Unmounted view. Nothing renders until a container is attached.
    pub fn new(factory: F, logos: LogoCache, config: GraphViewConfig) -> Self {
        let enricher = StyleEnricher::new(config.style, logos.cdn().clone());
        Self {
            chain: config.chain,
            tooltip_size: config.tooltip_size,
            pipeline: GraphPipeline::new(enricher),
            synchronizer: DatasetSynchronizer::new(factory, config.engine),
            tracker: InteractionTracker::new(),
            logos,
            container: None,
            snapshot: PoolSnapshot::default(),
            selection: FilterSelection::default(),
            frame: None,
            prompt: Some(GraphPrompt::SelectTokens {
                min_tokens: MIN_GRAPH_TOKENS,
            }),
            copy: CopyFeedback::new(),
            mounted: true,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame(&self) -> Option<&Arc<GraphFrame>> {
        self.frame.as_ref()
    }

    pub fn prompt(&self) -> Option<GraphPrompt> {
        self.prompt
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.tracker.selection()
    }

    pub fn synchronizer(&self) -> &DatasetSynchronizer<F> {
        &self.synchronizer
    }

    pub fn synchronizer_mut(&mut self) -> &mut DatasetSynchronizer<F> {
        &mut self.synchronizer
    }

    /// Binds the view to its container, mounting the engine if a frame is
    /// waiting.
    pub fn attach_container(&mut self, container: ContainerHandle) -> Option<SyncOutcome> {
        if !self.mounted {
            return None;
        }
        self.container = Some(container);
        let frame = self.frame.clone()?;
        if self.synchronizer.state() == SyncState::Initialized {
            return None;
        }
        Some(self.synchronizer.sync(&frame.graph, self.container.as_ref()))
    }

    /// Feeds a new pool snapshot and filter selection.
    pub fn update(&mut self, snapshot: PoolSnapshot, selection: &FilterSelection) -> ViewUpdate {
        if !self.mounted {
            return ViewUpdate::Unmounted;
        }
        self.snapshot = snapshot;
        self.selection = selection.clone();

        if !selection.has_minimum_tokens() {
            return self.show_prompt(GraphPrompt::SelectTokens {
                min_tokens: MIN_GRAPH_TOKENS,
            });
        }

        let frame = self
            .pipeline
            .run(&self.snapshot, &self.selection, &self.logos.snapshot());
        if frame.graph.is_empty() {
            return self.show_prompt(GraphPrompt::NoMatchingPools);
        }
        self.render(frame)
    }

    /// Applies a finished logo lookup. Ignored after unmount or when the
    /// token is no longer in the graph.
    pub fn on_logo_resolved(&mut self, resolution: &LogoResolution) -> Option<SyncOutcome> {
        if !self.mounted {
            return None;
        }
        let frame = self.frame.as_ref()?;
        if frame.graph.node(&resolution.address).is_none() {
            debug!(address = %resolution.address, "Discarding logo for token not in graph");
            return None;
        }
        resolution.url.as_ref()?;

        let frame = self
            .pipeline
            .run(&self.snapshot, &self.selection, &self.logos.snapshot());
        match self.render(frame) {
            ViewUpdate::Synced(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Applies every resolution already queued on `events`. Returns the
    /// number of resolutions received.
    pub fn drain_logo_resolutions(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<LogoResolution>,
    ) -> usize {
        let mut received = 0;
        while let Ok(resolution) = events.try_recv() {
            received += 1;
            self.on_logo_resolved(&resolution);
        }
        received
    }

    /// Routes an interaction event through the tracker to the engine.
    pub fn handle_event(&mut self, event: &InteractionEvent) -> Vec<SelectionEffect> {
        if !self.mounted {
            return Vec::new();
        }
        let effects = self.tracker.handle(event);
        if !effects.is_empty() {
            self.copy.reset();
        }
        self.synchronizer.apply_selection(&effects);
        effects
    }

    /// Tooltip for the current selection, computed from live data.
    pub fn tooltip(&self, bounds: ViewportBounds, now: DateTime<Utc>) -> Option<Tooltip> {
        let frame = self.frame.as_ref()?;
        let ctx = TooltipContext {
            snapshot: &self.snapshot,
            graph: &frame.graph,
            chain: self.chain,
            now,
        };
        present(self.tracker.selection(), &ctx, self.tooltip_size, bounds)
    }

    /// Returns the value to place on the clipboard for the current
    /// selection and starts the "Copied!" acknowledgement.
    pub fn copy_selection(&mut self, now: Instant) -> Option<String> {
        let selection = self.tracker.selection()?;
        let graph = &self.frame.as_ref()?.graph;
        let value = match selection.kind {
            SelectionKind::Node => graph.node(&selection.id)?.id.clone(),
            SelectionKind::Edge => graph.edge(&selection.id)?.pool_id.clone(),
        };
        self.copy.mark_copied(now);
        Some(value)
    }

    pub fn copy_label(&self, now: Instant) -> &'static str {
        self.copy.label(now)
    }

    /// Destroys the engine and releases every dataset. Later input is
    /// ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.tracker.clear();
        self.copy.reset();
        self.synchronizer.teardown();
        self.pipeline.invalidate();
        self.frame = None;
        self.container = None;
        self.mounted = false;
        info!(session = %self.synchronizer.session_id(), "Graph view unmounted");
    }

    fn show_prompt(&mut self, prompt: GraphPrompt) -> ViewUpdate {
        self.tracker.clear();
        self.frame = None;
        self.synchronizer
            .sync(&EnrichedGraph::default(), self.container.as_ref());
        self.prompt = Some(prompt);
        debug!(%prompt, "Showing graph prompt");
        ViewUpdate::Prompt(prompt)
    }

    fn render(&mut self, frame: Arc<GraphFrame>) -> ViewUpdate {
        self.prompt = None;
        let unchanged = self
            .frame
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &frame));
        if unchanged && self.synchronizer.state() == SyncState::Initialized {
            return ViewUpdate::Unchanged;
        }

        let outcome = self.synchronizer.sync(&frame.graph, self.container.as_ref());
        self.logos.request_missing(frame.tokens());

        let graph = &frame.graph;
        let effects = self.tracker.retain(|s| match s.kind {
            SelectionKind::Node => graph.node(&s.id).is_some(),
            SelectionKind::Edge => graph.edge(&s.id).is_some(),
        });
        self.synchronizer.apply_selection(&effects);

        self.frame = Some(frame);
        ViewUpdate::Synced(outcome)
    }
}

impl<F: EngineFactory> Drop for GraphView<F> {
    fn drop(&mut self) {
        self.unmount();
    }
}
