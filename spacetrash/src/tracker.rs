//! Keeps one renderable per catalog record and moves them as time advances

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use trash_types::prelude::{GeodeticPosition, OrbitalRecord, RecordId};

use crate::{
    catalog::Catalog,
    layer::{wgs84, RenderLayer},
    propagation::{refresh, PropagationError},
    sim_info::SimulationInfo,
    units::Timestamp,
    FrameComponent,
};

/// A catalog record together with its placement on the layer.
///
/// `placement` is `None` until the record has propagated successfully once.
#[derive(Clone, PartialEq, Debug)]
pub struct TrackedObject<H> {
    pub record: OrbitalRecord,
    pub placement: Option<H>,
    pub last_position: Option<GeodeticPosition>,
}

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
#[error("Record {id} failed to propagate: {error}")]
pub struct RecordFailure {
    pub id: RecordId,
    #[source]
    pub error: PropagationError,
}

/// Outcome of one pass over every tracked object
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct RefreshReport {
    pub timestamp: Timestamp,
    pub recomputed: usize,
    /// Existing placements that were moved
    pub updated: usize,
    /// Placements created during this pass
    pub placed: usize,
    #[serde(skip)]
    pub failures: Vec<RecordFailure>,
    /// Whether the set of failing records differs from the previous pass
    pub failures_changed: bool,
}

impl RefreshReport {
    fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            recomputed: 0,
            updated: 0,
            placed: 0,
            failures: Vec::new(),
            failures_changed: false,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RedrawStage {
    BeforeRedraw,
    AfterRedraw,
}

pub struct FrameEnvironment<'a> {
    pub sim_info: &'a SimulationInfo,
    pub stage: RedrawStage,
}

/// The debris tracker: owns the tracked objects and the layer they're drawn on
pub struct SpaceTrash<L: RenderLayer> {
    objects: Vec<TrackedObject<L::Handle>>,
    layer: L,
    simulate: bool,
    /// Records that failed on the latest pass
    failing: BTreeSet<RecordId>,
}

impl<L: RenderLayer> SpaceTrash<L> {
    pub fn new(layer: L) -> Self {
        Self {
            objects: Vec::new(),
            layer,
            simulate: false,
            failing: BTreeSet::new(),
        }
    }

    /// Replaces the tracked objects with the records of `catalog`, placed at `at`.
    ///
    /// Records that fail to propagate keep their slot without a placement.
    pub fn populate(&mut self, catalog: Catalog, at: Timestamp) -> RefreshReport {
        self.layer.remove_all_renderables();
        self.objects = catalog
            .into_iter()
            .map(|record| TrackedObject {
                record,
                placement: None,
                last_position: None,
            })
            .collect();

        let mut report = RefreshReport::new(at);
        for obj in self.objects.iter_mut() {
            report.recomputed += 1;
            match refresh(&obj.record, at) {
                Ok(position) => {
                    obj.placement = Some(
                        self.layer
                            .add_renderable(&obj.record.label(), wgs84(&position)),
                    );
                    obj.last_position = Some(position);
                    report.placed += 1;
                }
                Err(error) => {
                    warn!(
                        id = %obj.record.id,
                        line1 = %obj.record.line1,
                        line2 = %obj.record.line2,
                        %error,
                        "Failed to place object"
                    );
                    report.failures.push(RecordFailure {
                        id: obj.record.id,
                        error,
                    });
                }
            }
        }

        let failing: BTreeSet<RecordId> = report.failures.iter().map(|f| f.id).collect();
        report.failures_changed = failing != self.failing;
        self.failing = failing;

        info!(
            objects = self.objects.len(),
            placed = report.placed,
            failed = report.failures.len(),
            "Populated layer"
        );
        self.layer.request_redraw();
        report
    }

    pub fn set_simulation(&mut self, enabled: bool) {
        self.simulate = enabled;
        self.layer.request_redraw();
    }

    pub fn is_simulating(&self) -> bool {
        self.simulate
    }

    /// One refresh tick. Does nothing unless simulation is enabled.
    pub fn tick(&mut self, at: Timestamp) -> Option<RefreshReport> {
        if !self.simulate {
            return None;
        }
        Some(self.refresh_all(at))
    }

    /// Propagates every object to `at` and moves its placement.
    ///
    /// A failure leaves that object's placement where it was.
    pub fn refresh_all(&mut self, at: Timestamp) -> RefreshReport {
        let mut report = RefreshReport::new(at);
        for obj in self.objects.iter_mut() {
            report.recomputed += 1;
            let position = match refresh(&obj.record, at) {
                Ok(p) => p,
                Err(error) => {
                    debug!(id = %obj.record.id, %error, "Refresh failed");
                    report.failures.push(RecordFailure {
                        id: obj.record.id,
                        error,
                    });
                    continue;
                }
            };

            match obj.placement {
                Some(handle) => {
                    self.layer.set_position(handle, wgs84(&position));
                    report.updated += 1;
                }
                None => {
                    obj.placement = Some(
                        self.layer
                            .add_renderable(&obj.record.label(), wgs84(&position)),
                    );
                    report.placed += 1;
                }
            }
            obj.last_position = Some(position);
        }

        // Only changes are worth a warning, a decayed object fails on every pass
        let failing: BTreeSet<RecordId> = report.failures.iter().map(|f| f.id).collect();
        if failing != self.failing {
            let newly_failing = failing.difference(&self.failing).count();
            let recovered = self.failing.difference(&failing).count();
            warn!(
                timestamp = %at,
                failed = failing.len(),
                newly_failing,
                recovered,
                recomputed = report.recomputed,
                "Set of objects that can't be refreshed changed"
            );
            report.failures_changed = true;
            self.failing = failing;
        } else if !failing.is_empty() {
            debug!(timestamp = %at, failed = failing.len(), "Objects still can't be refreshed");
        }
        if report.updated + report.placed != 0 {
            self.layer.request_redraw();
        }
        report
    }

    pub fn failing_records(&self) -> &BTreeSet<RecordId> {
        &self.failing
    }

    pub fn objects(&self) -> &[TrackedObject<L::Handle>] {
        &self.objects
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }
}

impl<'a, L: RenderLayer> FrameComponent<'a> for SpaceTrash<L> {
    type Environment = FrameEnvironment<'a>;
    type Report = Option<RefreshReport>;

    fn init(&mut self, _env: &'a Self::Environment) {
        self.layer.request_redraw();
    }

    fn step(&mut self, env: &'a Self::Environment) -> Self::Report {
        match env.stage {
            RedrawStage::BeforeRedraw => None,
            RedrawStage::AfterRedraw => self.tick(env.sim_info.timestamp),
        }
    }
}
