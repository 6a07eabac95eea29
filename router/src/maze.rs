use crate::algo::wavefront::{self, WaveOutcome};
use crate::algo::{blockage, order, traceback};
use crate::error::RouteError;
use crate::grid::{CellKind, DenseGrid, RoutingGrid, cells_of, row_major};
use crate::observer::{NoObserver, StepLevel, StepObserver, reports};
use crate::registry::{Net, NetRegistry};
use maze_common::db::core::Floorplan;
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;
use maze_common::util::config::RouterConfig;
use maze_common::util::profiler::ScopedTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetOutcome {
    Routed,
    Failed,
}

/// Everything one routing run mutates: the grid, the nets and the settings.
pub struct RoutingContext<O: StepObserver = NoObserver> {
    grid: DenseGrid,
    nets: NetRegistry,
    config: RouterConfig,
    observer: O,
}

impl RoutingContext<NoObserver> {
    pub fn new(floorplan: &Floorplan, config: RouterConfig) -> Result<Self, RouteError> {
        Self::with_observer(floorplan, config, NoObserver)
    }
}

impl<O: StepObserver> RoutingContext<O> {
    /// Lays blockages and pins onto a fresh grid. Pins must sit on distinct,
    /// in-bounds, unblocked tiles.
    pub fn with_observer(
        floorplan: &Floorplan,
        config: RouterConfig,
        observer: O,
    ) -> Result<Self, RouteError> {
        let (cols, rows) = (floorplan.cols, floorplan.rows);
        if cols == 0 || rows == 0 {
            return Err(RouteError::EmptyGrid { cols, rows });
        }
        let check = |what: &'static str, at: GridCoord| -> Result<(), RouteError> {
            if floorplan.in_bounds(at) {
                Ok(())
            } else {
                Err(RouteError::OutOfBounds {
                    what,
                    at,
                    cols,
                    rows,
                })
            }
        };

        let mut grid = DenseGrid::new(cols, rows);
        for &b in &floorplan.blockages {
            check("blockage", b)?;
            grid.set_cell(b, CellKind::Blockage, None);
        }

        for (i, data) in floorplan.nets.iter().enumerate() {
            let id = NetId::new(i);
            if data.targets.is_empty() {
                return Err(RouteError::EmptyNet { net: id });
            }
            for (k, pin) in data.pins().enumerate() {
                check(if k == 0 { "source" } else { "target" }, pin)?;
                match grid.kind(pin) {
                    CellKind::Empty => {}
                    CellKind::Blockage => return Err(RouteError::PinOnBlockage { net: id, at: pin }),
                    _ => {
                        return Err(RouteError::PinConflict {
                            first: grid.owner(pin).unwrap_or(id),
                            second: id,
                            at: pin,
                        });
                    }
                }
                let kind = if k == 0 {
                    CellKind::SourceUnrouted
                } else {
                    CellKind::TargetUnrouted
                };
                grid.set_cell(pin, kind, Some(id));
            }
        }

        let nets = NetRegistry::new(floorplan.nets.iter().map(Net::from_data).collect());
        log::info!(
            "Routing grid {}x{} with {} blockages and {} nets",
            cols,
            rows,
            floorplan.blockages.len(),
            nets.len()
        );

        Ok(Self {
            grid,
            nets,
            config,
            observer,
        })
    }

    pub fn grid(&self) -> &DenseGrid {
        &self.grid
    }

    pub fn nets(&self) -> &NetRegistry {
        &self.nets
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn notify(&mut self, level: StepLevel, status: impl FnOnce() -> String) {
        if reports(self.config.step_mode, level) {
            let status = status();
            self.observer.on_step(&status);
        }
    }

    pub fn is_routed(&self, net: NetId) -> bool {
        self.grid.kind(self.nets.get(net).source) == CellKind::SourceRouted
    }

    pub fn outcome(&self, net: NetId) -> NetOutcome {
        if self.is_routed(net) {
            NetOutcome::Routed
        } else {
            NetOutcome::Failed
        }
    }

    pub fn routed_count(&self) -> usize {
        self.nets.ids().filter(|&n| self.is_routed(n)).count()
    }

    /// Wire tiles currently owned by `net`.
    pub fn wire_length(&self, net: NetId) -> usize {
        cells_of(&self.grid, net, CellKind::is_wire).len()
    }

    /// Connects `net` to its nearest unrouted target. `Ok(false)` when no
    /// target is reachable from the net's current tiles.
    pub fn route_destination(&mut self, net: NetId) -> Result<bool, RouteError> {
        let source = self.nets.get(net).source;
        wavefront::seed(&mut self.grid, net);

        let outcome = loop {
            match wavefront::expand(&mut self.grid, net) {
                WaveOutcome::Expanded { round } => self.notify(StepLevel::Wave, || {
                    format!("Wave expansion #{} from source of net {}", round, net)
                }),
                done => break done,
            }
        };

        let routed = match outcome {
            WaveOutcome::Found { target, distance } => {
                self.notify(StepLevel::Wave, || {
                    format!("Target found at {} for net {}", target, net)
                });
                let wire = traceback::trace(
                    &mut self.grid,
                    net,
                    target,
                    source,
                    self.config.traceback_mode,
                )?;
                log::debug!(
                    "Net {}: target {} connected at distance {} ({} new wire tiles)",
                    net,
                    target,
                    distance,
                    wire.len()
                );
                self.notify(StepLevel::Wave, || {
                    format!("Traced back from target {} of net {}", target, net)
                });
                true
            }
            _ => false,
        };

        self.grid.reset_search();
        if routed {
            self.notify(StepLevel::Destination, || {
                format!("A target of net {} has been routed", net)
            });
        }
        Ok(routed)
    }

    /// Connects every target of `net`. On the first unreachable target the
    /// net's partial wiring is ripped up and `Ok(false)` returned.
    pub fn route_net(&mut self, net: NetId) -> Result<bool, RouteError> {
        let targets = self.nets.get(net).num_targets();
        for _ in 0..targets {
            if !self.route_destination(net)? {
                self.rip_up(net);
                log::info!("Net {} is not routable", net);
                self.notify(StepLevel::Net, || format!("Net {} is not routable!", net));
                return Ok(false);
            }
        }

        let source = self.nets.get(net).source;
        self.grid.set_kind(source, CellKind::SourceRouted);
        for c in cells_of(&self.grid, net, |k| k == CellKind::WirePartial) {
            self.grid.set_kind(c, CellKind::WireFull);
        }

        log::info!("Net {} routed ({} wire tiles)", net, self.wire_length(net));
        self.notify(StepLevel::Net, || {
            format!("Net {} has been routed successfully!", net)
        });
        Ok(true)
    }

    /// Returns `net` to its unrouted state: wires cleared, pins unrouted.
    pub fn rip_up(&mut self, net: NetId) {
        let was_routed = self.is_routed(net);
        for c in row_major(self.grid.cols(), self.grid.rows()) {
            if !self.grid.belongs_to(c, net) {
                continue;
            }
            match self.grid.kind(c) {
                CellKind::WireFull | CellKind::WirePartial => {
                    self.grid.set_cell(c, CellKind::Empty, None)
                }
                CellKind::SourceRouted => self.grid.set_kind(c, CellKind::SourceUnrouted),
                CellKind::TargetRouted => self.grid.set_kind(c, CellKind::TargetUnrouted),
                _ => {}
            }
        }
        self.grid.reset_search();

        if was_routed {
            log::debug!("Net {} ripped up", net);
            self.notify(StepLevel::Net, || format!("Net {} has been ripped up!", net));
        }
    }

    pub fn find_blocking_net(&mut self, net: NetId) -> Option<NetId> {
        blockage::find_blocking_net(&mut self.grid, &mut self.nets.conflicts, net)
    }

    /// Routes every net smallest bounding box first. A failing net gets one
    /// rip-up-and-retry: its main blocker is removed, then the failed net and
    /// the blocker are each routed once more. Returns the number of routed nets.
    pub fn route_all(&mut self) -> Result<usize, RouteError> {
        let _timer = ScopedTimer::new("Maze routing");
        self.nets.route_order = order::order_by_bbox(&self.nets.bbox_areas());
        let route_order = self.nets.route_order.clone();
        let total = route_order.len();
        let mut routed = 0usize;

        for net in route_order {
            if self.route_net(net)? {
                routed += 1;
                continue;
            }

            let Some(blocker) = self.find_blocking_net(net) else {
                log::warn!("Net {} failed and no other net's wiring blocks it", net);
                continue;
            };
            log::info!("Ripping up net {} to make room for net {}", blocker, net);
            if self.is_routed(blocker) {
                routed -= 1;
            }
            self.rip_up(blocker);

            if self.route_net(net)? {
                routed += 1;
            }
            if self.route_net(blocker)? {
                routed += 1;
            }
        }

        let final_count = self.routed_count();
        debug_assert_eq!(final_count, routed);
        log::info!(
            "Routing finished! {} out of {} nets have been routed successfully",
            final_count,
            total
        );
        Ok(final_count)
    }
}
