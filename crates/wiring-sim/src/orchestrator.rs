//! S11 orchestrator (§4.11): drives S1-S10 in order for one request,
//! aggregating diagnostics and producing exactly one [`Outcome`].
//!
//! One driving function walks a fixed stage sequence, calls an observer at
//! the boundaries, and returns a single result rather than unwinding
//! partway through. A design request has no suspension points (§5): every
//! stage here runs to completion before the next begins.

use std::time::Instant;

use tracing::{debug, info, info_span};

use wiring_core::{DesignConfig, RequestPhase};
use wiring_design::{allocate_new_poles, compute_voltage_drop, estimate_cost, rank_routes, DesignError, RouteResult};
use wiring_features::normalize_batch;
use wiring_select::{select_candidates, Candidate, SelectError};
use wiring_spatial::{astar_outcome, fast_track_path, validate_path, NodeOrigin, ReachOutcome, RoadGraphBuilder, SpatialError, SpatialIndex};

use crate::observer::{DesignObserver, NoopObserver};
use crate::request::DesignRequest;
use crate::response::{Diagnostics, DesignResponse, Outcome, RejectedCandidate};

/// Run one design request against the default [`DesignConfig`], discarding
/// observer callbacks.
pub fn design(request: &DesignRequest) -> DesignResponse {
    design_with(request, &DesignConfig::default(), &mut NoopObserver)
}

/// Run one design request against an explicit configuration, discarding
/// observer callbacks.
pub fn design_with_config(request: &DesignRequest, config: &DesignConfig) -> DesignResponse {
    design_with(request, config, &mut NoopObserver)
}

/// Run one design request, reporting progress through `observer`.
pub fn design_with(request: &DesignRequest, config: &DesignConfig, observer: &mut dyn DesignObserver) -> DesignResponse {
    let span = info_span!("design_request", phase = %request.phase, consumer = %request.consumer);
    let _enter = span.enter();

    let start = Instant::now();
    let mut diagnostics = Diagnostics::default();

    macro_rules! finish {
        ($status:expr) => {
            finish!($status, None)
        };
        ($status:expr, $message:expr) => {{
            let status = $status;
            observer.on_request_end(status);
            info!(status = %status, elapsed_ms = start.elapsed().as_millis(), "design request complete");
            return DesignResponse {
                status,
                request_spec: request.phase.to_string(),
                consumer_coord: request.consumer,
                routes: Vec::new(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                diagnostics,
                error_message: $message,
            };
        }};
    }

    macro_rules! check_stage_boundary {
        () => {
            if request.check_cancelled() {
                finish!(Outcome::Cancelled);
            }
            if start.elapsed() >= config.request_timeout {
                finish!(Outcome::Timeout);
            }
        };
    }

    // ── S1: normalize ────────────────────────────────────────────────────
    let (features, dropped) = normalize_batch(&request.features);
    diagnostics.dropped = dropped;
    observer.on_normalized(&diagnostics.dropped);
    debug!(dropped = diagnostics.dropped.total(), "normalization complete");
    check_stage_boundary!();

    // ── S2: spatial index ────────────────────────────────────────────────
    let index = SpatialIndex::build(&features);

    // ── S3: candidate selection ──────────────────────────────────────────
    let candidates = match select_candidates(&features.poles, request.consumer, request.phase, config) {
        Ok(c) => c,
        Err(SelectError::NoCandidate) => finish!(Outcome::NoCandidate),
    };
    observer.on_candidates_selected(candidates.len());
    check_stage_boundary!();

    // ── S4: road graph + attachment ──────────────────────────────────────
    let mut builder = RoadGraphBuilder::new(config);
    builder.add_roads(&features.roads);
    builder.stitch_disconnected_roads(config.snap_tolerance_m);

    // A missing consumer attachment is not fatal on its own: fast-track
    // candidates (§4.3/§4.5) reach the consumer by a direct segment and
    // never touch the road graph, so they can still be served. It only
    // becomes `NoRoadAccess` once we know no fast-track candidate exists.
    let consumer_node = match builder.attach_point(request.consumer, NodeOrigin::Consumer, config.max_attach_m) {
        Ok(node) => Some(node),
        Err(SpatialError::NoRoadAccess) => None,
        Err(err @ SpatialError::NodeNotFound(_)) => {
            tracing::error!(error = %err, "internal invariant violated while attaching consumer to road graph");
            finish!(Outcome::InternalError, Some(err.to_string()))
        }
    };
    if consumer_node.is_none() && !candidates.iter().any(|c| c.is_fast_track) {
        finish!(Outcome::NoRoadAccess);
    }

    let mut attached: Vec<(Candidate, Option<wiring_core::NodeId>)> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match builder.attach_point(candidate.position, NodeOrigin::PoleAttach, config.max_attach_m) {
            Ok(node) => attached.push((candidate, Some(node))),
            Err(_) => {
                diagnostics.rejected_candidates.push(RejectedCandidate {
                    pole_id: candidate.pole_id.clone(),
                    reason: "no road access within max_attach_m".to_string(),
                });
                observer.on_candidate_rejected(&candidate.pole_id, "no road access within max_attach_m");
                attached.push((candidate, None));
            }
        }
    }

    let graph = builder.build();
    observer.on_graph_built(graph.node_count(), graph.edge_count());
    check_stage_boundary!();

    // ── S5-S9: per-candidate pathfinding, validation, allocation, pricing ─
    let phase_count = request.phase.phase_count();
    let load_kw = request.load_kw.unwrap_or_else(|| config.default_load_kw(phase_count));

    let mut any_over_distance = false;
    let mut any_other_rejection = false;
    let mut accepted: Vec<RouteResult> = Vec::new();

    for (candidate, node) in &attached {
        check_stage_boundary!();

        let path = if candidate.is_fast_track {
            fast_track_path(request.consumer, candidate.position)
        } else {
            let (Some(consumer_node), Some(candidate_node)) = (consumer_node, node) else {
                any_other_rejection = true;
                reject(&mut diagnostics, observer, candidate, "no road access within max_attach_m");
                continue;
            };
            match astar_outcome(&graph, consumer_node, *candidate_node, config.max_distance_m) {
                ReachOutcome::Reached(path) => path,
                ReachOutcome::ExceededMaxDistance => {
                    any_over_distance = true;
                    reject(&mut diagnostics, observer, candidate, "routed path exceeded max_distance_m");
                    continue;
                }
                ReachOutcome::Unreachable => {
                    any_other_rejection = true;
                    reject(&mut diagnostics, observer, candidate, "no route to this candidate in the road graph");
                    continue;
                }
            }
        };

        if let Err(crossing) = validate_path(&path.polyline, &features.lines, &index) {
            any_other_rejection = true;
            reject(&mut diagnostics, observer, candidate, &format!("strictly crosses existing line {}", crossing.line_id));
            continue;
        }

        let new_poles = match allocate_new_poles(&path.polyline, path.total_length_m, path.fast_track, &features.buildings, &index, config) {
            Ok(poles) => poles,
            Err(DesignError::BuildingBlocked { arc_len_m }) => {
                any_other_rejection = true;
                reject(&mut diagnostics, observer, candidate, &format!("new pole at arc-length {arc_len_m:.1}m blocked by a building"));
                continue;
            }
        };

        let cost = estimate_cost(path.total_length_m, new_poles.len(), phase_count, load_kw, config);
        let voltage_drop = compute_voltage_drop(path.total_length_m, load_kw, &cost.wire_spec, candidate.has_hv, phase_count, config);
        let source_voltage_type = find_voltage_class(&features.poles, &candidate.pole_id);

        observer.on_candidate_accepted(&candidate.pole_id);
        accepted.push(RouteResult {
            rank: 0,
            total_cost: cost.total_cost,
            cost_index: cost.cost_index,
            total_distance: path.total_length_m,
            start_pole_id: candidate.pole_id.clone(),
            start_pole_coord: candidate.position,
            new_poles_count: new_poles.len(),
            path_coordinates: path.polyline,
            new_pole_coordinates: new_poles,
            wire_cost: cost.wire_cost,
            pole_cost: cost.pole_cost,
            labor_cost: cost.labor_cost,
            overhead_cost: cost.overhead_cost,
            profit_cost: cost.profit_cost,
            pole_spec: cost.pole_spec,
            wire_spec: cost.wire_spec,
            source_voltage_type,
            source_phase_type: phase_count,
            voltage_drop,
        });
    }

    // ── S10: rank ─────────────────────────────────────────────────────────
    if accepted.is_empty() {
        if any_over_distance && !any_other_rejection {
            finish!(Outcome::OverDistance);
        }
        finish!(Outcome::NoRoute);
    }

    let ranked = rank_routes(accepted, config.max_routes);
    let status = Outcome::Success;
    observer.on_request_end(status);
    info!(status = %status, routes = ranked.len(), elapsed_ms = start.elapsed().as_millis(), "design request complete");

    DesignResponse {
        status,
        request_spec: request.phase.to_string(),
        consumer_coord: request.consumer,
        routes: ranked,
        processing_time_ms: start.elapsed().as_millis() as u64,
        diagnostics,
        error_message: None,
    }
}

fn reject(diagnostics: &mut Diagnostics, observer: &mut dyn DesignObserver, candidate: &Candidate, reason: &str) {
    observer.on_candidate_rejected(&candidate.pole_id, reason);
    diagnostics.rejected_candidates.push(RejectedCandidate { pole_id: candidate.pole_id.clone(), reason: reason.to_string() });
}

fn find_voltage_class(poles: &[wiring_features::Pole], pole_id: &wiring_core::PoleId) -> wiring_core::VoltageClass {
    poles.iter().find(|p| &p.id == pole_id).map(|p| p.voltage_class).unwrap_or_default()
}
