//! Deterministic ranking and truncation (S10, §4.10).
//!
//! A fixed, total sort key (cost, then distance, then pole id) guarantees
//! the same input always produces the same ranked order and the same
//! truncation, independent of the order candidates were discovered in.

use crate::route::RouteResult;

/// Sort `routes` ascending by `(cost_index, total_distance, start_pole_id)`,
/// truncate to `max_routes`, and assign 1-based `rank` to the survivors.
pub fn rank_routes(mut routes: Vec<RouteResult>, max_routes: usize) -> Vec<RouteResult> {
    routes.sort_by(|a, b| {
        a.cost_index
            .cmp(&b.cost_index)
            .then_with(|| a.total_distance.total_cmp(&b.total_distance))
            .then_with(|| a.start_pole_id.cmp(&b.start_pole_id))
    });
    routes.truncate(max_routes);
    for (i, route) in routes.iter_mut().enumerate() {
        route.rank = i + 1;
    }
    routes
}
