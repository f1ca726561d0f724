//! wiring-demo-basic — smallest example for the wiring-design pipeline.
//!
//! Builds a hand-written fixture (a residential street, two candidate
//! poles, one building) and runs a single design request end to end,
//! printing the ranked routes.

use std::time::Instant;

use anyhow::Result;

use wiring_core::{DesignConfig, Point, RequestPhase};
use wiring_features::{FeatureKind, RawGeometry, RawRecord};
use wiring_sim::design_with_config;

// ── Fixture builders ──────────────────────────────────────────────────────────

fn pole(id: &str, pos: Point) -> RawRecord {
    RawRecord::new(FeatureKind::Pole, id, RawGeometry::Point(pos))
}

fn line(id: &str, a: Point, b: Point, line_type: &str, phase: &str, from_pole: &str) -> RawRecord {
    RawRecord::new(FeatureKind::Line, id, RawGeometry::LineString(vec![a, b]))
        .with_field("line_type", line_type)
        .with_field("phase", phase)
        .with_field("from_pole", from_pole)
        .with_field("conductor", "ACSR")
        .with_field("cross_section", "95")
}

fn road(id: &str, pts: Vec<Point>) -> RawRecord {
    RawRecord::new(FeatureKind::Road, id, RawGeometry::LineString(pts)).with_field("classification", "residential")
}

fn building(id: &str, ring: Vec<Point>) -> RawRecord {
    RawRecord::new(FeatureKind::Building, id, RawGeometry::Polygon(ring))
}

/// Oak Street: a 260 m residential road running east, with an LV pole near
/// its midpoint and a consumer set back from the curb a short way further
/// east. One small building sits off the road, clear of the routed path.
fn build_fixture() -> Vec<RawRecord> {
    let p1 = Point::new(0.0, 0.0);
    let p2 = Point::new(260.0, 0.0);
    let pole_pos = Point::new(130.0, 2.0);

    vec![
        road("OAK-ST", vec![p1, p2]),
        pole("POLE-14", pole_pos),
        line("LV-14A", pole_pos, Point::new(pole_pos.x, pole_pos.y - 40.0), "LV", "A", "POLE-14"),
        building("BLD-7", vec![Point::new(60.0, 20.0), Point::new(80.0, 20.0), Point::new(80.0, 35.0), Point::new(60.0, 35.0)]),
    ]
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    println!("=== wiring-demo-basic ===");

    let consumer = Point::new(200.0, 12.0);
    let features = build_fixture();
    println!("Consumer at {:?}, {} raw features", consumer, features.len());

    let request = wiring_sim::DesignRequest::new(consumer, RequestPhase::Single, features);
    let config = DesignConfig::default();

    let t0 = Instant::now();
    let response = design_with_config(&request, &config);
    let elapsed = t0.elapsed();

    println!("Status: {}  ({:.3} ms reported, {:.3} ms wall)", response.status, response.processing_time_ms as f64, elapsed.as_secs_f64() * 1000.0);
    println!("Dropped records: {}", response.diagnostics.dropped.total());
    if !response.diagnostics.rejected_candidates.is_empty() {
        println!("Rejected candidates:");
        for rejected in &response.diagnostics.rejected_candidates {
            println!("  {} — {}", rejected.pole_id.as_str(), rejected.reason);
        }
    }

    println!();
    println!("{:<5} {:<12} {:>10} {:>10} {:>8} {:<10}", "Rank", "Start pole", "Cost", "Distance", "NewPoles", "VD %");
    println!("{}", "-".repeat(60));
    for route in &response.routes {
        println!(
            "{:<5} {:<12} {:>10.0} {:>10.1} {:>8} {:<10.2}",
            route.rank,
            route.start_pole_id.as_str(),
            route.total_cost,
            route.total_distance,
            route.new_poles_count,
            route.voltage_drop.voltage_drop_percent,
        );
    }

    Ok(())
}
