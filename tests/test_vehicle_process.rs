mod common;

use common::*;
use std::sync::Arc;
use toll_sim::{
    config::{PricingConfig, RoadConfig},
    simulation::{
        distance_km, Clock, Coordinate, EventKind, Scheduler, TollPricingPolicy, TollZone,
        VehicleState,
    },
};

fn expected_toll(distance: f64) -> f64 {
    let mut toll = distance * 4.1 + 164.0 + distance * 0.82;
    if distance > 10.0 {
        toll += distance * 1.64;
    }
    toll
}

#[test]
fn stationary_vehicle_at_zone_center_pays_fixed_fee_each_tick() {
    let zones = center_zone();
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &[(13.5, 80.5), (13.5, 80.5)], &zones));

    let summary = scheduler.run_until(100);

    let process = scheduler.process("Vehicle_0").unwrap();
    let account = process.vehicle().account();
    assert_eq!(account.payments(), &[164.0, 164.0]);
    assert!((account.balance() - (100.0 - 328.0)).abs() < 1e-9);
    assert_eq!(process.state(), VehicleState::Completed);
    assert_eq!(summary.completed, 1);

    let crossings: Vec<_> = scheduler
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e.kind, EventKind::ZoneCrossing { .. }))
        .map(|e| e.tick)
        .collect();
    assert_eq!(crossings, vec![0, 1]);
}

#[test]
fn toll_uses_cumulative_distance_from_route_start() {
    let zones = center_zone();
    let route = [(13.5, 80.5), (13.55, 80.5), (13.6, 80.52)];
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &route, &zones));
    scheduler.run_until(100);

    let start = Coordinate::from(route[0]);
    let expected: Vec<f64> = route
        .iter()
        .map(|&p| expected_toll(distance_km(start, Coordinate::from(p))))
        .collect();

    // Last waypoint is more than 10 km from the start, so it carries the
    // congestion surcharge as well.
    assert!(distance_km(start, Coordinate::from(route[2])) > 10.0);

    let payments = scheduler.process("Vehicle_0").unwrap().vehicle().account().payments().to_vec();
    assert_eq!(payments.len(), 3);
    for (paid, want) in payments.iter().zip(&expected) {
        assert!((paid - want).abs() < 1e-9, "paid {paid}, expected {want}");
    }
}

#[test]
fn route_outside_every_zone_accrues_no_debits() {
    let zones = center_zone();
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &[(13.0, 80.0), (13.05, 80.05), (13.1, 80.1)], &zones));
    scheduler.run_to_completion();

    let account = scheduler.process("Vehicle_0").unwrap().vehicle().account();
    assert!(account.payments().is_empty());
    assert_eq!(account.balance(), 100.0);
}

#[test]
fn overlapping_zones_each_charge() {
    let zones: Arc<[TollZone]> = Arc::from(vec![
        TollZone::circle("a", ZONE_CENTER, 0.15, 64),
        TollZone::circle("b", ZONE_CENTER, 0.2, 64),
    ]);
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &[(13.5, 80.5)], &zones));
    scheduler.run_to_completion();

    let account = scheduler.process("Vehicle_0").unwrap().vehicle().account();
    assert_eq!(account.payments(), &[164.0, 164.0]);
}

#[test]
fn contingency_halt_stops_movement_and_debits() {
    let zones = center_zone();
    let route = [(13.5, 80.5); 7];
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &route, &zones));
    let summary = scheduler.run_until(100);

    let process = scheduler.process("Vehicle_0").unwrap();
    assert_eq!(process.state(), VehicleState::HaltedContingency);
    assert_eq!(process.finished_at(), Some(5));
    assert_eq!(process.waypoints_visited(), 5);
    assert_eq!(process.vehicle().stationary_time(), 5);
    assert_eq!(process.vehicle().account().payments().len(), 5);
    assert_eq!(summary.halted, 1);

    let last = scheduler.events().events().last().unwrap();
    assert_eq!(last.tick, 5);
    assert_eq!(last.kind, EventKind::Contingency { stationary_ticks: 5 });
}

#[test]
fn halted_vehicle_does_not_block_others() {
    let zones = center_zone();
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("stuck", &[(13.5, 80.5); 8], &zones));
    scheduler.register(vehicle("mover", &[(13.0, 80.0), (13.1, 80.0), (13.2, 80.0), (13.3, 80.0), (13.4, 80.0), (13.45, 80.0), (13.5, 80.5)], &zones));
    scheduler.run_to_completion();

    assert_eq!(scheduler.process("stuck").unwrap().state(), VehicleState::HaltedContingency);
    let mover = scheduler.process("mover").unwrap();
    assert_eq!(mover.state(), VehicleState::Completed);
    assert_eq!(mover.vehicle().account().payments().len(), 1);
}

#[test]
fn stationary_counter_only_counts_final_waypoint() {
    let zones = center_zone();
    let g = (13.7, 80.7);
    let route = [(13.0, 80.0), g, (13.1, 80.1), (13.2, 80.2), g, g, g];
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &route, &zones));

    assert_eq!(scheduler.step(), Some(0));
    assert_eq!(scheduler.process("Vehicle_0").unwrap().vehicle().stationary_time(), 0);

    let mut observed = Vec::new();
    let mut states = Vec::new();
    while let Some(_tick) = scheduler.step() {
        let process = scheduler.process("Vehicle_0").unwrap();
        observed.push(process.vehicle().stationary_time());
        states.push(process.state());
    }

    assert_eq!(observed, vec![0, 1, 0, 0, 1, 2, 3]);
    assert_eq!(states[1], VehicleState::StationaryAtEnd);
    assert_eq!(states[2], VehicleState::Traveling);
    assert_eq!(states[6], VehicleState::Completed);
    assert_eq!(scheduler.process("Vehicle_0").unwrap().finished_at(), Some(7));
}

#[test]
fn certain_congestion_doubles_every_waypoint() {
    let zones = center_zone();
    let road = RoadConfig {
        congestion_probability: 1.0,
        ..RoadConfig::default()
    };
    let mut scheduler = scheduler(road);
    scheduler.register(vehicle("Vehicle_0", &[(13.0, 80.0), (13.1, 80.0), (13.2, 80.0)], &zones));
    scheduler.run_to_completion();

    let process = scheduler.process("Vehicle_0").unwrap();
    assert_eq!(process.finished_at(), Some(6));
    let congestion_ticks: Vec<_> = scheduler
        .events()
        .events()
        .iter()
        .filter(|e| e.kind == EventKind::Congestion)
        .map(|e| e.tick)
        .collect();
    assert_eq!(congestion_ticks, vec![1, 3, 5]);
}

#[test]
fn time_bound_leaves_partial_state_reportable() {
    let zones = center_zone();
    let route: Vec<(f64, f64)> = (0..10).map(|i| (13.0 + i as f64 * 0.01, 80.0)).collect();
    let mut scheduler = scheduler(calm_road());
    scheduler.register(vehicle("Vehicle_0", &route, &zones));

    let summary = scheduler.run_until(4);

    assert_eq!(summary.ended_at, 4);
    assert_eq!(summary.unfinished, 1);
    let process = scheduler.process("Vehicle_0").unwrap();
    assert_eq!(process.state(), VehicleState::Traveling);
    assert_eq!(process.waypoints_visited(), 4);
    assert_eq!(process.vehicle().position(), Coordinate::from(route[3]));
}

#[test]
fn speed_advisory_is_informational() {
    let zones: Arc<[TollZone]> = Arc::from(Vec::new());
    let mut scheduler = scheduler(calm_road());
    // Roughly 77 km north of the start: beyond section_1 (60) only.
    scheduler.register(vehicle("Vehicle_0", &[(13.0, 80.0), (13.7, 80.0)], &zones));
    scheduler.run_to_completion();

    let advisories: Vec<_> = scheduler
        .events()
        .events()
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::SpeedAdvisory { section, .. } => Some((e.tick, section.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(advisories, vec![(1, "section_1".to_string())]);
    assert_eq!(scheduler.process("Vehicle_0").unwrap().vehicle().account().balance(), 100.0);
}

#[test]
fn unpriceable_toll_is_skipped_without_aborting_the_run() {
    let zones = center_zone();
    let pricing = PricingConfig {
        fixed_fee: f64::INFINITY,
        ..off_peak_pricing()
    };
    let mut scheduler = Scheduler::new(TollPricingPolicy::new(pricing), calm_road(), Some(1)).unwrap();
    scheduler.register(vehicle("Vehicle_0", &[(13.5, 80.5), (13.0, 80.0)], &zones));
    scheduler.register(vehicle("Vehicle_1", &[(13.0, 80.0)], &zones));
    let summary = scheduler.run_to_completion();

    assert_eq!(summary.completed, 2);
    let account = scheduler.process("Vehicle_0").unwrap().vehicle().account();
    assert!(account.payments().is_empty());
    assert!(scheduler
        .events()
        .for_vehicle("Vehicle_0")
        .any(|e| matches!(e.kind, EventKind::PricingRejected { .. })));
}

#[test]
fn out_of_range_clock_hour_rejects_tolls_without_aborting_the_run() {
    let zones = center_zone();
    let policy = TollPricingPolicy::with_clock(off_peak_pricing(), Clock::Fixed { hour: 25 });
    let mut scheduler = Scheduler::new(policy, calm_road(), Some(1)).unwrap();
    scheduler.register(vehicle("Vehicle_0", &[(13.5, 80.5), (13.0, 80.0)], &zones));
    let summary = scheduler.run_to_completion();

    assert_eq!(summary.completed, 1);
    let account = scheduler.process("Vehicle_0").unwrap().vehicle().account();
    assert!(account.payments().is_empty());
    assert_eq!(account.balance(), 100.0);
    assert!(scheduler.events().for_vehicle("Vehicle_0").any(|e| matches!(
        &e.kind,
        EventKind::PricingRejected { reason, .. } if reason.contains("fixed hour 25")
    )));
}
