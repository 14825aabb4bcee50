use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use freeflyer_sim::dynamics::kinematics;
use freeflyer_sim::sim::{self, SimOutcome, Termination};
use freeflyer_sim::types::{Scenario, SimConfig};
use freeflyer_sim::vehicle::presets;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = presets::reach_target();
    let config = SimConfig::default();

    let outcome = match sim::simulate(&scenario, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    print_report(&scenario, &config, &outcome);

    match outcome.termination {
        Termination::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn print_report(scenario: &Scenario, config: &SimConfig, outcome: &SimOutcome) {
    let craft = &scenario.spacecraft;
    let limits = &config.limits;

    println!();
    println!("====================================================================");
    println!("  FREE-FLYER MANIPULATOR SIMULATION — {}", scenario.name);
    println!("====================================================================");
    println!();
    println!("  Spacecraft");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Base mass:     {:>8.2} kg    Inertia:      {:>8.2} kg·m^2",
        craft.mass, craft.inertia
    );
    println!("  Total mass:    {:>8.2} kg", craft.total_mass());
    println!(
        "  Links:         {:>4.2} / {:<4.2} m   Link mass:  {:>4.2} / {:<4.2} kg",
        craft.arm.l1, craft.arm.l2, craft.arm.m1, craft.arm.m2
    );
    println!(
        "  Thruster:      {:>8.3} N     Reach:        {:>8.2} m",
        craft.thruster_force,
        craft.arm.reach()
    );
    println!(
        "  Limits:        q {:.0} deg   dq {:.0} deg/s   omega {:.2} rad/s",
        limits.q_limit.to_degrees(),
        limits.dq_limit.to_degrees(),
        limits.omega_limit
    );
    println!(
        "  Target:        ({:.2}, {:.2}) m   tolerance {:.3} m",
        scenario.target.x, scenario.target.y, scenario.goal_tolerance
    );
    println!();

    println!("  Result");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Status:        {:>10}    Steps:        {:>8}",
        outcome.termination.label(),
        outcome.steps
    );
    if let Termination::Error(e) = &outcome.termination {
        println!("  Reason:        {e}");
    }
    if let (Some(last), Some(min)) = (outcome.history.last(), outcome.min_error()) {
        let pose = kinematics::forward(&last.state.pos, last.state.phi, &last.state.q, &craft.arm);
        println!(
            "  Final error:   {:>8.4} m     Best error:   {:>8.4} m",
            last.end_effector_error.norm(),
            min
        );
        println!(
            "  Final tip:     ({:.3}, {:.3}) m   base ({:.3}, {:.3}) m",
            pose.end_effector.x, pose.end_effector.y, last.state.pos.x, last.state.pos.y
        );
        println!("  Elapsed:       {:>8.1} s", last.time);
    }
    println!();

    // -----------------------------------------------------------------------
    // History table (sampled)
    // -----------------------------------------------------------------------
    println!("  History");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
        "t (s)", "err (m)", "x (m)", "y (m)", "phi(deg)", "q1 (deg)", "q2 (deg)"
    );
    println!("  {}", "─".repeat(66));

    let records = outcome.history.records();
    let sample_interval = (records.len() / 25).max(1);
    for (i, r) in records.iter().enumerate() {
        if i % sample_interval != 0 && i != records.len() - 1 {
            continue;
        }
        let s = &r.state;
        println!(
            "  {:>7.1}  {:>8.4}  {:>8.3}  {:>8.3}  {:>8.2}  {:>8.2}  {:>8.2}",
            r.time,
            r.end_effector_error.norm(),
            s.pos.x,
            s.pos.y,
            s.phi.to_degrees(),
            s.q.x.to_degrees(),
            s.q.y.to_degrees()
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", outcome.steps, config.dt);
    println!("====================================================================");
    println!();
}
