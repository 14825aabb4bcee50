use nalgebra::Vector2;
use tracing::{debug, info, trace, warn};

use crate::dynamics::manipulator;
use crate::dynamics::state::{Actuation, CouplingMode, SimConfig, State};
use crate::error::{Degeneracy, SimError};
use crate::gnc::{Controller, TaskSpaceController};
use crate::physics::{reaction, thruster};
use crate::vehicle::Scenario;
use super::history::{History, HistoryRecord, SimOutcome, Termination};
use super::integrator::euler_step;

// ---------------------------------------------------------------------------
// Single step: controller → arm dynamics → reaction → thruster
// ---------------------------------------------------------------------------

/// Everything applied to `state` during one step, given commanded torque.
///
/// Fails when the arm mass matrix is degenerate or an acceleration is not
/// finite, whichever coupling mode is active.
pub fn actuation(
    state: &State,
    tau: Vector2<f64>,
    scenario: &Scenario,
    config: &SimConfig,
) -> Result<Actuation, Degeneracy> {
    let craft = &scenario.spacecraft;

    let ddq = match config.coupling {
        CouplingMode::Coupled => manipulator::joint_accel(&state.q, &state.dq, &tau, craft)?,
        CouplingMode::Decoupled => tau,
    };

    let tau_reaction = reaction::reaction_torque(&tau);
    let alpha = reaction::base_angular_accel(tau_reaction, craft.inertia);
    let thrust = thruster::thrust(&state.pos, &scenario.target, craft.thruster_force);

    if ddq.iter().any(|v| !v.is_finite()) || !alpha.is_finite() {
        return Err(Degeneracy::NonFiniteAccel);
    }

    Ok(Actuation { tau, tau_reaction, thrust, ddq, alpha })
}

// ---------------------------------------------------------------------------
// Simulation: owns the state and history, steps until a terminal state
// ---------------------------------------------------------------------------

pub struct Simulation<'a> {
    scenario: &'a Scenario,
    config: &'a SimConfig,
    controller: &'a mut dyn Controller,
    state: State,
    history: History,
    termination: Option<Termination>,
}

impl<'a> Simulation<'a> {
    /// Validate the configuration and place the spacecraft at its initial state.
    pub fn new(
        scenario: &'a Scenario,
        config: &'a SimConfig,
        controller: &'a mut dyn Controller,
    ) -> Result<Self, SimError> {
        scenario.validate(config)?;
        controller.validate()?;
        controller.reset();

        debug!(
            scenario = %scenario.name,
            controller = controller.name(),
            dt = config.dt,
            max_steps = config.max_steps,
            "starting simulation"
        );

        Ok(Self {
            scenario,
            config,
            controller,
            state: scenario.initial,
            history: History::with_capacity(config.max_steps),
            termination: None,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// `None` while running.
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Record the current state, test the goal, and advance one step.
    ///
    /// Returns the terminal state once reached; later calls do nothing.
    pub fn step(&mut self) -> Option<&Termination> {
        if self.termination.is_some() {
            return self.termination.as_ref();
        }

        let step = self.history.len();
        let error = self.scenario.end_effector_error(&self.state);
        self.history.push_record(HistoryRecord {
            step,
            time: step as f64 * self.config.dt,
            state: self.state,
            end_effector_error: error,
        });
        trace!(step, error = error.norm(), "step");

        if self.scenario.goal_reached(&self.state) {
            info!(steps = step + 1, error = error.norm(), "converged");
            self.termination = Some(Termination::Converged);
            return self.termination.as_ref();
        }

        let tau = self.controller.control(&self.state, self.scenario);
        let act = match actuation(&self.state, tau, self.scenario, self.config) {
            Ok(act) => act,
            Err(reason) => return self.abort(step, reason),
        };

        let next = euler_step(
            &self.state,
            &act,
            self.scenario.spacecraft.mass,
            &self.config.limits,
            self.config.dt,
        );
        if !next.is_finite() {
            return self.abort(step, Degeneracy::NonFiniteState);
        }
        self.state = next;
        self.history.push_actuation(act);

        if self.history.len() >= self.config.max_steps {
            info!(steps = self.history.len(), error = error.norm(), "step budget exhausted");
            self.termination = Some(Termination::Exhausted);
        }
        self.termination.as_ref()
    }

    /// Stop in the error state, keeping the current (last valid) state.
    fn abort(&mut self, step: usize, reason: Degeneracy) -> Option<&Termination> {
        warn!(step, %reason, "numerical degeneracy, aborting run");
        self.termination = Some(Termination::Error(SimError::NumericalDegeneracy {
            step,
            reason,
            state: self.state,
        }));
        self.termination.as_ref()
    }

    /// Step to a terminal state and hand back the recorded history.
    pub fn run(mut self) -> SimOutcome {
        while self.step().is_none() {}
        let steps = self.history.len();
        SimOutcome {
            termination: self.termination.unwrap_or(Termination::Exhausted),
            history: self.history,
            steps,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Run a scenario with a custom controller.
pub fn simulate_with(
    scenario: &Scenario,
    config: &SimConfig,
    controller: &mut dyn Controller,
) -> Result<SimOutcome, SimError> {
    Ok(Simulation::new(scenario, config, controller)?.run())
}

/// Run a scenario with the default damped-least-squares controller.
pub fn simulate(scenario: &Scenario, config: &SimConfig) -> Result<SimOutcome, SimError> {
    let mut controller = TaskSpaceController::default();
    simulate_with(scenario, config, &mut controller)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
