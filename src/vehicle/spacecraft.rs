// ---------------------------------------------------------------------------
// Manipulator: two rigid links, revolute joints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manipulator {
    pub l1: f64,   // m
    pub l2: f64,   // m
    pub m1: f64,   // kg
    pub m2: f64,   // kg
}

impl Manipulator {
    /// Maximum distance from the shoulder the tip can reach.
    pub fn reach(&self) -> f64 {
        self.l1 + self.l2
    }
}

// ---------------------------------------------------------------------------
// Spacecraft: rigid base with a body-fixed thruster and one arm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Spacecraft {
    pub name: String,
    pub mass: f64,              // kg
    pub inertia: f64,           // kg·m^2, about the base yaw axis
    pub thruster_force: f64,    // N, constant magnitude
    pub arm: Manipulator,
}

impl Spacecraft {
    /// Total mass including both links.
    pub fn total_mass(&self) -> f64 {
        self.mass + self.arm.m1 + self.arm.m2
    }

    /// Translational acceleration the thruster can produce.
    pub fn max_accel(&self) -> f64 {
        self.thruster_force / self.mass
    }
}

// ---------------------------------------------------------------------------
// Spacecraft builder
// ---------------------------------------------------------------------------

pub struct SpacecraftBuilder {
    name: String,
    mass: f64,
    inertia: f64,
    thruster_force: f64,
    l1: f64,
    l2: f64,
    m1: f64,
    m2: f64,
}

impl SpacecraftBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: 10.0,
            inertia: 10.0,
            thruster_force: 0.2,
            l1: 1.0,
            l2: 1.0,
            m1: 5.0,
            m2: 5.0,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn inertia(mut self, v: f64) -> Self { self.inertia = v; self }
    pub fn thruster_force(mut self, v: f64) -> Self { self.thruster_force = v; self }
    pub fn links(mut self, l1: f64, l2: f64) -> Self { self.l1 = l1; self.l2 = l2; self }
    pub fn link_masses(mut self, m1: f64, m2: f64) -> Self { self.m1 = m1; self.m2 = m2; self }

    pub fn build(self) -> Spacecraft {
        Spacecraft {
            name: self.name,
            mass: self.mass,
            inertia: self.inertia,
            thruster_force: self.thruster_force,
            arm: Manipulator {
                l1: self.l1,
                l2: self.l2,
                m1: self.m1,
                m2: self.m2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let c = SpacecraftBuilder::new("Default").build();
        assert_eq!(c.mass, 10.0);
        assert_eq!(c.inertia, 10.0);
        assert_eq!(c.arm.reach(), 2.0);
        assert_eq!(c.total_mass(), 20.0);
        assert!((c.max_accel() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn builder_overrides() {
        let c = SpacecraftBuilder::new("Custom")
            .mass(50.0)
            .links(2.0, 0.5)
            .link_masses(1.0, 2.0)
            .thruster_force(1.0)
            .build();
        assert_eq!(c.name, "Custom");
        assert_eq!(c.arm.l1, 2.0);
        assert_eq!(c.arm.m2, 2.0);
        assert!((c.max_accel() - 0.02).abs() < 1e-15);
    }
}
