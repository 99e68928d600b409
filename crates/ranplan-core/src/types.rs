//! Error taxonomy for topology construction and allocation runs.
//!
//! Configuration and construction problems are fatal and surface before any
//! allocation work starts; numerical problems inside the solver are local to
//! a single link and live in [`crate::capacity::SolveError`].

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur while building a topology or configuring a run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    #[error("antenna catalogue is empty")]
    EmptyCatalogue,

    #[error("unknown pathloss model '{0}', choose between 'oh', 'fs' or 'simple'")]
    UnknownPathlossModel(String),

    #[error("duplicate {kind} position ({x}, {y})")]
    DuplicatePosition { kind: &'static str, x: f64, y: f64 },

    #[error("non-finite {kind} coordinate ({x}, {y})")]
    NonFiniteCoordinate { kind: &'static str, x: f64, y: f64 },

    #[error("user at ({x}, {y}) has non-positive demand {demand_bps} bit/s")]
    NonPositiveDemand { x: f64, y: f64, demand_bps: f64 },

    #[error("antenna index {index} is outside the catalogue ({len} models)")]
    BadAntennaIndex { index: usize, len: usize },

    #[error("unknown pylon position ({x}, {y})")]
    UnknownPylon { x: f64, y: f64 },

    #[error("unknown user position ({x}, {y})")]
    UnknownUser { x: f64, y: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = PlanError::UnknownPathlossModel("foo".into());
        assert_eq!(
            format!("{}", e),
            "unknown pathloss model 'foo', choose between 'oh', 'fs' or 'simple'"
        );

        let e = PlanError::DuplicatePosition { kind: "user", x: 1.0, y: 2.0 };
        assert!(format!("{}", e).contains("duplicate user position"));
    }
}
