use crate::types::HealthRes;
use std::fmt::Display;

/// Health service used by the REST server.
///
/// Provides a standardised health response for taskboard processes.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static liveness check: if the process can answer, it is alive.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "taskboard is alive".into(),
        }
    }

    /// Health response that also reflects the outcome of a dependency check (e.g. the task
    /// store).
    ///
    /// # Returns
    /// An `ok` response when `dependency` succeeded, otherwise `ok: false` with the error text.
    pub fn check_with<E: Display>(dependency: Result<(), E>) -> HealthRes {
        match dependency {
            Ok(()) => Self::check_health(),
            Err(e) => HealthRes {
                ok: false,
                message: format!("taskboard is degraded: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_is_ok() {
        assert!(HealthService::check_health().ok);
    }

    #[test]
    fn test_check_with_reports_dependency_failure() {
        let res = HealthService::check_with(Err("store offline"));
        assert!(!res.ok);
        assert!(res.message.contains("store offline"));

        assert_eq!(
            HealthService::check_with::<String>(Ok(())),
            HealthService::check_health()
        );
    }
}
