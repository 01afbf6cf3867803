//! The decision engine: a pure mapping from (role set, requirement) to a verdict.

use crate::decision::{Decision, DenyReason};
use crate::requirement::Requirement;
use crate::role::RoleSet;

/// Evaluate whether `held` satisfies `requirement`
///
/// Pure and deterministic: the same inputs always yield the same
/// [`Decision`], with no time, environment, or ordering dependence, which is
/// what makes the engine testable without any HTTP or storage fixture.
/// Evaluation is infallible; the only outcomes are `Allow` and `Deny`.
#[must_use]
pub fn evaluate(held: &RoleSet, requirement: &Requirement) -> Decision {
    match requirement {
        Requirement::AnyOf(required) => {
            if required.is_empty() {
                Decision::Deny(DenyReason::EmptyRequirement)
            } else if required.iter().any(|role| held.contains(role)) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NoMatchingRole)
            }
        }
        Requirement::AllOf(required) => {
            if required.is_empty() {
                Decision::Deny(DenyReason::EmptyRequirement)
            } else if required.iter().all(|role| held.contains(role)) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::MissingRoles)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn role(name: &str) -> Role {
        Role::new(name).unwrap()
    }

    fn roles(names: &[&str]) -> RoleSet {
        RoleSet::from_names(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_any_of_allows_on_intersection() {
        let req = Requirement::any_of([role("admin")]);
        assert_eq!(evaluate(&roles(&["admin"]), &req), Decision::Allow);
    }

    #[test]
    fn test_any_of_denies_without_intersection() {
        let req = Requirement::any_of([role("admin")]);
        assert_eq!(
            evaluate(&roles(&["user"]), &req),
            Decision::Deny(DenyReason::NoMatchingRole)
        );
    }

    #[test]
    fn test_any_of_allows_multi_role_principal() {
        // A principal holding admin+subscriber passes any route whose
        // AnyOf list intersects their set.
        let held = roles(&["admin", "subscriber"]);
        assert_eq!(
            evaluate(&held, &Requirement::any_of([role("subscriber")])),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&held, &Requirement::any_of([role("admin")])),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&held, &Requirement::any_of([role("user")])),
            Decision::Deny(DenyReason::NoMatchingRole)
        );
    }

    #[test]
    fn test_empty_role_set_denied() {
        let req = Requirement::any_of([role("admin")]);
        assert_eq!(
            evaluate(&RoleSet::empty(), &req),
            Decision::Deny(DenyReason::NoMatchingRole)
        );
    }

    #[test]
    fn test_empty_requirement_always_denies() {
        for req in [Requirement::any_of([]), Requirement::all_of([])] {
            assert_eq!(
                evaluate(&RoleSet::empty(), &req),
                Decision::Deny(DenyReason::EmptyRequirement)
            );
            assert_eq!(
                evaluate(&roles(&["admin", "user", "subscriber"]), &req),
                Decision::Deny(DenyReason::EmptyRequirement)
            );
        }
    }

    #[test]
    fn test_all_of_requires_every_role() {
        let req = Requirement::all_of([role("admin"), role("auditor")]);
        assert_eq!(
            evaluate(&roles(&["admin"]), &req),
            Decision::Deny(DenyReason::MissingRoles)
        );
        assert_eq!(evaluate(&roles(&["admin", "auditor"]), &req), Decision::Allow);
        assert_eq!(
            evaluate(&roles(&["admin", "auditor", "user"]), &req),
            Decision::Allow
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let held = roles(&["user", "subscriber"]);
        let req = Requirement::any_of([role("user"), role("admin")]);
        let first = evaluate(&held, &req);
        for _ in 0..100 {
            assert_eq!(evaluate(&held, &req), first);
        }
    }

    #[test]
    fn test_case_sensitive_matching() {
        let req = Requirement::any_of([role("admin")]);
        assert_eq!(
            evaluate(&roles(&["Admin"]), &req),
            Decision::Deny(DenyReason::NoMatchingRole)
        );
    }
}
