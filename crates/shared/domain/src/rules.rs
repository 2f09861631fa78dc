//! Business-rule runner.
//!
//! Rules are checked in the order they are listed and the first failure
//! wins. [`BusinessRules::run`] inspects checks that were already
//! evaluated; [`BusinessRules::run_lazy`] awaits checks one at a time and
//! stops evaluating as soon as one fails.

use futures::future::BoxFuture;

use crate::result::{Failure, Outcome, ServiceResult};

/// A deferred rule check. Store errors surface as `Err(E)`.
pub type RuleCheck<'a, E> = BoxFuture<'a, Result<Outcome, E>>;

pub struct BusinessRules;

impl BusinessRules {
    /// Return the first failure among already evaluated checks.
    pub fn run<I>(checks: I) -> Option<Failure>
    where
        I: IntoIterator<Item = Outcome>,
    {
        checks.into_iter().find_map(ServiceResult::into_failure)
    }

    /// Await checks in order, returning the first failure.
    ///
    /// Checks after the first failure are dropped without being polled.
    pub async fn run_lazy<E>(checks: Vec<RuleCheck<'_, E>>) -> Result<Option<Failure>, E> {
        for check in checks {
            if let ServiceResult::Failure(failure) = check.await? {
                return Ok(Some(failure));
            }
        }
        Ok(None)
    }

    /// Entity existence check: fails with `NotFound` when nothing was found.
    pub fn require_found<T>(found: Option<&T>, message: &str) -> Outcome {
        match found {
            Some(_) => Outcome::ok(),
            None => Failure::not_found(message).into(),
        }
    }

    /// Natural key check: fails with `DuplicateKey` when a holder was found.
    pub fn require_absent<T>(holder: Option<&T>, message: &str) -> Outcome {
        match holder {
            Some(_) => Failure::duplicate_key(message).into(),
            None => Outcome::ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_run_returns_none_when_all_pass() {
        assert!(BusinessRules::run(vec![Outcome::ok(), Outcome::ok_with("fine")]).is_none());
    }

    #[test]
    fn test_run_returns_first_listed_failure() {
        let failure = BusinessRules::run(vec![
            Outcome::ok(),
            Failure::not_found("first").into(),
            Failure::duplicate_key("second").into(),
        ]);

        assert_eq!(failure, Some(Failure::not_found("first")));
    }

    #[test]
    fn test_run_lazy_stops_at_first_failure() {
        let evaluated = AtomicUsize::new(0);
        let counter = &evaluated;

        let checks: Vec<RuleCheck<'_, ()>> = vec![
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Outcome::ok())
            }
            .boxed(),
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Failure::duplicate_key("taken").into())
            }
            .boxed(),
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Failure::not_found("never seen").into())
            }
            .boxed(),
        ];

        let failure = block_on(BusinessRules::run_lazy(checks)).unwrap();

        assert_eq!(failure, Some(Failure::duplicate_key("taken")));
        assert_eq!(evaluated.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_run_lazy_propagates_store_errors() {
        let checks: Vec<RuleCheck<'_, &str>> = vec![
            async { Err("connection reset") }.boxed(),
            async { Ok(Failure::not_found("unreached").into()) }.boxed(),
        ];

        assert_eq!(block_on(BusinessRules::run_lazy(checks)), Err("connection reset"));
    }

    #[test]
    fn test_require_found_and_absent() {
        assert!(BusinessRules::require_found(Some(&1), "missing").is_success());
        assert_eq!(
            BusinessRules::require_found::<i32>(None, "missing").into_failure(),
            Some(Failure::not_found("missing"))
        );

        assert!(BusinessRules::require_absent::<i32>(None, "taken").is_success());
        assert_eq!(
            BusinessRules::require_absent(Some(&1), "taken").into_failure(),
            Some(Failure::duplicate_key("taken"))
        );
    }
}
