//! Rule storage and calling conventions.
//!
//! A rule is either a plain predicate or a deferred check that resolves
//! through a future. The two forms are registered through distinct
//! `Validator` methods and stored as a closed variant, so the engine always
//! knows how to invoke a rule without inspecting it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

/// Boxed future returned by an asynchronous check.
///
/// Resolves to `Ok(verdict)` or, for operational failures such as a lookup
/// against external state going wrong, `Err(_)`. An `Err` is not a
/// rejection; it aborts the whole run.
pub type CheckFuture = Pin<Box<dyn Future<Output = Result<bool>> + Send>>;

/// The two calling conventions a check can use.
pub(crate) enum Check<V> {
    /// Plain predicate; the returned bool is the verdict.
    Sync(Box<dyn Fn(&V) -> bool + Send + Sync>),
    /// Deferred check; awaited before the next rule is consulted.
    Async(Box<dyn Fn(&V) -> CheckFuture + Send + Sync>),
}

/// A single rule: a check plus optional caller-supplied context.
///
/// The context is opaque to the engine. It is handed back verbatim when
/// this specific rule is the one that rejects a value, so callers typically
/// store an error message or identifier in it.
pub struct Rule<V, C> {
    pub(crate) check: Check<V>,
    pub(crate) context: Option<C>,
}

impl<V, C> Rule<V, C> {
    pub(crate) fn sync<F>(check: F, context: Option<C>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Rule {
            check: Check::Sync(Box::new(check)),
            context,
        }
    }

    pub(crate) fn deferred<F, Fut>(check: F, context: Option<C>) -> Self
    where
        F: Fn(&V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        let boxed = move |value: &V| -> CheckFuture { Box::pin(check(value)) };
        Rule {
            check: Check::Async(Box::new(boxed)),
            context,
        }
    }

    /// The context attached at registration, if any.
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Whether this rule uses the deferred calling convention.
    pub fn is_async(&self) -> bool {
        matches!(self.check, Check::Async(_))
    }
}

impl<V, C> fmt::Debug for Rule<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let convention = match self.check {
            Check::Sync(_) => "sync",
            Check::Async(_) => "async",
        };
        f.debug_struct("Rule")
            .field("convention", &convention)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
