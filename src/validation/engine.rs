//! Sequential chain evaluation.
//!
//! Core evaluation logic: rules run strictly in insertion order, one at a
//! time, and the first rule to reject the value ends the run. Asynchronous
//! checks are awaited before the next rule is consulted, so rules never
//! overlap within a single run.

use std::future::Future;

use anyhow::Result;

use crate::empty::Empty;
use crate::validation::rule::{Check, Rule};

/// Outcome of a validation run.
///
/// A rejection is not a program error; operational failures from
/// asynchronous checks travel separately as `Err` on the run itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<C> {
    /// Every rule accepted the value, or the optional short-circuit applied.
    Valid,
    /// A rule rejected the value; carries that rule's context, if any.
    Invalid(Option<C>),
}

impl<C> Outcome<C> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    /// Context of the rejecting rule, when one was attached.
    pub fn context(&self) -> Option<&C> {
        match self {
            Outcome::Invalid(Some(context)) => Some(context),
            _ => None,
        }
    }
}

type EmptyCheck<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

/// Ordered chain of rules evaluated against candidate values.
///
/// A validator is configured once through the chainable `rule`,
/// `rule_async`, and `optional` methods, then run any number of times
/// against different values. `V` is the candidate type, `C` the context
/// type shared by every rule of the chain.
///
/// Rule closures must be `Send + Sync`; the engine itself adds no locking,
/// so rules that touch shared mutable state are responsible for their own
/// synchronization.
pub struct Validator<V, C> {
    rules: Vec<Rule<V, C>>,
    skip_empty: Option<EmptyCheck<V>>,
}

impl<V, C> Validator<V, C> {
    /// Create a validator with no rules and the optional flag cleared.
    pub fn new() -> Self {
        Validator {
            rules: Vec::new(),
            skip_empty: None,
        }
    }

    /// Append a synchronous rule with optional `context`.
    ///
    /// The predicate's return value is the verdict; there is no error
    /// channel. Accepts a bare context, `Some(..)`, or `None`.
    pub fn rule<F>(mut self, check: F, context: impl Into<Option<C>>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::sync(check, context.into()));
        self
    }

    /// Append an asynchronous rule with optional `context`.
    ///
    /// The check receives the candidate by reference and must return a
    /// `'static` future, so it captures whatever it needs up front:
    ///
    /// ```text
    /// .rule_async(|name: &String| {
    ///     let name = name.clone();
    ///     async move { Ok(registry_lookup(&name).await.is_none()) }
    /// }, "name-taken")
    /// ```
    ///
    /// Resolving to `Err` marks an operational failure, not a rejection,
    /// and aborts the whole run.
    pub fn rule_async<F, Fut>(mut self, check: F, context: impl Into<Option<C>>) -> Self
    where
        F: Fn(&V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        self.rules.push(Rule::deferred(check, context.into()));
        self
    }

    /// Make the validator pass empty values without consulting any rule.
    ///
    /// The emptiness probe is captured here, so only validators over types
    /// with an [`Empty`] impl can enable the flag. Passing `false` clears
    /// it. The setting applies to every later run until changed.
    pub fn optional(mut self, flag: bool) -> Self
    where
        V: Empty,
    {
        self.skip_empty = if flag {
            Some(Box::new(|value: &V| value.is_empty()))
        } else {
            None
        };
        self
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The registered rules, in evaluation order.
    pub fn rules(&self) -> &[Rule<V, C>] {
        &self.rules
    }

    /// Run the chain against `value`.
    ///
    /// Rules run strictly in insertion order. The first rule to reject the
    /// value ends the run with `Outcome::Invalid` carrying that rule's
    /// context; later rules are never invoked. An asynchronous check
    /// resolving to `Err` aborts the run with that error instead. An empty
    /// chain always validates.
    ///
    /// Panics inside rule closures are not caught and unwind to the caller.
    pub async fn validate(&self, value: &V) -> Result<Outcome<C>>
    where
        C: Clone,
    {
        // handle optional setting
        if let Some(is_empty) = &self.skip_empty {
            if is_empty(value) {
                log::debug!("Empty value accepted by optional validator");
                return Ok(Outcome::Valid);
            }
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let accepted = match &rule.check {
                Check::Sync(check) => check(value),
                Check::Async(check) => match check(value).await {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        log::warn!("Rule {} aborted validation: {}", index, err);
                        return Err(err);
                    }
                },
            };

            if !accepted {
                log::debug!("Value rejected by rule {}", index);
                return Ok(Outcome::Invalid(rule.context.clone()));
            }
            log::trace!("Rule {} accepted", index);
        }

        Ok(Outcome::Valid)
    }
}

impl<V, C> Default for Validator<V, C> {
    fn default() -> Self {
        Self::new()
    }
}
