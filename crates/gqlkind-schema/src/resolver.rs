//! Resolver functions and their sync-or-async results.
//!
//! A resolver receives a [`ResolverContext`] (source value, shared context,
//! coerced arguments) and returns a [`Thunk`]: either an already computed
//! result or a future that yields one. Callers always `.await` a thunk; a
//! ready thunk completes on first poll.

use std::any::{Any, type_name};
use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures_util::future::{self, BoxFuture};
use serde_json::Value;

use crate::args::Arguments;
use crate::error::FieldError;
use crate::value::FieldValue;

/// Result of resolving one field.
pub type FieldResult = Result<FieldValue, FieldError>;

/// A field result that is either available now or after a suspension point.
pub enum Thunk<'a> {
    /// The result is already computed.
    Ready(FieldResult),
    /// The result is produced by a future.
    Pending(BoxFuture<'a, FieldResult>),
}

impl<'a> Thunk<'a> {
    /// Wraps an already computed result.
    pub fn ready(result: FieldResult) -> Self {
        Self::Ready(result)
    }

    /// Wraps a successful value.
    pub fn value(value: impl Into<FieldValue>) -> Self {
        Self::Ready(Ok(value.into()))
    }

    /// Wraps a failure.
    pub fn error(err: impl Into<FieldError>) -> Self {
        Self::Ready(Err(err.into()))
    }

    /// Wraps a future producing the result.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = FieldResult> + Send + 'a,
    {
        Self::Pending(Box::pin(fut))
    }

    /// Returns whether the result is available without awaiting.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl<'a> IntoFuture for Thunk<'a> {
    type Output = FieldResult;
    type IntoFuture = BoxFuture<'a, FieldResult>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(result) => Box::pin(future::ready(result)),
            Self::Pending(fut) => fut,
        }
    }
}

impl From<FieldResult> for Thunk<'_> {
    fn from(result: FieldResult) -> Self {
        Self::Ready(result)
    }
}

impl fmt::Debug for Thunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Everything a resolver is invoked with.
pub struct ResolverContext<'a, Ctx> {
    /// The parent value; `None` for root fields.
    pub source: Option<&'a FieldValue>,
    /// Shared, caller-supplied context.
    pub ctx: &'a Ctx,
    /// Coerced arguments in declaration order.
    pub args: &'a Arguments,
}

impl<Ctx> Clone for ResolverContext<'_, Ctx> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Ctx> Copy for ResolverContext<'_, Ctx> {}

impl<'a, Ctx> ResolverContext<'a, Ctx> {
    /// Returns whether this is a root field invocation.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.source.is_none()
    }

    /// The parent value downcast to `T`.
    pub fn parent<T: Any>(&self) -> Result<&'a T, FieldError> {
        let source = self.source.ok_or(FieldError::MissingSource)?;
        source.downcast_ref::<T>().ok_or(FieldError::SourceType {
            expected: type_name::<T>(),
        })
    }

    /// The parent value as untyped JSON.
    pub fn parent_json(&self) -> Result<&'a Value, FieldError> {
        let source = self.source.ok_or(FieldError::MissingSource)?;
        source.as_json().ok_or(FieldError::SourceType {
            expected: "JSON value",
        })
    }
}

/// A type-erased resolver function.
pub type Resolver<Ctx> = Arc<dyn for<'a> Fn(ResolverContext<'a, Ctx>) -> Thunk<'a> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct User {
        first_name: String,
    }

    #[tokio::test]
    async fn test_ready_thunk_awaits() {
        let thunk = Thunk::value("ADMIN");
        assert!(thunk.is_ready());
        assert_eq!(thunk.await.unwrap(), FieldValue::from("ADMIN"));
    }

    #[tokio::test]
    async fn test_pending_thunk_awaits() {
        let thunk = Thunk::pending(async {
            tokio::task::yield_now().await;
            Ok(FieldValue::from(json!([{"id": "32"}])))
        });
        assert!(!thunk.is_ready());
        assert_eq!(thunk.await.unwrap().to_json(), Some(json!([{"id": "32"}])));
    }

    #[tokio::test]
    async fn test_error_thunk() {
        let err = Thunk::error(FieldError::new("boom")).await.unwrap_err();
        assert_eq!(err, FieldError::new("boom"));
    }

    #[test]
    fn test_parent_downcast() {
        let source = FieldValue::owned(User {
            first_name: "Jordan".into(),
        });
        let args = Arguments::new();
        let rc = ResolverContext {
            source: Some(&source),
            ctx: &(),
            args: &args,
        };

        assert!(!rc.is_root());
        assert_eq!(rc.parent::<User>().unwrap().first_name, "Jordan");
        assert!(matches!(
            rc.parent::<String>(),
            Err(FieldError::SourceType { .. })
        ));
        assert!(rc.parent_json().is_err());
    }

    #[test]
    fn test_root_has_no_parent() {
        let args = Arguments::new();
        let rc = ResolverContext {
            source: None,
            ctx: &(),
            args: &args,
        };

        assert!(rc.is_root());
        assert_eq!(rc.parent::<User>().err(), Some(FieldError::MissingSource));
    }
}
