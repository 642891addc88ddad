//! Dynamically invoked callables
//!
//! Provides the [`Callable`] trait plus two adapters:
//! - [`FnCallable`]: a closure behind a [`Signature`], bound before every call
//! - [`BoundMethod`]: a method callable with its receiver fixed

use crate::args::CallArgs;
use crate::decorate::DecorationRecord;
use crate::error::CallResult;
use crate::signature::{BoundArguments, Signature};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Something that can be invoked with [`CallArgs`]
///
/// Implementations must be shareable across threads: a decorated callable is
/// typically stored once and invoked concurrently.
pub trait Callable: Send + Sync + fmt::Debug {
    /// Externally observable name
    fn name(&self) -> &str;

    /// Parameter metadata
    fn signature(&self) -> &Signature;

    /// Documentation, if any
    fn doc(&self) -> Option<&str> {
        None
    }

    /// Invoke with the given arguments
    ///
    /// # Errors
    /// Binding failures or errors raised by the callable body.
    fn call(&self, args: CallArgs) -> CallResult<Value>;

    /// Decoration record, `None` unless this is a decorated wrapper
    fn decoration(&self) -> Option<&DecorationRecord> {
        None
    }
}

impl<C: Callable + ?Sized> Callable for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn doc(&self) -> Option<&str> {
        (**self).doc()
    }

    fn call(&self, args: CallArgs) -> CallResult<Value> {
        (**self).call(args)
    }

    fn decoration(&self) -> Option<&DecorationRecord> {
        (**self).decoration()
    }
}

type Body = dyn Fn(BoundArguments) -> CallResult<Value> + Send + Sync;

/// Closure-backed callable
///
/// Arguments are bound against the signature before the body runs, so the
/// body only ever sees parameters it declared.
#[derive(Clone)]
pub struct FnCallable {
    name: String,
    signature: Signature,
    doc: Option<String>,
    body: Arc<Body>,
}

impl FnCallable {
    /// Create from name, signature and body
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(BoundArguments) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            doc: None,
            body: Arc::new(body),
        }
    }

    /// Attach documentation
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl fmt::Debug for FnCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCallable")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

impl Callable for FnCallable {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn call(&self, args: CallArgs) -> CallResult<Value> {
        let bound = self.signature.bind(&self.name, &args)?;
        (self.body)(bound)
    }
}

/// Method with a fixed receiver
///
/// The receiver is prepended to the positional arguments on every call, so
/// only explicit keywords ever reach rule matching in a decorated method.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    method: Arc<dyn Callable>,
    receiver: Value,
    signature: Signature,
}

impl BoundMethod {
    /// Bind `receiver` to `method`
    pub fn bind(method: Arc<dyn Callable>, receiver: impl Into<Value>) -> Self {
        let signature = method.signature().without_receiver();
        Self {
            method,
            receiver: receiver.into(),
            signature,
        }
    }

    /// Receiver value
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    /// Underlying method
    #[inline]
    #[must_use]
    pub fn method(&self) -> &Arc<dyn Callable> {
        &self.method
    }
}

impl Callable for BoundMethod {
    fn name(&self) -> &str {
        self.method.name()
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn doc(&self) -> Option<&str> {
        self.method.doc()
    }

    fn call(&self, mut args: CallArgs) -> CallResult<Value> {
        args.prepend(self.receiver.clone());
        self.method.call(args)
    }

    fn decoration(&self) -> Option<&DecorationRecord> {
        self.method.decoration()
    }
}
