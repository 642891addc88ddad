//! Call interceptor
//!
//! [`Deprecated`] is the tagged wrapper produced by decoration. Each call
//! walks the rules in declaration order; every rule whose deprecated keyword
//! was supplied emits one notification and then applies its transform to the
//! keyword mapping before the next rule runs.

use crate::args::CallArgs;
use crate::callable::Callable;
use crate::decorate::DecorationRecord;
use crate::error::{CallError, CallResult};
use crate::notify::{self, Notification};
use crate::signature::Signature;
use depparam_rule::{Deprecation, Transform};
use serde_json::Value;
use std::sync::Arc;

/// Decorated callable
///
/// Exposes the wrapped callable's name, signature and documentation
/// unchanged, plus the [`DecorationRecord`] through [`Callable::decoration`].
#[derive(Debug, Clone)]
pub struct Deprecated {
    inner: Arc<dyn Callable>,
    record: Arc<DecorationRecord>,
}

impl Deprecated {
    pub(crate) fn new(inner: Arc<dyn Callable>, record: DecorationRecord) -> Self {
        Self {
            inner,
            record: Arc::new(record),
        }
    }

    /// Decoration record
    #[inline]
    #[must_use]
    pub fn record(&self) -> &DecorationRecord {
        &self.record
    }

    /// Wrapped callable
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn Callable> {
        &self.inner
    }

    /// Apply every matching rule to `args`
    ///
    /// Emits notifications as rules match. Returns the rewritten arguments,
    /// or the conflict error for a reassign whose target was also supplied.
    ///
    /// # Errors
    /// [`CallError::ReassignConflict`]
    pub fn rewrite(&self, mut args: CallArgs) -> CallResult<CallArgs> {
        let func = self.inner.name();
        for rule in self.record.rules() {
            let old_name = rule.old_name();
            if !args.contains_keyword(old_name) {
                continue;
            }

            notify::emit(Notification::deprecation(
                func,
                old_name,
                rule.render_message(func),
            ));

            match (rule, rule.transform()) {
                (Deprecation::Remove(_), Some(Transform::Remove)) => {
                    args.remove_keyword(old_name);
                }
                (Deprecation::Rename(rename), Some(Transform::Reassign)) => {
                    let new_name = rename.new_name();
                    if args.contains_keyword(new_name) {
                        return Err(CallError::ReassignConflict {
                            func: func.to_string(),
                            old_name: old_name.to_string(),
                            new_name: new_name.to_string(),
                        });
                    }
                    if let Some(value) = args.remove_keyword(old_name) {
                        args.insert_keyword(new_name, value);
                    }
                }
                // Transform disabled: forward under the old name.
                _ => {}
            }
        }
        Ok(args)
    }
}

impl Callable for Deprecated {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn doc(&self) -> Option<&str> {
        self.inner.doc()
    }

    fn call(&self, args: CallArgs) -> CallResult<Value> {
        if !self.record.matches_any(&args) {
            return self.inner.call(args);
        }
        let args = self.rewrite(args)?;
        self.inner.call(args)
    }

    fn decoration(&self) -> Option<&DecorationRecord> {
        Some(&self.record)
    }
}
