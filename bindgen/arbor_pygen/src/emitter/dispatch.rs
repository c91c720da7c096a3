//! Dispatch plumbing: fallback dispatch list, type-based dispatch, the
//! dispatcher alias, and the raw-op export.

use crate::wrap::{word_wrap, RIGHT_MARGIN};

use super::OpEmitter;

impl OpEmitter<'_> {
    /// The except-arm routing builder type errors through the fallback
    /// dispatch list before re-raising. Public operations only.
    pub(super) fn add_fallback_dispatch(&mut self, prefix: &str) {
        if !self.is_visible() {
            return;
        }
        let kwargs = self.plan.body_kwargs();
        self.result
            .line(&format!("{prefix}except (TypeError, ValueError):"));
        self.result
            .line(&format!("{prefix}  _result = _dispatch.dispatch("));
        self.result.wrapped(
            &format!("{prefix}        {}, (), dict(", self.function_name),
            &kwargs,
        );
        self.result.line(&format!("{prefix}      )"));
        self.result.line(&format!(
            "{prefix}  if _result is not _dispatch.OpDispatcher.NOT_SUPPORTED:"
        ));
        self.result.line(&format!("{prefix}    return _result"));
        self.result.line(&format!("{prefix}  raise"));
    }

    /// Call into the attached type-based dispatcher and return its result
    /// unless it reports `NotImplemented`. Public operations only.
    pub(super) fn add_type_based_dispatch(&mut self, prefix: &str) {
        if !self.is_visible() {
            return;
        }
        let args = self.plan.dispatch_args();
        self.result.push(&format!(
            "{prefix}_result = _dispatcher_for_{}(\n",
            self.function_name
        ));
        self.result
            .push(&word_wrap(&format!("{prefix}    "), &args, RIGHT_MARGIN));
        self.result.push(")\n");
        self.result
            .line(&format!("{prefix}if _result is not NotImplemented:"));
        self.result.line(&format!("{prefix}  return _result"));
    }

    /// A parameter sharing the operation's name would shadow the function,
    /// so the dispatcher is bound to a private alias accessed directly.
    pub(super) fn add_type_based_dispatcher_alias(&mut self) {
        if !self.is_visible() {
            return;
        }
        self.result.line(&format!(
            "_dispatcher_for_{name} = {name}._type_based_dispatcher.dispatch",
            name = self.function_name
        ));
    }

    /// The low-level binding under the raw-ops namespace, bypassing the
    /// fast-path/deferred branching for advanced callers.
    pub(super) fn add_raw_op_export(&mut self) {
        let raw_name = crate::names::avoid_reserved(&self.op.name);
        self.result.line(&format!(
            "{raw_name} = api_export(\"raw_ops.{raw_name}\")(_ops.to_raw_op({}))",
            self.function_name
        ));
    }
}
