//! The eager fast path.
//!
//! A direct call into the runtime dispatcher, guarded by a local error
//! boundary: a status error is translated into the host convention, a
//! fallback-requested signal routes through type-based redispatch into the
//! standalone eager-fallback function, and a symbolic/graph-only signal
//! from that delegation is swallowed so execution proceeds into the
//! deferred path.

use super::{OpEmitter, EAGER_FALLBACK_SUFFIX};

impl OpEmitter<'_> {
    pub(super) fn add_eager_fast_path_execute(&mut self) {
        let mut fastpath_params = format!("_ctx, \"{}\", name", self.op.name);
        let mut fallback_params = String::new();

        for rename in &self.input_renames {
            fastpath_params.push_str(&format!(", {rename}"));
            if !fallback_params.is_empty() {
                fallback_params.push_str(", ");
            }
            fallback_params.push_str(rename);
        }

        for attr in &self.op.attrs {
            if self.inference.is_inferred(&attr.name) {
                continue;
            }
            let rename = self.api.attr_name(&attr.name);
            fastpath_params.push_str(&format!(", \"{}\", {rename}", attr.name));
            if !fallback_params.is_empty() {
                fallback_params.push_str(", ");
            }
            fallback_params.push_str(&format!("{rename}={rename}"));
        }

        if !fallback_params.is_empty() {
            fallback_params.push_str(", ");
        }
        fallback_params.push_str("name=name");

        self.result.push("    try:\n");
        self.result
            .push("      _result = _pywrap.fast_path_execute(\n");
        self.result
            .wrapped("        ", &format!("{fastpath_params})"));
        if self.num_outs() > 1 {
            self.result.line(&format!(
                "      _result = {}._make(_result)",
                self.output_tuple_name()
            ));
        }
        self.result.push("      return _result\n");

        // Errors from the fast path unwrap to the host convention; a
        // fallback request falls through to redispatch.
        fallback_params.push_str(", ctx=_ctx");
        self.result
            .push("    except _core.NotOkStatusError as e:\n");
        self.result.push("      _ops.raise_from_status(e, name)\n");
        self.result.push("    except _core.FallbackError:\n");
        self.result.push("      pass\n");
        self.result.push("    try:\n");
        self.add_type_based_dispatch("      ");
        self.result.push(&format!(
            "      return {}{}(\n",
            self.function_name, EAGER_FALLBACK_SUFFIX
        ));
        self.result
            .wrapped("          ", &format!("{fallback_params})"));
        self.result.push("    except _core.SymbolicError:\n");
        self.result
            .push("      pass  # Add nodes to the arbor graph.\n");
        self.add_fallback_dispatch("    ");
    }
}
