//! Top-level driver: visibility filtering, naming, document assembly.

use arbor_schema::{ApiMap, OpRegistry, Visibility};
use rustc_hash::FxHashSet;

use crate::emitter::OpEmitter;
use crate::names::{is_python_reserved, lower_case_op_name};
use crate::EmitError;

/// Generate the full wrapper document for a registry.
///
/// One emission per visible operation, in registry order. An operation
/// whose customization says skip emits nothing; a hidden operation (by
/// customization or by membership in `hidden_ops`) is emitted under an
/// underscore-prefixed name; a visible operation whose generated name is a
/// Python reserved word is skipped entirely, so a registry enumeration
/// downstream can never shadow a reserved identifier.
///
/// Output is a pure function of the inputs: byte-identical across runs.
pub fn generate_python_ops(
    registry: &OpRegistry,
    api_map: &ApiMap,
    hidden_ops: &FxHashSet<String>,
    source_file_list: &[String],
    type_annotate_ops: &FxHashSet<String>,
) -> String {
    let mut document = String::with_capacity(4096);
    document.push_str(HEADER);
    if !source_file_list.is_empty() {
        document.push_str("Original registry source file: ");
        document.push_str(&source_file_list.join(", "));
        document.push('\n');
    }
    document.push_str(PREAMBLE);

    for op in registry.ops() {
        let api = api_map.get(&op.name);
        if api.visibility == Visibility::Skip {
            continue;
        }
        let is_hidden =
            api.visibility == Visibility::Hidden || hidden_ops.contains(&op.name);

        let mut function_name = lower_case_op_name(&op.name);
        if is_hidden {
            function_name.insert(0, '_');
        } else if is_python_reserved(&function_name) {
            tracing::debug!(op = %op.name, %function_name, "skipping reserved-name op");
            continue;
        }

        let annotate = type_annotate_ops.contains(&op.name);
        match OpEmitter::new(op, api, function_name.clone(), annotate).emit() {
            Ok(code) => {
                tracing::debug!(op = %op.name, "generated wrapper");
                document.push_str(&code);
            }
            Err(EmitError::UnsupportedAttrKind { kind, attr, .. }) => {
                tracing::warn!(op = %op.name, %attr, %kind, "emitting diagnostic comment");
                document.push_str(&format!(
                    "# No definition for {function_name} since we don't support attrs \
                     with type\n# '{kind}' right now.\n\n"
                ));
            }
        }
    }

    document
}

const HEADER: &str = r#""""Python wrappers around arbor operations.

This file is MACHINE GENERATED! Do not edit.
"#;

const PREAMBLE: &str = r#""""

import collections

from arbor import pywrap as _pywrap
from arbor.eager import context as _context
from arbor.eager import core as _core
from arbor.eager import execute as _execute
from arbor.framework import dtypes as _dtypes

from arbor.framework import op_library as _op_library
from arbor.framework import ops as _ops
from arbor.util import dispatch as _dispatch
from arbor.util.export import api_export

from typing import TypeVar

"#;
