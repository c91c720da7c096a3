#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Golden test: byte-exact generated document for a minimal registry.
//!
//! One simple visible operation exercises the whole emission pipeline:
//! header, preamble, decorators, docstring, fast path with its error
//! boundary, deferred path, raw-op export, dispatcher alias, and the
//! standalone eager fallback.

use arbor_pygen::generate_python_ops;
use arbor_schema::{ApiMap, ArgSlot, ElementType, OpRegistry, OpSchema};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

const EXPECTED: &str = r#""""Python wrappers around arbor operations.

This file is MACHINE GENERATED! Do not edit.
"""

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

@_dispatch.add_fallback_dispatch_list
@_dispatch.add_type_based_api_dispatcher
@api_export('increment')
def increment(x, name=None):
  r"""TODO: add doc.

  Args:
    x: A `Tensor`.
    name: A name for the operation (optional).

  Returns:
    A `Tensor`.
  """
  _ctx = _context._context or _context.context()
  tld = _ctx._thread_local_data
  if tld.is_eager:
    try:
      _result = _pywrap.fast_path_execute(
        _ctx, "Increment", name, x)
      return _result
    except _core.NotOkStatusError as e:
      _ops.raise_from_status(e, name)
    except _core.FallbackError:
      pass
    try:
      _result = _dispatcher_for_increment(
          (x, name,), None)
      if _result is not NotImplemented:
        return _result
      return increment_eager_fallback(
          x, name=name, ctx=_ctx)
    except _core.SymbolicError:
      pass  # Add nodes to the arbor graph.
    except (TypeError, ValueError):
      _result = _dispatch.dispatch(
            increment, (), dict(x=x, name=name)
          )
      if _result is not _dispatch.OpDispatcher.NOT_SUPPORTED:
        return _result
      raise
  else:
    _result = _dispatcher_for_increment(
        (x, name,), None)
    if _result is not NotImplemented:
      return _result
  # Add nodes to the arbor graph.
  try:
    _, _, _op, _outputs = _op_library.apply_op(
        "Increment", x=x, name=name)
  except (TypeError, ValueError):
    _result = _dispatch.dispatch(
          increment, (), dict(x=x, name=name)
        )
    if _result is not _dispatch.OpDispatcher.NOT_SUPPORTED:
      return _result
    raise
  _result = _outputs[:]
  if _execute.must_record_gradient():
    _attrs = ()
    _inputs_flat = _op.inputs
    _execute.record_gradient(
        "Increment", _inputs_flat, _attrs, _result)
  _result, = _result
  return _result

Increment = api_export("raw_ops.Increment")(_ops.to_raw_op(increment))
_dispatcher_for_increment = increment._type_based_dispatcher.dispatch


def increment_eager_fallback(x, name, ctx):
  x = _ops.convert_to_tensor(x, _dtypes.int32)
  _inputs_flat = [x]
  _attrs = None
  _result = _execute.execute(b"Increment", 1, inputs=_inputs_flat,
                             attrs=_attrs, ctx=ctx, name=name)
  if _execute.must_record_gradient():
    _execute.record_gradient(
        "Increment", _inputs_flat, _attrs, _result)
  _result, = _result
  return _result

"#;

#[test]
fn test_minimal_registry_golden() {
    let mut registry = OpRegistry::new();
    registry.register(
        OpSchema::new("Increment")
            .input(ArgSlot::fixed("x", ElementType::Int32))
            .output(ArgSlot::fixed("y", ElementType::Int32)),
    );
    let generated = generate_python_ops(
        &registry,
        &ApiMap::new(),
        &FxHashSet::default(),
        &[],
        &FxHashSet::default(),
    );
    assert_eq!(generated, EXPECTED);
}

#[test]
fn test_source_file_list_lands_in_header() {
    let registry = OpRegistry::new();
    let generated = generate_python_ops(
        &registry,
        &ApiMap::new(),
        &FxHashSet::default(),
        &["ops/math_ops.pbtxt".to_string()],
        &FxHashSet::default(),
    );
    assert!(generated.contains("Original registry source file: ops/math_ops.pbtxt\n"));
}
