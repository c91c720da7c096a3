//! List flattening and unflattening.
//!
//! Flattening converts a sequence of named inputs, some scalar and some
//! list-valued, into one flat Python sequence expression plus a parallel
//! per-slot size-expression list. Unflattening is the mirror: it carves a
//! flat result sequence back into per-slot sub-ranges with running offset
//! arithmetic. Flatten-then-unflatten is a left inverse for any partition
//! of a fixed-length sequence into scalar and list slots.

use arbor_schema::ArgSlot;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::buffer::SourceBuffer;
use crate::names::attr_var_name;

/// Result of flattening a set of input slots.
pub struct FlattenedInputs {
    /// One expression denoting the ordered concatenation of every slot's
    /// contribution, e.g. `[x, y] + list(values)`. Empty input yields `[]`.
    pub expr: String,
    /// Per-slot size expressions: empty for scalar slots, the
    /// attribute-derived length or `len(arg)` for list slots.
    pub sizes: SmallVec<[String; 4]>,
}

enum ScanState {
    Starting,
    WasSoloInput,
    WasListInput,
}

/// Flatten the inputs selected by `indices` (or all inputs when `None`)
/// into a single sequence expression.
///
/// `slots` and `renames` are parallel, in API order. `attr_exprs` resolves
/// a length attribute to the expression holding its value.
pub fn flatten_inputs(
    slots: &[&ArgSlot],
    renames: &[String],
    indices: Option<&[usize]>,
    attr_exprs: &FxHashMap<String, String>,
) -> FlattenedInputs {
    let mut expr = String::new();
    let mut sizes = SmallVec::new();
    let mut state = ScanState::Starting;

    let count = indices.map_or(slots.len(), <[usize]>::len);
    for j in 0..count {
        let i = indices.map_or(j, |idx| idx[j]);
        let slot = slots[i];
        let rename = &renames[i];
        if slot.is_list() {
            match state {
                ScanState::WasSoloInput => expr.push_str("] + "),
                ScanState::WasListInput => expr.push_str(" + "),
                ScanState::Starting => {}
            }
            expr.push_str(&format!("list({rename})"));
            state = ScanState::WasListInput;
            if let Some(number_attr) = &slot.number_attr {
                let size = attr_exprs
                    .get(number_attr)
                    .cloned()
                    .unwrap_or_else(|| attr_var_name(number_attr));
                sizes.push(size);
            } else {
                sizes.push(format!("len({rename})"));
            }
        } else {
            match state {
                ScanState::WasSoloInput => expr.push_str(", "),
                ScanState::WasListInput => expr.push_str(" + ["),
                ScanState::Starting => expr.push('['),
            }
            expr.push_str(rename);
            state = ScanState::WasSoloInput;
            sizes.push(String::new());
        }
    }

    match state {
        ScanState::Starting => expr.push_str("[]"),
        ScanState::WasSoloInput => expr.push(']'),
        ScanState::WasListInput => {}
    }
    FlattenedInputs { expr, sizes }
}

/// Emit the slice rewrites that carve `var` back into per-slot values.
///
/// For each slot with a non-empty size expression, the flat remainder is
/// rewritten so position `i` holds that slot's sub-list; scalar slots are
/// left in place for separate destructuring.
pub fn unflatten(prefix: &str, sizes: &[String], var: &str, out: &mut SourceBuffer) {
    let count = sizes.len();
    for (i, size) in sizes.iter().enumerate() {
        if size.is_empty() {
            continue;
        }
        let mut line = format!("{prefix}{var} = ");
        if i > 0 {
            line.push_str(&format!("{var}[:{i}] + "));
        }
        if i + 1 < count {
            if i == 0 {
                line.push_str(&format!("[{var}[:{size}]] + {var}[{size}:]"));
            } else {
                line.push_str(&format!(
                    "[{var}[{i}:{i} + {size}]] + {var}[{i} + {size}:]"
                ));
            }
        } else {
            line.push_str(&format!("[{var}[{i}:]]"));
        }
        out.line(&line);
    }
}

/// Render a Python tuple expression, with the one-element trailing comma.
pub fn vector_to_tuple(items: &[String]) -> String {
    if items.len() == 1 {
        return format!("({},)", items[0]);
    }
    format!("({})", items.join(", "))
}
