//! Positional two-node swap.

use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Exchanges the positions of `a` and `b` by rewiring every link touching
/// them, leaving node contents in place. Returns the (possibly changed)
/// root.
///
/// Handles the parent-child adjacency case and the shared-parent case; the
/// two-child removal path in [`crate::avl`] relies on the former when a
/// node is swapped with an in-order neighbor that happens to be its own
/// child.
pub fn swap<N: Node>(arena: &mut [N], root: u32, a: u32, b: u32) -> u32 {
    if a == b {
        return root;
    }

    // Normalize so that in any parent-child pair, `a` is the parent.
    let (a, b) = if get_p(arena, a) == Some(b) {
        (b, a)
    } else {
        (a, b)
    };

    let ap = get_p(arena, a);
    let al = get_l(arena, a);
    let ar = get_r(arena, a);
    let bp = get_p(arena, b);
    let bl = get_l(arena, b);
    let br = get_r(arena, b);

    // Which slot of its parent each node occupies, before any rewiring.
    let a_was_left = ap.map(|p| get_l(arena, p) == Some(a));
    let b_was_left = bp.map(|p| get_l(arena, p) == Some(b));

    // `a` takes `b`'s children unconditionally.
    set_l(arena, a, bl);
    if let Some(c) = bl {
        set_p(arena, c, Some(a));
    }
    set_r(arena, a, br);
    if let Some(c) = br {
        set_p(arena, c, Some(a));
    }

    if bp == Some(a) {
        // Adjacent: `b` steps into `a`'s place and adopts `a` on the side
        // `b` came from, keeping `a`'s other child.
        if al == Some(b) {
            set_l(arena, b, Some(a));
            set_r(arena, b, ar);
            if let Some(c) = ar {
                set_p(arena, c, Some(b));
            }
        } else {
            set_r(arena, b, Some(a));
            set_l(arena, b, al);
            if let Some(c) = al {
                set_p(arena, c, Some(b));
            }
        }
        set_p(arena, a, Some(b));
        set_p(arena, b, ap);
        match ap {
            None => b,
            Some(p) => {
                if a_was_left == Some(true) {
                    set_l(arena, p, Some(b));
                } else {
                    set_r(arena, p, Some(b));
                }
                root
            }
        }
    } else {
        // Disjoint subtrees (the parents may still coincide).
        set_l(arena, b, al);
        if let Some(c) = al {
            set_p(arena, c, Some(b));
        }
        set_r(arena, b, ar);
        if let Some(c) = ar {
            set_p(arena, c, Some(b));
        }
        set_p(arena, a, bp);
        set_p(arena, b, ap);
        if let Some(p) = ap {
            if a_was_left == Some(true) {
                set_l(arena, p, Some(b));
            } else {
                set_r(arena, p, Some(b));
            }
        }
        if let Some(p) = bp {
            if b_was_left == Some(true) {
                set_l(arena, p, Some(a));
            } else {
                set_r(arena, p, Some(a));
            }
        }
        if ap.is_none() {
            b
        } else if bp.is_none() {
            a
        } else {
            root
        }
    }
}
