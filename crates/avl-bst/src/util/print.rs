use std::fmt::Debug;

use crate::arena::Arena;

/// Renders child lines under a parent using box-drawing branches.
///
/// Each child callback receives the indentation its own children must use.
fn print_children(tab: &str, children: &[&dyn Fn(&str) -> String]) -> String {
    let mut out = String::new();
    let Some(last) = children.len().checked_sub(1) else {
        return out;
    };

    for (i, child_fn) in children.iter().enumerate() {
        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if is_last { "└─" } else { "├─" };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        out.push(' ');
        out.push_str(&child);
    }

    out
}

/// Debug rendering of the subtree at `node`, one node per line.
///
/// ```text
/// 2 = "b" [bf=0]
/// ├─ L: 1 = "a" [bf=0]
/// └─ R: 3 = "c" [bf=0]
/// ```
pub fn print<K, V>(arena: &Arena<K, V>, node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    let Some(i) = node else {
        return "∅".to_string();
    };
    let n = &arena[i];
    let header = format!("{:?} = {:?} [bf={}]", n.k, n.v, n.bf);
    if n.is_leaf() {
        return header;
    }

    let (l, r) = (n.l, n.r);
    let left = move |tab: &str| format!("L: {}", print(arena, l, tab));
    let right = move |tab: &str| format!("R: {}", print(arena, r, tab));
    let children: [&dyn Fn(&str) -> String; 2] = [&left, &right];
    header + &print_children(tab, &children)
}
