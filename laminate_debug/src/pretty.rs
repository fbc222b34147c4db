// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable mutation output.
//!
//! One line per mutation, compact enough for log lines and test-failure
//! dumps:
//!
//! ```text
//! [create] <View> tag=5
//! [insert] parent=1 child=5 index=0
//! [update] parent=1 child=5 index=0
//! ```

use std::fmt::Write;

use laminate_core::Mutation;

/// Formats one mutation as a single line (no trailing newline).
#[must_use]
pub fn format_mutation(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Create { child } => {
            format!("[create] <{}> tag={}", child.component_name, child.tag.0)
        }
        Mutation::Delete { child } => {
            format!("[delete] <{}> tag={}", child.component_name, child.tag.0)
        }
        Mutation::Insert {
            parent,
            child,
            index,
        } => format!(
            "[insert] parent={} child={} index={index}",
            parent.tag.0, child.tag.0
        ),
        Mutation::Remove {
            parent,
            child,
            index,
        } => format!(
            "[remove] parent={} child={} index={index}",
            parent.tag.0, child.tag.0
        ),
        Mutation::Update {
            parent,
            new_child,
            index,
            ..
        } => {
            if *index == Mutation::ROOT_INDEX {
                format!("[update] root={}", new_child.tag.0)
            } else {
                format!(
                    "[update] parent={} child={} index={index}",
                    parent.tag.0, new_child.tag.0
                )
            }
        }
    }
}

/// Formats a mutation list, one line each, in application order.
#[must_use]
pub fn format_mutations(mutations: &[Mutation]) -> String {
    let mut out = String::new();
    for (position, mutation) in mutations.iter().enumerate() {
        let _ = writeln!(out, "{position:3}: {}", format_mutation(mutation));
    }
    out
}
