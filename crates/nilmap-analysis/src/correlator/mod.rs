//! Tree Correlator: rebuilds parent/child structure from a syntax source's
//! traversal.
//!
//! Two strategies, same result on well-nested input:
//! - `TreeBuilder`: enter/exit stack, used when the source exposes events.
//! - `TreeCorrelator::from_preorder`: backward containment scan over a flat
//!   pre-order stream.

pub mod builder;
pub mod scan;
pub mod tree;

pub use builder::TreeBuilder;
pub use scan::TreeCorrelator;
pub use tree::{NodeIndex, SyntaxNode, SyntaxTree};

use crate::syntax::Traversal;

/// Build the tree for one file with whichever strategy the traversal allows.
pub fn correlate(path: impl Into<String>, traversal: Traversal<'_>) -> SyntaxTree {
    match traversal {
        Traversal::Events(events) => {
            let mut builder = TreeBuilder::new(path);
            builder.extend(events);
            builder.finish()
        }
        Traversal::Preorder(nodes) => TreeCorrelator::from_preorder(path, nodes),
    }
}
