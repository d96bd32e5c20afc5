//! Datalog queries sent to the Roam `q` endpoint
//!
//! Values are always passed through `:in` arguments, never spliced into the
//! query text.

use std::sync::LazyLock;

/// Levels of `:block/children` pulled below each matched block
pub const CHILD_PULL_DEPTH: usize = 5;

/// Attributes pulled at every level
const BLOCK_ATTRIBUTES: &str = ":block/string :block/uid :edit/time :block/order";

/// Nested pull pattern `[attrs {:block/children [attrs {...}]}]`
///
/// `depth` is the number of child levels included below the top block.
pub fn block_pull_pattern(depth: usize) -> String {
    if depth == 0 {
        return format!("[{}]", BLOCK_ATTRIBUTES);
    }
    format!(
        "[{} {{:block/children {}}}]",
        BLOCK_ATTRIBUTES,
        block_pull_pattern(depth - 1)
    )
}

/// Blocks on a page, each with its edit time. Args: `[title]`
pub static PAGE_BLOCKS: LazyLock<String> = LazyLock::new(|| {
    format!(
        "[:find (pull ?block {}) ?time \
         :in $ ?PAGE \
         :where [?page :node/title ?PAGE] [?block :block/page ?page] [?block :edit/time ?time]]",
        block_pull_pattern(CHILD_PULL_DEPTH)
    )
});

/// Blocks referencing a page. Args: `[title]`
pub static PAGE_REFERENCES: LazyLock<String> = LazyLock::new(|| {
    format!(
        "[:find (pull ?ref {}) ?time \
         :in $ ?PAGE \
         :where [?page :node/title ?PAGE] [?ref :block/refs ?page] [?ref :edit/time ?time]]",
        block_pull_pattern(CHILD_PULL_DEPTH)
    )
});

/// Blocks referencing a page edited before a cursor. Args: `[title, cursor]`
pub static PAGE_REFERENCES_BEFORE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "[:find (pull ?ref {}) ?time \
         :in $ ?PAGE ?cursor-time \
         :where [?page :node/title ?PAGE] [?ref :block/refs ?page] [?ref :edit/time ?time] \
         [(< ?time ?cursor-time)]]",
        block_pull_pattern(CHILD_PULL_DEPTH)
    )
});

/// Page uid by title. Args: `[title]`
pub const PAGE_UID_BY_TITLE: &str =
    "[:find ?uid :in $ ?PAGE :where [?e :node/title ?PAGE] [?e :block/uid ?uid]]";

/// Entity by uid. Args: `[uid]`
pub const ENTITY_BY_UID: &str = "[:find ?e :in $ ?UID :where [?e :block/uid ?UID]]";
