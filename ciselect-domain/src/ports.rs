/// Version-control operations needed for change detection.
///
/// ciselect-domain uses this so the fallback chain can be tested against scripted repositories.
pub trait GitPort {
    /// Make `revision` the working-tree state.
    fn checkout(&self, revision: &str) -> anyhow::Result<()>;

    fn merge_base(&self, a: &str, b: &str) -> anyhow::Result<String>;

    /// Resolve `revision` to a full commit id.
    fn rev_parse(&self, revision: &str) -> anyhow::Result<String>;

    /// Paths differing between `base` and `head`, in git's order.
    fn diff_names(&self, base: &str, head: &str) -> anyhow::Result<Vec<String>>;
}
