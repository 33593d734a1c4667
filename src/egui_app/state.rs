/// Complete in-memory state of the form at any instant.
///
/// Ephemeral, scoped to the process lifetime. `readme` and `error` are never
/// both non-empty at steady state: starting a fetch clears both before the
/// request settles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// Repository URL exactly as typed; never transformed or validated here.
    pub repo_url: String,
    /// Last successfully fetched README text; empty means nothing to show.
    pub readme: String,
    /// True strictly while a fetch is in flight.
    pub loading: bool,
    /// Human-readable failure message; empty when no error.
    pub error: String,
    /// Whether the copy confirmation modal is open.
    pub copy_ack_open: bool,
}
