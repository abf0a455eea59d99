/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, and are intended to help follow a run from specification to counterexample.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to building a [specification](crate::specification)
    pub const SPEC: &str = "spec";

    /// Logs related to the [variable index](crate::index)
    pub const INDEX: &str = "index";

    /// Logs related to [clause building](crate::clauses)
    pub const CLAUSES: &str = "clauses";

    /// Logs related to an [encoding](crate::encoding) and its artifacts
    pub const ENCODING: &str = "encoding";

    /// Logs related to the [bmc loop](crate::driver)
    pub const DRIVER: &str = "driver";

    /// Logs related to an [engine](crate::engine) and its sessions
    pub const ENGINE: &str = "engine";

    /// Logs related to [BCP](crate::engine::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::engine::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";
}
