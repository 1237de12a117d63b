//! Exit code constants for the landing-crew CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, bad template)
//! - 2: Agent failure (runtime error, timeout, non-zero exit, empty output)
//! - 3: Missing upstream output (a stage needs a cached result that is absent)
//! - 4: Cache failure (document could not be written or verified)
//! - 5: Write failure (generated files could not be written)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or unusable template.
pub const USER_ERROR: i32 = 1;

/// Agent failure: the runtime errored, timed out, or returned nothing.
pub const AGENT_FAILURE: i32 = 2;

/// A pipeline stage needed the previous stage's cached output and found none.
pub const MISSING_UPSTREAM: i32 = 3;

/// The topic cache could not be written or verified.
pub const CACHE_FAILURE: i32 = 4;

/// Landing page files could not be written.
pub const WRITE_FAILURE: i32 = 5;
