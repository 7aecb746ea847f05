//! WOPI header names.
//!
//! The protocol carries most of its semantics in these headers; keeping
//! the names in one module avoids typo'd string literals in handlers.

/// Selects the operation on `POST /wopi/files/{id}`.
pub const OVERRIDE: &str = "X-WOPI-Override";
/// Lock string presented or returned.
pub const LOCK: &str = "X-WOPI-Lock";
/// Previous lock string for UnlockAndRelock.
pub const OLD_LOCK: &str = "X-WOPI-OldLock";
/// Reason accompanying a 409 on an unlocked file.
pub const LOCK_FAILURE_REASON: &str = "X-WOPI-LockFailureReason";
/// File version emitted on successful mutations.
pub const ITEM_VERSION: &str = "X-WOPI-ItemVersion";
/// Advisory target name for PutRelativeFile.
pub const SUGGESTED_TARGET: &str = "X-WOPI-SuggestedTarget";
/// Exact target name for PutRelativeFile.
pub const RELATIVE_TARGET: &str = "X-WOPI-RelativeTarget";
/// Whether an existing RelativeTarget may be overwritten.
pub const OVERWRITE_RELATIVE_TARGET: &str = "X-WOPI-OverwriteRelativeTarget";
/// Declared body size for PutRelativeFile.
pub const SIZE: &str = "X-WOPI-Size";
/// New name for RenameFile.
pub const REQUESTED_NAME: &str = "X-WOPI-RequestedName";
/// Rename rejection marker.
pub const INVALID_FILE_NAME_ERROR: &str = "X-WOPI-InvalidFileNameError";
/// Share-url flavor for GetShareUrl.
pub const URL_TYPE: &str = "X-WOPI-UrlType";
/// Restricted-link scenario selector.
pub const RESTRICTED_USE_LINK: &str = "X-WOPI-RestrictedUseLink";
/// Secure-store application id.
pub const APPLICATION_ID: &str = "X-WOPI-ApplicationId";
/// Whether the client asked for a perf trace.
pub const PERF_TRACE_REQUESTED: &str = "X-WOPI-PerfTraceRequested";
/// Perf trace emitted when requested.
pub const PERF_TRACE: &str = "X-WOPI-PerfTrace";
/// Marks ancestry enumerations as truncated.
pub const ENUMERATION_INCOMPLETE: &str = "X-WOPI-EnumerationIncomplete";
/// Host software version, on every response.
pub const SERVER_VERSION: &str = "X-WOPI-ServerVersion";
/// Host machine name, on every response.
pub const MACHINE_NAME: &str = "X-WOPI-MachineName";
/// Proof-key signature of the current key.
pub const PROOF: &str = "X-WOPI-Proof";
/// Proof-key signature of the previous key.
pub const PROOF_OLD: &str = "X-WOPI-ProofOld";
/// Timestamp signed into the proof headers.
pub const TIMESTAMP: &str = "X-WOPI-TimeStamp";
