//! # Fixed Constants
//!
//! Compile-time constants shared by the store, the service and the API.
//!
//! The user-facing messages live here so that the HTTP layer and the CLI
//! report the same wording for the same condition.

/// Key under which the one profile document is stored.
///
/// Every backend addresses the profile through this key only; there is no
/// "first document found" lookup anywhere.
pub const SINGLETON_KEY: &str = "profile";

/// Basic `local@domain.tld` shape. Anything without whitespace on each side
/// of the `@` and a dot in the domain part passes.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

// =============================================================================
// MESSAGES
// =============================================================================

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please provide a valid email";

pub const PROFILE_NOT_FOUND: &str = "Profile not found";
pub const PROFILE_NOT_FOUND_FOR_UPDATE: &str = "Profile not found. Use POST to create.";
pub const PROFILE_EXISTS: &str = "Profile already exists. Use PUT to update.";

pub const SKILL_REQUIRED: &str = "Skill query parameter is required";
pub const QUERY_REQUIRED: &str = "Search query parameter (q) is required";
