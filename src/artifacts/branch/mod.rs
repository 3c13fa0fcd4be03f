pub mod branch_name;
pub mod layout;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
/// Splits a repository URL into the part before the branch directory and the
/// path inside the branch.
pub const BRANCH_LAYOUT_REGEX: &str = r"^(.*?)/(?:branches/[^/]*|trunk|tags/[^/]*)/(.*)$";
pub const SVN_INFO_URL_REGEX: &str = r"(?m)^URL:\s+(.*?)\s*$";

pub const BRANCHES_DIR: &str = "branches";
pub const TRUNK_DIR: &str = "trunk";
pub const DEFAULT_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];
