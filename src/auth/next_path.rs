/// Where a signed-in admin lands when no usable target was supplied.
pub const DEFAULT_NEXT_PATH: &str = "/admin";

/// Restricts post-login redirects to same-origin absolute paths.
///
/// Protocol-relative targets (`//host`) and absolute URLs are refused. So is any
/// backslash or ASCII control character: browsers treat `\` as `/` and strip tab,
/// CR and LF before resolving, which turns `/\host` or `/\t/host` into `//host`.
pub fn sanitize_next_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.chars().any(|c| c == '\\' || c.is_ascii_control()) =>
        {
            path
        }
        _ => DEFAULT_NEXT_PATH,
    }
}
