//! Owner and group name lookup for long listings.
//!
//! Names come from the system user database through `uzers`. Unknown ids resolve to an
//! empty string, so the long listing keeps its column layout.

#[cfg(unix)]
pub fn user_name(uid: u32) -> String {
    uzers::get_user_by_uid(uid)
        .map(|u| u.name().to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(unix)]
pub fn group_name(gid: u32) -> String {
    uzers::get_group_by_gid(gid)
        .map(|g| g.name().to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(not(unix))]
pub fn user_name(_uid: u32) -> String {
    String::new()
}

#[cfg(not(unix))]
pub fn group_name(_gid: u32) -> String {
    String::new()
}
