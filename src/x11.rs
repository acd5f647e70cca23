use crate::error::Error;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt};

const NET_WM_PID: &[u8] = b"_NET_WM_PID";

/// Resolve the PID owning the currently focused window via `_NET_WM_PID`.
///
/// Fails if no window is focused (or focus sits on the root window), or if
/// the focused window does not carry the property.
pub fn focused_window_pid() -> Result<u32, Error> {
    let (conn, screen_num) = x11rb::connect(None)?;
    let root = conn.setup().roots[screen_num].root;

    let focused_window = conn.get_input_focus()?.reply()?.focus;
    if focused_window == x11rb::NONE || focused_window == root {
        return Err(Error::NoFocus);
    }

    let pid_atom = conn.intern_atom(false, NET_WM_PID)?.reply()?.atom;

    // The PID is stored as a single 32-bit cardinal.
    let property = conn
        .get_property(false, focused_window, pid_atom, AtomEnum::CARDINAL, 0, 1)?
        .reply()?;
    property
        .value32()
        .and_then(|mut values| values.next())
        .ok_or(Error::PropertyMissing)
}
