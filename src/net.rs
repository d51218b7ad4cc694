//! Free-port probing for the development server.

use crate::error::{KilnError, Result};
use std::net::TcpListener;

/// How many ports above the preferred one are probed before giving up.
pub const PORT_SCAN_SPAN: u16 = 100;

/// Find a free port on `host`, starting at `base`.
///
/// The preferred port is tried first; when it is taken, the next ports are
/// probed in order. The listener used for probing is dropped immediately,
/// freeing the port for the dev server that binds right after.
pub fn find_free_port(host: &str, base: u16) -> Result<u16> {
    let upper = base.saturating_add(PORT_SCAN_SPAN);

    for port in base..=upper {
        match TcpListener::bind((host, port)) {
            Ok(_listener) => return Ok(port),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => continue,
            Err(e) => {
                return Err(KilnError::PortUnavailable(format!(
                    "could not probe {}:{}: {}",
                    host, port, e
                )));
            }
        }
    }

    Err(KilnError::PortUnavailable(format!(
        "no free port on {} in {}..={}",
        host, base, upper
    )))
}
