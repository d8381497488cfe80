use std::fmt::{self, Display};

/// The kind of failure a reply provider ran into.
///
/// The chat core treats every kind the same way; the distinction only
/// shows up in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server could not be reached.
    Connection,
    /// The request did not finish within the configured timeout.
    Timeout,
    /// The server answered with a non-success status.
    Server,
    /// The response body was not what we expected.
    Decode,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Server => "server",
            ErrorKind::Decode => "decode",
            ErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}
