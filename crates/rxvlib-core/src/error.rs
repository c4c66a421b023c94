//! Error types for rxvlib.
//!
//! Fallible operations that touch the outside world (the serial link, the
//! command tables as seen from an integration layer) return [`Result<T>`].
//! Frame decoding is deliberately not part of this taxonomy: a malformed
//! frame is an expected event and is reported as `None` by the decoders.

/// The error type for rxvlib operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A link-level error (serial port could not be opened or configured).
    #[error("link error: {0}")]
    Link(String),

    /// A protocol-level error (unexpected frame where one was required).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The receiver did not answer before the retry budget was exhausted.
    ///
    /// This typically indicates the receiver is unplugged, the baud rate
    /// is wrong, or the null-modem wiring is swapped.
    #[error("timeout waiting for response")]
    Timeout,

    /// The command name is not in the command or format table.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// An invalid parameter was passed to a command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No link to the receiver has been established.
    #[error("not connected")]
    NotConnected,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
