//! Shutdown requests.

use crate::error::ServiceError;
use nix::sys::signal::{SigSet, SigmaskHow, Signal, sigprocmask};
use nix::sys::signalfd::{SfdFlags, SignalFd};
use std::fmt;
use std::os::fd::{AsFd, BorrowedFd};

/// Why the service was asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownRequest {
    /// `SIGINT`
    Interrupt,
    /// `SIGTERM`
    Terminate,
}

impl fmt::Display for ShutdownRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// A readable channel that becomes ready when shutdown is requested.
pub trait ShutdownSource: AsFd {
    /// Drain the pending notification and say what it was.
    fn acknowledge(&mut self) -> Result<ShutdownRequest, ServiceError>;
}

/// `SIGINT`/`SIGTERM` delivered through a `signalfd`.
///
/// Both signals are blocked for the process so they are only ever seen
/// through the descriptor.
pub struct SignalShutdown {
    sfd: SignalFd,
}

impl SignalShutdown {
    /// Block `SIGINT` and `SIGTERM` and open the descriptor.
    ///
    /// Call before spawning threads so they inherit the mask.
    pub fn install() -> Result<Self, ServiceError> {
        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.add(Signal::SIGTERM);

        sigprocmask(SigmaskHow::SIG_BLOCK, Some(&mask), None)?;
        let sfd = SignalFd::with_flags(&mask, SfdFlags::SFD_CLOEXEC)?;

        Ok(Self { sfd })
    }
}

impl AsFd for SignalShutdown {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.sfd.as_fd()
    }
}

impl ShutdownSource for SignalShutdown {
    fn acknowledge(&mut self) -> Result<ShutdownRequest, ServiceError> {
        let info = self.sfd.read_signal()?.ok_or(ServiceError::NoSignalPending)?;

        match info.ssi_signo {
            signo if signo == Signal::SIGINT as u32 => Ok(ShutdownRequest::Interrupt),
            signo if signo == Signal::SIGTERM as u32 => Ok(ShutdownRequest::Terminate),
            signo => Err(ServiceError::UnexpectedSignal(signo)),
        }
    }
}
