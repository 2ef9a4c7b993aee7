//! Integration loop.
//!
//! Single thread, one `epoll` instance, two registered descriptors. Every
//! wakeup handles exactly one ready source; samples are processed and
//! published one at a time, so shutdown is only observed between samples.

use crate::error::ServiceError;
use crate::signal::{ShutdownRequest, ShutdownSource};
use crate::source::PositionSource;
use crate::timing::TimingContext;
use chrono_common::record::Chrono;
use chrono_shm::SnapshotWriter;
use nix::errno::Errno;
use nix::sys::epoll::{Epoll, EpollCreateFlags, EpollEvent, EpollFlags, EpollTimeout};
use tracing::{debug, info, trace};

/// `epoll` user data identifying the ready descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
enum Token {
    Gnss = 1,
    Shutdown = 2,
}

impl Token {
    fn from_data(data: u64) -> Option<Self> {
        match data {
            d if d == Self::Gnss as u64 => Some(Self::Gnss),
            d if d == Self::Shutdown as u64 => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// Counters over one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub wakeups: u64,
    pub samples: u64,
    pub crossings: u64,
}

/// Outcome of a clean shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceReport {
    pub reason: ShutdownRequest,
    pub stats: LoopStats,
    /// Last published record.
    pub last: Chrono,
}

/// The timing service: state, publication and the two input channels.
pub struct ChronoService<S, H> {
    ctx: TimingContext,
    writer: SnapshotWriter,
    source: S,
    shutdown: H,
    epoll: Epoll,
    stats: LoopStats,
}

impl<S: PositionSource, H: ShutdownSource> ChronoService<S, H> {
    /// Register both descriptors. Nothing is read until [`run`](Self::run).
    ///
    /// The position source must be pollable (tty, FIFO, socket); a regular
    /// file fails with [`ServiceError::NotPollable`].
    pub fn new(
        ctx: TimingContext,
        writer: SnapshotWriter,
        source: S,
        shutdown: H,
    ) -> Result<Self, ServiceError> {
        let epoll = Epoll::new(EpollCreateFlags::EPOLL_CLOEXEC)?;
        epoll.add(
            &shutdown,
            EpollEvent::new(EpollFlags::EPOLLIN, Token::Shutdown as u64),
        )?;
        epoll
            .add(&source, EpollEvent::new(EpollFlags::EPOLLIN, Token::Gnss as u64))
            .map_err(|e| match e {
                // epoll refuses regular files and directories.
                Errno::EPERM => ServiceError::NotPollable,
                e => e.into(),
            })?;

        Ok(Self {
            ctx,
            writer,
            source,
            shutdown,
            epoll,
            stats: LoopStats::default(),
        })
    }

    /// Timing state as of the last processed sample.
    pub fn context(&self) -> &TimingContext {
        &self.ctx
    }

    /// Block until shutdown is requested or a fatal error occurs.
    ///
    /// The snapshot region is removed when this returns, either way.
    pub fn run(mut self) -> Result<ServiceReport, ServiceError> {
        info!("Ready at {}", self.writer.path().display());

        let reason = loop {
            let token = self.wait()?;
            self.stats.wakeups += 1;

            match token {
                Token::Gnss => self.handle_positions()?,
                Token::Shutdown => break self.shutdown.acknowledge()?,
            }
        };

        info!("Got {reason}");
        info!("Shutting down ....");
        debug!(
            wakeups = self.stats.wakeups,
            samples = self.stats.samples,
            crossings = self.stats.crossings,
            "loop finished"
        );

        Ok(ServiceReport {
            reason,
            stats: self.stats,
            last: *self.ctx.chrono(),
        })
    }

    fn wait(&self) -> Result<Token, ServiceError> {
        let mut events = [EpollEvent::empty()];

        let ready = loop {
            match self.epoll.wait(&mut events, EpollTimeout::NONE) {
                Ok(n) => break n,
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if ready != 1 {
            return Err(ServiceError::UnexpectedEvent(format!("{ready} events ready")));
        }

        let event = events[0];
        let token = Token::from_data(event.data())
            .ok_or_else(|| ServiceError::UnexpectedEvent(format!("unknown token {}", event.data())))?;

        if !event.events().contains(EpollFlags::EPOLLIN) {
            return Err(ServiceError::UnexpectedEvent(format!(
                "{token:?} ready without EPOLLIN: {:?}",
                event.events()
            )));
        }

        Ok(token)
    }

    fn handle_positions(&mut self) -> Result<(), ServiceError> {
        let ctx = &mut self.ctx;
        let writer = &mut self.writer;
        let stats = &mut self.stats;

        let delivered = self.source.read_positions(&mut |sample| {
            if ctx.on_position(sample) {
                stats.crossings += 1;
            }
            writer.publish(ctx.chrono());
            stats.samples += 1;
        })?;

        trace!(delivered, "positions handled");
        Ok(())
    }
}
