//! Lifecycle management for spawned gem, bundle, rails and git commands
//!
//! A scaffolding run shells out to long-running tools (`bundle install`,
//! `rails generate`). If railyard is interrupted, those children must not
//! keep mutating the project tree behind the user's back.
//!
//! - Children are spawned in their own process group
//! - Running child PIDs are tracked in a global registry
//! - On SIGINT, SIGTERM or SIGHUP every tracked group gets SIGTERM, then
//!   SIGKILL once the grace period runs out

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

static CHILD_REGISTRY: OnceLock<Arc<Mutex<ChildRegistry>>> = OnceLock::new();

/// Grace period granted to children when railyard receives a signal
pub const SIGNAL_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// Registry tracking all running child commands
#[derive(Debug, Default)]
pub struct ChildRegistry {
    pids: HashSet<u32>,
    cleanup_initiated: bool,
}

impl ChildRegistry {
    /// Get or create the global child registry
    pub fn global() -> Arc<Mutex<ChildRegistry>> {
        CHILD_REGISTRY
            .get_or_init(|| Arc::new(Mutex::new(ChildRegistry::default())))
            .clone()
    }

    pub fn register(&mut self, pid: u32) {
        self.pids.insert(pid);
        debug!("Registered child process PID {}", pid);
    }

    pub fn unregister(&mut self, pid: u32) {
        self.pids.remove(&pid);
        debug!("Unregistered child process PID {}", pid);
    }

    pub fn count(&self) -> usize {
        self.pids.len()
    }

    /// Terminate all tracked child process groups.
    ///
    /// Sends SIGTERM first, waits up to `grace_period`, then SIGKILL.
    /// Only the first call does anything.
    pub fn terminate_all(&mut self, grace_period: Duration) {
        if self.cleanup_initiated {
            debug!("Cleanup already initiated, skipping");
            return;
        }
        self.cleanup_initiated = true;

        if self.pids.is_empty() {
            debug!("No child processes to terminate");
            return;
        }

        info!("Terminating {} child process(es)...", self.pids.len());

        let targets: Vec<u32> = self.pids.iter().copied().collect();
        for &pid in &targets {
            if let Err(e) = send_signal_to_group(pid, Signal::SIGTERM) {
                warn!("Failed to send SIGTERM to process group {}: {}", pid, e);
                if let Err(e2) = send_signal(pid, Signal::SIGTERM) {
                    warn!("Failed to send SIGTERM to PID {}: {}", pid, e2);
                }
            }
        }

        let start = Instant::now();
        while start.elapsed() < grace_period {
            if targets.iter().all(|&pid| !is_process_alive(pid)) {
                info!("All child processes terminated gracefully");
                self.pids.clear();
                return;
            }
            std::thread::sleep(Duration::from_millis(100));
        }

        for &pid in &targets {
            if is_process_alive(pid) {
                warn!("Process group {} did not terminate, sending SIGKILL", pid);
                if let Err(e) = send_signal_to_group(pid, Signal::SIGKILL) {
                    error!("Failed to send SIGKILL to process group {}: {}", pid, e);
                    let _ = send_signal(pid, Signal::SIGKILL);
                }
            }
        }

        self.pids.clear();
        info!("Child process cleanup complete");
    }
}

fn send_signal(pid: u32, signal: Signal) -> Result<(), nix::Error> {
    signal::kill(Pid::from_raw(pid as i32), signal)
}

/// Negative PID addresses the whole group, so `bundle`'s own children
/// receive the signal too.
fn send_signal_to_group(pgid: u32, signal: Signal) -> Result<(), nix::Error> {
    signal::kill(Pid::from_raw(-(pgid as i32)), signal)
}

/// True if the process exists and is neither a zombie nor dead
fn is_process_alive(pid: u32) -> bool {
    if signal::kill(Pid::from_raw(pid as i32), None).is_err() {
        return false;
    }

    if let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        let fields: Vec<&str> = stat.split_whitespace().collect();
        if fields.len() > 2 {
            return !matches!(fields[2], "Z" | "X");
        }
    }

    true
}

/// Install handlers for SIGINT, SIGTERM and SIGHUP.
///
/// On delivery, tracked children are terminated and the process exits with
/// `128 + signal`. Call once at program start.
pub fn init_signal_handlers() -> Result<(), std::io::Error> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;

    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let signal_name = match sig {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => "UNKNOWN",
            };
            warn!("Received {}, stopping scaffolding run", signal_name);

            if let Ok(mut registry) = ChildRegistry::global().lock() {
                registry.terminate_all(SIGNAL_GRACE_PERIOD);
            }

            std::process::exit(128 + sig);
        }
    });

    Ok(())
}

/// Extension trait for `std::process::Command` to set up process groups
pub trait CommandProcessGroup {
    /// Run the command as the leader of a new process group
    fn in_new_process_group(&mut self) -> &mut Self;
}

impl CommandProcessGroup for std::process::Command {
    fn in_new_process_group(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;

        unsafe {
            self.pre_exec(|| {
                nix::unistd::setpgid(Pid::from_raw(0), Pid::from_raw(0))
                    .map_err(std::io::Error::other)?;

                set_parent_death_signal()
            });
        }
        self
    }
}

/// Child dies with us even if we are SIGKILLed
#[cfg(target_os = "linux")]
fn set_parent_death_signal() -> std::io::Result<()> {
    if unsafe { nix::libc::prctl(nix::libc::PR_SET_PDEATHSIG, nix::libc::SIGTERM) } == -1 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn set_parent_death_signal() -> std::io::Result<()> {
    Ok(())
}
