// credit: https://github.com/microsoft/Spartan/blob/master/src/timer.rs

#[cfg(feature = "profile")]
use colored::Colorize;
#[cfg(feature = "profile")]
use core::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[cfg(feature = "profile")]
pub static CALL_DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Wall-clock timer for one phase of a rank.
///
/// The elapsed time is always measured, since the report needs it. With the `profile`
/// feature the root rank additionally prints nested, colored start/stop lines.
pub struct Timer {
    #[cfg_attr(not(feature = "profile"), allow(dead_code))]
    label: String,
    start: Instant,
    #[cfg_attr(not(feature = "profile"), allow(dead_code))]
    is_root: bool,
}

impl Timer {
    #[inline(always)]
    pub fn new(label: &str, is_root: bool) -> Self {
        #[cfg(feature = "profile")]
        {
            if is_root {
                let depth = CALL_DEPTH.fetch_add(1, Ordering::Relaxed) + 1;
                println!("{:indent$}* {}", "", label.yellow().bold(), indent = 2 * depth);
            }
        }

        Self {
            label: label.to_string(),
            start: Instant::now(),
            is_root,
        }
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the measured duration.
    #[inline(always)]
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();

        #[cfg(feature = "profile")]
        {
            if self.is_root {
                let depth = CALL_DEPTH.load(Ordering::Relaxed);
                println!(
                    "{:indent$}* {} {:?}",
                    "",
                    self.label.blue().bold(),
                    duration,
                    indent = 2 * depth
                );
                CALL_DEPTH.fetch_sub(1, Ordering::Relaxed);
            }
        }

        duration
    }

    #[inline(always)]
    pub fn print(&self, _msg: &str) {
        #[cfg(feature = "profile")]
        {
            if self.is_root {
                let depth = CALL_DEPTH.load(Ordering::Relaxed) + 1;
                println!("{:indent$}* {}", "", _msg.green().bold(), indent = 2 * depth);
            }
        }
    }
}
