//! Background refresh of health and user list.
//!
//! Two independent timers, each sending its result as an [`Action`].
//! A tick never waits for the other timer and overlapping results are not
//! deduplicated; the receiver simply applies them in arrival order.

use crate::client::UsersClient;
use crate::controller::{health_action, list_action};
use crate::view::Action;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Timer periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub health: Duration,
    pub list: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            health: Duration::from_secs(30),
            list: Duration::from_secs(60),
        }
    }
}

/// Running polling tasks; aborted on [`PollingHandle::stop`] or drop
#[derive(Debug)]
pub struct PollingHandle {
    health: JoinHandle<()>,
    list: JoinHandle<()>,
}

impl PollingHandle {
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.health.is_finished() || !self.list.is_finished()
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.health.abort();
        self.list.abort();
    }
}

/// Start both timers. The first tick of each fires immediately.
///
/// A task ends on its own once the receiving side of `tx` is dropped.
pub fn spawn_polling(
    client: Arc<UsersClient>,
    tx: mpsc::Sender<Action>,
    intervals: PollIntervals,
) -> PollingHandle {
    let health = {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(intervals.health);
            loop {
                interval.tick().await;
                let action = health_action(&client).await;
                if tx.send(action).await.is_err() {
                    debug!("Health poller stopped: receiver closed");
                    break;
                }
            }
        })
    };

    let list = tokio::spawn(async move {
        let mut interval = tokio::time::interval(intervals.list);
        loop {
            interval.tick().await;
            let action = list_action(&client).await;
            if tx.send(action).await.is_err() {
                debug!("List poller stopped: receiver closed");
                break;
            }
        }
    });

    PollingHandle { health, list }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let intervals = PollIntervals::default();
        assert_eq!(intervals.health, Duration::from_secs(30));
        assert_eq!(intervals.list, Duration::from_secs(60));
    }
}
