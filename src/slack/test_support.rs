use std::{future::pending, time::Duration};

use anyhow::{anyhow, Result};
use tokio::{
    sync::{Mutex, Notify},
    time::timeout,
};

use crate::github::dispatch::{GithubRepositoryDispatch, RepositoryDispatchEvent};

use super::message::{SlackFollowUpMessage, SlackSendMessage};

const RECORDING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
enum DispatchOutcome {
    Succeed,
    Fail,
    Hang,
}

/// A dispatcher that records every event it is asked to send.
pub struct RecordingDispatcher {
    events: Mutex<Vec<RepositoryDispatchEvent>>,
    recorded: Notify,
    outcome: DispatchOutcome,
}

impl RecordingDispatcher {
    fn new(outcome: DispatchOutcome) -> Self {
        Self {
            events: Mutex::new(vec![]),
            recorded: Notify::new(),
            outcome,
        }
    }

    pub fn succeeding() -> Self {
        Self::new(DispatchOutcome::Succeed)
    }

    pub fn failing() -> Self {
        Self::new(DispatchOutcome::Fail)
    }

    /// A dispatcher whose dispatches never complete.
    pub fn hanging() -> Self {
        Self::new(DispatchOutcome::Hang)
    }

    pub async fn events(&self) -> Vec<RepositoryDispatchEvent> {
        self.events.lock().await.clone()
    }

    /// Waits until at least `count` events were recorded, panics after 5 seconds.
    pub async fn wait_for_events(&self, count: usize) -> Vec<RepositoryDispatchEvent> {
        wait_for_recorded(&self.events, &self.recorded, count).await
    }
}

impl GithubRepositoryDispatch for RecordingDispatcher {
    async fn dispatch(&self, event: &RepositoryDispatchEvent) -> Result<()> {
        self.events.lock().await.push(event.clone());
        self.recorded.notify_waiters();
        match self.outcome {
            DispatchOutcome::Succeed => Ok(()),
            DispatchOutcome::Fail => Err(anyhow!("GitHub responded with 401 Unauthorized")),
            DispatchOutcome::Hang => pending().await,
        }
    }
}

/// A messenger that records every follow-up message.
pub struct RecordingMessenger {
    messages: Mutex<Vec<SlackFollowUpMessage>>,
    recorded: Notify,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(vec![]),
            recorded: Notify::new(),
        }
    }

    pub async fn messages(&self) -> Vec<SlackFollowUpMessage> {
        self.messages.lock().await.clone()
    }

    /// Waits until at least `count` messages were recorded, panics after 5 seconds.
    pub async fn wait_for_messages(&self, count: usize) -> Vec<SlackFollowUpMessage> {
        wait_for_recorded(&self.messages, &self.recorded, count).await
    }
}

impl SlackSendMessage for RecordingMessenger {
    async fn send(&self, message: &SlackFollowUpMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        self.recorded.notify_waiters();
        Ok(())
    }
}

async fn wait_for_recorded<T: Clone>(
    recorded: &Mutex<Vec<T>>,
    changed: &Notify,
    count: usize,
) -> Vec<T> {
    let wait = async {
        loop {
            // Registered before checking so a push in between still wakes us.
            let notified = changed.notified();
            {
                let items = recorded.lock().await;
                if items.len() >= count {
                    return items.clone();
                }
            }
            notified.await;
        }
    };
    match timeout(RECORDING_TIMEOUT, wait).await {
        Ok(items) => items,
        Err(_) => panic!("Timed out waiting for {} recorded items.", count),
    }
}
