//! Periodic refresh with cooperative teardown.
//!
//! Views that poll (the home view re-fetches weather every half hour) own a
//! [`RefreshHandle`]; dropping it cancels the loop, so no tick can fire after
//! the owning view is gone.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::WeatherClient;
use crate::types::{WeatherBundle, WeatherError};

/// Handle to a running refresh loop. Cancelled explicitly or on drop.
pub struct RefreshHandle {
    token: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.abort();
    }
}

/// Run `tick` immediately and then every `interval` until cancelled.
pub fn spawn_periodic<F, Fut>(interval: Duration, tick: F) -> RefreshHandle
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let token = CancellationToken::new();
    let child = token.clone();
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                () = child.cancelled() => break,
                () = tick() => {}
            }
            tokio::select! {
                () = child.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
    });
    RefreshHandle { token, task }
}

impl WeatherClient {
    /// Fetch `city_code` now and on every `interval`, delivering each result
    /// to `on_update`. The loop stops when the returned handle is cancelled
    /// or dropped.
    pub fn spawn_refresh<F>(
        &self,
        city_code: impl Into<String>,
        interval: Duration,
        on_update: F,
    ) -> RefreshHandle
    where
        F: Fn(Result<WeatherBundle, WeatherError>) + Send + Sync + 'static,
    {
        let client = self.clone();
        let city = city_code.into();
        let on_update = Arc::new(on_update);
        spawn_periodic(interval, move || {
            let client = client.clone();
            let city = city.clone();
            let on_update = Arc::clone(&on_update);
            async move {
                on_update(client.fetch(&city).await);
            }
        })
    }
}
