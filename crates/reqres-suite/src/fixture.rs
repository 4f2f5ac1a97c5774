//! Scoped test user: created on acquire, deleted on release

use crate::check::CheckFailure;
use futures_util::FutureExt;
use reqres_client::{NewUser, ReqresClient, UserId};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

pub const FIXTURE_USER_NAME: &str = "testuser";
pub const FIXTURE_USER_JOB: &str = "tester";

/// A user that exists on the server for as long as the fixture is held.
///
/// Prefer [`UserFixture::scope`], which releases on every exit path. A
/// fixture dropped without a completed [`UserFixture::release`] deletes the
/// user before `drop` returns, even while a panic is unwinding.
pub struct UserFixture {
    client: ReqresClient,
    user_id: UserId,
    released: bool,
}

impl UserFixture {
    pub async fn acquire(client: &ReqresClient) -> Result<Self, CheckFailure> {
        let payload = NewUser::new(FIXTURE_USER_NAME, FIXTURE_USER_JOB);
        let response = client
            .create_user(&payload)
            .await
            .map_err(|e| CheckFailure::Setup {
                reason: e.to_string(),
            })?;

        if !response.is_status(201) {
            return Err(CheckFailure::Setup {
                reason: format!(
                    "Expected status code 201, but got {}",
                    response.status()
                ),
            });
        }

        let user_id = response
            .field("id")
            .and_then(UserId::from_json)
            .ok_or_else(|| CheckFailure::Setup {
                reason: format!("create response has no usable 'id': {}", response.text()),
            })?;

        debug!(user_id = %user_id, "Acquired fixture user");
        Ok(Self {
            client: client.clone(),
            user_id,
            released: false,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Deletes the user. The outcome is not checked.
    pub async fn release(mut self) {
        let outcome = self.client.delete_user(&self.user_id).await;
        // Set only once the DELETE has returned; a cancelled release falls through to `Drop`.
        self.released = true;
        match outcome {
            Ok(response) => debug!(
                user_id = %self.user_id,
                status = response.status(),
                "Released fixture user"
            ),
            Err(e) => debug!(user_id = %self.user_id, error = %e, "Fixture teardown failed"),
        }
    }

    /// Acquires a user, runs `body` with its id, then releases the user
    /// whether `body` succeeded, failed or panicked.
    pub async fn scope<F, Fut, T>(client: &ReqresClient, body: F) -> Result<T, CheckFailure>
    where
        F: FnOnce(UserId) -> Fut,
        Fut: Future<Output = Result<T, CheckFailure>>,
    {
        let fixture = Self::acquire(client).await?;
        let outcome = AssertUnwindSafe(body(fixture.user_id.clone()))
            .catch_unwind()
            .await;
        fixture.release().await;

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl Drop for UserFixture {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        warn!(user_id = %self.user_id, "Fixture user dropped without release");

        // The caller's runtime may be shutting down (a panicking test), so
        // the DELETE runs to completion on a runtime and client of its own.
        let config = self.client.config().clone();
        let user_id = self.user_id.clone();
        let teardown = std::thread::spawn(move || -> Result<u16, String> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| e.to_string())?;
            runtime.block_on(async {
                let client = ReqresClient::new(config).map_err(|e| e.to_string())?;
                let response = client
                    .delete_user(&user_id)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok::<u16, String>(response.status())
            })
        });

        match teardown.join() {
            Ok(Ok(status)) => {
                debug!(user_id = %self.user_id, status, "Released dropped fixture user")
            }
            Ok(Err(e)) => debug!(user_id = %self.user_id, error = %e, "Fixture teardown failed"),
            Err(_) => warn!(user_id = %self.user_id, "Fixture teardown thread panicked"),
        }
        self.released = true;
    }
}
