//! The reqres checks, one request and one set of assertions each.

use crate::check::{CheckFailure, expect_field, expect_field_eq, expect_no_field, expect_status};
use crate::fixture::UserFixture;
use reqres_client::{Credentials, ListUsersQuery, NewUser, ReqresClient, UserId};
use serde_json::{Value, json};
use std::fmt;

pub const EXISTING_ID: u64 = 2;
pub const MISSING_ID: u64 = 999_999;
pub const LOGIN_EMAIL: &str = "eve.holt@reqres.in";
pub const LOGIN_PASSWORD: &str = "cityslicka";

/// Name and job of the wrong JSON types.
fn invalid_user_payload() -> Value {
    json!({"name": 123, "job": null})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Positive,
    Negative,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Positive => write!(f, "positive"),
            CheckKind::Negative => write!(f, "negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    ListUsers,
    ListUsersPageTwo,
    GetSingleUser,
    GetMissingUser,
    CreateUserInvalidData,
    UpdateUser,
    UpdateUserInvalidData,
    DeleteUser,
    DeleteMissingUser,
    ListUsersWithDelay,
    RegisterMissingPassword,
    Login,
    LoginMissingPassword,
    ListUnknownResources,
    GetSingleUnknownResource,
    GetMissingUnknownResource,
    CreateUserWithoutJob,
    PartialUpdateUser,
}

impl Case {
    pub const ALL: [Case; 18] = [
        Case::ListUsers,
        Case::ListUsersPageTwo,
        Case::GetSingleUser,
        Case::GetMissingUser,
        Case::CreateUserInvalidData,
        Case::UpdateUser,
        Case::UpdateUserInvalidData,
        Case::DeleteUser,
        Case::DeleteMissingUser,
        Case::ListUsersWithDelay,
        Case::RegisterMissingPassword,
        Case::Login,
        Case::LoginMissingPassword,
        Case::ListUnknownResources,
        Case::GetSingleUnknownResource,
        Case::GetMissingUnknownResource,
        Case::CreateUserWithoutJob,
        Case::PartialUpdateUser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::ListUsers => "list_users",
            Case::ListUsersPageTwo => "list_users_page_2",
            Case::GetSingleUser => "get_single_user",
            Case::GetMissingUser => "get_missing_user",
            Case::CreateUserInvalidData => "create_user_invalid_data",
            Case::UpdateUser => "update_user",
            Case::UpdateUserInvalidData => "update_user_invalid_data",
            Case::DeleteUser => "delete_user",
            Case::DeleteMissingUser => "delete_missing_user",
            Case::ListUsersWithDelay => "list_users_with_delay",
            Case::RegisterMissingPassword => "register_missing_password",
            Case::Login => "login",
            Case::LoginMissingPassword => "login_missing_password",
            Case::ListUnknownResources => "list_unknown_resources",
            Case::GetSingleUnknownResource => "get_single_unknown_resource",
            Case::GetMissingUnknownResource => "get_missing_unknown_resource",
            Case::CreateUserWithoutJob => "create_user_without_job",
            Case::PartialUpdateUser => "partial_update_user",
        }
    }

    pub fn kind(self) -> CheckKind {
        match self {
            Case::GetMissingUser
            | Case::CreateUserInvalidData
            | Case::UpdateUserInvalidData
            | Case::DeleteMissingUser
            | Case::RegisterMissingPassword
            | Case::LoginMissingPassword
            | Case::GetMissingUnknownResource => CheckKind::Negative,
            _ => CheckKind::Positive,
        }
    }

    pub fn uses_fixture(self) -> bool {
        matches!(
            self,
            Case::UpdateUser
                | Case::UpdateUserInvalidData
                | Case::DeleteUser
                | Case::PartialUpdateUser
        )
    }

    pub async fn run(self, client: &ReqresClient) -> Result<(), CheckFailure> {
        match self {
            Case::ListUsers => list_users(client).await,
            Case::ListUsersPageTwo => list_users_page_two(client).await,
            Case::GetSingleUser => get_single_user(client).await,
            Case::GetMissingUser => get_missing_user(client).await,
            Case::CreateUserInvalidData => create_user_invalid_data(client).await,
            Case::UpdateUser => update_user(client).await,
            Case::UpdateUserInvalidData => update_user_invalid_data(client).await,
            Case::DeleteUser => delete_user(client).await,
            Case::DeleteMissingUser => delete_missing_user(client).await,
            Case::ListUsersWithDelay => list_users_with_delay(client).await,
            Case::RegisterMissingPassword => register_missing_password(client).await,
            Case::Login => login(client).await,
            Case::LoginMissingPassword => login_missing_password(client).await,
            Case::ListUnknownResources => list_unknown_resources(client).await,
            Case::GetSingleUnknownResource => get_single_unknown_resource(client).await,
            Case::GetMissingUnknownResource => get_missing_unknown_resource(client).await,
            Case::CreateUserWithoutJob => create_user_without_job(client).await,
            Case::PartialUpdateUser => partial_update_user(client).await,
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// USERS COLLECTION
// =============================================================================

pub async fn list_users(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.list_users(ListUsersQuery::default()).await?;
    expect_status(&response, &[200])?;
    expect_field(&response, "data")?;
    Ok(())
}

pub async fn list_users_page_two(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.list_users(ListUsersQuery::page(2)).await?;
    expect_status(&response, &[200])?;
    expect_field_eq(&response, "page", 2)
}

pub async fn list_users_with_delay(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.list_users(ListUsersQuery::delay(3)).await?;
    expect_status(&response, &[200])
}

pub async fn create_user_invalid_data(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.create_user(&invalid_user_payload()).await?;
    expect_status(&response, &[400, 422])
}

pub async fn create_user_without_job(client: &ReqresClient) -> Result<(), CheckFailure> {
    let payload = NewUser::without_job("morpheus");
    let response = client.create_user(&payload).await?;
    expect_status(&response, &[201])?;
    expect_field_eq(&response, "name", payload.name.as_str())?;
    expect_no_field(&response, "job")
}

// =============================================================================
// SINGLE USER
// =============================================================================

pub async fn get_single_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.get_user(&UserId::from(EXISTING_ID)).await?;
    expect_status(&response, &[200])?;
    expect_field_eq(&response, "data.id", EXISTING_ID)
}

pub async fn get_missing_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.get_user(&UserId::from(MISSING_ID)).await?;
    expect_status(&response, &[404])
}

pub async fn update_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    UserFixture::scope(client, |user_id| async move {
        let payload = NewUser::new("updateduser", "updatedjob");
        let response = client.update_user(&user_id, &payload).await?;
        expect_status(&response, &[200])?;
        expect_field_eq(&response, "name", payload.name.as_str())?;
        expect_field_eq(&response, "job", payload.job.as_deref())
    })
    .await
}

pub async fn update_user_invalid_data(client: &ReqresClient) -> Result<(), CheckFailure> {
    UserFixture::scope(client, |user_id| async move {
        let response = client
            .update_user(&user_id, &invalid_user_payload())
            .await?;
        expect_status(&response, &[400, 422])
    })
    .await
}

pub async fn partial_update_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    UserFixture::scope(client, |user_id| async move {
        let payload = json!({"name": "partialupdate"});
        let response = client.patch_user(&user_id, &payload).await?;
        expect_status(&response, &[200])?;
        expect_field_eq(&response, "name", "partialupdate")
    })
    .await
}

pub async fn delete_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    UserFixture::scope(client, |user_id| async move {
        let response = client.delete_user(&user_id).await?;
        expect_status(&response, &[204])
    })
    .await
}

pub async fn delete_missing_user(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.delete_user(&UserId::from(MISSING_ID)).await?;
    expect_status(&response, &[204, 404])
}

// =============================================================================
// REGISTRATION AND LOGIN
// =============================================================================

pub async fn register_missing_password(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client
        .register(&Credentials::email_only(LOGIN_EMAIL))
        .await?;
    expect_status(&response, &[400])?;
    expect_field(&response, "error")?;
    Ok(())
}

pub async fn login(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client
        .login(&Credentials::new(LOGIN_EMAIL, LOGIN_PASSWORD))
        .await?;
    expect_status(&response, &[200])?;
    expect_field(&response, "token")?;
    Ok(())
}

pub async fn login_missing_password(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.login(&Credentials::email_only(LOGIN_EMAIL)).await?;
    expect_status(&response, &[400])?;
    expect_field(&response, "error")?;
    Ok(())
}

// =============================================================================
// UNKNOWN RESOURCES
// =============================================================================

pub async fn list_unknown_resources(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.list_resources().await?;
    expect_status(&response, &[200])?;
    expect_field(&response, "data")?;
    Ok(())
}

pub async fn get_single_unknown_resource(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.get_resource(EXISTING_ID).await?;
    expect_status(&response, &[200])?;
    expect_field_eq(&response, "data.id", EXISTING_ID)
}

pub async fn get_missing_unknown_resource(client: &ReqresClient) -> Result<(), CheckFailure> {
    let response = client.get_resource(MISSING_ID).await?;
    expect_status(&response, &[404])
}
