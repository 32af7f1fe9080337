//! Registration and login schema

use async_graphql::{
    Context, ErrorExtensions, InputObject, Object, Result as GraphQLResult, SimpleObject,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::services::UserService;

#[derive(InputObject, Clone, Debug)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// User fields plus a freshly signed token, returned by both register
/// and login.
#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub token: String,
}

impl AuthUser {
    fn new(user: User, token: String) -> Self {
        AuthUser {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            token,
        }
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn register(
        &self,
        ctx: &Context<'_>,
        register_input: RegisterInput,
    ) -> GraphQLResult<AuthUser> {
        let users = ctx.data::<UserService>()?;

        let (user, token) = users
            .register(
                &register_input.username,
                &register_input.email,
                &register_input.password,
                &register_input.confirm_password,
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthUser::new(user, token))
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> GraphQLResult<AuthUser> {
        let users = ctx.data::<UserService>()?;

        let (user, token) = users
            .login(&username, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(AuthUser::new(user, token))
    }
}
