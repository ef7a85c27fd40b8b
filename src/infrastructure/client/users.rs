use anyhow::Result;

use super::BookReviewClient;
use crate::domain::users::{NewUser, Registration, User};

pub struct UsersClient<'a> {
    client: &'a BookReviewClient,
}

impl<'a> UsersClient<'a> {
    pub fn new(client: &'a BookReviewClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, user: &NewUser) -> Result<Registration> {
        let url = self.client.endpoint("api/auth/register")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(user)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn me(&self) -> Result<User> {
        let url = self.client.endpoint("api/auth/me")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
