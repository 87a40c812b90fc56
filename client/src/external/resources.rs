//! Generic CRUD over the plain REST resources

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ListResponse;

use super::HttpApiClient;
use crate::error::ClientResult;

/// List/detail/mutate resources exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Vouchers,
    Boosts,
    Badges,
    Notifications,
    Sessions,
    Invoices,
    Orders,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Vouchers => "vouchers",
            Resource::Boosts => "boosts",
            Resource::Badges => "badges",
            Resource::Notifications => "notifications",
            Resource::Sessions => "sessions",
            Resource::Invoices => "invoices",
            Resource::Orders => "orders",
        }
    }

    fn collection(&self) -> String {
        format!("{}/", self.path())
    }

    fn item(&self, id: i64) -> String {
        format!("{}/{}", self.path(), id)
    }
}

impl HttpApiClient {
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> ClientResult<Vec<T>> {
        let response: ListResponse<T> = self
            .send(self.request(Method::GET, &resource.collection()))
            .await?;
        Ok(response.into_items())
    }

    pub async fn get<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> ClientResult<T> {
        self.send(self.request(Method::GET, &resource.item(id)))
            .await
    }

    pub async fn create<B, T>(&self, resource: Resource, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, &resource.collection(), body)
            .await
    }

    pub async fn update<B, T>(&self, resource: Resource, id: i64, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, &resource.item(id), body).await
    }

    pub async fn delete(&self, resource: Resource, id: i64) -> ClientResult<()> {
        tracing::info!("Deleting {} {}", resource.path(), id);
        self.send_empty(self.request(Method::DELETE, &resource.item(id)))
            .await
    }
}
