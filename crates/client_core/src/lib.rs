//! Typed client for the charity administration backend. Owns the fetch
//! adapter, the authenticated session and the per-entity operations the
//! console's list views and form controllers are built on.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{EventId, RoleId, ShopId, UserId},
    protocol::{
        CompanySummary, CreateCompanyRequest, CreateLocationRequest, CreateUserRequest,
        CreatedCompanyResponse, CreatedLocationResponse, CreatedUserResponse, EventPage,
        EventRequest, EventSummary, EventTypeSummary, LocationSummary, LoginRequest,
        LoginResponse, MessageResponse, RoleSummary, ShopPage, ShopRequest, ShopSummary,
        UpdateUserRequest, UserPage, UserSummary,
    },
};
use tokio::sync::{broadcast, RwLock};
use tracing::info;

pub mod create_or_select;
pub mod error;
pub mod forms;
pub mod http;
pub mod list;
pub mod modal;
pub mod reconcile;

pub use create_or_select::{CreateOrSelect, FieldMode};
pub use error::ClientError;
pub use list::{ListController, PageItem, PageOf, PageSource, PageWindow};
pub use modal::ActiveModal;
pub use reconcile::{SetDraft, SubmitPlan};

use http::Http;

/// Notifications list views subscribe to. A change event means "refetch:
/// server state may have moved", and it is sent after partial failures
/// too, so displayed state converges on server reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    UsersChanged,
    EventsChanged,
    ShopsChanged,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: UserId,
}

pub struct AdminClient {
    http: Http,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<ClientEvent>,
}

impl AdminClient {
    pub fn new(base_url: &str) -> Result<Arc<Self>, ClientError> {
        let (events, _) = broadcast::channel(64);
        Ok(Arc::new(Self {
            http: Http::new(base_url)?,
            session: RwLock::new(None),
            events,
        }))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    /// Exchanges credentials for a bearer token used by every later call.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, ClientError> {
        let response: LoginResponse = self
            .http
            .post_json(
                "/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        self.http.set_bearer(&response.token).await;
        *self.session.write().await = Some(Session {
            user_id: response.user_id,
        });
        info!(user_id = response.user_id.0, "logged in");
        Ok(response.user_id)
    }

    pub async fn session_user(&self) -> Result<UserId, ClientError> {
        self.session
            .read()
            .await
            .map(|session| session.user_id)
            .ok_or(ClientError::NotLoggedIn)
    }

    // --- users ---

    pub async fn get_user(&self, id: UserId) -> Result<UserSummary, ClientError> {
        self.http.get_json(&format!("/user/{}", id.0)).await
    }

    pub async fn list_users(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<UserPage, ClientError> {
        self.http.get_json(&paged_path("user", page, search)).await
    }

    pub async fn list_roles(&self) -> Result<Vec<RoleSummary>, ClientError> {
        self.http.get_json("/role").await
    }

    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<CreatedUserResponse, ClientError> {
        self.http.post_json("/user", request).await
    }

    pub async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.http.put_json(&format!("/user/{}", id.0), request).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<MessageResponse, ClientError> {
        self.http.delete(&format!("/user/{}", id.0)).await
    }

    pub async fn attach_role(
        &self,
        user: UserId,
        role: RoleId,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .post_empty(&format!("/user/{}/role/{}", user.0, role.0))
            .await
    }

    pub async fn detach_role(
        &self,
        user: UserId,
        role: RoleId,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .delete(&format!("/user/{}/role/{}", user.0, role.0))
            .await
    }

    // --- events ---

    pub async fn list_events(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<EventPage, ClientError> {
        self.http.get_json(&paged_path("event", page, search)).await
    }

    pub async fn get_event(&self, id: EventId) -> Result<EventSummary, ClientError> {
        self.http.get_json(&format!("/event/{}", id.0)).await
    }

    pub async fn list_event_types(&self) -> Result<Vec<EventTypeSummary>, ClientError> {
        self.http.get_json("/type").await
    }

    pub async fn create_event(&self, request: &EventRequest) -> Result<MessageResponse, ClientError> {
        self.http.post_json("/event", request).await
    }

    pub async fn update_event(
        &self,
        id: EventId,
        request: &EventRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.http.put_json(&format!("/event/{}", id.0), request).await
    }

    pub async fn delete_event(&self, id: EventId) -> Result<MessageResponse, ClientError> {
        self.http.delete(&format!("/event/{}", id.0)).await
    }

    pub async fn join_event(
        &self,
        user: UserId,
        event: EventId,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .post_empty(&format!("/user/{}/event/{}", user.0, event.0))
            .await
    }

    pub async fn leave_event(
        &self,
        user: UserId,
        event: EventId,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .delete(&format!("/user/{}/event/{}", user.0, event.0))
            .await
    }

    // --- shops ---

    pub async fn list_shops(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<ShopPage, ClientError> {
        self.http.get_json(&paged_path("shop", page, search)).await
    }

    pub async fn create_shop(&self, request: &ShopRequest) -> Result<MessageResponse, ClientError> {
        self.http.post_json("/shop", request).await
    }

    pub async fn update_shop(
        &self,
        id: ShopId,
        request: &ShopRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.http.put_json(&format!("/shop/{}", id.0), request).await
    }

    pub async fn delete_shop(&self, id: ShopId) -> Result<MessageResponse, ClientError> {
        self.http.delete(&format!("/shop/{}", id.0)).await
    }

    pub async fn assign_user_to_shop(
        &self,
        user: UserId,
        shop: ShopId,
    ) -> Result<MessageResponse, ClientError> {
        self.http
            .post_empty(&format!("/user/{}/shop/{}", user.0, shop.0))
            .await
    }

    /// Users not yet assigned to any shop, offered by the assignment
    /// modal's select.
    pub async fn unassigned_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let users: Vec<UserSummary> = self.http.get_json("/user").await?;
        Ok(users.into_iter().filter(|user| user.shop.is_none()).collect())
    }

    // --- companies & locations ---

    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, ClientError> {
        self.http.get_json("/company").await
    }

    pub async fn list_locations(&self) -> Result<Vec<LocationSummary>, ClientError> {
        self.http.get_json("/location").await
    }

    pub async fn create_company(
        &self,
        request: &CreateCompanyRequest,
    ) -> Result<CreatedCompanyResponse, ClientError> {
        self.http.post_json("/company", request).await
    }

    pub async fn create_location(
        &self,
        request: &CreateLocationRequest,
    ) -> Result<CreatedLocationResponse, ClientError> {
        self.http.post_json("/location", request).await
    }

    // --- pagers ---

    pub fn user_pager(self: &Arc<Self>) -> UserPager {
        UserPager {
            client: Arc::clone(self),
        }
    }

    pub fn event_pager(self: &Arc<Self>) -> EventPager {
        EventPager {
            client: Arc::clone(self),
        }
    }

    pub fn shop_pager(self: &Arc<Self>) -> ShopPager {
        ShopPager {
            client: Arc::clone(self),
        }
    }
}

fn paged_path(entity: &str, page: u32, search: Option<&str>) -> String {
    match search {
        Some(term) if !term.is_empty() => format!("/{entity}/page/{page}/search/{term}"),
        _ => format!("/{entity}/page/{page}"),
    }
}

pub struct UserPager {
    client: Arc<AdminClient>,
}

#[async_trait]
impl PageSource for UserPager {
    type Item = UserSummary;
    type Id = UserId;

    async fn fetch_page(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<PageOf<UserSummary>, ClientError> {
        let fetched = self.client.list_users(page, search).await?;
        Ok(PageOf {
            max_pages: fetched.max_pages,
            items: fetched.users,
        })
    }

    async fn delete(&self, id: UserId) -> Result<(), ClientError> {
        self.client.delete_user(id).await.map(|_| ())
    }
}

pub struct EventPager {
    client: Arc<AdminClient>,
}

#[async_trait]
impl PageSource for EventPager {
    type Item = EventSummary;
    type Id = EventId;

    async fn fetch_page(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<PageOf<EventSummary>, ClientError> {
        let fetched = self.client.list_events(page, search).await?;
        Ok(PageOf {
            max_pages: fetched.max_pages,
            items: fetched.events,
        })
    }

    async fn delete(&self, id: EventId) -> Result<(), ClientError> {
        self.client.delete_event(id).await.map(|_| ())
    }
}

pub struct ShopPager {
    client: Arc<AdminClient>,
}

#[async_trait]
impl PageSource for ShopPager {
    type Item = ShopSummary;
    type Id = ShopId;

    async fn fetch_page(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<PageOf<ShopSummary>, ClientError> {
        let fetched = self.client.list_shops(page, search).await?;
        Ok(PageOf {
            max_pages: fetched.max_pages,
            items: fetched.shops,
        })
    }

    async fn delete(&self, id: ShopId) -> Result<(), ClientError> {
        self.client.delete_shop(id).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
