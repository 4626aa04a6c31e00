use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    CompanyId, EventGroup, EventId, EventTypeId, LocationId, RoleId, ShopId, UserId, UserStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub role_id: RoleId,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeSummary {
    pub id: EventTypeId,
    pub name: String,
}

/// Shop reference as embedded in a user record; `None` means the user is
/// not assigned to any shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRef {
    pub id: ShopId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    #[serde(default)]
    pub roles: Vec<RoleSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<ShopRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub description: String,
    #[serde(rename = "dateTime")]
    pub datetime: NaiveDateTime,
    #[serde(rename = "maxSlot")]
    pub max_slot: u32,
    pub group: EventGroup,
    #[serde(rename = "type")]
    pub event_type: EventTypeSummary,
    pub location: String,
    #[serde(default, rename = "users")]
    pub participants: Vec<ParticipantSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: LocationId,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSummary {
    pub id: ShopId,
    pub name: String,
    pub company: CompanySummary,
    pub location: LocationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    pub max_pages: u32,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    pub max_pages: u32,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopPage {
    pub max_pages: u32,
    pub shops: Vec<ShopSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub status: UserStatus,
    /// Primary role; additional roles are attached through relation
    /// requests after the user exists.
    pub role_id: RoleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Omitted to keep the stored password unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: UserStatus,
    pub role_id: RoleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "dateTime")]
    pub datetime: NaiveDateTime,
    #[serde(rename = "maxSlot")]
    pub max_slot: u32,
    pub group: EventGroup,
    pub type_id: EventTypeId,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRequest {
    pub name: String,
    pub company_id: CompanyId,
    pub location_id: LocationId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocationRequest {
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub message: String,
    /// Absent when creation failed server-side; no role can be attached
    /// without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCompanyResponse {
    pub company_id: CompanyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedLocationResponse {
    pub location_id: LocationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_status_is_integer_coded() {
        let json = serde_json::to_value(UserStatus::Active).expect("encode");
        assert_eq!(json, serde_json::json!(1));
        let decoded: UserStatus = serde_json::from_value(serde_json::json!(0)).expect("decode");
        assert_eq!(decoded, UserStatus::Waiting);
    }

    #[test]
    fn event_summary_decodes_wire_names() {
        let raw = serde_json::json!({
            "id": 3,
            "title": "Food drive",
            "description": "Quarterly collection",
            "dateTime": "2024-03-20T10:00:00",
            "maxSlot": 30,
            "group": 2,
            "type": {"id": 1, "name": "Collection"},
            "location": "Warehouse B",
            "users": [{"id": 5, "email": "alice@example.com"}]
        });
        let event: EventSummary = serde_json::from_value(raw).expect("decode");
        assert_eq!(event.max_slot, 30);
        assert_eq!(event.group, crate::domain::EventGroup::Event);
        assert_eq!(event.participants.len(), 1);
    }

    #[test]
    fn update_request_omits_unchanged_password() {
        let request = UpdateUserRequest {
            email: "a@b.org".into(),
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            phone: "123456".into(),
            password: None,
            status: UserStatus::Active,
            role_id: RoleId(2),
        };
        let json = serde_json::to_value(&request).expect("encode");
        assert!(json.get("password").is_none());
    }
}
