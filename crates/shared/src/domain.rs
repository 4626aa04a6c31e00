use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(RoleId);
id_newtype!(EventId);
id_newtype!(EventTypeId);
id_newtype!(ShopId);
id_newtype!(CompanyId);
id_newtype!(LocationId);
id_newtype!(BeneficiaryId);

/// Account status as stored by the backend: 0 = waiting for validation,
/// 1 = validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum UserStatus {
    Waiting,
    Active,
}

impl From<UserStatus> for u8 {
    fn from(value: UserStatus) -> Self {
        match value {
            UserStatus::Waiting => 0,
            UserStatus::Active => 1,
        }
    }
}

impl TryFrom<u8> for UserStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Waiting),
            1 => Ok(Self::Active),
            other => Err(format!("invalid user status code {other}")),
        }
    }
}

/// Event grouping, integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EventGroup {
    Service,
    Activity,
    Event,
}

impl From<EventGroup> for u8 {
    fn from(value: EventGroup) -> Self {
        match value {
            EventGroup::Service => 0,
            EventGroup::Activity => 1,
            EventGroup::Event => 2,
        }
    }
}

impl TryFrom<u8> for EventGroup {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Service),
            1 => Ok(Self::Activity),
            2 => Ok(Self::Event),
            other => Err(format!("invalid event group code {other}")),
        }
    }
}
