//! User create/update orchestration: one primary request carrying the
//! designated role, then awaited relation attach/detach calls. Nothing is
//! rolled back on partial failure; the list view is told to refetch so it
//! shows whatever the server now holds.

use shared::{
    domain::{RoleId, UserId, UserStatus},
    protocol::{CreateUserRequest, RoleSummary, UpdateUserRequest},
};
use tracing::warn;

use crate::{error::ClientError, reconcile::SetDraft, AdminClient, ClientEvent};

/// Scalar fields edited in the user modal.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Left empty on update to keep the stored password.
    pub password: String,
    pub status: UserStatus,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            password: String::new(),
            status: UserStatus::Waiting,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FormTarget {
    Create,
    Update(UserId),
}

pub struct UserForm {
    target: FormTarget,
    pub draft: UserDraft,
    pub roles: SetDraft<RoleId>,
    available: Vec<RoleSummary>,
}

impl UserForm {
    /// Creation form; the first known role starts selected so the
    /// minimum-one invariant holds from the first toggle.
    pub async fn open_create(client: &AdminClient) -> Result<Self, ClientError> {
        let available = client.list_roles().await?;
        let mut roles = SetDraft::empty(1);
        if let Some(first) = available.first() {
            roles.toggle(first.role_id);
        }
        Ok(Self {
            target: FormTarget::Create,
            draft: UserDraft::default(),
            roles,
            available,
        })
    }

    /// Update form; the current role set is fetched fresh on every open,
    /// never cached across opens. Roles the server no longer offers are
    /// dropped from the draft.
    pub async fn open_update(client: &AdminClient, user_id: UserId) -> Result<Self, ClientError> {
        let available = client.list_roles().await?;
        let user = client.get_user(user_id).await?;
        let current: Vec<RoleId> = user
            .roles
            .iter()
            .map(|role| role.role_id)
            .filter(|id| available.iter().any(|offered| offered.role_id == *id))
            .collect();
        let draft = UserDraft {
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            password: String::new(),
            status: user.status,
        };
        Ok(Self {
            target: FormTarget::Update(user_id),
            draft,
            roles: SetDraft::from_current(current, 1),
            available,
        })
    }

    pub fn available_roles(&self) -> &[RoleSummary] {
        &self.available
    }

    pub fn toggle_role(&mut self, role_id: RoleId) -> bool {
        self.roles.toggle(role_id)
    }

    /// Validates, then issues the primary request followed by every
    /// planned attach/detach, each awaited in order. The first error is
    /// returned after the whole plan ran; already-applied relation changes
    /// stay applied.
    pub async fn submit(&self, client: &AdminClient) -> Result<(), ClientError> {
        self.validate()?;
        let primary = self
            .roles
            .primary()
            .ok_or_else(|| ClientError::validation("at least one role must be selected"))?;
        match self.target {
            FormTarget::Create => self.submit_create(client, primary).await,
            FormTarget::Update(user_id) => self.submit_update(client, user_id, primary).await,
        }
    }

    async fn submit_create(
        &self,
        client: &AdminClient,
        primary: RoleId,
    ) -> Result<(), ClientError> {
        let plan = self.roles.plan_create();
        let request = CreateUserRequest {
            email: self.draft.email.trim().to_string(),
            first_name: self.draft.first_name.trim().to_string(),
            last_name: self.draft.last_name.trim().to_string(),
            phone: self.draft.phone.trim().to_string(),
            password: self.draft.password.clone(),
            status: self.draft.status,
            role_id: primary,
        };

        let created = client.create_user(&request).await?;
        let Some(user_id) = created.user_id else {
            return Err(ClientError::UnexpectedBody(created.message));
        };

        let mut first_error = None;
        for role_id in &plan.attach {
            if let Err(err) = client.attach_role(user_id, *role_id).await {
                warn!(
                    user_id = user_id.0,
                    role_id = role_id.0,
                    "role attach failed: {err}"
                );
                first_error.get_or_insert(err);
            }
        }

        client.notify(ClientEvent::UsersChanged);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn submit_update(
        &self,
        client: &AdminClient,
        user_id: UserId,
        primary: RoleId,
    ) -> Result<(), ClientError> {
        let plan = self.roles.plan_update();
        let password = self.draft.password.clone();
        let request = UpdateUserRequest {
            email: self.draft.email.trim().to_string(),
            first_name: self.draft.first_name.trim().to_string(),
            last_name: self.draft.last_name.trim().to_string(),
            phone: self.draft.phone.trim().to_string(),
            password: if password.is_empty() {
                None
            } else {
                Some(password)
            },
            status: self.draft.status,
            role_id: primary,
        };

        let mut first_error = None;
        if let Err(err) = client.update_user(user_id, &request).await {
            warn!(user_id = user_id.0, "user update failed: {err}");
            first_error.get_or_insert(err);
        }
        for role_id in &plan.attach {
            if let Err(err) = client.attach_role(user_id, *role_id).await {
                warn!(
                    user_id = user_id.0,
                    role_id = role_id.0,
                    "role attach failed: {err}"
                );
                first_error.get_or_insert(err);
            }
        }
        for role_id in &plan.detach {
            if let Err(err) = client.detach_role(user_id, *role_id).await {
                warn!(
                    user_id = user_id.0,
                    role_id = role_id.0,
                    "role detach failed: {err}"
                );
                first_error.get_or_insert(err);
            }
        }

        client.notify(ClientEvent::UsersChanged);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<(), ClientError> {
        let draft = &self.draft;
        if !is_valid_email(draft.email.trim()) {
            return Err(ClientError::validation("a valid email address is required"));
        }
        if !is_valid_name(draft.first_name.trim()) {
            return Err(ClientError::validation(
                "first name must be 1 to 30 letters",
            ));
        }
        if !is_valid_name(draft.last_name.trim()) {
            return Err(ClientError::validation("last name must be 1 to 30 letters"));
        }
        if !is_valid_phone(draft.phone.trim()) {
            return Err(ClientError::validation(
                "phone must contain at least six digits",
            ));
        }
        if draft.password.is_empty() {
            if matches!(self.target, FormTarget::Create) {
                return Err(ClientError::validation("a password is required"));
            }
        } else if !is_strong_password(&draft.password) {
            return Err(ClientError::validation(
                "password needs 8+ characters with upper, lower, digit and symbol",
            ));
        }
        Ok(())
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_valid_name(value: &str) -> bool {
    !value.is_empty()
        && value.chars().count() <= 30
        && value.chars().all(|c| c.is_alphabetic() || c == '-')
}

fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    digits.len() >= 6 && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| !c.is_ascii_alphanumeric())
}

#[cfg(test)]
#[path = "tests/user_form_tests.rs"]
mod tests;
