//! Shop create/update: the company and location fields are each satisfied
//! by selecting an existing resource or inline-creating one, and the shop
//! request carries the resolved ids.

use shared::{
    domain::{CompanyId, LocationId, ShopId},
    protocol::{CreateCompanyRequest, CreateLocationRequest, ShopRequest, ShopSummary},
};

use crate::{
    create_or_select::CreateOrSelect, error::ClientError, AdminClient, ClientEvent,
};

const COMPANY_DESCRIPTION_MAX: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct CompanyDraft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct LocationDraft {
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy)]
enum ShopTarget {
    Create,
    Update(ShopId),
}

pub struct ShopForm {
    target: ShopTarget,
    pub name: String,
    pub company: CreateOrSelect<CompanyId, CompanyDraft>,
    pub location: CreateOrSelect<LocationId, LocationDraft>,
}

impl ShopForm {
    pub fn create() -> Self {
        Self {
            target: ShopTarget::Create,
            name: String::new(),
            company: CreateOrSelect::selecting(None, CompanyDraft::default()),
            location: CreateOrSelect::selecting(None, LocationDraft::default()),
        }
    }

    /// Prefills from the fetched shop; both fields start in select mode
    /// pointing at the shop's current company and location.
    pub fn update(shop: &ShopSummary) -> Self {
        Self {
            target: ShopTarget::Update(shop.id),
            name: shop.name.clone(),
            company: CreateOrSelect::selecting(Some(shop.company.id), CompanyDraft::default()),
            location: CreateOrSelect::selecting(Some(shop.location.id), LocationDraft::default()),
        }
    }

    /// Resolves both relation fields, inline-creating where the field is
    /// in create mode, then issues the shop request carrying the ids. A
    /// failed inline create aborts the submit so the shop request never
    /// fires with a stale id.
    pub async fn submit(&self, client: &AdminClient) -> Result<(), ClientError> {
        self.validate()?;
        let company_id = self.resolve_company(client).await?;
        let location_id = self.resolve_location(client).await?;
        let request = ShopRequest {
            name: self.name.trim().to_string(),
            company_id,
            location_id,
        };
        let result = match self.target {
            ShopTarget::Create => client.create_shop(&request).await,
            ShopTarget::Update(shop_id) => client.update_shop(shop_id, &request).await,
        };
        client.notify(ClientEvent::ShopsChanged);
        result.map(|_| ())
    }

    async fn resolve_company(&self, client: &AdminClient) -> Result<CompanyId, ClientError> {
        if self.company.use_existing() {
            return self.company.selected_id("company");
        }
        let draft = &self.company.draft;
        let created = client
            .create_company(&CreateCompanyRequest {
                name: draft.name.trim().to_string(),
                description: draft.description.trim().to_string(),
            })
            .await?;
        Ok(created.company_id)
    }

    async fn resolve_location(&self, client: &AdminClient) -> Result<LocationId, ClientError> {
        if self.location.use_existing() {
            return self.location.selected_id("location");
        }
        let draft = &self.location.draft;
        let created = client
            .create_location(&CreateLocationRequest {
                address: draft.address.trim().to_string(),
                zip_code: draft.zip_code.trim().to_string(),
                city: draft.city.trim().to_string(),
                country: draft.country.trim().to_string(),
            })
            .await?;
        Ok(created.location_id)
    }

    /// Only the active mode's fields are validated; the inactive sub-form
    /// may hold anything.
    fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("shop name is required"));
        }
        if !self.company.use_existing() {
            let draft = &self.company.draft;
            if draft.name.trim().is_empty() {
                return Err(ClientError::validation("company name is required"));
            }
            if draft.description.trim().is_empty() {
                return Err(ClientError::validation("company description is required"));
            }
            if draft.description.chars().count() > COMPANY_DESCRIPTION_MAX {
                return Err(ClientError::validation(format!(
                    "company description must be at most {COMPANY_DESCRIPTION_MAX} characters"
                )));
            }
        }
        if !self.location.use_existing() {
            let draft = &self.location.draft;
            for (value, label) in [
                (&draft.address, "address"),
                (&draft.zip_code, "zip code"),
                (&draft.city, "city"),
                (&draft.country, "country"),
            ] {
                if value.trim().is_empty() {
                    return Err(ClientError::validation(format!("location {label} is required")));
                }
            }
        }
        Ok(())
    }
}
