use garde::Validate;
use kernel::model::{
    account::StadiumOwner,
    id::{AccountId, StadiumId},
    stadium::Stadium,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStadiumRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    #[serde(default)]
    pub address: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStadiumRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumIdResponse {
    pub stadium_id: StadiumId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumOwnerResponse {
    pub owner_id: AccountId,
    pub owner_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumResponse {
    pub stadium_id: StadiumId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub owner: StadiumOwnerResponse,
}

impl From<Stadium> for StadiumResponse {
    fn from(value: Stadium) -> Self {
        let Stadium {
            stadium_id,
            name,
            description,
            address,
            owner: StadiumOwner {
                owner_id,
                owner_name,
            },
        } = value;
        Self {
            stadium_id,
            name,
            description,
            address,
            owner: StadiumOwnerResponse {
                owner_id,
                owner_name,
            },
        }
    }
}
