// Page data loaders.
// Composes REST calls into the data sets the house and floor views need.

use crate::api::{ApiClient, Floor, House};
use crate::error::{HauskitError, Result};

/// Data for the house detail and edit pages.
#[derive(Debug, Clone)]
pub struct HousePage {
    pub house: House,
}

/// Data for the floor view: the house plus the selected floor.
#[derive(Debug, Clone)]
pub struct FloorPage {
    pub house: House,
    pub floor: Floor,
}

/// Load the house detail page.
pub async fn load_house_page(client: &ApiClient, uuid: &str) -> Result<HousePage> {
    let house = client.get_house(uuid).await?;
    Ok(HousePage { house })
}

/// Load the floor view for one floor of a house.
pub async fn load_floor_page(
    client: &ApiClient,
    house_uuid: &str,
    floor_uuid: &str,
) -> Result<FloorPage> {
    let house = client.get_house(house_uuid).await?;
    let floor = select_floor(&house, floor_uuid)?;
    Ok(FloorPage { house, floor })
}

/// Find a floor by uuid among a house's floors.
fn select_floor(house: &House, floor_uuid: &str) -> Result<Floor> {
    house
        .floors
        .iter()
        .find(|floor| floor.uuid == floor_uuid)
        .cloned()
        .ok_or_else(|| HauskitError::FloorNotFound {
            house: house.uuid.clone(),
            floor: floor_uuid.to_string(),
        })
}
